//! Integration tests for the GitHub client against a fake HTTP server.
//!
//! These tests verify request shapes, response mapping and error handling
//! of `GitHubForge` for both the REST and GraphQL APIs.

use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use gh_hydrate::core::types::{ContentSet, Discussion, Issue, Label, PullRequest};
use gh_hydrate::engine::{hydrate, Context, HydrateOptions};
use gh_hydrate::forge::github::GitHubForge;
use gh_hydrate::forge::{ForgeError, GitHubClient};

async fn setup() -> (MockServer, GitHubForge) {
    let server = MockServer::start().await;
    let forge = GitHubForge::with_api_base("test-token", "octocat", "demo", server.uri());
    (server, forge)
}

// =============================================================================
// REST
// =============================================================================

mod rest {
    use super::*;

    #[tokio::test]
    async fn create_issue_sends_labels_and_assignees() {
        let (server, forge) = setup().await;
        Mock::given(method("POST"))
            .and(path("/repos/octocat/demo/issues"))
            .and(header("authorization", "Bearer test-token"))
            .and(body_string_contains("\"labels\":[\"enhancement\",\"ui\"]"))
            .and(body_string_contains("\"assignees\":[\"octocat\"]"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "number": 12,
                "node_id": "I_kwDOA",
                "html_url": "https://github.com/octocat/demo/issues/12"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let issue = Issue {
            title: "Add dark mode".into(),
            body: "Please".into(),
            labels: ["ui".to_string(), "enhancement".to_string()]
                .into_iter()
                .collect(),
            assignees: vec!["octocat".into()],
            ..Default::default()
        };
        let created = forge.create_issue(&issue).await.unwrap();

        assert_eq!(created.node_id, "I_kwDOA");
        assert_eq!(created.number, Some(12));
    }

    #[tokio::test]
    async fn create_pr_applies_labels_through_issues_api() {
        let (server, forge) = setup().await;
        Mock::given(method("POST"))
            .and(path("/repos/octocat/demo/pulls"))
            .and(body_string_contains("\"head\":\"feature\""))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "number": 3,
                "node_id": "PR_kwDOA",
                "html_url": "https://github.com/octocat/demo/pull/3"
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/repos/octocat/demo/issues/3/labels"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"name": "demo"}])))
            .expect(1)
            .mount(&server)
            .await;

        let pr = PullRequest {
            title: "Feature".into(),
            head: "feature".into(),
            base: "main".into(),
            labels: ["demo".to_string()].into_iter().collect(),
            ..Default::default()
        };
        let created = forge.create_pr(&pr).await.unwrap();

        assert_eq!(created.node_id, "PR_kwDOA");
    }

    #[tokio::test]
    async fn pr_survives_failed_label_attach() {
        let (server, forge) = setup().await;
        Mock::given(method("POST"))
            .and(path("/repos/octocat/demo/pulls"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "number": 5,
                "node_id": "PR_5",
                "html_url": "https://github.com/octocat/demo/pull/5"
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/repos/octocat/demo/issues/5/labels"))
            .respond_with(ResponseTemplate::new(502).set_body_json(json!({"message": "Bad Gateway"})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/repos/octocat/demo/issues/5/assignees"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let pr = PullRequest {
            title: "Feature".into(),
            head: "feature".into(),
            base: "main".into(),
            labels: ["demo".to_string()].into_iter().collect(),
            assignees: vec!["octocat".into()],
            ..Default::default()
        };
        let created = forge.create_pr(&pr).await.unwrap();

        assert_eq!(created.node_id, "PR_5");
        assert_eq!(created.incomplete.len(), 1);
        assert_eq!(created.incomplete[0].step, "add labels");
        assert!(created.incomplete[0].message.contains("Bad Gateway"));
    }

    #[tokio::test]
    async fn list_issues_skips_pull_requests() {
        let (server, forge) = setup().await;
        Mock::given(method("GET"))
            .and(path("/repos/octocat/demo/issues"))
            .and(query_param("state", "all"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "node_id": "I_1",
                    "title": "Real issue",
                    "body": "text",
                    "labels": [{"name": "bug"}],
                    "assignees": []
                },
                {
                    "node_id": "PR_1",
                    "title": "A pull request",
                    "body": null,
                    "labels": [],
                    "assignees": [],
                    "pull_request": {"url": "https://api.github.com/repos/octocat/demo/pulls/1"}
                }
            ])))
            .mount(&server)
            .await;

        let issues = forge.list_issues().await.unwrap();

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].node_id, "I_1");
        assert!(issues[0].labels.contains("bug"));
    }

    #[tokio::test]
    async fn list_labels_maps_fields() {
        let (server, forge) = setup().await;
        Mock::given(method("GET"))
            .and(path("/repos/octocat/demo/labels"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"name": "bug", "color": "d73a4a", "description": "Something isn't working"},
                {"name": "wip", "color": "ededed", "description": null}
            ])))
            .mount(&server)
            .await;

        let labels = forge.list_labels().await.unwrap();

        assert_eq!(
            labels,
            vec![
                Label::new("bug", "d73a4a").with_description("Something isn't working"),
                Label::new("wip", "ededed"),
            ]
        );
    }

    #[tokio::test]
    async fn delete_label_escapes_name() {
        let (server, forge) = setup().await;
        Mock::given(method("DELETE"))
            .and(path("/repos/octocat/demo/labels/good%20first%20issue"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        forge.delete_label("good first issue").await.unwrap();
    }
}

// =============================================================================
// Error mapping
// =============================================================================

mod errors {
    use super::*;

    async fn create_label_with_status(status: u16, message: &str) -> ForgeError {
        let (server, forge) = setup().await;
        Mock::given(method("POST"))
            .and(path("/repos/octocat/demo/labels"))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({ "message": message })))
            .mount(&server)
            .await;

        forge
            .create_label(&Label::new("bug", "d73a4a"))
            .await
            .unwrap_err()
    }

    #[tokio::test]
    async fn unauthorized_is_auth_failed() {
        let err = create_label_with_status(401, "Bad credentials").await;
        assert!(matches!(err, ForgeError::AuthFailed(_)));
    }

    #[tokio::test]
    async fn rate_limit_message_is_rate_limited() {
        let err = create_label_with_status(403, "API rate limit exceeded").await;
        assert_eq!(err, ForgeError::RateLimited);
    }

    #[tokio::test]
    async fn not_found_keeps_message() {
        let err = create_label_with_status(404, "Not Found").await;
        assert_eq!(err, ForgeError::NotFound("Not Found".into()));
    }

    #[tokio::test]
    async fn validation_failure_is_api_error() {
        let err = create_label_with_status(422, "Validation Failed").await;
        assert_eq!(
            err,
            ForgeError::ApiError {
                status: 422,
                message: "Validation Failed".into()
            }
        );
    }

    #[tokio::test]
    async fn server_error_is_labelled() {
        let err = create_label_with_status(502, "Bad Gateway").await;
        match err {
            ForgeError::ApiError { status, message } => {
                assert_eq!(status, 502);
                assert!(message.contains("GitHub server error"));
            }
            other => panic!("expected ApiError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn missing_token_fails_without_request() {
        let server = MockServer::start().await;
        let forge = GitHubForge::with_api_base("", "octocat", "demo", server.uri());

        let err = forge.list_labels().await.unwrap_err();

        assert_eq!(err, ForgeError::AuthRequired);
        assert!(server.received_requests().await.unwrap_or_default().is_empty());
    }
}

// =============================================================================
// GraphQL
// =============================================================================

mod graphql {
    use super::*;

    async fn mount_repo_meta(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_string_contains("discussionCategories"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {
                    "repository": {
                        "id": "R_1",
                        "owner": {"id": "U_1"},
                        "discussionCategories": {
                            "nodes": [{"id": "DIC_general", "name": "General"}]
                        }
                    }
                }
            })))
            .expect(1)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn create_discussion_resolves_category() {
        let (server, forge) = setup().await;
        mount_repo_meta(&server).await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_string_contains("createDiscussion"))
            .and(body_string_contains("DIC_general"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {
                    "createDiscussion": {
                        "discussion": {
                            "id": "D_1",
                            "number": 7,
                            "url": "https://github.com/octocat/demo/discussions/7"
                        }
                    }
                }
            })))
            .expect(2)
            .mount(&server)
            .await;

        let discussion = Discussion {
            title: "Welcome".into(),
            category: "General".into(),
            ..Default::default()
        };
        let created = forge.create_discussion(&discussion).await.unwrap();
        assert_eq!(created.node_id, "D_1");

        // Repository metadata is cached between calls.
        forge.create_discussion(&discussion).await.unwrap();
    }

    #[tokio::test]
    async fn unknown_category_is_not_found() {
        let (server, forge) = setup().await;
        mount_repo_meta(&server).await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_string_contains("createDiscussion"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let discussion = Discussion {
            title: "Lost".into(),
            category: "Nowhere".into(),
            ..Default::default()
        };
        let err = forge.create_discussion(&discussion).await.unwrap_err();

        assert_eq!(
            err,
            ForgeError::NotFound("discussion category 'Nowhere'".into())
        );
    }

    #[tokio::test]
    async fn list_discussions_follows_cursor() {
        let (server, forge) = setup().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_string_contains("\"cursor\":null"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"repository": {"discussions": {
                    "pageInfo": {"hasNextPage": true, "endCursor": "c1"},
                    "nodes": [{
                        "id": "D_1", "title": "First", "body": "",
                        "category": {"name": "General"},
                        "labels": {"nodes": []}
                    }]
                }}}
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_string_contains("\"cursor\":\"c1\""))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"repository": {"discussions": {
                    "pageInfo": {"hasNextPage": false, "endCursor": null},
                    "nodes": [{
                        "id": "D_2", "title": "Second", "body": "",
                        "category": {"name": "Ideas"},
                        "labels": {"nodes": [{"name": "keep"}]}
                    }]
                }}}
            })))
            .mount(&server)
            .await;

        let discussions = forge.list_discussions().await.unwrap();

        let ids: Vec<&str> = discussions.iter().map(|d| d.node_id.as_str()).collect();
        assert_eq!(ids, vec!["D_1", "D_2"]);
        assert_eq!(discussions[1].category, "Ideas");
        assert!(discussions[1].labels.contains("keep"));
    }

    #[tokio::test]
    async fn graphql_not_found_error_is_mapped() {
        let (server, forge) = setup().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_string_contains("deleteIssue"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": null,
                "errors": [{
                    "type": "NOT_FOUND",
                    "message": "Could not resolve to a node with the global id of 'I_gone'"
                }]
            })))
            .mount(&server)
            .await;

        let err = forge.delete_issue("I_gone").await.unwrap_err();
        assert!(matches!(err, ForgeError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_pr_closes_it() {
        let (server, forge) = setup().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_string_contains("closePullRequest"))
            .and(body_string_contains("PR_7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"closePullRequest": {"pullRequest": {"id": "PR_7"}}}
            })))
            .expect(1)
            .mount(&server)
            .await;

        forge.delete_pr("PR_7").await.unwrap();
    }

    #[tokio::test]
    async fn missing_project_is_not_found() {
        let (server, forge) = setup().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_string_contains("repositoryOwner"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"repositoryOwner": {"projectV2": null}}
            })))
            .mount(&server)
            .await;

        let err = forge.get_project_v2(42).await.unwrap_err();
        assert_eq!(err, ForgeError::NotFound("project #42".into()));
    }

    #[tokio::test]
    async fn add_item_returns_project_item_id() {
        let (server, forge) = setup().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_string_contains("addProjectV2ItemById"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"addProjectV2ItemById": {"item": {"id": "PVTI_1"}}}
            })))
            .mount(&server)
            .await;

        let item = forge.add_item_to_project_v2("PVT_1", "I_1").await.unwrap();
        assert_eq!(item, "PVTI_1");
    }
}

// =============================================================================
// Hydration against the API
// =============================================================================

mod hydration {
    use super::*;

    #[tokio::test]
    async fn existing_label_in_other_case_is_reused() {
        let (server, forge) = setup().await;
        Mock::given(method("GET"))
            .and(path("/repos/octocat/demo/labels"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"name": "enhancement", "color": "a2eeef", "description": null}
            ])))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/repos/octocat/demo/labels"))
            .respond_with(ResponseTemplate::new(422).set_body_json(json!({
                "message": "Validation Failed",
                "errors": [{"code": "already_exists"}]
            })))
            .expect(0)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/repos/octocat/demo/issues"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "number": 1,
                "node_id": "I_1",
                "html_url": "https://github.com/octocat/demo/issues/1"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let content = ContentSet {
            issues: vec![Issue {
                title: "Add dark mode".into(),
                labels: ["Enhancement".to_string()].into_iter().collect(),
                ..Default::default()
            }],
            ..Default::default()
        };
        let report = hydrate(&forge, &Context::default(), &content, &HydrateOptions::default())
            .await
            .unwrap();

        assert_eq!(report.labels.succeeded, 1);
        assert_eq!(report.issues.succeeded, 1);
        assert!(report.into_result().is_ok());
    }

    #[tokio::test]
    async fn pr_with_failed_labels_counts_as_created() {
        let (server, forge) = setup().await;
        Mock::given(method("GET"))
            .and(path("/repos/octocat/demo/labels"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"name": "demo", "color": "ededed", "description": null}
            ])))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/repos/octocat/demo/pulls"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "number": 5,
                "node_id": "PR_5",
                "html_url": "https://github.com/octocat/demo/pull/5"
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/repos/octocat/demo/issues/5/labels"))
            .respond_with(ResponseTemplate::new(502).set_body_json(json!({"message": "Bad Gateway"})))
            .mount(&server)
            .await;

        let content = ContentSet {
            pull_requests: vec![PullRequest {
                title: "Feature".into(),
                head: "feature".into(),
                base: "main".into(),
                labels: ["demo".to_string()].into_iter().collect(),
                ..Default::default()
            }],
            ..Default::default()
        };
        let report = hydrate(&forge, &Context::default(), &content, &HydrateOptions::default())
            .await
            .unwrap();

        assert_eq!(report.pull_requests.succeeded, 1);
        assert_eq!(report.pull_requests.failed, 0);
        assert_eq!(report.pull_requests.incomplete, 1);
        assert_eq!(report.created.len(), 1);
        assert_eq!(report.created[0].node_id, "PR_5");
        assert!(report.has_failures());
    }
}
