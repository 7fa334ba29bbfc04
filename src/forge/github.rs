//! forge::github
//!
//! GitHub client implementation using REST and GraphQL APIs.
//!
//! # Design
//!
//! This module implements the `GitHubClient` trait for GitHub. It uses:
//! - REST API for issues, pull requests and labels (create, list)
//! - GraphQL API for discussions, deletions and Projects (V2), which have
//!   no REST equivalent
//!
//! Repository metadata needed by GraphQL mutations (repository ID, owner
//! ID, discussion categories) is fetched once per client and cached.
//!
//! # Rate Limiting
//!
//! GitHub has rate limits. This implementation:
//! - Returns `ForgeError::RateLimited` when limits are hit
//! - Does not retry; every call is attempted exactly once
//!
//! # Example
//!
//! ```ignore
//! use gh_hydrate::forge::github::GitHubForge;
//! use gh_hydrate::forge::GitHubClient;
//!
//! let forge = GitHubForge::new("ghp_xxx", "octocat", "demo");
//! let labels = forge.list_labels().await?;
//! ```

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::sync::OnceCell;
use tracing::debug;

use super::traits::{ForgeError, GitHubClient};
use crate::core::types::{
    CreatedRef, Discussion, FollowUpFailure, Issue, Label, ProjectV2, PullRequest,
};

/// Default GitHub API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// User-Agent header value for API requests.
const USER_AGENT_VALUE: &str = "gh-hydrate";

/// GitHub's maximum page size.
const PER_PAGE: usize = 100;

/// GitHub client.
///
/// Implements the `GitHubClient` trait for one repository.
pub struct GitHubForge {
    /// HTTP client for making requests
    client: Client,
    /// Personal access token or app token
    token: String,
    /// Repository owner (user or organization)
    owner: String,
    /// Repository name
    repo: String,
    /// REST API base URL (configurable for GitHub Enterprise)
    api_base: String,
    /// GraphQL endpoint derived from `api_base`
    graphql_url: String,
    /// Cached repository metadata for GraphQL mutations
    meta: OnceCell<RepoMeta>,
}

// Custom Debug to avoid exposing the token
impl std::fmt::Debug for GitHubForge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubForge")
            .field("has_token", &!self.token.is_empty())
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("api_base", &self.api_base)
            .finish()
    }
}

/// Repository metadata used by GraphQL mutations.
#[derive(Debug, Clone)]
struct RepoMeta {
    repository_id: String,
    owner_id: String,
    /// (name, node ID)
    categories: Vec<(String, String)>,
}

impl GitHubForge {
    /// Create a client for `owner/repo` on github.com.
    ///
    /// # Example
    ///
    /// ```
    /// use gh_hydrate::forge::github::GitHubForge;
    ///
    /// let forge = GitHubForge::new("token", "octocat", "hello-world");
    /// assert_eq!(forge.owner(), "octocat");
    /// ```
    pub fn new(
        token: impl Into<String>,
        owner: impl Into<String>,
        repo: impl Into<String>,
    ) -> Self {
        Self::with_api_base(token, owner, repo, DEFAULT_API_BASE)
    }

    /// Create a client with a custom API base URL.
    ///
    /// Use this for GitHub Enterprise (e.g., `https://github.example.com/api/v3`).
    pub fn with_api_base(
        token: impl Into<String>,
        owner: impl Into<String>,
        repo: impl Into<String>,
        api_base: impl Into<String>,
    ) -> Self {
        let api_base = api_base.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            token: token.into(),
            owner: owner.into(),
            repo: repo.into(),
            graphql_url: graphql_url_for(&api_base),
            api_base,
            meta: OnceCell::new(),
        }
    }

    /// Get the repository owner.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Get the repository name.
    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// Build common headers for API requests.
    fn headers(&self) -> Result<HeaderMap, ForgeError> {
        if self.token.is_empty() {
            return Err(ForgeError::AuthRequired);
        }
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.token))
                .map_err(|_| ForgeError::AuthFailed("token is not a valid header value".into()))?,
        );
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static("2022-11-28"),
        );
        Ok(headers)
    }

    /// Build URL for a repository endpoint.
    fn repo_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/{}",
            self.api_base, self.owner, self.repo, path
        )
    }

    /// Send a request with auth headers, mapping transport errors.
    async fn send(&self, request: RequestBuilder) -> Result<Response, ForgeError> {
        request
            .headers(self.headers()?)
            .send()
            .await
            .map_err(|e| ForgeError::NetworkError(e.to_string()))
    }

    /// Handle API response, mapping errors appropriately.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: Response,
    ) -> Result<T, ForgeError> {
        let status = response.status();

        if status.is_success() {
            response.json().await.map_err(|e| ForgeError::ApiError {
                status: status.as_u16(),
                message: format!("Failed to parse response: {}", e),
            })
        } else {
            self.handle_error_response(response, status).await
        }
    }

    /// Handle a response whose body is irrelevant (e.g., 204 No Content).
    async fn handle_empty_response(&self, response: Response) -> Result<(), ForgeError> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            self.handle_error_response(response, status).await
        }
    }

    /// Handle an error response from the API.
    async fn handle_error_response<T>(
        &self,
        response: Response,
        status: StatusCode,
    ) -> Result<T, ForgeError> {
        // GitHub Apps use X-Accepted-GitHub-Permissions.
        let required_permissions = response
            .headers()
            .get("X-Accepted-GitHub-Permissions")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let message = match response.json::<GitHubErrorResponse>().await {
            Ok(err) => err.message,
            Err(_) => "Unknown error".to_string(),
        };

        Err(match status {
            StatusCode::UNAUTHORIZED => ForgeError::AuthFailed("Invalid or expired token".into()),
            StatusCode::FORBIDDEN if message.to_lowercase().contains("rate limit") => {
                ForgeError::RateLimited
            }
            StatusCode::FORBIDDEN => {
                let mut err_msg = format!("Permission denied: {}", message);
                if let Some(perms) = required_permissions.filter(|p| !p.is_empty()) {
                    err_msg.push_str(&format!(" [required: {}]", perms));
                }
                ForgeError::AuthFailed(err_msg)
            }
            StatusCode::NOT_FOUND => ForgeError::NotFound(message),
            StatusCode::TOO_MANY_REQUESTS => ForgeError::RateLimited,
            _ if status.is_server_error() => ForgeError::ApiError {
                status: status.as_u16(),
                message: format!("GitHub server error: {}", message),
            },
            _ => ForgeError::ApiError {
                status: status.as_u16(),
                message,
            },
        })
    }

    /// GET a JSON document.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ForgeError> {
        let response = self.send(self.client.get(url)).await?;
        self.handle_response(response).await
    }

    /// POST a JSON body and decode the JSON response.
    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T, ForgeError> {
        let response = self.send(self.client.post(url).json(body)).await?;
        self.handle_response(response).await
    }

    /// Fetch every page of a REST collection.
    ///
    /// `path` may already carry a query string.
    async fn list_all<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ForgeError> {
        let separator = if path.contains('?') { '&' } else { '?' };
        let mut all = Vec::new();
        let mut page: u32 = 1;

        loop {
            let url = format!(
                "{}{}per_page={}&page={}",
                self.repo_url(path),
                separator,
                PER_PAGE,
                page
            );
            let items: Vec<T> = self.get_json(&url).await?;
            let count = items.len();
            all.extend(items);

            if count < PER_PAGE {
                break;
            }
            page += 1;
        }

        Ok(all)
    }

    /// Execute a GraphQL query or mutation and decode `data`.
    async fn graphql<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Value,
    ) -> Result<T, ForgeError> {
        let body = json!({ "query": query, "variables": variables });
        let response = self
            .send(self.client.post(&self.graphql_url).json(&body))
            .await?;

        let result: GraphQLResponse<T> = self.handle_response(response).await?;

        if let Some(error) = result.errors.and_then(|errors| errors.into_iter().next()) {
            return Err(match error.error_type.as_deref() {
                Some("NOT_FOUND") => ForgeError::NotFound(error.message),
                Some("RATE_LIMITED") => ForgeError::RateLimited,
                Some("FORBIDDEN") => ForgeError::AuthFailed(error.message),
                _ => ForgeError::ApiError {
                    status: 200,
                    message: error.message,
                },
            });
        }

        result.data.ok_or_else(|| ForgeError::ApiError {
            status: 200,
            message: "GraphQL response contained no data".into(),
        })
    }

    /// Repository metadata, fetched on first use.
    async fn repo_meta(&self) -> Result<&RepoMeta, ForgeError> {
        self.meta
            .get_or_try_init(|| async {
                debug!(owner = %self.owner, repo = %self.repo, "fetching repository metadata");
                let data: RepoMetaData = self
                    .graphql(
                        REPO_META_QUERY,
                        json!({ "owner": self.owner, "repo": self.repo }),
                    )
                    .await?;
                let repository = data.repository.ok_or_else(|| {
                    ForgeError::NotFound(format!("repository {}/{}", self.owner, self.repo))
                })?;
                Ok(RepoMeta {
                    repository_id: repository.id,
                    owner_id: repository.owner.id,
                    categories: repository
                        .discussion_categories
                        .nodes
                        .into_iter()
                        .map(|c| (c.name, c.id))
                        .collect(),
                })
            })
            .await
    }

    /// Node ID of a label, by name.
    async fn label_id(&self, name: &str) -> Result<String, ForgeError> {
        let data: LabelLookupData = self
            .graphql(
                LABEL_ID_QUERY,
                json!({ "owner": self.owner, "repo": self.repo, "name": name }),
            )
            .await?;
        data.repository
            .and_then(|r| r.label)
            .map(|l| l.id)
            .ok_or_else(|| ForgeError::NotFound(format!("label '{}'", name)))
    }

    /// Attach a discussion's labels, resolving each name to its node ID.
    async fn add_discussion_labels(
        &self,
        discussion_id: &str,
        discussion: &Discussion,
    ) -> Result<(), ForgeError> {
        let mut label_ids = Vec::with_capacity(discussion.labels.len());
        for name in &discussion.labels {
            label_ids.push(self.label_id(name).await?);
        }
        let _: Value = self
            .graphql(
                ADD_LABELS_MUTATION,
                json!({ "id": discussion_id, "labelIds": label_ids }),
            )
            .await?;
        Ok(())
    }

    /// Run a mutation that only needs a node ID.
    async fn mutate_node(&self, mutation: &str, node_id: &str) -> Result<(), ForgeError> {
        let _: Value = self.graphql(mutation, json!({ "id": node_id })).await?;
        Ok(())
    }
}

/// GraphQL endpoint for a REST base URL.
///
/// `https://api.github.com` → `https://api.github.com/graphql`;
/// Enterprise `https://host/api/v3` → `https://host/api/graphql`.
fn graphql_url_for(api_base: &str) -> String {
    match api_base.strip_suffix("/v3") {
        Some(root) => format!("{}/graphql", root),
        None => format!("{}/graphql", api_base),
    }
}

#[async_trait]
impl GitHubClient for GitHubForge {
    fn name(&self) -> &'static str {
        "github"
    }

    async fn create_issue(&self, issue: &Issue) -> Result<CreatedRef, ForgeError> {
        debug!(title = %issue.title, "creating issue");
        let body = CreateIssueBody {
            title: &issue.title,
            body: &issue.body,
            labels: issue.labels.iter().map(String::as_str).collect(),
            assignees: &issue.assignees,
        };
        let created: GitHubCreated = self.post_json(&self.repo_url("issues"), &body).await?;
        Ok(created.into())
    }

    async fn create_discussion(&self, discussion: &Discussion) -> Result<CreatedRef, ForgeError> {
        debug!(title = %discussion.title, category = %discussion.category, "creating discussion");
        let meta = self.repo_meta().await?;
        let category_id = meta
            .categories
            .iter()
            .find(|(name, _)| *name == discussion.category)
            .map(|(_, id)| id.clone())
            .ok_or_else(|| {
                ForgeError::NotFound(format!("discussion category '{}'", discussion.category))
            })?;

        let data: CreateDiscussionData = self
            .graphql(
                CREATE_DISCUSSION_MUTATION,
                json!({
                    "repositoryId": meta.repository_id,
                    "categoryId": category_id,
                    "title": discussion.title,
                    "body": discussion.body,
                }),
            )
            .await?;
        let created = data.create_discussion.discussion;

        // The discussion exists from here on; label trouble is reported, not fatal.
        let mut incomplete = Vec::new();
        if !discussion.labels.is_empty() {
            if let Err(e) = self.add_discussion_labels(&created.id, discussion).await {
                incomplete.push(FollowUpFailure::new("add labels", e.to_string()));
            }
        }

        Ok(CreatedRef {
            node_id: created.id,
            number: Some(created.number),
            url: Some(created.url),
            incomplete,
        })
    }

    async fn create_pr(&self, pr: &PullRequest) -> Result<CreatedRef, ForgeError> {
        debug!(title = %pr.title, head = %pr.head, base = %pr.base, "creating pull request");
        let body = CreatePrBody {
            title: &pr.title,
            body: &pr.body,
            head: &pr.head,
            base: &pr.base,
        };
        let response: GitHubCreated = self.post_json(&self.repo_url("pulls"), &body).await?;
        let number = response.number;
        let mut created = CreatedRef::from(response);

        // Labels and assignees go through the issues API for PRs. The PR
        // exists from here on, so these failures are reported, not fatal.
        if !pr.labels.is_empty() {
            let url = self.repo_url(&format!("issues/{}/labels", number));
            if let Err(e) = self
                .post_json::<_, Value>(&url, &json!({ "labels": pr.labels }))
                .await
            {
                created
                    .incomplete
                    .push(FollowUpFailure::new("add labels", e.to_string()));
            }
        }
        if !pr.assignees.is_empty() {
            let url = self.repo_url(&format!("issues/{}/assignees", number));
            if let Err(e) = self
                .post_json::<_, Value>(&url, &json!({ "assignees": pr.assignees }))
                .await
            {
                created
                    .incomplete
                    .push(FollowUpFailure::new("add assignees", e.to_string()));
            }
        }

        Ok(created)
    }

    async fn create_label(&self, label: &Label) -> Result<(), ForgeError> {
        debug!(name = %label.name, "creating label");
        let _: Value = self.post_json(&self.repo_url("labels"), label).await?;
        Ok(())
    }

    async fn list_labels(&self) -> Result<Vec<Label>, ForgeError> {
        let labels: Vec<GitHubLabel> = self.list_all("labels").await?;
        Ok(labels.into_iter().map(Into::into).collect())
    }

    async fn list_issues(&self) -> Result<Vec<Issue>, ForgeError> {
        let items: Vec<GitHubIssueItem> = self.list_all("issues?state=all").await?;
        // The issues endpoint also returns pull requests.
        Ok(items
            .into_iter()
            .filter(|i| i.pull_request.is_none())
            .map(Into::into)
            .collect())
    }

    async fn list_discussions(&self) -> Result<Vec<Discussion>, ForgeError> {
        let mut all = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let data: DiscussionsData = self
                .graphql(
                    LIST_DISCUSSIONS_QUERY,
                    json!({ "owner": self.owner, "repo": self.repo, "cursor": cursor }),
                )
                .await?;
            let connection = data
                .repository
                .ok_or_else(|| {
                    ForgeError::NotFound(format!("repository {}/{}", self.owner, self.repo))
                })?
                .discussions;

            all.extend(connection.nodes.into_iter().map(Discussion::from));

            match connection.page_info {
                PageInfo {
                    has_next_page: true,
                    end_cursor: Some(end),
                } => cursor = Some(end),
                _ => break,
            }
        }

        Ok(all)
    }

    async fn list_prs(&self) -> Result<Vec<PullRequest>, ForgeError> {
        let items: Vec<GitHubPullItem> = self.list_all("pulls?state=open").await?;
        Ok(items.into_iter().map(Into::into).collect())
    }

    async fn delete_issue(&self, node_id: &str) -> Result<(), ForgeError> {
        debug!(node_id, "deleting issue");
        self.mutate_node(DELETE_ISSUE_MUTATION, node_id).await
    }

    async fn delete_discussion(&self, node_id: &str) -> Result<(), ForgeError> {
        debug!(node_id, "deleting discussion");
        self.mutate_node(DELETE_DISCUSSION_MUTATION, node_id).await
    }

    async fn delete_pr(&self, node_id: &str) -> Result<(), ForgeError> {
        debug!(node_id, "closing pull request");
        self.mutate_node(CLOSE_PR_MUTATION, node_id).await
    }

    async fn delete_label(&self, name: &str) -> Result<(), ForgeError> {
        debug!(name, "deleting label");
        // Label names may contain spaces and other characters that need escaping.
        let mut url = Url::parse(&self.repo_url("labels")).map_err(|e| ForgeError::ApiError {
            status: 0,
            message: format!("invalid API URL: {}", e),
        })?;
        url.path_segments_mut()
            .map_err(|_| ForgeError::ApiError {
                status: 0,
                message: "API URL cannot have path segments".into(),
            })?
            .push(name);

        let response = self.send(self.client.delete(url)).await?;
        self.handle_empty_response(response).await
    }

    async fn create_project_v2(&self, title: &str) -> Result<ProjectV2, ForgeError> {
        debug!(title, "creating project");
        let meta = self.repo_meta().await?;
        let data: CreateProjectData = self
            .graphql(
                CREATE_PROJECT_MUTATION,
                json!({
                    "ownerId": meta.owner_id,
                    "repositoryId": meta.repository_id,
                    "title": title,
                }),
            )
            .await?;
        Ok(data.create_project_v2.project_v2.into())
    }

    async fn get_project_v2(&self, number: u64) -> Result<ProjectV2, ForgeError> {
        let data: ProjectOwnerData = self
            .graphql(
                GET_PROJECT_QUERY,
                json!({ "owner": self.owner, "number": number }),
            )
            .await?;
        data.repository_owner
            .and_then(|o| o.project_v2)
            .map(Into::into)
            .ok_or_else(|| ForgeError::NotFound(format!("project #{}", number)))
    }

    async fn add_item_to_project_v2(
        &self,
        project_id: &str,
        content_id: &str,
    ) -> Result<String, ForgeError> {
        debug!(project_id, content_id, "adding item to project");
        let data: AddProjectItemData = self
            .graphql(
                ADD_PROJECT_ITEM_MUTATION,
                json!({ "projectId": project_id, "contentId": content_id }),
            )
            .await?;
        Ok(data.add_project_v2_item_by_id.item.id)
    }
}

// --------------------------------------------------------------------------
// GraphQL documents
// --------------------------------------------------------------------------

const REPO_META_QUERY: &str = r#"query($owner: String!, $repo: String!) {
  repository(owner: $owner, name: $repo) {
    id
    owner { id }
    discussionCategories(first: 100) { nodes { id name } }
  }
}"#;

const LABEL_ID_QUERY: &str = r#"query($owner: String!, $repo: String!, $name: String!) {
  repository(owner: $owner, name: $repo) { label(name: $name) { id } }
}"#;

const CREATE_DISCUSSION_MUTATION: &str = r#"mutation($repositoryId: ID!, $categoryId: ID!, $title: String!, $body: String!) {
  createDiscussion(input: {repositoryId: $repositoryId, categoryId: $categoryId, title: $title, body: $body}) {
    discussion { id number url }
  }
}"#;

const ADD_LABELS_MUTATION: &str = r#"mutation($id: ID!, $labelIds: [ID!]!) {
  addLabelsToLabelable(input: {labelableId: $id, labelIds: $labelIds}) { clientMutationId }
}"#;

const LIST_DISCUSSIONS_QUERY: &str = r#"query($owner: String!, $repo: String!, $cursor: String) {
  repository(owner: $owner, name: $repo) {
    discussions(first: 100, after: $cursor) {
      pageInfo { hasNextPage endCursor }
      nodes {
        id
        title
        body
        category { name }
        labels(first: 100) { nodes { name } }
      }
    }
  }
}"#;

const DELETE_ISSUE_MUTATION: &str = r#"mutation($id: ID!) {
  deleteIssue(input: {issueId: $id}) { clientMutationId }
}"#;

const DELETE_DISCUSSION_MUTATION: &str = r#"mutation($id: ID!) {
  deleteDiscussion(input: {id: $id}) { clientMutationId }
}"#;

const CLOSE_PR_MUTATION: &str = r#"mutation($id: ID!) {
  closePullRequest(input: {pullRequestId: $id}) { pullRequest { id } }
}"#;

const CREATE_PROJECT_MUTATION: &str = r#"mutation($ownerId: ID!, $repositoryId: ID, $title: String!) {
  createProjectV2(input: {ownerId: $ownerId, repositoryId: $repositoryId, title: $title}) {
    projectV2 { id number title url }
  }
}"#;

const GET_PROJECT_QUERY: &str = r#"query($owner: String!, $number: Int!) {
  repositoryOwner(login: $owner) {
    ... on ProjectV2Owner { projectV2(number: $number) { id number title url } }
  }
}"#;

const ADD_PROJECT_ITEM_MUTATION: &str = r#"mutation($projectId: ID!, $contentId: ID!) {
  addProjectV2ItemById(input: {projectId: $projectId, contentId: $contentId}) { item { id } }
}"#;

// --------------------------------------------------------------------------
// API Request/Response Types
// --------------------------------------------------------------------------

/// Request body for creating an issue.
#[derive(Serialize)]
struct CreateIssueBody<'a> {
    title: &'a str,
    body: &'a str,
    labels: Vec<&'a str>,
    assignees: &'a [String],
}

/// Request body for creating a PR.
#[derive(Serialize)]
struct CreatePrBody<'a> {
    title: &'a str,
    body: &'a str,
    head: &'a str,
    base: &'a str,
}

/// GitHub error response format.
#[derive(Deserialize)]
struct GitHubErrorResponse {
    message: String,
}

/// Subset of a created issue or PR.
#[derive(Deserialize)]
struct GitHubCreated {
    number: u64,
    node_id: String,
    html_url: String,
}

impl From<GitHubCreated> for CreatedRef {
    fn from(created: GitHubCreated) -> Self {
        CreatedRef {
            node_id: created.node_id,
            number: Some(created.number),
            url: Some(created.html_url),
            incomplete: Vec::new(),
        }
    }
}

#[derive(Deserialize)]
struct GitHubLabel {
    name: String,
    color: String,
    description: Option<String>,
}

impl From<GitHubLabel> for Label {
    fn from(gh: GitHubLabel) -> Self {
        Label {
            name: gh.name,
            color: gh.color,
            description: gh.description.filter(|d| !d.is_empty()),
        }
    }
}

#[derive(Deserialize)]
struct GitHubLabelRef {
    name: String,
}

#[derive(Deserialize)]
struct GitHubUser {
    login: String,
}

/// Issue list item. Pull requests carry a `pull_request` key.
#[derive(Deserialize)]
struct GitHubIssueItem {
    node_id: String,
    title: String,
    body: Option<String>,
    #[serde(default)]
    labels: Vec<GitHubLabelRef>,
    #[serde(default)]
    assignees: Vec<GitHubUser>,
    pull_request: Option<Value>,
}

impl From<GitHubIssueItem> for Issue {
    fn from(gh: GitHubIssueItem) -> Self {
        Issue {
            title: gh.title,
            body: gh.body.unwrap_or_default(),
            labels: gh.labels.into_iter().map(|l| l.name).collect(),
            assignees: gh.assignees.into_iter().map(|u| u.login).collect(),
            node_id: gh.node_id,
        }
    }
}

/// GitHub ref (head/base) format.
#[derive(Deserialize)]
struct GitHubRef {
    #[serde(rename = "ref")]
    ref_name: String,
}

#[derive(Deserialize)]
struct GitHubPullItem {
    node_id: String,
    title: String,
    body: Option<String>,
    head: GitHubRef,
    base: GitHubRef,
    #[serde(default)]
    labels: Vec<GitHubLabelRef>,
    #[serde(default)]
    assignees: Vec<GitHubUser>,
}

impl From<GitHubPullItem> for PullRequest {
    fn from(gh: GitHubPullItem) -> Self {
        PullRequest {
            title: gh.title,
            body: gh.body.unwrap_or_default(),
            head: gh.head.ref_name,
            base: gh.base.ref_name,
            labels: gh.labels.into_iter().map(|l| l.name).collect(),
            assignees: gh.assignees.into_iter().map(|u| u.login).collect(),
            node_id: gh.node_id,
        }
    }
}

/// GraphQL response wrapper.
#[derive(Deserialize)]
struct GraphQLResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQLError>>,
}

/// GraphQL error format.
#[derive(Deserialize)]
struct GraphQLError {
    message: String,
    #[serde(rename = "type")]
    error_type: Option<String>,
}

#[derive(Deserialize)]
struct Node {
    id: String,
}

#[derive(Deserialize)]
struct Nodes<T> {
    nodes: Vec<T>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageInfo {
    has_next_page: bool,
    end_cursor: Option<String>,
}

#[derive(Deserialize)]
struct RepoMetaData {
    repository: Option<RepoMetaRepository>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RepoMetaRepository {
    id: String,
    owner: Node,
    discussion_categories: Nodes<CategoryNode>,
}

#[derive(Deserialize)]
struct CategoryNode {
    id: String,
    name: String,
}

#[derive(Deserialize)]
struct LabelLookupData {
    repository: Option<LabelLookupRepository>,
}

#[derive(Deserialize)]
struct LabelLookupRepository {
    label: Option<Node>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateDiscussionData {
    create_discussion: CreateDiscussionPayload,
}

#[derive(Deserialize)]
struct CreateDiscussionPayload {
    discussion: CreatedDiscussion,
}

#[derive(Deserialize)]
struct CreatedDiscussion {
    id: String,
    number: u64,
    url: String,
}

#[derive(Deserialize)]
struct DiscussionsData {
    repository: Option<DiscussionsRepository>,
}

#[derive(Deserialize)]
struct DiscussionsRepository {
    discussions: DiscussionConnection,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DiscussionConnection {
    page_info: PageInfo,
    nodes: Vec<DiscussionNode>,
}

#[derive(Deserialize)]
struct DiscussionNode {
    id: String,
    title: String,
    #[serde(default)]
    body: String,
    category: Option<NamedNode>,
    labels: Option<Nodes<NamedNode>>,
}

#[derive(Deserialize)]
struct NamedNode {
    name: String,
}

impl From<DiscussionNode> for Discussion {
    fn from(node: DiscussionNode) -> Self {
        Discussion {
            title: node.title,
            body: node.body,
            category: node.category.map(|c| c.name).unwrap_or_default(),
            labels: node
                .labels
                .map(|l| l.nodes.into_iter().map(|n| n.name).collect())
                .unwrap_or_default(),
            node_id: node.id,
        }
    }
}

#[derive(Deserialize)]
struct ProjectNode {
    id: String,
    number: u64,
    title: String,
    url: Option<String>,
}

impl From<ProjectNode> for ProjectV2 {
    fn from(node: ProjectNode) -> Self {
        ProjectV2 {
            id: node.id,
            number: node.number,
            title: node.title,
            url: node.url,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateProjectData {
    create_project_v2: CreateProjectPayload,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateProjectPayload {
    project_v2: ProjectNode,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectOwnerData {
    repository_owner: Option<ProjectOwner>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectOwner {
    project_v2: Option<ProjectNode>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddProjectItemData {
    add_project_v2_item_by_id: AddProjectItemPayload,
}

#[derive(Deserialize)]
struct AddProjectItemPayload {
    item: Node,
}
