//! GitHub platform service implementation

use crate::error::{Error, Result};
use crate::platform::graphql::{
    CreatePullRequestData, CreatePullRequestInput, CreatePullRequestVariables, GraphQlRequest,
    GraphQlResponse, RepositoryIdData, RepositoryIdVariables, CREATE_PULL_REQUEST_MUTATION,
    REPOSITORY_ID_QUERY,
};
use crate::platform::PlatformService;
use crate::types::{PlatformConfig, PullRequest};
use async_trait::async_trait;
use octocrab::Octocrab;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::debug;

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// GitHub service
///
/// Pull request creation and repository lookup go through the GraphQL API;
/// the open-PR lookup uses the REST API via octocrab.
pub struct GitHubService {
    client: Octocrab,
    config: PlatformConfig,
    /// Token for GraphQL requests
    token: String,
    /// HTTP client for GraphQL requests
    http_client: Client,
    /// GraphQL endpoint URL
    graphql_url: String,
    /// Repository node ID, resolved on first use
    repository_id: OnceCell<String>,
}

impl GitHubService {
    /// Create a new GitHub service
    ///
    /// `host` is `None` for github.com, or a GitHub Enterprise hostname.
    pub fn new(token: &str, owner: String, repo: String, host: Option<String>) -> Result<Self> {
        let (rest_base, graphql_url) = match &host {
            Some(h) => (
                format!("https://{h}/api/v3"),
                format!("https://{h}/api/graphql"),
            ),
            None => (
                "https://api.github.com".to_string(),
                "https://api.github.com/graphql".to_string(),
            ),
        };

        Self::build(
            token,
            PlatformConfig { owner, repo, host },
            &rest_base,
            graphql_url,
        )
    }

    /// Create a service talking to an arbitrary API base URL
    ///
    /// REST calls go to `api_base`, GraphQL to `{api_base}/graphql`.
    pub fn with_api_base(token: &str, owner: String, repo: String, api_base: &str) -> Result<Self> {
        let api_base = api_base.trim_end_matches('/');
        Self::build(
            token,
            PlatformConfig {
                owner,
                repo,
                host: None,
            },
            api_base,
            format!("{api_base}/graphql"),
        )
    }

    fn build(
        token: &str,
        config: PlatformConfig,
        rest_base: &str,
        graphql_url: String,
    ) -> Result<Self> {
        let client = Octocrab::builder()
            .personal_token(token.to_string())
            .base_uri(rest_base)
            .map_err(|e| Error::GitHubApi(e.to_string()))?
            .build()
            .map_err(|e| Error::GitHubApi(e.to_string()))?;

        let http_client = Client::builder()
            .user_agent(concat!("git-mature/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::GitHubApi(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            config,
            token: token.to_string(),
            http_client,
            graphql_url,
            repository_id: OnceCell::new(),
        })
    }

    /// Send a GraphQL document and unwrap its `data`
    async fn graphql<V, T>(&self, query: &str, variables: V) -> Result<T>
    where
        V: Serialize + Send + Sync,
        T: DeserializeOwned + Send,
    {
        let request = GraphQlRequest { query, variables };

        let response = self
            .http_client
            .post(&self.graphql_url)
            .bearer_auth(&self.token)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::GitHubApi(format!("GraphQL request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(Error::GitHubApi(format!(
                "GraphQL endpoint returned {status}: {}",
                text.trim()
            )));
        }

        let body: GraphQlResponse<T> = response
            .json()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to parse GraphQL response: {e}")))?;

        if let Some(errors) = body.errors.filter(|errors| !errors.is_empty()) {
            let messages: Vec<_> = errors.into_iter().map(|e| e.message).collect();
            return Err(Error::GitHubApi(format!(
                "GraphQL error: {}",
                messages.join(", ")
            )));
        }

        body.data
            .ok_or_else(|| Error::GitHubApi("No data in GraphQL response".to_string()))
    }
}

#[async_trait]
impl PlatformService for GitHubService {
    async fn repository_id(&self) -> Result<String> {
        let id = self
            .repository_id
            .get_or_try_init(|| async {
                debug!(
                    owner = %self.config.owner,
                    repo = %self.config.repo,
                    "resolving repository id"
                );
                let data: RepositoryIdData = self
                    .graphql(
                        REPOSITORY_ID_QUERY,
                        RepositoryIdVariables {
                            owner: &self.config.owner,
                            name: &self.config.repo,
                        },
                    )
                    .await?;

                data.repository.map(|r| r.id).ok_or_else(|| {
                    Error::GitHubApi(format!(
                        "repository {}/{} not found",
                        self.config.owner, self.config.repo
                    ))
                })
            })
            .await?;

        Ok(id.clone())
    }

    async fn find_existing_pr(&self, head: &str, base: &str) -> Result<Option<PullRequest>> {
        debug!(head, base, "looking up open PR");
        let head_filter = format!("{}:{}", &self.config.owner, head);

        let prs = self
            .client
            .pulls(&self.config.owner, &self.config.repo)
            .list()
            .head(head_filter)
            .base(base)
            .state(octocrab::params::State::Open)
            .send()
            .await?;

        Ok(prs.items.first().map(|pr| PullRequest {
            number: pr.number,
            html_url: pr
                .html_url
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            base_ref: pr.base.ref_field.clone(),
            head_ref: pr.head.ref_field.clone(),
            title: pr.title.as_deref().unwrap_or_default().to_string(),
        }))
    }

    async fn create_pr(
        &self,
        head: &str,
        base: &str,
        title: &str,
        body: &str,
    ) -> Result<PullRequest> {
        let repository_id = self.repository_id().await?;
        debug!(head, base, "creating PR");

        let data: CreatePullRequestData = self
            .graphql(
                CREATE_PULL_REQUEST_MUTATION,
                CreatePullRequestVariables {
                    input: CreatePullRequestInput {
                        repository_id: &repository_id,
                        base_ref_name: base,
                        head_ref_name: head,
                        title,
                        body,
                    },
                },
            )
            .await?;

        let pr: PullRequest = data.create_pull_request.pull_request.into();
        debug!(number = pr.number, "created PR");
        Ok(pr)
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}
