//! GitHub REST client for releases
//!
//! Endpoints used:
//!
//! - `GET   {api}/repos/{owner}/{repo}/releases/tags/{tag}`
//! - `GET   {api}/repos/{owner}/{repo}/releases?per_page=100`
//! - `GET   {api}/repos/{owner}/{repo}/releases/{id}`
//! - `POST  {api}/repos/{owner}/{repo}/releases`
//! - `PATCH {api}/repos/{owner}/{repo}/releases/{id}`
//! - `POST  {uploads}/repos/{owner}/{repo}/releases/{id}/assets?name={name}`

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use tracing::{debug, info, instrument};

use rel_core::config::Config;
use rel_core::error::{HostError, Result};
use rel_core::host::ReleaseHost;
use rel_core::types::{AssetSpec, NewRelease, ProjectIdentity, ReleaseRecord};

const API_VERSION: &str = "2022-11-28";
const USER_AGENT: &str = concat!("rel/", env!("CARGO_PKG_VERSION"));

/// Fields sent when editing a release
#[derive(Debug, Serialize)]
struct ReleasePatch<'a> {
    tag_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    draft: bool,
}

impl<'a> From<&'a ReleaseRecord> for ReleasePatch<'a> {
    fn from(release: &'a ReleaseRecord) -> Self {
        Self {
            tag_name: &release.tag_name,
            name: release.name.as_deref(),
            draft: release.draft,
        }
    }
}

fn transport(action: &str, err: reqwest::Error) -> HostError {
    HostError::Transport {
        action: action.to_string(),
        reason: err.to_string(),
    }
}

/// Fail with the status and body of a non-success response
async fn check(action: &str, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(HostError::Api {
        action: action.to_string(),
        status: status.as_u16(),
        body,
    }
    .into())
}

/// GitHub release host for one repository
pub struct GitHubClient {
    client: Client,
    api_url: String,
    uploads_url: String,
    identity: ProjectIdentity,
    token: String,
}

impl GitHubClient {
    /// Create a client using the configured endpoints and timeout
    pub fn new(config: &Config, identity: ProjectIdentity, token: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| transport("building HTTP client", e))?;

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            uploads_url: config.uploads_url.trim_end_matches('/').to_string(),
            identity,
            token: token.into(),
        })
    }

    fn releases_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/releases",
            self.api_url, self.identity.owner, self.identity.repo
        )
    }

    fn release_url(&self, id: u64) -> String {
        format!("{}/{}", self.releases_url(), id)
    }

    fn tag_url(&self, tag: &str) -> String {
        format!("{}/tags/{}", self.releases_url(), tag)
    }

    fn assets_url(&self, id: u64) -> String {
        format!(
            "{}/repos/{}/{}/releases/{}/assets",
            self.uploads_url, self.identity.owner, self.identity.repo, id
        )
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .bearer_auth(&self.token)
            .header(ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
    }

    /// GET a release, treating 404 as absent
    async fn get_release(&self, action: &str, url: &str) -> Result<Option<ReleaseRecord>> {
        let response = self
            .authorized(self.client.get(url))
            .send()
            .await
            .map_err(|e| transport(action, e))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let release: ReleaseRecord = check(action, response)
            .await?
            .json()
            .await
            .map_err(|e| transport(action, e))?;
        Ok(Some(release))
    }

    /// Draft releases are not visible through the tag endpoint
    async fn find_draft(&self, tag: &str) -> Result<Option<ReleaseRecord>> {
        let action = "listing releases";
        let response = self
            .authorized(self.client.get(self.releases_url()))
            .query(&[("per_page", "100")])
            .send()
            .await
            .map_err(|e| transport(action, e))?;

        let releases: Vec<ReleaseRecord> = check(action, response)
            .await?
            .json()
            .await
            .map_err(|e| transport(action, e))?;

        Ok(releases
            .into_iter()
            .find(|r| r.draft && r.tag_name == tag))
    }
}

#[async_trait]
impl ReleaseHost for GitHubClient {
    fn name(&self) -> &str {
        "github"
    }

    #[instrument(skip(self), fields(repo = %self.identity))]
    async fn release_by_tag(&self, tag: &str) -> Result<Option<ReleaseRecord>> {
        if let Some(release) = self
            .get_release("getting release by tag", &self.tag_url(tag))
            .await?
        {
            return Ok(Some(release));
        }

        debug!(tag, "no published release, checking drafts");
        self.find_draft(tag).await
    }

    #[instrument(skip(self), fields(repo = %self.identity))]
    async fn release_by_id(&self, id: u64) -> Result<Option<ReleaseRecord>> {
        self.get_release("getting release", &self.release_url(id))
            .await
    }

    #[instrument(skip(self, release), fields(repo = %self.identity, tag = %release.tag_name))]
    async fn create_release(&self, release: &NewRelease) -> Result<ReleaseRecord> {
        let action = "creating release";
        let response = self
            .authorized(self.client.post(self.releases_url()))
            .json(release)
            .send()
            .await
            .map_err(|e| transport(action, e))?;

        let created: ReleaseRecord = check(action, response)
            .await?
            .json()
            .await
            .map_err(|e| transport(action, e))?;
        info!(id = created.id, tag = %created.tag_name, "created release");
        Ok(created)
    }

    #[instrument(skip(self, asset), fields(repo = %self.identity, name = %asset.name))]
    async fn upload_asset(&self, asset: &AssetSpec) -> Result<()> {
        let action = "uploading release asset";
        let file = tokio::fs::File::open(&asset.path).await?;
        let size = file.metadata().await?.len();

        let start = std::time::Instant::now();
        let response = self
            .authorized(self.client.post(self.assets_url(asset.release_id)))
            .query(&[("name", asset.name.as_str())])
            .header(CONTENT_TYPE, "application/octet-stream")
            .header(CONTENT_LENGTH, size)
            .body(file)
            .send()
            .await
            .map_err(|e| transport(action, e))?;
        check(action, response).await?;

        info!(
            name = %asset.name,
            size,
            duration_ms = start.elapsed().as_millis(),
            "uploaded release asset"
        );
        Ok(())
    }

    #[instrument(skip(self, release), fields(repo = %self.identity, id = release.id))]
    async fn edit_release(&self, release: &ReleaseRecord) -> Result<ReleaseRecord> {
        let action = "editing release";
        let response = self
            .authorized(self.client.patch(self.release_url(release.id)))
            .json(&ReleasePatch::from(release))
            .send()
            .await
            .map_err(|e| transport(action, e))?;

        check(action, response)
            .await?
            .json()
            .await
            .map_err(|e| transport(action, e).into())
    }
}
