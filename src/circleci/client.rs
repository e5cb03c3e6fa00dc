use std::fs::File;
use std::path::Path;
use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::types::*;
use crate::error::{CircleciError, Result};
use crate::project::{Filter, Project};

pub const DEFAULT_HOST: &str = "https://circleci.com";
const API_PATH: &str = "/api/v1.1/";
const USER_AGENT: &str = concat!("circleci-cli/", env!("CARGO_PKG_VERSION"));

/// Largest page the recent-builds endpoints return
const PAGE_SIZE: usize = 100;

/// CircleCI v1.1 API client
pub struct CircleClient {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl CircleClient {
    /// Create a client for `host` (e.g. `https://circleci.com`)
    ///
    /// An empty token is treated as no token.
    pub fn new(host: &str, token: Option<String>) -> Result<Self> {
        let base = format!("{}{API_PATH}", host.trim_end_matches('/'));
        let base_url = Url::parse(&base).map_err(|e| {
            CircleciError::InvalidArgument(format!("invalid host {host}: {e}"))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(CircleciError::InvalidArgument(format!(
                "invalid host {host}"
            )));
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url,
            token: token.filter(|t| !t.is_empty()),
        })
    }

    /// Whether requests carry an API token
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Build an API URL from path segments, percent-encoding each one
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| CircleciError::InvalidArgument(format!("invalid host {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn project_endpoint(&self, project: &Project, rest: &[&str]) -> Result<Url> {
        let mut segments = vec!["project", "github", project.account.as_str(), project.repository.as_str()];
        segments.extend_from_slice(rest);
        self.endpoint(&segments)
    }

    /// Attach the token and send, mapping non-2xx statuses to errors
    fn send(&self, method: Method, url: Url, prepare: impl FnOnce(RequestBuilder) -> RequestBuilder) -> Result<Response> {
        debug!(%method, %url, "request");

        let mut request = self
            .client
            .request(method, url)
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(ref token) = self.token {
            request = request.query(&[("circle-token", token)]);
        }

        let response = prepare(request).send()?;
        debug!(status = %response.status(), "response");
        self.check(response)
    }

    fn check(&self, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(CircleciError::Unauthorized {
                status: status.as_u16(),
                token_supplied: self.has_token(),
            });
        }

        let text = response.text().unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(|body| body.message)
            .unwrap_or(text);
        Err(CircleciError::api(status.as_u16(), message))
    }

    fn parse<T: DeserializeOwned>(response: Response) -> Result<T> {
        let body = response.text()?;
        serde_json::from_str(&body).map_err(CircleciError::Json)
    }

    fn get<T: DeserializeOwned>(&self, url: Url, query: &[(&str, String)]) -> Result<T> {
        let response = self.send(Method::GET, url, |r| r.query(query))?;
        Self::parse(response)
    }

    fn post<T: DeserializeOwned>(&self, url: Url, body: Option<&serde_json::Value>) -> Result<T> {
        let response = self.send(Method::POST, url, |r| match body {
            Some(body) => r.json(body),
            None => r,
        })?;
        Self::parse(response)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Project Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// List all followed projects
    pub fn list_projects(&self) -> Result<Vec<ProjectInfo>> {
        self.get(self.endpoint(&["projects"])?, &[])
    }

    /// Find a followed project
    pub fn get_project(&self, project: &Project) -> Result<ProjectInfo> {
        self.list_projects()?
            .into_iter()
            .find(|p| p.username == project.account && p.reponame == project.repository)
            .ok_or_else(|| CircleciError::ProjectNotFound(project.to_string()))
    }

    /// Clear the project's build cache
    pub fn clear_cache(&self, project: &Project) -> Result<String> {
        let url = self.project_endpoint(project, &["build-cache"])?;
        let response = self.send(Method::DELETE, url, |r| r)?;
        let body: ClearCacheResponse = Self::parse(response)?;
        Ok(body.status)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Build Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Recent builds across all projects; `limit < 0` means no limit
    pub fn list_recent_builds(&self, limit: i32, offset: i32) -> Result<Vec<Build>> {
        let url = self.endpoint(&["recent-builds"])?;
        self.paged_builds(&url, &[], limit, offset)
    }

    /// Recent builds of one project, optionally restricted to a branch and status
    pub fn list_recent_builds_for_project(
        &self,
        project: &Project,
        branch: Option<&str>,
        filter: Option<Filter>,
        limit: i32,
        offset: i32,
    ) -> Result<Vec<Build>> {
        let url = match branch.filter(|b| !b.is_empty()) {
            Some(branch) => self.project_endpoint(project, &["tree", branch])?,
            None => self.project_endpoint(project, &[])?,
        };

        let mut query = Vec::new();
        if let Some(filter) = filter {
            query.push(("filter", filter.as_str().to_string()));
        }

        self.paged_builds(&url, &query, limit, offset)
    }

    /// Fetch builds page by page until `limit` is reached or a short page arrives
    fn paged_builds(
        &self,
        url: &Url,
        query: &[(&str, String)],
        limit: i32,
        offset: i32,
    ) -> Result<Vec<Build>> {
        let wanted = usize::try_from(limit).ok();
        let mut offset = usize::try_from(offset).unwrap_or(0);
        let mut builds = Vec::new();

        loop {
            let page_size = match wanted {
                Some(wanted) => wanted.saturating_sub(builds.len()).min(PAGE_SIZE),
                None => PAGE_SIZE,
            };
            if page_size == 0 {
                break;
            }

            let mut params = query.to_vec();
            params.push(("limit", page_size.to_string()));
            params.push(("offset", offset.to_string()));

            let page: Vec<Build> = self.get(url.clone(), &params)?;
            let received = page.len();
            builds.extend(page);
            offset += received;

            if received < page_size {
                break;
            }
        }

        Ok(builds)
    }

    /// Most recent build of a project, if any
    pub fn latest_build(&self, project: &Project) -> Result<Option<Build>> {
        let builds = self.list_recent_builds_for_project(project, None, None, 1, 0)?;
        Ok(builds.into_iter().next())
    }

    /// Get a specific build
    pub fn get_build(&self, project: &Project, build_num: u32) -> Result<Build> {
        let num = build_num.to_string();
        self.get(self.project_endpoint(project, &[&num])?, &[])
    }

    /// Retry a build
    pub fn retry_build(&self, project: &Project, build_num: u32) -> Result<Build> {
        let num = build_num.to_string();
        self.post(self.project_endpoint(project, &[&num, "retry"])?, None)
    }

    /// Cancel a build
    pub fn cancel_build(&self, project: &Project, build_num: u32) -> Result<Build> {
        let num = build_num.to_string();
        self.post(self.project_endpoint(project, &[&num, "cancel"])?, None)
    }

    /// Trigger a new build on a branch
    pub fn trigger_build(&self, project: &Project, branch: &str) -> Result<Build> {
        self.post(self.project_endpoint(project, &["tree", branch])?, None)
    }

    /// Console output of an action; empty when the action has no output URL
    pub fn get_action_outputs(&self, action: &Action) -> Result<Vec<ActionOutput>> {
        let Some(ref output_url) = action.output_url else {
            return Ok(Vec::new());
        };

        let url = Url::parse(output_url).map_err(|_| {
            CircleciError::InvalidArgument(format!("Invalid output URL: {output_url}"))
        })?;

        // Output URLs are pre-signed and must not carry the API token
        debug!(%url, "fetching action output");
        let response = self.client.get(url).send()?;
        let response = self.check(response)?;
        Self::parse(response)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Artifact & Test Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// List artifacts for a build
    pub fn list_build_artifacts(&self, project: &Project, build_num: u32) -> Result<Vec<Artifact>> {
        let num = build_num.to_string();
        self.get(self.project_endpoint(project, &[&num, "artifacts"])?, &[])
    }

    /// List test results for a build
    pub fn list_test_metadata(&self, project: &Project, build_num: u32) -> Result<Vec<TestMetadata>> {
        let num = build_num.to_string();
        let response: TestMetadataResponse =
            self.get(self.project_endpoint(project, &[&num, "tests"])?, &[])?;
        Ok(response.tests)
    }

    /// Stream an artifact into `path`, creating parent directories
    pub fn download_artifact(&self, url: &str, path: &Path) -> Result<()> {
        let url = Url::parse(url).map_err(|_| {
            CircleciError::InvalidArgument(format!("Invalid artifact URL: {url}"))
        })?;

        let mut response = self.send(Method::GET, url, |r| r)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = File::create(path)?;
        response.copy_to(&mut file)?;
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Environment Variable & SSH Key Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Add (or overwrite) a project environment variable
    pub fn add_env_var(&self, project: &Project, name: &str, value: &str) -> Result<EnvVar> {
        let body = serde_json::json!({ "name": name, "value": value });
        self.post(self.project_endpoint(project, &["envvar"])?, Some(&body))
    }

    /// List project environment variables
    pub fn list_env_vars(&self, project: &Project) -> Result<Vec<EnvVar>> {
        self.get(self.project_endpoint(project, &["envvar"])?, &[])
    }

    /// Delete a project environment variable
    pub fn delete_env_var(&self, project: &Project, name: &str) -> Result<()> {
        let url = self.project_endpoint(project, &["envvar", name])?;
        self.send(Method::DELETE, url, |r| r)?;
        Ok(())
    }

    /// Add an SSH key used to reach `hostname` from builds
    pub fn add_ssh_key(&self, project: &Project, hostname: &str, private_key: &str) -> Result<()> {
        let body = SshKey {
            hostname,
            private_key,
        };
        let url = self.project_endpoint(project, &["ssh-key"])?;
        self.send(Method::POST, url, |r| r.json(&body))?;
        Ok(())
    }
}
