//! GitHub platform service implementation

use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::types::{CreatedPullRequest, NewPullRequest};
use async_trait::async_trait;
use http::header::{HeaderName, HeaderValue, USER_AGENT};
use http::Uri;
use hyper_rustls::HttpsConnectorBuilder;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use octocrab::service::middleware::auth_header::AuthHeaderLayer;
use octocrab::service::middleware::base_uri::BaseUriLayer;
use octocrab::service::middleware::extra_headers::ExtraHeadersLayer;
use octocrab::{AuthState, Octocrab, OctocrabBuilder};
use std::sync::Arc;
use tracing::debug;

/// Public GitHub API
pub const GITHUB_API_URI: &str = "https://api.github.com";

const GITHUB_UPLOAD_URI: &str = "https://uploads.github.com";

/// Header GitHub uses to interpret and render timestamps
const TIME_ZONE_HEADER: &str = "time-zone";

/// Connection options for [`GitHubService`]
#[derive(Debug, Clone, Default)]
pub struct GitHubServiceOptions {
    /// Personal access token
    pub token: String,
    /// `User-Agent` header value
    pub user_agent: String,
    /// IANA timezone name, sent as `Time-Zone`
    pub timezone: String,
    /// API base URI (None for api.github.com)
    pub base_uri: Option<String>,
}

/// GitHub service using octocrab
pub struct GitHubService {
    client: Octocrab,
}

impl GitHubService {
    /// Create a new GitHub service
    ///
    /// Every request carries exactly one `User-Agent`: the configured one, or
    /// `octocrab` when none is set.
    pub fn new(options: &GitHubServiceOptions) -> Result<Self> {
        let base_uri: Uri = options
            .base_uri
            .as_deref()
            .unwrap_or(GITHUB_API_URI)
            .parse()
            .map_err(|e| Error::Config(format!("invalid API URL: {e}")))?;
        let upload_uri = Uri::from_static(GITHUB_UPLOAD_URI);

        let mut headers = vec![(
            USER_AGENT,
            header_value(non_empty_or(&options.user_agent, "octocrab"), "user agent")?,
        )];
        if !options.timezone.is_empty() {
            headers.push((
                HeaderName::from_static(TIME_ZONE_HEADER),
                header_value(&options.timezone, "timezone")?,
            ));
        }

        let mut auth = header_value(&format!("Bearer {}", options.token), "token")?;
        auth.set_sensitive(true);

        let connector = HttpsConnectorBuilder::new()
            .with_native_roots()?
            .https_or_http()
            .enable_http1()
            .build();
        let http = Client::builder(TokioExecutor::new()).build(connector);

        let Ok(client) = OctocrabBuilder::new_empty()
            .with_service(http)
            .with_layer(&ExtraHeadersLayer::new(Arc::new(headers)))
            .with_layer(&BaseUriLayer::new(base_uri.clone()))
            .with_layer(&AuthHeaderLayer::new(Some(auth), base_uri, upload_uri))
            .with_auth(AuthState::None)
            .build();

        Ok(Self { client })
    }
}

/// Web address repositories live under for the API at `base_uri`.
///
/// `api.github.com` (or no override) maps to `https://github.com`; an
/// Enterprise API such as `https://ghe.example.com/api/v3` maps to its host.
pub fn web_base_url(base_uri: Option<&str>) -> String {
    const GITHUB_WEB: &str = "https://github.com";

    let Some(uri) = base_uri.and_then(|raw| raw.parse::<Uri>().ok()) else {
        return GITHUB_WEB.to_string();
    };
    match (uri.scheme_str(), uri.authority()) {
        (_, Some(authority)) if authority.host() == "api.github.com" => GITHUB_WEB.to_string(),
        (Some(scheme), Some(authority)) => format!("{scheme}://{authority}"),
        _ => GITHUB_WEB.to_string(),
    }
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() { fallback } else { value }
}

fn header_value(value: &str, what: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| Error::Config(format!("invalid {what}: {e}")))
}

#[async_trait]
impl PlatformService for GitHubService {
    async fn create_pull_request(&self, request: &NewPullRequest) -> Result<CreatedPullRequest> {
        debug!(
            owner = %request.owner,
            repo = %request.repo,
            head = %request.head,
            base = %request.base,
            "creating pull request"
        );

        let pr = self
            .client
            .pulls(&request.owner, &request.repo)
            .create(&request.title, &request.head, &request.base)
            .body(&request.body)
            .send()
            .await?;

        // `url` is the API link; only used if GitHub omits the web link
        let html_url = pr
            .html_url
            .as_ref()
            .map_or_else(|| pr.url.clone(), ToString::to_string);

        let created = CreatedPullRequest {
            number: pr.number,
            html_url,
        };
        debug!(number = created.number, url = %created.html_url, "created pull request");
        Ok(created)
    }

    async fn add_assignees(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        assignees: &[String],
    ) -> Result<()> {
        debug!(owner, repo, number, ?assignees, "adding assignees");

        // The response is the full issue; only success matters here
        let _: serde_json::Value = self
            .client
            .post(
                format!("/repos/{owner}/{repo}/issues/{number}/assignees"),
                Some(&serde_json::json!({ "assignees": assignees })),
            )
            .await?;

        debug!(number, "added assignees");
        Ok(())
    }
}
