//! Voyager GraphQL client for the company-admin followers list.

use crate::config::{Credentials, ExportConfig};
use crate::domain::model::PageRequest;
use crate::domain::ports::{FetchFailure, FollowerSource};
use crate::utils::error::{ExportError, Result};
use async_trait::async_trait;
use reqwest::{header, redirect, Client, StatusCode};
use url::Url;

pub const FOLLOWERS_QUERY_ID: &str = "voyagerOrganizationDashFollowers.36569e7e40afe58d8bc91299def4c53b";
const GRAPHQL_PATH: &str = "/voyager/api/graphql";
const ACCEPT_NORMALIZED: &str = "application/vnd.linkedin.normalized+json+2.1";

/// Error bodies are trimmed to this many characters in diagnostics.
const MAX_ERROR_BODY: usize = 512;

pub struct LinkedInClient {
    client: Client,
    base_url: Url,
    company_id: String,
    credentials: Credentials,
}

impl LinkedInClient {
    pub fn new(config: &ExportConfig) -> Result<Self> {
        let base_url = Url::parse(&config.api_base_url).map_err(|e| {
            ExportError::InvalidConfigValueError {
                field: "api_base_url".to_string(),
                value: config.api_base_url.clone(),
                reason: e.to_string(),
            }
        })?;

        let client = Client::builder()
            .redirect(redirect::Policy::none())
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url,
            company_id: config.company_id.clone(),
            credentials: config.credentials.clone(),
        })
    }

    /// `variables` is a restli tuple, not a percent-encoded form value, so
    /// the query string is assembled by hand.
    pub fn request_url(&self, request: &PageRequest) -> Url {
        let mut variables = format!(
            "(start:{},count:{},organizationalPage:urn%3Ali%3Afsd_organizationalPage%3A{},followerType:MEMBER",
            request.offset, request.page_size, self.company_id
        );
        if let Some(ts) = request.max_follow_timestamp.as_deref().filter(|ts| !ts.is_empty()) {
            variables.push_str(&format!(",maxFollowTimestamp:{}", ts));
        }
        variables.push(')');

        let mut url = self.base_url.clone();
        url.set_path(GRAPHQL_PATH);
        url.set_query(Some(&format!(
            "variables={}&queryId={}",
            variables, FOLLOWERS_QUERY_ID
        )));
        url
    }

    fn referer(&self) -> String {
        let mut url = self.base_url.clone();
        url.set_path(&format!("/company/{}/admin/analytics/followers/", self.company_id));
        url.set_query(None);
        url.to_string()
    }
}

#[async_trait]
impl FollowerSource for LinkedInClient {
    async fn fetch_page(&self, request: &PageRequest) -> std::result::Result<String, FetchFailure> {
        let url = self.request_url(request);
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, ACCEPT_NORMALIZED)
            .header(header::COOKIE, &self.credentials.cookie)
            .header("csrf-token", &self.credentials.csrf_token)
            .header(header::REFERER, self.referer())
            .header("x-li-lang", "en_US")
            .header("x-restli-protocol-version", "2.0.0")
            .send()
            .await
            .map_err(|e| FetchFailure::Network(e.to_string()))?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(FetchFailure::Unauthorized {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchFailure::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(FetchFailure::Status {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY).collect(),
            });
        }

        Ok(body)
    }
}
