//! Bugcrowd adapter
//!
//! Bugcrowd has no researcher token API; access rides on a logged-in
//! session. The adapter signs in with email/password on the first fetch and
//! keeps the session cookie in the shared client for its lifetime. A 401 on
//! a later page means the session expired; one fresh sign-in is attempted
//! before the failure is surfaced as an auth error.

use crate::model::{Program, Scope};
use crate::platform::credentials::CredentialBundle;
use crate::platform::error::{PlatformError, PlatformResult};
use crate::platform::http;
use crate::platform::traits::PlatformAdapter;
use serde::Deserialize;
use tokio::sync::Mutex;

const PLATFORM: &str = "bugcrowd";
const BASE_URL: &str = "https://bugcrowd.com";

pub struct BugcrowdAdapter {
    credentials: CredentialBundle,
    session: Mutex<Option<reqwest::Client>>,
}

impl BugcrowdAdapter {
    pub fn new(credentials: CredentialBundle) -> Self {
        Self {
            credentials,
            session: Mutex::new(None),
        }
    }

    fn auth_error(message: impl Into<String>) -> PlatformError {
        PlatformError::Auth {
            platform: PLATFORM.to_string(),
            message: message.into(),
        }
    }

    /// Sign in and return a client holding the session cookie
    async fn sign_in(&self) -> PlatformResult<reqwest::Client> {
        let email = self
            .credentials
            .get("email")
            .ok_or_else(|| Self::auth_error("missing 'email' in credentials"))?;
        let password = self
            .credentials
            .get("password")
            .ok_or_else(|| Self::auth_error("missing 'password' in credentials"))?;

        let client = http::build_client(PLATFORM)?;
        let url = format!("{}/user/sign_in", BASE_URL);
        let response = client
            .post(&url)
            .form(&[("user[email]", email), ("user[password]", password)])
            .send()
            .await
            .map_err(|e| http::fetch_error(PLATFORM, e))?;

        if !response.status().is_success() && !response.status().is_redirection() {
            return Err(Self::auth_error(format!(
                "sign-in rejected with {}",
                response.status()
            )));
        }

        log::debug!("bugcrowd: session established");
        Ok(client)
    }

    /// Session client, signing in lazily on first use
    async fn session_client(&self, force_refresh: bool) -> PlatformResult<reqwest::Client> {
        let mut guard = self.session.lock().await;
        if force_refresh {
            *guard = None;
        }
        if let Some(client) = guard.as_ref() {
            return Ok(client.clone());
        }
        let client = self.sign_in().await?;
        *guard = Some(client.clone());
        Ok(client)
    }

    async fn fetch_page(&self, page: usize) -> PlatformResult<String> {
        let url = format!("{}/engagements.json?page={}", BASE_URL, page);

        let client = self.session_client(false).await?;
        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| http::fetch_error(PLATFORM, e))?;

        // Expired session: retry exactly once with a fresh sign-in
        let response = if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            log::debug!("bugcrowd: session expired, re-authenticating");
            let client = self.session_client(true).await?;
            client
                .get(&url)
                .send()
                .await
                .map_err(|e| http::fetch_error(PLATFORM, e))?
        } else {
            response
        };

        let status = response.status();
        if !status.is_success() {
            return Err(http::status_error(PLATFORM, status, &url));
        }

        response
            .text()
            .await
            .map_err(|e| http::fetch_error(PLATFORM, e))
    }
}

#[async_trait::async_trait]
impl PlatformAdapter for BugcrowdAdapter {
    fn name(&self) -> &'static str {
        PLATFORM
    }

    async fn valid_access(&self) -> bool {
        self.credentials.contains("email") && self.credentials.contains("password")
    }

    async fn fetch_programs(&self) -> PlatformResult<Vec<Program>> {
        let mut programs = Vec::new();
        let mut page = 1;

        loop {
            let body = self.fetch_page(page).await?;
            let batch = parse_engagements_page(&body)?;
            if batch.is_empty() {
                break;
            }
            programs.extend(batch);
            page += 1;
        }

        log::debug!("bugcrowd: fetched {} programs", programs.len());
        Ok(programs)
    }
}

#[derive(Deserialize)]
struct RawEngagementsPage {
    #[serde(default)]
    engagements: Vec<RawEngagement>,
}

#[derive(Deserialize)]
struct RawEngagement {
    name: String,
    #[serde(default)]
    access_status: Option<String>,
    #[serde(default)]
    target_groups: Vec<RawTargetGroup>,
}

#[derive(Deserialize)]
struct RawTargetGroup {
    in_scope: bool,
    #[serde(default)]
    targets: Vec<RawTarget>,
}

#[derive(Deserialize)]
struct RawTarget {
    name: String,
    category: String,
}

fn parse_error(message: impl std::fmt::Display) -> PlatformError {
    PlatformError::Parse {
        platform: PLATFORM.to_string(),
        message: message.to_string(),
    }
}

/// Map one engagements page into canonical programs
pub(crate) fn parse_engagements_page(body: &str) -> PlatformResult<Vec<Program>> {
    let raw: RawEngagementsPage = serde_json::from_str(body).map_err(parse_error)?;

    let mut programs = Vec::new();
    for engagement in raw.engagements {
        let mut scopes = Vec::new();
        for group in &engagement.target_groups {
            for target in &group.targets {
                scopes.push(
                    Scope::new(&target.name, target.category.to_lowercase(), group.in_scope)
                        .map_err(parse_error)?,
                );
            }
        }

        let is_private = engagement.access_status.as_deref() != Some("open");
        programs
            .push(Program::new(engagement.name, PLATFORM, scopes, is_private).map_err(parse_error)?);
    }
    Ok(programs)
}
