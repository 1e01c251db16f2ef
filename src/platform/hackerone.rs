//! HackerOne adapter
//!
//! Talks to the hacker REST API with HTTP basic auth (username + API
//! token). The program directory is paginated; each program's structured
//! scopes come from the program detail resource. Only the mapping into
//! canonical models leaves this module.

use crate::core::retry::{retry_async, RetryPolicy};
use crate::model::{Program, Scope};
use crate::platform::credentials::CredentialBundle;
use crate::platform::error::{PlatformError, PlatformResult};
use crate::platform::http;
use crate::platform::traits::PlatformAdapter;
use serde::Deserialize;

const PLATFORM: &str = "hackerone";
const API_BASE: &str = "https://api.hackerone.com/v1/hackers";

pub struct HackerOneAdapter {
    credentials: CredentialBundle,
}

impl HackerOneAdapter {
    pub fn new(credentials: CredentialBundle) -> Self {
        Self { credentials }
    }

    fn auth(&self) -> PlatformResult<(&str, &str)> {
        let username = self.credentials.get("username").ok_or_else(|| {
            PlatformError::Auth {
                platform: PLATFORM.to_string(),
                message: "missing 'username' in credentials".to_string(),
            }
        })?;
        let token = self
            .credentials
            .get("token")
            .ok_or_else(|| PlatformError::Auth {
                platform: PLATFORM.to_string(),
                message: "missing 'token' in credentials".to_string(),
            })?;
        Ok((username, token))
    }

    async fn get_json(&self, client: &reqwest::Client, url: &str) -> PlatformResult<String> {
        let (username, token) = self.auth()?;
        // Vendor endpoint throws occasional 5xx under load
        retry_async("hackerone_get", RetryPolicy::default(), || async move {
            let response = client
                .get(url)
                .basic_auth(username, Some(token))
                .header("Accept", "application/json")
                .send()
                .await
                .map_err(|e| http::fetch_error(PLATFORM, e))?;

            let status = response.status();
            if !status.is_success() {
                return Err(http::status_error(PLATFORM, status, url));
            }

            response
                .text()
                .await
                .map_err(|e| http::fetch_error(PLATFORM, e))
        })
        .await
    }
}

#[async_trait::async_trait]
impl PlatformAdapter for HackerOneAdapter {
    fn name(&self) -> &'static str {
        PLATFORM
    }

    async fn valid_access(&self) -> bool {
        self.credentials.contains("username") && self.credentials.contains("token")
    }

    async fn fetch_programs(&self) -> PlatformResult<Vec<Program>> {
        let client = http::build_client(PLATFORM)?;
        let mut programs = Vec::new();

        let mut page_url = Some(format!("{}/programs?page[size]=100", API_BASE));
        while let Some(url) = page_url {
            let body = self.get_json(&client, &url).await?;
            let page = parse_directory_page(&body)?;

            for handle in &page.handles {
                let detail_url = format!("{}/programs/{}", API_BASE, handle);
                let detail_body = self.get_json(&client, &detail_url).await?;
                programs.push(parse_program_detail(&detail_body)?);
            }

            page_url = page.next;
        }

        log::debug!("hackerone: fetched {} programs", programs.len());
        Ok(programs)
    }
}

struct DirectoryPage {
    handles: Vec<String>,
    next: Option<String>,
}

#[derive(Deserialize)]
struct RawDirectory {
    data: Vec<RawProgramRef>,
    #[serde(default)]
    links: RawLinks,
}

#[derive(Deserialize, Default)]
struct RawLinks {
    next: Option<String>,
}

#[derive(Deserialize)]
struct RawProgramRef {
    attributes: RawProgramRefAttrs,
}

#[derive(Deserialize)]
struct RawProgramRefAttrs {
    handle: String,
}

#[derive(Deserialize)]
struct RawProgramDetail {
    attributes: RawProgramAttrs,
    #[serde(default)]
    relationships: RawRelationships,
}

#[derive(Deserialize)]
struct RawProgramAttrs {
    handle: String,
    state: String,
    #[serde(default)]
    submission_state: Option<String>,
}

#[derive(Deserialize, Default)]
struct RawRelationships {
    #[serde(default)]
    structured_scopes: RawScopeList,
}

#[derive(Deserialize, Default)]
struct RawScopeList {
    #[serde(default)]
    data: Vec<RawStructuredScope>,
}

#[derive(Deserialize)]
struct RawStructuredScope {
    attributes: RawScopeAttrs,
}

#[derive(Deserialize)]
struct RawScopeAttrs {
    asset_identifier: String,
    asset_type: String,
    eligible_for_submission: bool,
}

fn parse_error(message: impl std::fmt::Display) -> PlatformError {
    PlatformError::Parse {
        platform: PLATFORM.to_string(),
        message: message.to_string(),
    }
}

fn parse_directory_page(body: &str) -> PlatformResult<DirectoryPage> {
    let raw: RawDirectory = serde_json::from_str(body).map_err(parse_error)?;
    Ok(DirectoryPage {
        handles: raw.data.into_iter().map(|p| p.attributes.handle).collect(),
        next: raw.links.next,
    })
}

/// Map one program detail payload into the canonical model
pub(crate) fn parse_program_detail(body: &str) -> PlatformResult<Program> {
    #[derive(Deserialize)]
    struct Envelope {
        data: RawProgramDetail,
    }

    let raw: Envelope = serde_json::from_str(body).map_err(parse_error)?;
    let attrs = raw.data.attributes;

    let mut scopes = Vec::new();
    for raw_scope in raw.data.relationships.structured_scopes.data {
        let s = raw_scope.attributes;
        scopes.push(
            Scope::new(
                s.asset_identifier,
                s.asset_type.to_lowercase(),
                s.eligible_for_submission,
            )
            .map_err(parse_error)?,
        );
    }

    // soft_launched listings are invite-only; public_mode is the open directory
    let is_private = attrs.state != "public_mode";

    let mut program =
        Program::new(attrs.handle, PLATFORM, scopes, is_private).map_err(parse_error)?;
    if let Some(submission_state) = attrs.submission_state {
        program = program.with_extra_data(submission_state);
    }
    Ok(program)
}
