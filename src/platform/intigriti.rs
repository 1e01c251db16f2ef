//! Intigriti adapter
//!
//! Uses the researcher API with a bearer token. The program listing carries
//! no scope detail, so each listed program costs one extra detail call whose
//! content array mixes in- and out-of-scope entries distinguished by tier.
//! Asset types arrive as numeric ids and are mapped to labels here.

use crate::model::{Program, Scope};
use crate::platform::credentials::CredentialBundle;
use crate::platform::error::{PlatformError, PlatformResult};
use crate::platform::http;
use crate::platform::traits::PlatformAdapter;
use serde::Deserialize;

const PLATFORM: &str = "intigriti";
const API_BASE: &str = "https://api.intigriti.com/external/researcher/v1";

/// Out-of-scope tier id in the content array
const TIER_OUT_OF_SCOPE: u32 = 5;

pub struct IntigritiAdapter {
    credentials: CredentialBundle,
}

impl IntigritiAdapter {
    pub fn new(credentials: CredentialBundle) -> Self {
        Self { credentials }
    }

    fn token(&self) -> PlatformResult<&str> {
        self.credentials
            .get("token")
            .ok_or_else(|| PlatformError::Auth {
                platform: PLATFORM.to_string(),
                message: "missing 'token' in credentials".to_string(),
            })
    }

    async fn get_json(&self, client: &reqwest::Client, url: &str) -> PlatformResult<String> {
        let token = self.token()?;
        let response = client
            .get(url)
            .bearer_auth(token)
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
    }
}

#[async_trait::async_trait]
impl PlatformAdapter for IntigritiAdapter {
    fn name(&self) -> &'static str {
        PLATFORM
    }

    async fn valid_access(&self) -> bool {
        self.credentials.contains("token")
    }

    async fn fetch_programs(&self) -> PlatformResult<Vec<Program>> {
        let client = http::build_client(PLATFORM)?;

        let listing_url = format!("{}/programs?statusId=3", API_BASE);
        let body = self.get_json(&client, &listing_url).await?;
        let listed = parse_program_listing(&body)?;

        let mut programs = Vec::new();
        for entry in listed {
            let detail_url = format!("{}/programs/{}", API_BASE, entry.id);
            let detail_body = self.get_json(&client, &detail_url).await?;
            programs.push(parse_program_detail(&detail_body, &entry)?);
        }

        log::debug!("intigriti: fetched {} programs", programs.len());
        Ok(programs)
    }
}

pub(crate) struct ListedProgram {
    id: String,
    handle: String,
    confidentiality: u32,
}

#[derive(Deserialize)]
struct RawListing {
    #[serde(default)]
    records: Vec<RawListedProgram>,
}

#[derive(Deserialize)]
struct RawListedProgram {
    id: String,
    handle: String,
    #[serde(rename = "confidentialityLevel")]
    confidentiality_level: RawIdValue,
}

#[derive(Deserialize)]
struct RawIdValue {
    id: u32,
}

#[derive(Deserialize)]
struct RawProgramDetail {
    domains: RawDomains,
}

#[derive(Deserialize)]
struct RawDomains {
    #[serde(default)]
    content: Vec<RawDomain>,
}

#[derive(Deserialize)]
struct RawDomain {
    endpoint: String,
    #[serde(rename = "type")]
    asset_type: RawIdValue,
    tier: RawIdValue,
}

fn parse_error(message: impl std::fmt::Display) -> PlatformError {
    PlatformError::Parse {
        platform: PLATFORM.to_string(),
        message: message.to_string(),
    }
}

/// Numeric asset-type ids used by the researcher API
fn asset_type_label(id: u32) -> &'static str {
    match id {
        1 => "url",
        2 => "android",
        3 => "ios",
        4 => "iprange",
        5 => "device",
        _ => "other",
    }
}

pub(crate) fn parse_program_listing(body: &str) -> PlatformResult<Vec<ListedProgram>> {
    let raw: RawListing = serde_json::from_str(body).map_err(parse_error)?;
    Ok(raw
        .records
        .into_iter()
        .map(|p| ListedProgram {
            id: p.id,
            handle: p.handle,
            confidentiality: p.confidentiality_level.id,
        })
        .collect())
}

pub(crate) fn parse_program_detail(body: &str, entry: &ListedProgram) -> PlatformResult<Program> {
    let raw: RawProgramDetail = serde_json::from_str(body).map_err(parse_error)?;

    let mut scopes = Vec::new();
    for domain in raw.domains.content {
        scopes.push(
            Scope::new(
                domain.endpoint,
                asset_type_label(domain.asset_type.id),
                domain.tier.id != TIER_OUT_OF_SCOPE,
            )
            .map_err(parse_error)?,
        );
    }

    // confidentiality level 4 is the public listing tier
    let is_private = entry.confidentiality != 4;

    Program::new(entry.handle.clone(), PLATFORM, scopes, is_private).map_err(parse_error)
}
