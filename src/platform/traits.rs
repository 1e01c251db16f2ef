//! Platform adapter contract
//!
//! The one capability interface the rest of the system programs against.

use crate::model::Program;
use crate::platform::error::PlatformResult;

/// A vendor-specific integration that fetches the platform's current programs
///
/// `fetch_programs` must surface failures as typed errors and never return
/// partial or empty data as success, so callers can tell "no programs" from
/// "fetch failed". Adapters needing authentication perform it lazily on the
/// first fetch and cache the credential for their lifetime; an expired
/// session triggers one fresh authentication attempt before giving up.
#[async_trait::async_trait]
pub trait PlatformAdapter: Send + Sync {
    /// Platform name, used as the owning platform of every fetched program
    fn name(&self) -> &'static str;

    /// Fetch the platform's current programs with their scope sets
    async fn fetch_programs(&self) -> PlatformResult<Vec<Program>>;

    /// Cheap pre-check that access is plausible (e.g. credentials present)
    ///
    /// Default implementation performs no check. A `false` return makes the
    /// orchestrator skip the platform without attempting a fetch.
    async fn valid_access(&self) -> bool {
        true
    }
}
