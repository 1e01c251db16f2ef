//! Platform adapters
//!
//! One adapter per bug-bounty platform. Each adapter owns its vendor's
//! auth and pagination quirks completely; the orchestrator only ever sees
//! the `PlatformAdapter` contract and canonical `Program` models.
//!
//! Adapters are stateless with respect to history. They report what the
//! platform publishes right now and never compare against prior runs.

pub mod api;
pub mod bugcrowd;
pub mod credentials;
pub mod error;
pub mod hackerone;
pub mod http;
pub mod intigriti;
pub mod traits;

pub use api::{build_adapters, PlatformSelection};
pub use credentials::{CredentialBundle, Credentials};
pub use error::{PlatformError, PlatformResult};
pub use traits::PlatformAdapter;

#[cfg(test)]
mod tests;
