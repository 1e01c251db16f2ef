//! Public API for the platform adapter area
//!
//! Builds the set of enabled adapters from configuration. Everything
//! outside this module works with `Arc<dyn PlatformAdapter>`.

use crate::platform::bugcrowd::BugcrowdAdapter;
use crate::platform::credentials::Credentials;
use crate::platform::hackerone::HackerOneAdapter;
use crate::platform::intigriti::IntigritiAdapter;
use crate::platform::traits::PlatformAdapter;
use std::sync::Arc;

/// Which platforms an extraction run should cover
#[derive(Debug, Clone, Default)]
pub struct PlatformSelection {
    pub hackerone: bool,
    pub bugcrowd: bool,
    pub intigriti: bool,
}

impl PlatformSelection {
    pub fn any_enabled(&self) -> bool {
        self.hackerone || self.bugcrowd || self.intigriti
    }
}

/// Instantiate one adapter per enabled platform, handing each its
/// credential bundle
pub fn build_adapters(
    selection: &PlatformSelection,
    credentials: &Credentials,
) -> Vec<Arc<dyn PlatformAdapter>> {
    let mut adapters: Vec<Arc<dyn PlatformAdapter>> = Vec::new();

    if selection.hackerone {
        adapters.push(Arc::new(HackerOneAdapter::new(
            credentials.bundle("hackerone"),
        )));
    }
    if selection.bugcrowd {
        adapters.push(Arc::new(BugcrowdAdapter::new(credentials.bundle("bugcrowd"))));
    }
    if selection.intigriti {
        adapters.push(Arc::new(IntigritiAdapter::new(
            credentials.bundle("intigriti"),
        )));
    }

    adapters
}
