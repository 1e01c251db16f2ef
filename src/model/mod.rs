//! Canonical scope and program models
//!
//! Every platform adapter maps its vendor payloads into these types at the
//! adapter boundary; nothing downstream of here ever sees a vendor shape.

pub mod error;
pub mod program;
pub mod scope;

pub use error::{ValidationError, ValidationResult};
pub use program::Program;
pub use scope::{Scope, ScopeKey};
