//! Outbound notification collaborator
//!
//! Called with every non-empty delta the diff engine records. Delivery is
//! fire-and-forget: a notification failure is logged and never fails the
//! extraction run.

pub mod error;
pub mod traits;
pub mod webhook;

pub use error::{NotifyError, NotifyResult};
pub use traits::{Notifier, NullNotifier};
pub use webhook::WebhookNotifier;
