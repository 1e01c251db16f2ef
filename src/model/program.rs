//! Program model
//!
//! A named bug-bounty program on one platform, holding its deduplicated
//! scope set. Vendor feeds occasionally repeat an entry inside one payload;
//! duplicates by identity key collapse to the last-seen state.

use crate::model::error::{ValidationError, ValidationResult};
use crate::model::scope::{Scope, ScopeKey};
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct Program {
    name: String,
    platform: String,
    scopes: BTreeMap<ScopeKey, Scope>,
    is_private: bool,
    extra_data: Option<String>,
}

impl Program {
    /// Construct a program, deduplicating scopes by identity key
    /// (last-write-wins in payload order)
    pub fn new(
        name: impl Into<String>,
        platform: impl Into<String>,
        scopes: Vec<Scope>,
        is_private: bool,
    ) -> ValidationResult<Self> {
        let name = name.into();
        let platform = platform.into();

        if name.trim().is_empty() {
            return Err(ValidationError::MissingProgramField { field: "name" });
        }
        if platform.trim().is_empty() {
            return Err(ValidationError::MissingProgramField { field: "platform" });
        }

        let mut deduped = BTreeMap::new();
        for scope in scopes {
            deduped.insert(scope.key(), scope);
        }

        Ok(Self {
            name,
            platform,
            scopes: deduped,
            is_private,
            extra_data: None,
        })
    }

    /// Attach adapter-specific metadata carried through to history records
    pub fn with_extra_data(mut self, extra_data: impl Into<String>) -> Self {
        self.extra_data = Some(extra_data.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn platform(&self) -> &str {
        &self.platform
    }

    pub fn is_private(&self) -> bool {
        self.is_private
    }

    pub fn extra_data(&self) -> Option<&str> {
        self.extra_data.as_deref()
    }

    /// Read-only iteration over the deduplicated scope set
    pub fn scopes(&self) -> impl Iterator<Item = &Scope> {
        self.scopes.values()
    }

    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }
}
