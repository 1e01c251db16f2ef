//! Diff/history engine tests

mod diff_tests;
mod engine_tests;

use crate::model::{Program, Scope};

pub(crate) fn scope(value: &str, kind: &str, in_scope: bool) -> Scope {
    Scope::new(value, kind, in_scope).unwrap()
}

pub(crate) fn program(name: &str, scopes: Vec<Scope>) -> Program {
    Program::new(name, "testplatform", scopes, true).unwrap()
}
