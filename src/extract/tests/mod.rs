//! Orchestrator tests
