//! CLI tests

mod args_tests;
