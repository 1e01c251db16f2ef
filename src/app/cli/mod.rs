//! CLI module containing argument parsing and output formatting

pub mod args;
pub mod display;

#[cfg(test)]
mod tests;
