//! Command-line arguments
//!
//! The command surface is deliberately thin: pick platforms, point at a
//! credentials file, and tune logging. Everything that matters lives in the
//! orchestrator and engine.

use crate::platform::PlatformSelection;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "scopewatch")]
#[command(about = "Bug-bounty scope collection and change monitoring")]
#[command(version)]
pub struct Args {
    /// Extract from HackerOne
    #[arg(long = "hackerone")]
    pub hackerone: bool,

    /// Extract from Bugcrowd
    #[arg(long = "bugcrowd")]
    pub bugcrowd: bool,

    /// Extract from Intigriti
    #[arg(long = "intigriti")]
    pub intigriti: bool,

    /// Drop public VDP programs before diffing; only private programs
    /// reach history
    #[arg(long = "skip-vdp")]
    pub skip_vdp: bool,

    /// TOML credentials file with one table per platform
    #[arg(short = 'c', long = "creds-file", value_name = "FILE")]
    pub creds_file: Option<PathBuf>,

    /// Directory holding snapshots and history documents
    #[arg(short = 'd', long = "data-dir", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Webhook URL notified of every recorded change
    #[arg(long = "webhook-url", value_name = "URL")]
    pub webhook_url: Option<String>,

    /// Per-platform fetch timeout in seconds
    #[arg(long = "timeout", value_name = "SECS", default_value_t = 300)]
    pub timeout: u64,

    /// Log level
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = ["trace", "debug", "info", "warn", "error", "off"])]
    pub log_level: Option<String>,

    /// Log output format
    #[arg(short = 'o', long = "log-format", value_name = "FORMAT", value_parser = ["text", "json"])]
    pub log_format: Option<String>,

    /// Log file path
    #[arg(short = 'f', long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Force colored output
    #[arg(long = "color", overrides_with = "no_color")]
    pub color: bool,

    /// Disable colored output
    #[arg(long = "no-color", overrides_with = "color")]
    pub no_color: bool,
}

impl Args {
    pub fn selection(&self) -> PlatformSelection {
        PlatformSelection {
            hackerone: self.hackerone,
            bugcrowd: self.bugcrowd,
            intigriti: self.intigriti,
        }
    }

    /// Resolved data directory, defaulting under the platform data dir
    pub fn resolved_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("scopewatch")
        })
    }
}
