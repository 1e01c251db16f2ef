//! Extraction run driver

use crate::extract::error::{ConfigError, ConfigResult};
use crate::extract::outcome::{ExtractionSummary, Outcome};
use crate::history::{DiffEngine, HistoryError};
use crate::platform::{PlatformAdapter, PlatformError};
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(300);

pub struct Orchestrator {
    engine: Arc<DiffEngine>,
    skip_vdp: bool,
    fetch_timeout: Duration,
}

impl Orchestrator {
    pub fn new(engine: Arc<DiffEngine>, skip_vdp: bool) -> Self {
        Self {
            engine,
            skip_vdp,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    /// Bound on one platform's whole fetch; an overrun becomes a timeout
    /// outcome instead of holding up the run
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Run extraction across all enabled adapters
    ///
    /// Never fails for an individual platform; the only error is
    /// configuration-level (no adapters enabled).
    pub async fn run(
        &self,
        adapters: &[Arc<dyn PlatformAdapter>],
    ) -> ConfigResult<ExtractionSummary> {
        if adapters.is_empty() {
            return Err(ConfigError::NoPlatformsEnabled);
        }

        let mut tasks = Vec::new();
        for adapter in adapters {
            let adapter = adapter.clone();
            let engine = self.engine.clone();
            let skip_vdp = self.skip_vdp;
            let fetch_timeout = self.fetch_timeout;
            let name = adapter.name();
            let handle = tokio::spawn(async move {
                run_platform(adapter.as_ref(), &engine, skip_vdp, fetch_timeout).await
            });
            tasks.push((name, handle));
        }

        let mut summary = ExtractionSummary::default();
        for (name, handle) in tasks {
            let outcome = match handle.await {
                Ok(outcome) => outcome,
                Err(e) => {
                    // A panicked platform task must not sink the run, but
                    // the platform still ends the run with an outcome
                    log::error!("{}: platform task aborted: {}", name, e);
                    Outcome::Failed {
                        kind: "panic",
                        message: e.to_string(),
                    }
                }
            };
            if let Outcome::Completed { programs, .. } = &outcome {
                summary.total_programs_processed += programs;
            }
            summary.per_platform.insert(name.to_string(), outcome);
        }

        Ok(summary)
    }
}

async fn run_platform(
    adapter: &dyn PlatformAdapter,
    engine: &DiffEngine,
    skip_vdp: bool,
    fetch_timeout: Duration,
) -> Outcome {
    let name = adapter.name();

    if !adapter.valid_access().await {
        log::info!("{}: access pre-check failed, skipping", name);
        return Outcome::Skipped {
            reason: "access pre-check failed".to_string(),
        };
    }

    log::info!("{}: fetching programs", name);
    let fetched = match tokio::time::timeout(fetch_timeout, adapter.fetch_programs()).await {
        Ok(Ok(programs)) => programs,
        Ok(Err(error)) => {
            log::warn!("{}: {}", name, error);
            return Outcome::Failed {
                kind: error.kind(),
                message: error.to_string(),
            };
        }
        Err(_elapsed) => {
            let error = PlatformError::Timeout {
                platform: name.to_string(),
                seconds: fetch_timeout.as_secs(),
            };
            log::warn!("{}: {}", name, error);
            return Outcome::Failed {
                kind: error.kind(),
                message: error.to_string(),
            };
        }
    };

    // VDP policy is applied uniformly here, never inside adapters
    let programs: Vec<_> = if skip_vdp {
        let before = fetched.len();
        let kept: Vec<_> = fetched.into_iter().filter(|p| p.is_private()).collect();
        log::debug!("{}: skip-vdp filtered {} public program(s)", name, before - kept.len());
        kept
    } else {
        fetched
    };

    let mut changed = 0;
    let mut failed = 0;
    for program in &programs {
        match engine.record_observation(program).await {
            Ok(observation) => {
                if observation.changed() {
                    changed += 1;
                }
            }
            Err(HistoryError::Persistence { message }) => {
                // That program's diff is lost for this run; its prior
                // snapshot stays valid for the next one
                log::warn!("{}/{}: persistence failed: {}", name, program.name(), message);
                failed += 1;
            }
            Err(error) => {
                log::error!("{}/{}: {}", name, program.name(), error);
                failed += 1;
            }
        }
    }

    log::info!(
        "{}: processed {} program(s), {} changed, {} failed",
        name,
        programs.len(),
        changed,
        failed
    );

    Outcome::Completed {
        programs: programs.len(),
        changed,
        failed,
    }
}
