//! Build orchestration for pinned wheels
//!
//! Drives each build task through inspect, build and prune, strictly in
//! order and one at a time. Check mode only verifies cache hits and fails
//! fast on the first miss; build mode invokes the external tool for
//! misses and then prunes every other cached wheel of the same package.

use crate::error::{DomainError, WheelhouseError, WheelhouseResult};
use crate::ui::BuildLog;
use crate::wheels::cache::locate;
use crate::wheels::tool::WheelBuildTool;
use crate::wheels::BuildTask;
use std::path::PathBuf;
use tokio::fs;
use tracing::debug;

/// Orchestrates wheel builds against a single cache directory
pub struct WheelBuilder<'a> {
    wheel_dir: PathBuf,
    tool: &'a dyn WheelBuildTool,
    log: &'a dyn BuildLog,
    silent: bool,
}

impl<'a> WheelBuilder<'a> {
    pub fn new(
        wheel_dir: impl Into<PathBuf>,
        tool: &'a dyn WheelBuildTool,
        log: &'a dyn BuildLog,
        silent: bool,
    ) -> Self {
        Self {
            wheel_dir: wheel_dir.into(),
            tool,
            log,
            silent,
        }
    }

    /// Process every task in the supplied order, exactly once each.
    ///
    /// The first failure aborts the remaining tasks; there is no retry
    /// and no rollback. Check mode never touches the cache directory.
    pub async fn run(&self, tasks: &[BuildTask], check_only: bool) -> WheelhouseResult<()> {
        if !check_only && !tasks.is_empty() {
            fs::create_dir_all(&self.wheel_dir).await.map_err(|e| {
                WheelhouseError::io(
                    format!("creating wheel directory {}", self.wheel_dir.display()),
                    e,
                )
            })?;
        }

        for task in tasks {
            self.process(task, check_only).await?;
        }
        Ok(())
    }

    async fn process(&self, task: &BuildTask, check_only: bool) -> WheelhouseResult<()> {
        debug!("Processing {} {}", task.name, task.version);
        let existing = locate(&self.wheel_dir, &task.name, Some(&task.version));

        if check_only {
            return match existing.first() {
                Some(wheel) => {
                    self.log.info(&format!("{} exists", wheel.display()));
                    Ok(())
                }
                None => Err(DomainError::wheel_missing(&task.name, &task.version).into()),
            };
        }

        if let Some(wheel) = existing.first() {
            self.log.info(&format!("*** Already built: {}", wheel.display()));
            return Ok(());
        }

        self.log.info(&format!(
            "*** Building wheel for {} {} from {}",
            task.name, task.version, task.source
        ));
        self.tool
            .build(&task.source, &self.wheel_dir, self.silent)
            .await?;

        // The tool guarantees one wheel per invocation; absence here is an
        // environment defect, not a domain failure.
        let built = locate(&self.wheel_dir, &task.name, Some(&task.version));
        let built = built.first().ok_or_else(|| {
            WheelhouseError::Internal(format!(
                "build tool produced no wheel for {} {}",
                task.name, task.version
            ))
        })?;
        self.log.info(&format!("*** Built: {}", built.display()));

        // One version per package: everything else under this name goes,
        // including wheels of other previously cached versions.
        for wheel in locate(&self.wheel_dir, &task.name, None) {
            if &wheel != built {
                self.log.info(&format!("*** Removing: {}", wheel.display()));
                fs::remove_file(&wheel).await.map_err(|e| {
                    WheelhouseError::io(format!("removing stale wheel {}", wheel.display()), e)
                })?;
            }
        }

        Ok(())
    }
}
