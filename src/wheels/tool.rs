//! External wheel build tool invocation
//!
//! The build step shells out to `pip wheel` with an explicit argument
//! list. The trait exists so the orchestrator can be driven against an
//! in-memory tool in tests.

use crate::error::{WheelhouseError, WheelhouseResult};
use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Abstract wheel build invocation
#[async_trait]
pub trait WheelBuildTool: Send + Sync {
    /// Build exactly one wheel from `source` into `wheel_dir`.
    ///
    /// Must not resolve transitive dependencies. Blocks until the tool
    /// exits; there is no timeout.
    async fn build(&self, source: &str, wheel_dir: &Path, silent: bool) -> WheelhouseResult<()>;
}

/// Wheel builds via `pip wheel`
pub struct PipWheelTool {
    program: String,
}

impl PipWheelTool {
    pub fn new() -> Self {
        Self {
            program: "pip".to_string(),
        }
    }

    /// Use a different executable, e.g. `pip3` or a wrapper script
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for PipWheelTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WheelBuildTool for PipWheelTool {
    async fn build(&self, source: &str, wheel_dir: &Path, silent: bool) -> WheelhouseResult<()> {
        let verbosity = if silent { "-q" } else { "-v" };
        let cmd_display = format!(
            "{} wheel {} -w {} --no-deps {}",
            self.program,
            verbosity,
            wheel_dir.display(),
            source
        );
        debug!("Executing: {}", cmd_display);

        let status = Command::new(&self.program)
            .arg("wheel")
            .arg(verbosity)
            .arg("-w")
            .arg(wheel_dir)
            .arg("--no-deps")
            .arg(source)
            .stdout(if silent {
                Stdio::null()
            } else {
                Stdio::inherit()
            })
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| WheelhouseError::command_failed(cmd_display.clone(), e))?;

        if !status.success() {
            return Err(WheelhouseError::BuildToolFailed {
                command: cmd_display,
                code: status.code().unwrap_or(-1),
            });
        }

        Ok(())
    }
}
