//! Build-wheels command - guarantee a cached wheel per pinned package

use crate::cli::args::BuildWheelsArgs;
use crate::config::{Config, Pinfile};
use crate::error::WheelhouseResult;
use crate::ui::ConsoleLog;
use crate::wheels::{PipWheelTool, WheelBuilder};
use tracing::debug;

/// Execute the build-wheels command
pub async fn execute(
    args: BuildWheelsArgs,
    pinfile: &Pinfile,
    config: &Config,
) -> WheelhouseResult<()> {
    let tasks = pinfile.wheels_to_build()?;
    debug!(
        "{} wheel(s) pinned, check_only={}",
        tasks.len(),
        args.check
    );

    let tool = PipWheelTool::with_program(&config.build.tool);
    let log = ConsoleLog::new(args.silent);
    let builder = WheelBuilder::new(pinfile.wheel_dir(), &tool, &log, args.silent);

    builder.run(&tasks, args.check).await
}
