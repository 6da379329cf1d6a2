//! Cache command - inspect the wheel cache

use crate::cli::args::{CacheAction, CacheArgs, OutputFormat};
use crate::config::{Config, Pinfile};
use crate::error::WheelhouseResult;
use crate::wheels::{self, WheelFile};
use chrono::{DateTime, Local};
use console::style;
use std::path::Path;

/// Execute the cache command
pub async fn execute(args: CacheArgs, pinfile: &Pinfile, config: &Config) -> WheelhouseResult<()> {
    match args.action {
        CacheAction::List { format } => list_wheels(&pinfile.wheel_dir(), format),
        CacheAction::Info => show_info(pinfile, config),
    }
}

/// List all cached wheels
fn list_wheels(wheel_dir: &Path, format: OutputFormat) -> WheelhouseResult<()> {
    let cached = wheels::list(wheel_dir);

    if cached.is_empty() {
        println!("No cached wheels in {}.", wheel_dir.display());
        return Ok(());
    }

    match format {
        OutputFormat::Table => print_wheel_table(&cached),
        OutputFormat::Json => print_wheel_json(&cached)?,
        OutputFormat::Plain => print_wheel_plain(&cached),
    }

    Ok(())
}

fn modified_at(wheel: &WheelFile) -> Option<DateTime<Local>> {
    let meta = std::fs::metadata(&wheel.path).ok()?;
    Some(meta.modified().ok()?.into())
}

fn print_wheel_table(cached: &[WheelFile]) {
    println!(
        "{:<30} {:<14} {:<22} {:<20}",
        "NAME", "VERSION", "TAGS", "MODIFIED"
    );
    println!("{}", "-".repeat(88));

    for wheel in cached {
        let modified = modified_at(wheel)
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());

        println!(
            "{:<30} {:<14} {:<22} {:<20}",
            wheel.name, wheel.version, wheel.tags, modified
        );
    }

    println!();
    println!("Total: {} wheel(s)", cached.len());
}

fn print_wheel_json(cached: &[WheelFile]) -> WheelhouseResult<()> {
    #[derive(serde::Serialize)]
    struct WheelJson {
        name: String,
        version: String,
        tags: String,
        path: String,
        modified: Option<String>,
    }

    let json_wheels: Vec<WheelJson> = cached
        .iter()
        .map(|w| WheelJson {
            name: w.name.clone(),
            version: w.version.clone(),
            tags: w.tags.clone(),
            path: w.path.display().to_string(),
            modified: modified_at(w).map(|t| t.to_rfc3339()),
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&json_wheels)?);
    Ok(())
}

fn print_wheel_plain(cached: &[WheelFile]) {
    for wheel in cached {
        println!("{}", wheel.path.display());
    }
}

/// Show cache status for each pinned package
fn show_info(pinfile: &Pinfile, config: &Config) -> WheelhouseResult<()> {
    let wheel_dir = pinfile.wheel_dir();

    println!("Pinfile: {}", pinfile.path().display());
    println!("Wheel directory: {}", wheel_dir.display());

    let index = pinfile.index(config);
    println!("Using indexes:");
    for url in index.urls() {
        println!("  {}", url);
    }
    println!();

    if pinfile.pins().is_empty() {
        println!("No wheels pinned in this project.");
        return Ok(());
    }

    let mut missing = 0;
    for pin in pinfile.pins() {
        let found = wheels::locate(&wheel_dir, &pin.name, Some(&pin.version));
        match found.first() {
            Some(wheel) => {
                println!(
                    "  {} {} {} [{}]",
                    style("✓").green(),
                    pin.name,
                    pin.version,
                    wheel.display()
                );
            }
            None => {
                missing += 1;
                println!(
                    "  {} {} {} [missing]",
                    style("○").dim(),
                    pin.name,
                    pin.version
                );
            }
        }
    }

    println!();
    if missing == 0 {
        println!("{} all {} wheel(s) cached", style("✓").green(), pinfile.pins().len());
    } else {
        println!(
            "{} {} of {} wheel(s) missing",
            style("!").yellow(),
            missing,
            pinfile.pins().len()
        );
    }

    Ok(())
}
