//! Init command implementation.

use anyhow::{bail, Result};
use std::path::{Path, PathBuf};

const CONFIG_NAME: &str = "sheetlint.toml";

const DEFAULT_CONFIG: &str = r#"# sheetlint configuration

# Base rule set: "recommended", "strict" or "minimal".
# Settings under [rules] override the preset.
preset = "recommended"

# Stop reporting after this many findings
max_errors = 1000

# "file": every file gets its own budget and files are checked in parallel
# "batch": one budget shared by the whole run
budget = "file"

[analyzer]
# Root directory to analyze (default: current directory)
# root = "./styles"

# Glob patterns to exclude from analysis
exclude = [
    "**/node_modules/**",
    "**/vendor/**",
    "**/dist/**",
]

# File extensions to check
extensions = ["css"]

# Respect .gitignore files
respect_gitignore = true

# Worker threads (default: one per core)
# parallelism = 4

[rules]
# Flag rules take true/false
no-important = true
no-vendor-prefix = false

# Threshold rules take the maximum allowed count
max-floats = 10

# Rules with options take a table
[rules.no-named-colors]
allow = ["black", "white"]

[rules.duplicate-properties]
allow_fallbacks = true
"#;

/// Runs the init command in the current directory.
pub fn run(force: bool) -> Result<()> {
    let config_path = run_in(Path::new("."), force)?;

    println!("Created {}", config_path.display());
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_NAME} to configure rules");
    println!("  2. Run: sheetlint check");

    Ok(())
}

/// Writes the default configuration into `dir`.
fn run_in(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_NAME);

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)?;
    tracing::debug!("Wrote {}", config_path.display());
    Ok(config_path)
}
