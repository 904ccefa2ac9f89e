//! Shared output formatting for lint results.

use anyhow::Result;
use sheetlint_core::{FileReport, LintResult};
use std::io::Write;

use crate::OutputFormat;

const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const RESET: &str = "\x1b[0m";

/// Print lint results in the specified format.
pub fn print(result: &LintResult, format: OutputFormat) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    render(result, format, &mut out)
}

/// Writes lint results in the specified format.
pub fn render(result: &LintResult, format: OutputFormat, out: &mut impl Write) -> Result<()> {
    match format {
        OutputFormat::Text => render_text(result, out)?,
        OutputFormat::Json => render_json(result, out)?,
        OutputFormat::Compact => render_compact(result, out)?,
        OutputFormat::Pretty => render_pretty(result, out)?,
    }
    Ok(())
}

fn render_text(result: &LintResult, out: &mut impl Write) -> Result<()> {
    for file in &result.files {
        for finding in &file.findings {
            writeln!(out, "{RED}{}{RESET}: {}", file.path.display(), finding.format())?;
        }
        render_warnings(file, out)?;
    }

    let findings = result.finding_count();
    let summary_color = if findings > 0 { RED } else { GREEN };
    writeln!(
        out,
        "{summary_color}Found {findings} finding(s), {} warning(s) in {} file(s){RESET}",
        result.warning_count(),
        result.files_checked
    )?;
    Ok(())
}

fn render_warnings(file: &FileReport, out: &mut impl Write) -> Result<()> {
    for warning in &file.warnings {
        writeln!(
            out,
            "{YELLOW}warning{RESET} {}: {warning}",
            file.path.display()
        )?;
    }
    Ok(())
}

fn render_json(result: &LintResult, out: &mut impl Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, result)?;
    writeln!(out)?;
    Ok(())
}

fn render_compact(result: &LintResult, out: &mut impl Write) -> Result<()> {
    for (path, finding) in result.findings() {
        let separator = if finding.is_file_scoped() { ": " } else { ":" };
        writeln!(out, "{}{separator}{finding}", path.display())?;
    }
    Ok(())
}

fn render_pretty(result: &LintResult, out: &mut impl Write) -> Result<()> {
    for file in &result.files {
        let name = file.path.display().to_string();
        for finding in &file.findings {
            let report = miette::Report::new(finding.to_diagnostic(&name, &file.source));
            writeln!(out, "{report:?}")?;
        }
        render_warnings(file, out)?;
    }
    writeln!(
        out,
        "Found {} finding(s) in {} file(s)",
        result.finding_count(),
        result.files_checked
    )?;
    Ok(())
}
