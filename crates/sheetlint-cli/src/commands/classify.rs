//! Classify command implementation.

use anyhow::Result;
use sheetlint_core::values::classify;

/// Prints the tokens of `value` as pretty JSON.
pub fn run(value: &str) -> Result<()> {
    let tokens = classify(value);
    tracing::debug!("Classified {:?} into {} token(s)", value, tokens.len());
    println!("{}", serde_json::to_string_pretty(&tokens)?);
    Ok(())
}
