use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use crate::app::App;
use crate::commands::confirm;
use crate::OutputFormat;

/// Delete a flashback after confirmation
///
/// The confirmation goes to `prompts` and the result to `output`, so JSON
/// output stays parseable when the user is asked.
pub async fn run<R: BufRead, P: Write, W: Write>(
    app: &mut App,
    target: &str,
    yes: bool,
    input: &mut R,
    prompts: &mut P,
    output: &mut W,
    format: &OutputFormat,
) -> Result<()> {
    let flashback = app.find(target)?;

    if !yes {
        writeln!(prompts, "{}", flashback.question)?;
        if !confirm(input, prompts, "Are you sure you want to delete this flashback?")? {
            match format {
                OutputFormat::Json => {
                    let json = serde_json::json!({
                        "deleted": null,
                        "remaining": app.flashbacks().len(),
                    });
                    writeln!(output, "{}", serde_json::to_string_pretty(&json)?)?;
                }
                OutputFormat::Plain => writeln!(output, "Cancelled.")?,
            }
            return Ok(());
        }
    }

    let remaining = app
        .store
        .remove(flashback.id)
        .await
        .context("Failed to delete flashback")?
        .len();

    match format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "deleted": flashback.id.to_string(),
                "remaining": remaining,
            });
            writeln!(output, "{}", serde_json::to_string_pretty(&json)?)?;
        }
        OutputFormat::Plain => {
            writeln!(output, "Deleted \"{}\" ({} flashbacks left)", flashback.question, remaining)?;
        }
    }

    Ok(())
}
