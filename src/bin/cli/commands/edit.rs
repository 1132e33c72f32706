use anyhow::{bail, Context, Result};

use flashback_lib::flashbacks::{is_valid_entry, VALIDATION_MESSAGE};

use crate::app::App;
use crate::commands::flashback_json;
use crate::render::terminal::{self, Color};
use crate::OutputFormat;

/// Overwrite question and/or answer; unspecified fields keep their text
pub async fn run(
    app: &mut App,
    target: &str,
    question: Option<String>,
    answer: Option<String>,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    if question.is_none() && answer.is_none() {
        bail!("Nothing to edit. Pass --question and/or --answer");
    }

    let current = app.find(target)?;
    let question = question.unwrap_or(current.question);
    let answer = answer.unwrap_or(current.answer);

    if !is_valid_entry(&question, &answer) {
        bail!("Invalid Input: {}", VALIDATION_MESSAGE);
    }

    app.store
        .update(current.id, question, answer)
        .await
        .context("Failed to save flashback")?;

    let position = app.store.position(current.id).map_or(0, |p| p + 1);
    let Some(flashback) = app.store.get(current.id).cloned() else {
        bail!("Flashback {} disappeared after editing", current.id);
    };

    match format {
        OutputFormat::Json => {
            let output = flashback_json(position, &flashback);
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!(
                "Updated flashback #{}: {}",
                position,
                terminal::paint(&flashback.question, Color::BOLD, use_color)
            );
            println!("  Streak reset to {}", terminal::days_badge(flashback.days, use_color));
        }
    }

    Ok(())
}
