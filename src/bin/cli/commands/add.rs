use anyhow::{bail, Context, Result};

use flashback_lib::flashbacks::{is_valid_entry, VALIDATION_MESSAGE};

use crate::app::App;
use crate::commands::flashback_json;
use crate::render::terminal::{self, Color};
use crate::OutputFormat;

pub async fn run(
    app: &mut App,
    question: String,
    answer: String,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    if !is_valid_entry(&question, &answer) {
        bail!("Invalid Input: {}", VALIDATION_MESSAGE);
    }

    let flashbacks = app
        .store
        .add(question, answer)
        .await
        .context("Failed to add flashback")?;
    let position = flashbacks.len();
    let Some(flashback) = flashbacks.last().cloned() else {
        bail!("Flashback list is empty after adding");
    };

    match format {
        OutputFormat::Json => {
            let output = flashback_json(position, &flashback);
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!(
                "Added flashback #{}: {}",
                position,
                terminal::paint(&flashback.question, Color::BOLD, use_color)
            );
            println!("  ID: {}", flashback.id);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::app_with;

    #[tokio::test]
    async fn test_add_appends() {
        let (mut app, _temp) = app_with(&[("q1", "a1")]).await;

        run(&mut app, "2+2?".to_string(), "4".to_string(), &OutputFormat::Plain, false)
            .await
            .unwrap();

        assert_eq!(app.flashbacks().len(), 2);
        assert_eq!(app.flashbacks()[1].question, "2+2?");
        assert_eq!(app.flashbacks()[1].days, 0);
    }

    #[tokio::test]
    async fn test_add_rejects_blank() {
        let (mut app, _temp) = app_with(&[]).await;

        let err = run(&mut app, "  ".to_string(), "4".to_string(), &OutputFormat::Plain, false)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Both question and answer fields must be filled out"));
        assert!(app.flashbacks().is_empty());
    }
}
