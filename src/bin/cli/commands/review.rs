use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use uuid::Uuid;

use crate::app::App;
use crate::commands::prompt;
use crate::render::terminal::{self, Color};
use crate::OutputFormat;

/// Outcome of one reviewed card
struct Reviewed {
    id: Uuid,
    question: String,
    was_correct: bool,
    days: u32,
}

/// Review one card or the whole list
///
/// With `outcome` set the result is recorded straight away; otherwise each
/// card is shown, the answer revealed on Enter, and the user reports whether
/// they knew it. The interactive exchange goes to `prompts`; only the summary
/// is written to `output`.
pub async fn run<R: BufRead, P: Write, W: Write>(
    app: &mut App,
    target: Option<&str>,
    outcome: Option<bool>,
    input: &mut R,
    prompts: &mut P,
    output: &mut W,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let ids: Vec<Uuid> = match target {
        Some(target) => vec![app.find(target)?.id],
        None => app.flashbacks().iter().map(|f| f.id).collect(),
    };

    if ids.is_empty() && matches!(format, OutputFormat::Plain) {
        writeln!(output, "No flashbacks to review.")?;
        return Ok(());
    }

    let mut reviewed = Vec::new();

    if let Some(was_correct) = outcome {
        for id in ids {
            reviewed.push(record(app, id, was_correct).await?);
        }
    } else {
        let total = ids.len();
        for (i, id) in ids.into_iter().enumerate() {
            let Some(card) = app.store.get(id).cloned() else {
                continue;
            };

            writeln!(prompts)?;
            writeln!(
                prompts,
                "[{}/{}] {}  {}",
                i + 1,
                total,
                terminal::paint(&card.question, Color::BOLD, use_color),
                terminal::days_badge(card.days, use_color)
            )?;

            match prompt(input, prompts, "Press Enter to reveal the answer (q to quit) ")? {
                Some(reply) if reply.eq_ignore_ascii_case("q") => break,
                None => break,
                Some(_) => {}
            }

            writeln!(prompts, "Is this your answer?")?;
            writeln!(prompts, "  {}", terminal::paint(&card.answer, Color::ITALIC, use_color))?;

            let Some(was_correct) = ask_outcome(input, prompts)? else {
                break;
            };

            let result = record(app, id, was_correct).await?;
            let verdict = if was_correct {
                terminal::paint("Correct", Color::GREEN, use_color)
            } else {
                terminal::paint("Missed", Color::RED, use_color)
            };
            writeln!(prompts, "{}. Streak: {}", verdict, terminal::days_badge(result.days, use_color))?;
            reviewed.push(result);
        }
    }

    match format {
        OutputFormat::Json => {
            let json: Vec<serde_json::Value> = reviewed
                .iter()
                .map(|r| {
                    serde_json::json!({
                        "id": r.id.to_string(),
                        "question": r.question,
                        "correct": r.was_correct,
                        "days": r.days,
                    })
                })
                .collect();
            writeln!(output, "{}", serde_json::to_string_pretty(&json)?)?;
        }
        OutputFormat::Plain => {
            let correct = reviewed.iter().filter(|r| r.was_correct).count();
            if outcome.is_some() {
                for r in &reviewed {
                    writeln!(output, "\"{}\": {}", r.question, terminal::days_badge(r.days, use_color))?;
                }
            } else {
                writeln!(output)?;
                writeln!(
                    output,
                    "Reviewed {} flashbacks: {} correct, {} missed",
                    reviewed.len(),
                    correct,
                    reviewed.len() - correct
                )?;
            }
        }
    }

    Ok(())
}

/// Ask until the user answers yes, no or quit; `None` means stop reviewing
fn ask_outcome<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Option<bool>> {
    loop {
        let Some(reply) = prompt(input, output, "[y] Yes, it is  [n] No, it wasn't  [q] Quit: ")? else {
            return Ok(None);
        };
        match reply.to_lowercase().as_str() {
            "y" | "yes" => return Ok(Some(true)),
            "n" | "no" => return Ok(Some(false)),
            "q" | "quit" => return Ok(None),
            _ => writeln!(output, "Please answer y, n or q.")?,
        }
    }
}

async fn record(app: &mut App, id: Uuid, was_correct: bool) -> Result<Reviewed> {
    app.store
        .record_review(id, was_correct)
        .await
        .context("Failed to save review")?;

    let card = app
        .store
        .get(id)
        .with_context(|| format!("Flashback {} not found after review", id))?;

    log::debug!("Reviewed {}: correct={} days={}", id, was_correct, card.days);

    Ok(Reviewed {
        id,
        question: card.question.clone(),
        was_correct,
        days: card.days,
    })
}
