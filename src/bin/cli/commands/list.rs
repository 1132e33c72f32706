use anyhow::Result;

use crate::app::App;
use crate::commands::flashback_json;
use crate::render::terminal::{self, Color};
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let flashbacks = app.flashbacks();
    let stats = app.store.stats();

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "dataDir": app.data_dir().to_string_lossy(),
                "stats": stats,
                "flashbacks": flashbacks
                    .iter()
                    .enumerate()
                    .map(|(i, f)| flashback_json(i + 1, f))
                    .collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if flashbacks.is_empty() {
                println!("No flashbacks yet. Add one with: flashback-cli add <question> <answer>");
                return Ok(());
            }

            let num_width = flashbacks.len().to_string().len().max(1);
            let question_width = flashbacks
                .iter()
                .map(|f| f.question.chars().count())
                .max()
                .unwrap_or(8)
                .clamp(8, 50);

            println!("{:>nw$}  {:<qw$}  {:<8}  {}",
                "#", "Question", "Streak", "ID",
                nw = num_width, qw = question_width);
            println!("{}  {}  {}  {}",
                "\u{2500}".repeat(num_width),
                "\u{2500}".repeat(question_width),
                "\u{2500}".repeat(8),
                "\u{2500}".repeat(8));

            for (i, flashback) in flashbacks.iter().enumerate() {
                let question = terminal::truncate(&flashback.question, question_width);
                // Pad before coloring so escape codes don't skew the columns
                let badge = format!("{:<8}", format!("{} Days", flashback.days));
                let badge = if flashback.days > 0 {
                    terminal::paint(&badge, Color::GREEN, use_color)
                } else {
                    terminal::paint(&badge, Color::GRAY, use_color)
                };
                println!("{:>nw$}  {:<qw$}  {}  {}",
                    i + 1, question, badge,
                    terminal::paint(&flashback.short_id(), Color::DIM, use_color),
                    nw = num_width, qw = question_width);
            }

            println!(
                "\n{} flashbacks, {} on a streak, longest streak {} days",
                stats.total, stats.active_streaks, stats.longest_streak
            );
        }
    }

    Ok(())
}
