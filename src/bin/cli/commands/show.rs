use anyhow::Result;

use crate::app::App;
use crate::commands::flashback_json;
use crate::render::terminal::{self, Color};
use crate::OutputFormat;

pub fn run(app: &App, target: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    let flashback = app.find(target)?;
    let position = app.store.position(flashback.id).map_or(0, |p| p + 1);

    match format {
        OutputFormat::Json => {
            let output = flashback_json(position, &flashback);
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("{}", terminal::paint(&flashback.question, Color::BOLD, use_color));
            println!("{}", terminal::paint(&flashback.answer, Color::ITALIC, use_color));
            println!();
            println!("  Streak: {}", terminal::days_badge(flashback.days, use_color));
            println!("  Position: {}", position);
            println!("  ID: {}", flashback.id);
        }
    }

    Ok(())
}
