use anyhow::Result;

use tonedrill_lib::drill::algorithm::interval_or_default;

use crate::app::App;
use crate::render::terminal::{paint, Color};
use crate::OutputFormat;

pub fn run(app: &App, glyph: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    let store = app.open_store()?;
    let entry = store.get(glyph);
    let interval = interval_or_default(entry);

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "character": glyph,
                "seen": entry.is_some(),
                "correct": entry.map(|e| e.correct).unwrap_or(0),
                "incorrect": entry.map(|e| e.incorrect).unwrap_or(0),
                "intervalDays": interval.days(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            let label = paint(&glyph, Color::BOLD, use_color);
            match entry {
                Some(e) => println!("{}: review every {} ({} correct, {} incorrect)",
                    label, interval, e.correct, e.incorrect),
                None => println!("{}: not drilled yet (review every {})", label, interval),
            }
        }
    }

    Ok(())
}
