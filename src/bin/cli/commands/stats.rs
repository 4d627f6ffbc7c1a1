use anyhow::Result;

use tonedrill_lib::drill::{interval_for, ReviewInterval, TIMESTAMP_FORMAT};

use crate::app::App;
use crate::render::terminal::{paint, Color};
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let store = app.open_store()?;

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = store
                .entries()
                .map(|(glyph, entry)| {
                    serde_json::json!({
                        "character": glyph,
                        "correct": entry.correct,
                        "incorrect": entry.incorrect,
                        "lastRepeated": entry.last_repeated.format(TIMESTAMP_FORMAT).to_string(),
                        "intervalDays": interval_for(entry).days(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if store.is_empty() {
                println!("No characters drilled yet.");
                return Ok(());
            }

            println!("{:<4} {:>7} {:>9} {:<19} {}",
                "Char", "Correct", "Incorrect", "Last seen", "Review");
            println!("{} {} {} {} {}",
                "\u{2500}".repeat(4),
                "\u{2500}".repeat(7),
                "\u{2500}".repeat(9),
                "\u{2500}".repeat(19),
                "\u{2500}".repeat(6));

            let mut weekly = 0;
            for (glyph, entry) in store.entries() {
                let interval = interval_for(entry);
                let color = match interval {
                    ReviewInterval::SevenDays => {
                        weekly += 1;
                        Color::GREEN
                    }
                    ReviewInterval::OneDay => Color::YELLOW,
                };

                // Ideographs are two columns wide
                println!("{:<3}{:>7} {:>9} {:<19} {}",
                    glyph,
                    entry.correct,
                    entry.incorrect,
                    entry.last_repeated.format(TIMESTAMP_FORMAT).to_string(),
                    paint(&interval.to_string(), color, use_color));
            }

            println!("\n{} characters, {} on weekly review", store.len(), weekly);
        }
    }

    Ok(())
}
