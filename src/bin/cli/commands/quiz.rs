use std::io;

use anyhow::{Context, Result};

use tonedrill_lib::drill::{prompt_script_menu, AnswerValidator, QuizSession, SelectionPolicy};
use tonedrill_lib::ScriptVariant;

use crate::app::App;
use crate::OutputFormat;

pub fn run(
    app: &App,
    script: Option<ScriptVariant>,
    selection: Option<SelectionPolicy>,
    format: &OutputFormat,
) -> Result<()> {
    if matches!(format, OutputFormat::Plain) {
        println!("Loading...");
    }
    let records = app.load_records()?;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    let script = match script {
        Some(script) => script,
        None => match prompt_script_menu(&mut input, &mut output)? {
            Some(script) => script,
            None => return Ok(()),
        },
    };
    log::info!("Drilling {} ({} characters)", script, records.len());

    let records = app.records_for(records, script)?;
    let mut store = app.open_store()?;
    let policy = selection.unwrap_or(app.config.selection);

    let summary = QuizSession::new(&records, &mut store, &mut input, &mut output, rand::thread_rng())
        .with_policy(policy)
        .with_validator(AnswerValidator::new(app.config.syllable_rule))
        .run()
        .context("Quiz session failed")?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        OutputFormat::Plain => {
            println!();
            println!(
                "Session complete: {} trials, {} correct, {} skipped.",
                summary.trials, summary.correct, summary.rejected
            );
            println!("Progress saved to {}", app.store_path.display());
        }
    }

    Ok(())
}
