mod app;
mod commands;
mod render;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use tonedrill_lib::drill::SelectionPolicy;
use tonedrill_lib::ScriptVariant;

#[derive(Parser)]
#[command(name = "tonedrill", about = "Character pronunciation and tone drill", version)]
struct Cli {
    /// Config file (default: platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the performance data
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Lexicon file (.txt export, .csv or .tsv)
    #[arg(long, global = true)]
    lexicon: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum ScriptArg {
    Simplified,
    Traditional,
}

impl From<ScriptArg> for ScriptVariant {
    fn from(arg: ScriptArg) -> Self {
        match arg {
            ScriptArg::Simplified => ScriptVariant::Simplified,
            ScriptArg::Traditional => ScriptVariant::Traditional,
        }
    }
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum SelectionArg {
    Uniform,
    IntervalWeighted,
}

impl From<SelectionArg> for SelectionPolicy {
    fn from(arg: SelectionArg) -> Self {
        match arg {
            SelectionArg::Uniform => SelectionPolicy::Uniform,
            SelectionArg::IntervalWeighted => SelectionPolicy::IntervalWeighted,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Start a quiz session (default)
    Quiz {
        /// Skip the menu and drill this character set
        #[arg(long)]
        script: Option<ScriptArg>,
        /// How the next character is drawn
        #[arg(long)]
        selection: Option<SelectionArg>,
    },

    /// Show per-character performance and review intervals
    Stats,

    /// Show the review interval for one character
    Interval {
        /// The character to look up
        glyph: String,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && std::io::stdout().is_terminal();
    let app = app::App::new(cli.config.as_deref(), cli.data_dir, cli.lexicon)?;

    match cli.command {
        None => {
            commands::quiz::run(&app, None, None, &cli.format)?;
        }
        Some(Command::Quiz { script, selection }) => {
            commands::quiz::run(
                &app,
                script.map(Into::into),
                selection.map(Into::into),
                &cli.format,
            )?;
        }
        Some(Command::Stats) => {
            commands::stats::run(&app, &cli.format, use_color)?;
        }
        Some(Command::Interval { glyph }) => {
            commands::interval::run(&app, &glyph, &cli.format, use_color)?;
        }
    }

    Ok(())
}
