mod app;
mod commands;
mod render;

use std::io::{IsTerminal, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "flashback-cli", about = "Review question/answer flashbacks and track streaks", version)]
struct Cli {
    /// Use a specific config file (default: ~/.config/flashback/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the data directory from the config file
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// List all flashbacks with their streaks
    List,

    /// Show a flashback including its answer
    Show {
        /// Position in the list (1-based) or id prefix
        target: String,
    },

    /// Add a new flashback
    Add {
        /// Question text
        question: String,
        /// Answer text
        answer: String,
    },

    /// Edit a flashback (resets its streak)
    Edit {
        /// Position in the list (1-based) or id prefix
        target: String,
        /// New question text
        #[arg(long)]
        question: Option<String>,
        /// New answer text
        #[arg(long)]
        answer: Option<String>,
    },

    /// Delete a flashback
    Delete {
        /// Position in the list (1-based) or id prefix
        target: String,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },

    /// Review flashbacks: reveal the answer and report whether you knew it
    Review {
        /// Review a single flashback instead of all of them
        target: Option<String>,
        /// Record a correct recall without prompting
        #[arg(long, conflicts_with = "incorrect", requires = "target")]
        correct: bool,
        /// Record a missed recall without prompting
        #[arg(long, requires = "target")]
        incorrect: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && std::io::stdout().is_terminal();

    let mut app = app::App::new(cli.config.as_deref(), cli.data_dir).await?;

    match cli.command {
        Command::List => {
            commands::list::run(&app, &cli.format, use_color)?;
        }
        Command::Show { target } => {
            commands::show::run(&app, &target, &cli.format, use_color)?;
        }
        Command::Add { question, answer } => {
            commands::add::run(&mut app, question, answer, &cli.format, use_color).await?;
        }
        Command::Edit { target, question, answer } => {
            commands::edit::run(&mut app, &target, question, answer, &cli.format, use_color).await?;
        }
        Command::Delete { target, yes } => {
            let mut input = std::io::stdin().lock();
            let mut prompts = prompt_writer(&cli.format);
            let mut output = std::io::stdout();
            commands::delete::run(
                &mut app,
                &target,
                yes,
                &mut input,
                &mut prompts,
                &mut output,
                &cli.format,
            )
            .await?;
        }
        Command::Review { target, correct, incorrect } => {
            let outcome = match (correct, incorrect) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            let mut input = std::io::stdin().lock();
            let mut prompts = prompt_writer(&cli.format);
            let mut output = std::io::stdout();
            commands::review::run(
                &mut app,
                target.as_deref(),
                outcome,
                &mut input,
                &mut prompts,
                &mut output,
                &cli.format,
                use_color,
            )
            .await?;
        }
    }

    Ok(())
}

/// Interactive prompts share stdout in plain mode and move to stderr when
/// stdout carries a JSON document
fn prompt_writer(format: &OutputFormat) -> Box<dyn Write> {
    match format {
        OutputFormat::Plain => Box::new(std::io::stdout()),
        OutputFormat::Json => Box::new(std::io::stderr()),
    }
}
