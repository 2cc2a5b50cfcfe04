use std::{path::PathBuf, process::ExitCode};

use clap::{CommandFactory, Parser, error::ErrorKind};
use engine::Engine;

use crate::{
    cli::{Cli, Command},
    error::Result,
    settings::Settings,
};

mod cli;
mod error;
mod render;
mod settings;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if err.kind() == ErrorKind::InvalidSubcommand => return print_help(),
        Err(err) => err.exit(),
    };
    let Some(command) = cli.command else {
        return print_help();
    };

    match run(cli.config.as_deref(), cli.database, command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("command failed: {err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Option<&str>, database: Option<PathBuf>, command: Command) -> Result<()> {
    let settings = Settings::new(config)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "expenses={level},engine={level},migration={level}",
            level = settings.app.level
        ))
        .with_writer(std::io::stderr)
        .init();

    let engine = Engine::builder()
        .database(database_path(database, &settings))
        .build();
    execute(&engine, command, &settings).await
}

/// The `--database` flag wins over the configured path.
fn database_path(flag: Option<PathBuf>, settings: &Settings) -> PathBuf {
    flag.unwrap_or_else(|| settings.database.path.clone())
}

async fn execute(engine: &Engine, command: Command, settings: &Settings) -> Result<()> {
    match command {
        Command::Add(args) => {
            tracing::info!("adding expense to {}", engine.path().display());
            let expense = engine
                .add_expense(args.amount, &args.category, args.date)
                .await?;
            println!("Added: {expense}");
        }
        Command::Report(args) => {
            tracing::info!("{} report from {}", args.period, engine.path().display());
            let summary = engine.report(args.period).await?;
            render::text::write_report(std::io::stdout().lock(), &summary)?;
        }
        Command::Plot(args) => {
            tracing::info!("{} chart from {}", args.period, engine.path().display());
            let summary = engine.report(args.period).await?;
            match render::chart::plot(&summary, &settings.charts.dir)? {
                Some(path) => println!("Saved plot to {}", path.display()),
                None => println!("No data to plot."),
            }
        }
    }
    Ok(())
}

fn print_help() -> ExitCode {
    match Cli::command().print_help() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
