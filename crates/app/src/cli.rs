use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, builder::PossibleValuesParser, builder::TypedValueParser};
use engine::Period;

#[derive(Parser, Debug)]
#[command(name = "expenses")]
#[command(about = "Personal Expense Tracker")]
pub struct Cli {
    /// SQLite file holding the expenses (overrides the settings).
    #[arg(long, global = true)]
    pub database: Option<PathBuf>,

    /// Optional settings file (TOML).
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a new expense
    Add(AddArgs),
    /// Show textual report
    Report(PeriodArgs),
    /// Generate bar chart
    Plot(PeriodArgs),
}

#[derive(Args, Debug)]
pub struct AddArgs {
    #[arg(long, allow_negative_numbers = true)]
    pub amount: f64,
    #[arg(long)]
    pub category: String,
    /// Day of the expense (YYYY-MM-DD), today when omitted.
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub struct PeriodArgs {
    #[arg(
        long,
        default_value = "monthly",
        value_parser = PossibleValuesParser::new(Period::VARIANTS.map(Period::name))
            .try_map(|name| name.parse::<Period>())
    )]
    pub period: Period,
}
