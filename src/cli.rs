mod day;
mod filter;
mod month;
mod stats;
mod week;
mod year;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rate_explorer::{cache::RateRepository, dataset::Dataset, prelude::*};

use crate::cli::{
    day::DayArgs,
    month::MonthArgs,
    stats::StatsArgs,
    week::WeekArgs,
    year::YearArgs,
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    /// Preprocessed JSON rate file.
    #[clap(long = "rates-file", env = "RATES_FILE", default_value = "rates.json", global = true)]
    rates_file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn run(self) -> Result {
        let dataset = Dataset::read_from(&self.rates_file)?;
        if let Some(date_range) = dataset.date_range() {
            info!(since = %date_range.start(), until = %date_range.end(), "rates available");
        } else {
            warn!("the rate file is empty");
        }
        let mut repository = RateRepository::new(dataset.records);
        match self.command {
            Command::Day(args) => args.run(&mut repository),
            Command::Week(args) => args.run(&mut repository),
            Command::Month(args) => args.run(&mut repository),
            Command::Year(args) => args.run(&mut repository),
            Command::Stats(args) => args.run(&repository),
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Hourly rates, insights, and battery hints for a single day.
    Day(DayArgs),

    /// Daily summaries of the Sunday-first week containing the date.
    Week(WeekArgs),

    /// Calendar page and summary of a month.
    Month(MonthArgs),

    /// Monthly summaries of a year.
    Year(YearArgs),

    /// Descriptive statistics of the filtered rates.
    Stats(StatsArgs),
}
