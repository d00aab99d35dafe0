use chrono::NaiveDate;
use clap::Parser;
use rate_explorer::{cache::RateRepository, core::insights::DailyInsights, prelude::*};

use crate::tables::{build_day_table, build_hourly_table, build_recommendations_table};

#[derive(Parser)]
pub struct DayArgs {
    /// Date in the `YYYY-MM-DD` format.
    #[clap(long)]
    date: NaiveDate,
}

impl DayArgs {
    #[instrument(skip_all, fields(date = %self.date))]
    pub fn run(self, repository: &mut RateRepository) -> Result {
        let Some(day) = repository.day(self.date) else {
            warn!("no rates for the date");
            return Ok(());
        };
        let insights = DailyInsights::build(&day);
        println!("{}", build_day_table(&day, &insights));
        println!("{}", build_hourly_table(&day, &insights));
        if insights.recommendations.is_empty() {
            info!("no recommendations");
        } else {
            println!("{}", build_recommendations_table(&insights.recommendations));
        }
        Ok(())
    }
}
