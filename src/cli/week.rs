use chrono::NaiveDate;
use clap::Parser;
use rate_explorer::{cache::RateRepository, prelude::*};

use crate::tables::build_week_table;

#[derive(Parser)]
pub struct WeekArgs {
    /// Any date of the week, `YYYY-MM-DD`.
    #[clap(long)]
    date: NaiveDate,
}

impl WeekArgs {
    #[instrument(skip_all, fields(date = %self.date))]
    pub fn run(self, repository: &mut RateRepository) -> Result {
        let days = repository.week(self.date)?;
        if days.is_empty() {
            warn!("no rates for the week");
        } else {
            println!("{}", build_week_table(&days));
        }
        Ok(())
    }
}
