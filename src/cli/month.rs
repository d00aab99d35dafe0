use clap::Parser;
use rate_explorer::{cache::RateRepository, prelude::*};

use crate::tables::{build_month_grid_table, build_month_table};

#[derive(Parser)]
pub struct MonthArgs {
    #[clap(long)]
    year: i32,

    /// Month number, `1` to `12`.
    #[clap(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    month: u32,
}

impl MonthArgs {
    #[instrument(skip_all, fields(year = self.year, month = self.month))]
    pub fn run(self, repository: &mut RateRepository) -> Result {
        let grid = repository.month_grid(self.year, self.month)?;
        println!("{}", build_month_grid_table(&grid));
        match repository.month(self.year, self.month)? {
            Some(summary) => println!("{}", build_month_table(&[summary])),
            None => warn!("no rates for the month"),
        }
        Ok(())
    }
}
