use clap::Parser;
use rate_explorer::{cache::RateRepository, prelude::*};

use crate::tables::build_month_table;

#[derive(Parser)]
pub struct YearArgs {
    #[clap(long)]
    year: i32,
}

impl YearArgs {
    #[instrument(skip_all, fields(year = self.year))]
    pub fn run(self, repository: &mut RateRepository) -> Result {
        let months = repository.year(self.year)?;
        if months.is_empty() {
            warn!("no rates for the year");
        } else {
            println!("{}", build_month_table(&months));
        }
        Ok(())
    }
}
