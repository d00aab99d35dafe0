use clap::Parser;
use rate_explorer::{
    cache::RateRepository,
    core::filter::RateFilter,
    prelude::*,
    statistics::Statistics,
};

use crate::{cli::filter::FilterArgs, tables::build_statistics_table};

#[derive(Parser)]
pub struct StatsArgs {
    #[clap(flatten)]
    filter: FilterArgs,
}

impl StatsArgs {
    #[instrument(skip_all)]
    pub fn run(self, repository: &RateRepository) -> Result {
        let filter = RateFilter::from(self.filter);
        debug!(?filter, "filtering…");
        let statistics = Statistics::compute(
            filter.apply(repository.records()).map(|record| record.total().into_inner()),
        );
        info!(n_records = statistics.count, "filtered");
        println!("{}", build_statistics_table(&statistics));
        Ok(())
    }
}
