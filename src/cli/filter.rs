use chrono::NaiveDate;
use clap::Parser;
use rate_explorer::core::{filter::RateFilter, hour::Hour, record::DayType};

#[derive(Parser)]
pub struct FilterArgs {
    /// First date to include, `YYYY-MM-DD`.
    #[clap(long, env = "SINCE")]
    since: Option<NaiveDate>,

    /// Last date to include, `YYYY-MM-DD`.
    #[clap(long, env = "UNTIL")]
    until: Option<NaiveDate>,

    /// First hour to include, `0` to `23`.
    #[clap(long = "from-hour")]
    from_hour: Option<Hour>,

    /// Last hour to include, `0` to `23`.
    #[clap(long = "to-hour")]
    to_hour: Option<Hour>,

    /// Month numbers, `1` to `12`.
    #[clap(
        long,
        value_delimiter = ',',
        num_args = 1..,
        value_parser = clap::value_parser!(u32).range(1..=12),
    )]
    months: Vec<u32>,

    #[clap(long, value_delimiter = ',', num_args = 1..)]
    years: Vec<i32>,

    #[clap(long = "day-types", value_delimiter = ',', num_args = 1..)]
    day_types: Vec<DayType>,
}

impl From<FilterArgs> for RateFilter {
    fn from(args: FilterArgs) -> Self {
        let date_range = (args.since.is_some() || args.until.is_some()).then(|| {
            args.since.unwrap_or(NaiveDate::MIN)..=args.until.unwrap_or(NaiveDate::MAX)
        });
        let hour_range = (args.from_hour.is_some() || args.to_hour.is_some())
            .then(|| args.from_hour.unwrap_or(Hour::MIDNIGHT)..=args.to_hour.unwrap_or(Hour::LAST));
        Self::builder()
            .maybe_date_range(date_range)
            .maybe_hour_range(hour_range)
            .months(args.months.into_iter().collect())
            .years(args.years.into_iter().collect())
            .day_types(args.day_types.into_iter().collect())
            .build()
    }
}

#[cfg(test)]
mod tests {
    use rate_explorer::prelude::*;

    use super::*;

    #[derive(Parser)]
    struct TestArgs {
        #[clap(flatten)]
        filter: FilterArgs,
    }

    fn parse(args: &[&str]) -> Result<RateFilter> {
        let args = TestArgs::try_parse_from(["stats"].iter().chain(args))?;
        Ok(args.filter.into())
    }

    #[test]
    fn test_no_arguments() -> Result {
        let filter = parse(&[])?;
        assert!(filter.date_range.is_none());
        assert!(filter.hour_range.is_none());
        assert!(filter.months.is_empty());
        assert!(filter.day_types.is_empty());
        Ok(())
    }

    #[test]
    fn test_open_ended_ranges() -> Result {
        let filter = parse(&["--since", "2025-01-01", "--to-hour", "12"])?;
        assert_eq!(filter.date_range, Some("2025-01-01".parse()?..=NaiveDate::MAX));
        assert_eq!(filter.hour_range, Some(Hour::MIDNIGHT..=Hour::try_from(12)?));
        Ok(())
    }

    #[test]
    fn test_lists() -> Result {
        let filter =
            parse(&["--months", "6,7,8", "--years", "2025", "--day-types", "weekend,holiday"])?;
        assert_eq!(filter.months.into_iter().collect::<Vec<_>>(), [6, 7, 8]);
        assert_eq!(filter.years.into_iter().collect::<Vec<_>>(), [2025]);
        assert_eq!(filter.day_types, DayType::Weekend | DayType::Holiday);
        Ok(())
    }

    #[test]
    fn test_invalid_hour_is_rejected() {
        assert!(parse(&["--from-hour", "24"]).is_err());
        assert!(parse(&["--months", "13"]).is_err());
    }
}
