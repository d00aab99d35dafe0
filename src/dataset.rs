use std::{collections::BTreeSet, fs, ops::RangeInclusive, path::Path};

use chrono::{Datelike, NaiveDate};
use itertools::Itertools;
use serde::{Deserialize, de::IgnoredAny};

use crate::{
    core::{
        hour::Hour,
        record::{DayType, RateRecord},
    },
    prelude::*,
    quantity::rate::KilowattHourRate,
};

/// Informative header of the preprocessed rate file.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    pub generated: Option<String>,
    pub version: Option<String>,
    pub date_range: Option<(NaiveDate, NaiveDate)>,
    pub total_hours: Option<usize>,
    pub total_days: Option<usize>,
}

/// `[date, hour, generation, delivery, total, dayType]`, the total gets recomputed.
#[derive(Deserialize)]
struct Row(
    NaiveDate,
    Hour,
    Option<KilowattHourRate>,
    Option<KilowattHourRate>,
    IgnoredAny,
    DayType,
);

impl From<Row> for RateRecord {
    fn from(Row(date, hour, generation, delivery, _, day_type): Row) -> Self {
        Self {
            date,
            hour,
            generation: generation.unwrap_or_default(),
            delivery: delivery.unwrap_or_default(),
            day_type,
        }
    }
}

#[derive(Deserialize)]
struct RawDataset {
    #[serde(default)]
    meta: Meta,

    data: Vec<Row>,
}

/// Loaded rate records, ordered by date and hour.
#[must_use]
pub struct Dataset {
    pub meta: Meta,
    pub records: Vec<RateRecord>,
}

impl Dataset {
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn read_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read `{}`", path.display()))?;
        let dataset = Self::from_json(&json)
            .with_context(|| format!("failed to parse `{}`", path.display()))?;
        info!(
            n_records = dataset.records.len(),
            version = dataset.meta.version.as_deref(),
            generated = dataset.meta.generated.as_deref(),
            "loaded",
        );
        if let Some(total_hours) = dataset.meta.total_hours
            && total_hours != dataset.records.len()
        {
            warn!(total_hours, n_records = dataset.records.len(), "record count mismatch");
        }
        Ok(dataset)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawDataset = serde_json::from_str(json)?;
        let records = raw
            .data
            .into_iter()
            .map(RateRecord::from)
            .sorted_by_key(|record| (record.date, record.hour))
            .collect();
        Ok(Self { meta: raw.meta, records })
    }

    /// Distinct years present in the records.
    #[must_use]
    pub fn years(&self) -> BTreeSet<i32> {
        self.records.iter().map(|record| record.date.year()).collect()
    }

    /// The first and last dates, or [`None`] for an empty dataset.
    #[must_use]
    pub fn date_range(&self) -> Option<RangeInclusive<NaiveDate>> {
        let first = self.records.first()?;
        let last = self.records.last()?;
        Some(first.date..=last.date)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    const JSON: &str = r#"{
        "meta": {
            "generated": "2025-10-01",
            "version": "2.0",
            "dateRange": ["2025-01-15", "2025-01-18"],
            "totalHours": 3,
            "totalDays": 2,
            "description": "ignored"
        },
        "data": [
            ["2025-01-18", 0, 0.05, 0.1, 0.15, "e"],
            ["2025-01-15", 18, 0.3, 0.1, 99.0, "w"],
            ["2025-01-15", 2, null, 0.1, 0.1, "h"]
        ]
    }"#;

    #[test]
    fn test_from_json() -> Result {
        let dataset = Dataset::from_json(JSON)?;
        let keys = dataset
            .records
            .iter()
            .map(|record| (record.date.to_string(), record.hour.get(), record.day_type))
            .collect_vec();
        assert_eq!(
            keys,
            [
                ("2025-01-15".to_string(), 2, DayType::Holiday),
                ("2025-01-15".to_string(), 18, DayType::Weekday),
                ("2025-01-18".to_string(), 0, DayType::Weekend),
            ],
        );
        assert_eq!(dataset.records[0].generation, KilowattHourRate::ZERO);
        assert_abs_diff_eq!(dataset.records[1].total().into_inner(), 0.4, epsilon = 1e-12);
        assert_eq!(dataset.meta.version.as_deref(), Some("2.0"));
        assert_eq!(dataset.meta.total_days, Some(2));
        Ok(())
    }

    #[test]
    fn test_years_and_date_range() -> Result {
        let dataset = Dataset::from_json(JSON)?;
        assert_eq!(dataset.years(), BTreeSet::from([2025]));
        assert_eq!(
            dataset.date_range(),
            Some("2025-01-15".parse()?..="2025-01-18".parse()?),
        );
        Ok(())
    }

    #[test]
    fn test_meta_is_optional() -> Result {
        let dataset = Dataset::from_json(r#"{"data": []}"#)?;
        assert!(dataset.records.is_empty());
        assert!(dataset.date_range().is_none());
        assert!(dataset.years().is_empty());
        Ok(())
    }

    #[test]
    fn test_read_from() -> Result {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("rates.json");
        std::fs::write(&path, JSON)?;
        assert_eq!(Dataset::read_from(&path)?.records.len(), 3);
        Ok(())
    }

    #[test]
    fn test_read_from_names_the_malformed_file() -> Result {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("rates.json");
        std::fs::write(&path, r#"{"data": [["2025-01-15", 24, 0.1, 0.1, 0.2, "w"]]}"#)?;
        let error = Dataset::read_from(&path).err().context("malformed file is accepted")?;
        assert_eq!(error.to_string(), format!("failed to parse `{}`", path.display()));
        assert!(format!("{error:#}").contains("hour 24 is outside of 0..=23"));
        Ok(())
    }

    #[test]
    fn test_read_from_missing_file() -> Result {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("missing.json");
        let error = Dataset::read_from(&path).err().context("missing file is accepted")?;
        assert_eq!(error.to_string(), format!("failed to read `{}`", path.display()));
        Ok(())
    }

    #[test]
    fn test_invalid_hour_is_rejected() {
        assert!(Dataset::from_json(r#"{"data": [["2025-01-15", 24, 0.1, 0.1, 0.2, "w"]]}"#).is_err());
    }

    #[test]
    fn test_invalid_date_is_rejected() {
        assert!(Dataset::from_json(r#"{"data": [["2025-02-30", 1, 0.1, 0.1, 0.2, "w"]]}"#).is_err());
    }
}
