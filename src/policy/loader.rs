//! Load a policy value schedule from CSV
//!
//! Expected header: `Year,PremiumPaidYearly,TotalPremiumPaid,GuaranteedCV,TotalCV`

use super::{PolicySchedule, PolicyYearRow};
use csv::Reader;
use std::path::Path;
use thiserror::Error;

/// Schedule loading failures.
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("failed to read schedule CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("schedule contains no rows")]
    Empty,

    #[error("invalid policy year {year}: years start at 1")]
    InvalidYear { year: u32 },

    #[error("duplicate policy year {year}")]
    DuplicateYear { year: u32 },
}

/// Raw CSV row matching the illustration export columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Year")]
    year: u32,
    #[serde(rename = "PremiumPaidYearly")]
    premium_paid_yearly: f64,
    #[serde(rename = "TotalPremiumPaid")]
    total_premium_paid: f64,
    #[serde(rename = "GuaranteedCV")]
    guaranteed_cv: f64,
    #[serde(rename = "TotalCV")]
    total_cv: f64,
}

impl CsvRow {
    fn into_row(self) -> Result<PolicyYearRow, ScheduleError> {
        if self.year == 0 {
            return Err(ScheduleError::InvalidYear { year: self.year });
        }

        Ok(PolicyYearRow {
            year: self.year,
            premium_paid_yearly: self.premium_paid_yearly,
            total_premium_paid: self.total_premium_paid,
            guaranteed_cv: self.guaranteed_cv,
            total_cv: self.total_cv,
        })
    }
}

fn build_schedule(rows: Vec<PolicyYearRow>) -> Result<PolicySchedule, ScheduleError> {
    if rows.is_empty() {
        return Err(ScheduleError::Empty);
    }

    // Exact-year lookup relies on unique years.
    let schedule = PolicySchedule::new(rows);
    for pair in schedule.rows().windows(2) {
        if pair[0].year == pair[1].year {
            return Err(ScheduleError::DuplicateYear { year: pair[0].year });
        }
    }

    Ok(schedule)
}

/// Load a schedule from a CSV file
pub fn load_schedule<P: AsRef<Path>>(path: P) -> Result<PolicySchedule, ScheduleError> {
    let mut reader = Reader::from_path(path)?;
    let mut rows = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        rows.push(row.into_row()?);
    }

    build_schedule(rows)
}

/// Load a schedule from any reader (e.g., string buffer, request body)
pub fn load_schedule_from_reader<R: std::io::Read>(
    reader: R,
) -> Result<PolicySchedule, ScheduleError> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut rows = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        rows.push(row.into_row()?);
    }

    build_schedule(rows)
}

/// Load from the default policy_schedule.csv location
pub fn load_default_schedule() -> Result<PolicySchedule, ScheduleError> {
    load_schedule("policy_schedule.csv")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Year,PremiumPaidYearly,TotalPremiumPaid,GuaranteedCV,TotalCV
1,200000,200000,58000,98000
2,200000,400000,168000,242000
3,0,400000,250000,330000
";

    #[test]
    fn test_load_from_reader() {
        let schedule = load_schedule_from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(schedule.len(), 3);

        let year_2 = schedule.year(2).unwrap();
        assert_eq!(year_2.premium_paid_yearly, 200_000.0);
        assert_eq!(year_2.total_premium_paid, 400_000.0);
        assert_eq!(year_2.guaranteed_cv, 168_000.0);
        assert_eq!(year_2.total_cv, 242_000.0);

        assert_eq!(schedule.year(3).unwrap().premium_paid_yearly, 0.0);
    }

    #[test]
    fn test_rows_sorted_regardless_of_input_order() {
        let shuffled = "\
Year,PremiumPaidYearly,TotalPremiumPaid,GuaranteedCV,TotalCV
3,0,400000,250000,330000
1,200000,200000,58000,98000
2,200000,400000,168000,242000
";
        let schedule = load_schedule_from_reader(shuffled.as_bytes()).unwrap();
        let years: Vec<u32> = schedule.rows().iter().map(|row| row.year).collect();
        assert_eq!(years, vec![1, 2, 3]);
    }

    #[test]
    fn test_empty_schedule_rejected() {
        let header_only = "Year,PremiumPaidYearly,TotalPremiumPaid,GuaranteedCV,TotalCV\n";
        let err = load_schedule_from_reader(header_only.as_bytes()).unwrap_err();
        assert!(matches!(err, ScheduleError::Empty));
    }

    #[test]
    fn test_year_zero_rejected() {
        let bad = "\
Year,PremiumPaidYearly,TotalPremiumPaid,GuaranteedCV,TotalCV
0,200000,200000,58000,98000
";
        let err = load_schedule_from_reader(bad.as_bytes()).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidYear { year: 0 }));
    }

    #[test]
    fn test_duplicate_year_rejected() {
        let bad = "\
Year,PremiumPaidYearly,TotalPremiumPaid,GuaranteedCV,TotalCV
1,200000,200000,58000,98000
1,200000,200000,58000,99000
";
        let err = load_schedule_from_reader(bad.as_bytes()).unwrap_err();
        assert!(matches!(err, ScheduleError::DuplicateYear { year: 1 }));
    }

    #[test]
    fn test_malformed_number_is_csv_error() {
        let bad = "\
Year,PremiumPaidYearly,TotalPremiumPaid,GuaranteedCV,TotalCV
1,not_a_number,200000,58000,98000
";
        let err = load_schedule_from_reader(bad.as_bytes()).unwrap_err();
        assert!(matches!(err, ScheduleError::Csv(_)));
    }
}
