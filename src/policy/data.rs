//! Policy value schedule data
//!
//! Year-indexed illustration table for the traded policy: premium paid,
//! cumulative premium, and cash values per policy year. The trade engine
//! only ever asks for exact years, so lookup stays dumb and total.

use serde::{Deserialize, Serialize};

/// One policy year of the value illustration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyYearRow {
    /// Policy year, starting at 1
    pub year: u32,

    /// Premium paid during this year
    pub premium_paid_yearly: f64,

    /// Cumulative premium paid through the end of this year
    pub total_premium_paid: f64,

    /// Guaranteed cash value at the end of this year
    pub guaranteed_cv: f64,

    /// Total cash value (guaranteed plus accumulated dividends) at the end
    /// of this year
    pub total_cv: f64,
}

/// Reference illustration: 5-year pay dividend-paying whole life, HKD
/// 200,000 premium per year, HKD 1,000,000 total principal. Total CV first
/// exceeds paid premium in year 7.
const DEFAULT_ILLUSTRATION: [(u32, f64, f64, f64, f64); 30] = [
    // (year, premium, total premium, guaranteed CV, total CV)
    (1, 200_000.0, 200_000.0, 58_000.0, 98_000.0),
    (2, 200_000.0, 400_000.0, 168_000.0, 242_000.0),
    (3, 200_000.0, 600_000.0, 306_000.0, 414_000.0),
    (4, 200_000.0, 800_000.0, 472_000.0, 612_000.0),
    (5, 200_000.0, 1_000_000.0, 664_000.0, 836_000.0),
    (6, 0.0, 1_000_000.0, 714_000.0, 920_000.0),
    (7, 0.0, 1_000_000.0, 766_000.0, 1_010_000.0),
    (8, 0.0, 1_000_000.0, 820_000.0, 1_100_000.0),
    (9, 0.0, 1_000_000.0, 876_000.0, 1_196_000.0),
    (10, 0.0, 1_000_000.0, 934_000.0, 1_300_000.0),
    (11, 0.0, 1_000_000.0, 994_000.0, 1_410_000.0),
    (12, 0.0, 1_000_000.0, 1_056_000.0, 1_528_000.0),
    (13, 0.0, 1_000_000.0, 1_120_000.0, 1_654_000.0),
    (14, 0.0, 1_000_000.0, 1_186_000.0, 1_788_000.0),
    (15, 0.0, 1_000_000.0, 1_254_000.0, 1_932_000.0),
    (16, 0.0, 1_000_000.0, 1_324_000.0, 2_086_000.0),
    (17, 0.0, 1_000_000.0, 1_396_000.0, 2_250_000.0),
    (18, 0.0, 1_000_000.0, 1_470_000.0, 2_426_000.0),
    (19, 0.0, 1_000_000.0, 1_546_000.0, 2_614_000.0),
    (20, 0.0, 1_000_000.0, 1_624_000.0, 2_816_000.0),
    (21, 0.0, 1_000_000.0, 1_704_000.0, 3_032_000.0),
    (22, 0.0, 1_000_000.0, 1_786_000.0, 3_264_000.0),
    (23, 0.0, 1_000_000.0, 1_870_000.0, 3_512_000.0),
    (24, 0.0, 1_000_000.0, 1_956_000.0, 3_778_000.0),
    (25, 0.0, 1_000_000.0, 2_044_000.0, 4_062_000.0),
    (26, 0.0, 1_000_000.0, 2_134_000.0, 4_366_000.0),
    (27, 0.0, 1_000_000.0, 2_226_000.0, 4_692_000.0),
    (28, 0.0, 1_000_000.0, 2_320_000.0, 5_040_000.0),
    (29, 0.0, 1_000_000.0, 2_416_000.0, 5_412_000.0),
    (30, 0.0, 1_000_000.0, 2_514_000.0, 5_772_000.0),
];

/// Ordered policy value schedule with exact-year lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicySchedule {
    rows: Vec<PolicyYearRow>,
}

impl PolicySchedule {
    /// Build a schedule from rows in any order. Rows are kept sorted by year.
    pub fn new(mut rows: Vec<PolicyYearRow>) -> Self {
        rows.sort_by_key(|row| row.year);
        Self { rows }
    }

    /// The built-in reference illustration (HKD, 30 policy years).
    pub fn default_illustration() -> Self {
        let rows = DEFAULT_ILLUSTRATION
            .iter()
            .map(
                |&(year, premium_paid_yearly, total_premium_paid, guaranteed_cv, total_cv)| {
                    PolicyYearRow {
                        year,
                        premium_paid_yearly,
                        total_premium_paid,
                        guaranteed_cv,
                        total_cv,
                    }
                },
            )
            .collect();
        Self { rows }
    }

    /// Exact-year lookup. A year outside the table is `None`, never an error.
    pub fn year(&self, year: u32) -> Option<&PolicyYearRow> {
        self.rows.iter().find(|row| row.year == year)
    }

    /// Rows strictly after the given year, in year order.
    pub fn years_after(&self, year: u32) -> impl Iterator<Item = &PolicyYearRow> {
        self.rows.iter().filter(move |row| row.year > year)
    }

    /// Up to `len` consecutive rows starting at `start_year`.
    pub fn window(&self, start_year: u32, len: usize) -> Vec<&PolicyYearRow> {
        self.rows
            .iter()
            .filter(|row| row.year >= start_year)
            .take(len)
            .collect()
    }

    /// First year in the table, if any.
    pub fn first_year(&self) -> Option<u32> {
        self.rows.first().map(|row| row.year)
    }

    /// Last year in the table, if any.
    pub fn last_year(&self) -> Option<u32> {
        self.rows.last().map(|row| row.year)
    }

    pub fn rows(&self) -> &[PolicyYearRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Default for PolicySchedule {
    fn default() -> Self {
        Self::default_illustration()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_illustration_shape() {
        let schedule = PolicySchedule::default_illustration();
        assert_eq!(schedule.len(), 30);
        assert_eq!(schedule.first_year(), Some(1));
        assert_eq!(schedule.last_year(), Some(30));
    }

    #[test]
    fn test_premium_pattern() {
        let schedule = PolicySchedule::default_illustration();
        for year in 1..=5 {
            assert_eq!(schedule.year(year).unwrap().premium_paid_yearly, 200_000.0);
        }
        for year in 6..=30 {
            let row = schedule.year(year).unwrap();
            assert_eq!(row.premium_paid_yearly, 0.0);
            assert_eq!(row.total_premium_paid, 1_000_000.0);
        }
    }

    #[test]
    fn test_breakeven_is_year_seven() {
        let schedule = PolicySchedule::default_illustration();
        assert!(schedule.year(6).unwrap().total_cv < 1_000_000.0);
        assert!(schedule.year(7).unwrap().total_cv > 1_000_000.0);
    }

    #[test]
    fn test_cash_values_monotone() {
        let schedule = PolicySchedule::default_illustration();
        for pair in schedule.rows().windows(2) {
            assert!(pair[1].total_cv > pair[0].total_cv);
            assert!(pair[1].guaranteed_cv > pair[0].guaranteed_cv);
        }
        for row in schedule.rows() {
            assert!(row.guaranteed_cv < row.total_cv, "year {}", row.year);
        }
    }

    #[test]
    fn test_missing_year_is_none() {
        let schedule = PolicySchedule::default_illustration();
        assert!(schedule.year(0).is_none());
        assert!(schedule.year(31).is_none());
    }

    #[test]
    fn test_years_after() {
        let schedule = PolicySchedule::default_illustration();
        let future: Vec<u32> = schedule.years_after(25).map(|row| row.year).collect();
        assert_eq!(future, vec![26, 27, 28, 29, 30]);
    }

    #[test]
    fn test_window_clamps_to_table_end() {
        let schedule = PolicySchedule::default_illustration();
        let window = schedule.window(10, 11);
        assert_eq!(window.len(), 11);
        assert_eq!(window[0].year, 10);
        assert_eq!(window[10].year, 20);

        let tail = schedule.window(28, 11);
        assert_eq!(tail.len(), 3);
    }

    #[test]
    fn test_new_sorts_rows() {
        let schedule = PolicySchedule::new(vec![
            PolicyYearRow {
                year: 2,
                premium_paid_yearly: 100.0,
                total_premium_paid: 200.0,
                guaranteed_cv: 50.0,
                total_cv: 80.0,
            },
            PolicyYearRow {
                year: 1,
                premium_paid_yearly: 100.0,
                total_premium_paid: 100.0,
                guaranteed_cv: 20.0,
                total_cv: 30.0,
            },
        ]);
        assert_eq!(schedule.first_year(), Some(1));
        assert_eq!(schedule.last_year(), Some(2));
    }
}
