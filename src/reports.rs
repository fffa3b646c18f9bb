//! Period-based category reports over the transaction history.
//!
//! Provides pure functions that filter transactions by a selection window
//! and break totals down per category, independently for income and
//! expenses.

use std::collections::HashMap;

use time::{Date, Duration, Month, OffsetDateTime, util::days_in_year_month};

use crate::models::{Transaction, TransactionType};

/// The selection window for a report, anchored at "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    /// The last 7 days.
    Week,
    /// The last calendar month.
    Month,
    /// The last year.
    Year,
}

impl Period {
    /// The inclusive lower bound of the window ending at `now`.
    ///
    /// `Month` and `Year` step back by calendar units, clamping the day to
    /// the length of the target month (e.g. March 31 − 1 month = Feb 28/29).
    /// There is no upper bound: everything from the start onwards matches.
    pub fn start(&self, now: OffsetDateTime) -> OffsetDateTime {
        match self {
            Period::Week => now - Duration::days(7),
            Period::Month => {
                let (year, month) = match now.month() {
                    Month::January => (now.year() - 1, Month::December),
                    month => (now.year(), month.previous()),
                };
                now.replace_date(clamped_date(year, month, now.day()))
            }
            Period::Year => {
                now.replace_date(clamped_date(now.year() - 1, now.month(), now.day()))
            }
        }
    }
}

/// Build a date, clamping the day to the number of days in the target month.
fn clamped_date(year: i32, month: Month, day: u8) -> Date {
    let day = day.min(days_in_year_month(year, month));

    // The day is clamped into range, so construction cannot fail.
    Date::from_calendar_date(year, month, day)
        .unwrap_or_else(|_| Date::MIN)
}

/// The per-category breakdown of one transaction type within the window.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySummary {
    /// The category name.
    pub category: String,
    /// The summed amount of matching transactions.
    pub amount: f64,
    /// How many transactions matched.
    pub count: usize,
    /// This category's share of the type total, in percent. Zero when the
    /// type total is zero.
    pub percentage: f64,
}

/// The breakdown of one transaction type within the window.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TypeBreakdown {
    /// The summed amount over all matching transactions of this type.
    pub total: f64,
    /// Per-category summaries, sorted descending by amount. Ties keep the
    /// order in which the categories were first encountered in the history.
    pub categories: Vec<CategorySummary>,
}

/// A period report: independent breakdowns for income and expenses.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Report {
    /// The income breakdown.
    pub income: TypeBreakdown,
    /// The expense breakdown.
    pub expense: TypeBreakdown,
}

impl Report {
    /// Net amount within the window: income total minus expense total.
    ///
    /// This is the windowed counterpart of the dashboard balance
    /// ([crate::dashboard::totals]), which always covers the whole history.
    /// The two are intentionally separate computations.
    pub fn net(&self) -> f64 {
        self.income.total - self.expense.total
    }
}

/// Compute the category report for the window of `period` ending at `now`.
pub fn report(transactions: &[Transaction], period: Period, now: OffsetDateTime) -> Report {
    let start = period.start(now);
    let windowed: Vec<&Transaction> = transactions.iter().filter(|t| t.date >= start).collect();

    Report {
        income: breakdown(&windowed, TransactionType::Income),
        expense: breakdown(&windowed, TransactionType::Expense),
    }
}

/// Break the given transactions of one type down per category.
fn breakdown(transactions: &[&Transaction], kind: TransactionType) -> TypeBreakdown {
    // Track first-encounter order separately so equal amounts sort stably by
    // the order categories appear while scanning the history.
    let mut order: Vec<&str> = Vec::new();
    let mut stats: HashMap<&str, (f64, usize)> = HashMap::new();
    let mut total = 0.0;

    for transaction in transactions.iter().filter(|t| t.kind == kind) {
        let entry = stats.entry(transaction.category.as_str()).or_insert_with(|| {
            order.push(transaction.category.as_str());
            (0.0, 0)
        });
        entry.0 += transaction.amount;
        entry.1 += 1;
        total += transaction.amount;
    }

    let mut categories: Vec<CategorySummary> = order
        .into_iter()
        .map(|category| {
            let (amount, count) = stats[category];
            CategorySummary {
                category: category.to_owned(),
                amount,
                count,
                percentage: if total > 0.0 {
                    100.0 * amount / total
                } else {
                    0.0
                },
            }
        })
        .collect();

    // Stable sort keeps first-encounter order among equal amounts.
    categories.sort_by(|a, b| b.amount.total_cmp(&a.amount));

    TypeBreakdown { total, categories }
}

#[cfg(test)]
mod period_tests {
    use time::macros::datetime;

    use super::Period;

    #[test]
    fn week_starts_seven_days_back() {
        let now = datetime!(2025-06-15 10:00 UTC);

        assert_eq!(Period::Week.start(now), datetime!(2025-06-08 10:00 UTC));
    }

    #[test]
    fn month_steps_back_one_calendar_month() {
        let now = datetime!(2025-06-15 10:00 UTC);

        assert_eq!(Period::Month.start(now), datetime!(2025-05-15 10:00 UTC));
    }

    #[test]
    fn month_clamps_day_to_target_month_length() {
        let now = datetime!(2025-03-31 10:00 UTC);

        assert_eq!(Period::Month.start(now), datetime!(2025-02-28 10:00 UTC));
    }

    #[test]
    fn month_wraps_across_the_year_boundary() {
        let now = datetime!(2025-01-10 10:00 UTC);

        assert_eq!(Period::Month.start(now), datetime!(2024-12-10 10:00 UTC));
    }

    #[test]
    fn year_clamps_leap_day() {
        let now = datetime!(2024-02-29 10:00 UTC);

        assert_eq!(Period::Year.start(now), datetime!(2023-02-28 10:00 UTC));
    }
}

#[cfg(test)]
mod report_tests {
    use time::{Duration, macros::datetime};

    use crate::models::{Transaction, TransactionType};

    use super::{Period, report};

    fn create_test_transaction(
        kind: TransactionType,
        amount: f64,
        category: &str,
        date: time::OffsetDateTime,
    ) -> Transaction {
        Transaction {
            id: format!("{}", date.unix_timestamp_nanos()),
            kind,
            amount,
            description: category.to_owned(),
            category: category.to_owned(),
            date,
        }
    }

    #[test]
    fn week_window_excludes_eight_day_old_transaction() {
        let now = datetime!(2025-06-15 10:00 UTC);
        let transactions = vec![
            create_test_transaction(
                TransactionType::Expense,
                100.0,
                "Makanan",
                now - Duration::days(8),
            ),
            create_test_transaction(
                TransactionType::Expense,
                40.0,
                "Transport",
                now - Duration::days(3),
            ),
        ];

        let result = report(&transactions, Period::Week, now);

        assert_eq!(result.expense.total, 40.0);
        assert_eq!(result.expense.categories.len(), 1);
        assert_eq!(result.expense.categories[0].category, "Transport");
    }

    #[test]
    fn window_lower_bound_is_inclusive() {
        let now = datetime!(2025-06-15 10:00 UTC);
        let transactions = vec![create_test_transaction(
            TransactionType::Income,
            10.0,
            "Gaji",
            now - Duration::days(7),
        )];

        let result = report(&transactions, Period::Week, now);

        assert_eq!(result.income.total, 10.0);
    }

    #[test]
    fn income_and_expense_are_aggregated_independently() {
        let now = datetime!(2025-06-15 10:00 UTC);
        let transactions = vec![
            create_test_transaction(TransactionType::Income, 5_000_000.0, "Gaji", now),
            create_test_transaction(TransactionType::Expense, 2_000_000.0, "Belanja", now),
        ];

        let result = report(&transactions, Period::Month, now);

        assert_eq!(result.income.total, 5_000_000.0);
        assert_eq!(result.expense.total, 2_000_000.0);
        assert_eq!(result.net(), 3_000_000.0);
    }

    #[test]
    fn categories_are_sorted_descending_by_amount() {
        let now = datetime!(2025-06-15 10:00 UTC);
        let transactions = vec![
            create_test_transaction(TransactionType::Expense, 10.0, "Makanan", now),
            create_test_transaction(TransactionType::Expense, 50.0, "Tagihan", now),
            create_test_transaction(TransactionType::Expense, 20.0, "Makanan", now),
        ];

        let result = report(&transactions, Period::Month, now);

        let names: Vec<&str> = result
            .expense
            .categories
            .iter()
            .map(|c| c.category.as_str())
            .collect();
        assert_eq!(names, vec!["Tagihan", "Makanan"]);
        assert_eq!(result.expense.categories[1].count, 2);
    }

    #[test]
    fn equal_amounts_keep_first_encounter_order() {
        let now = datetime!(2025-06-15 10:00 UTC);
        let transactions = vec![
            create_test_transaction(TransactionType::Expense, 25.0, "Hiburan", now),
            create_test_transaction(TransactionType::Expense, 25.0, "Belanja", now),
            create_test_transaction(TransactionType::Expense, 25.0, "Makanan", now),
        ];

        let result = report(&transactions, Period::Month, now);

        let names: Vec<&str> = result
            .expense
            .categories
            .iter()
            .map(|c| c.category.as_str())
            .collect();
        assert_eq!(names, vec!["Hiburan", "Belanja", "Makanan"]);
    }

    #[test]
    fn percentages_sum_to_one_hundred_when_total_is_positive() {
        let now = datetime!(2025-06-15 10:00 UTC);
        let transactions = vec![
            create_test_transaction(TransactionType::Expense, 30.0, "Makanan", now),
            create_test_transaction(TransactionType::Expense, 45.0, "Transport", now),
            create_test_transaction(TransactionType::Expense, 25.0, "Hiburan", now),
        ];

        let result = report(&transactions, Period::Month, now);

        let sum: f64 = result
            .expense
            .categories
            .iter()
            .map(|c| c.percentage)
            .sum();
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn percentages_are_zero_when_type_total_is_zero() {
        let now = datetime!(2025-06-15 10:00 UTC);
        let transactions = vec![
            create_test_transaction(TransactionType::Expense, 0.0, "Makanan", now),
            create_test_transaction(TransactionType::Expense, 0.0, "Transport", now),
        ];

        let result = report(&transactions, Period::Month, now);

        assert_eq!(result.expense.total, 0.0);
        assert!(result.expense.categories.iter().all(|c| c.percentage == 0.0));
    }

    #[test]
    fn empty_history_produces_empty_report() {
        let now = datetime!(2025-06-15 10:00 UTC);

        let result = report(&[], Period::Year, now);

        assert_eq!(result, super::Report::default());
        assert_eq!(result.net(), 0.0);
    }
}
