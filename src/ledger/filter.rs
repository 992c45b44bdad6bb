//! Search, date and payment filters for the ledger.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use time::{Date, Duration, Month};

use crate::record::{DairyRecord, PaymentStatus};

/// A preset range of dates relative to today.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateRange {
    #[default]
    Today,
    Yesterday,
    #[serde(rename = "last3days")]
    LastThreeDays,
    ThisWeek,
    ThisMonth,
    LastMonth,
    All,
}

impl DateRange {
    pub const ALL: [DateRange; 7] = [
        DateRange::Today,
        DateRange::Yesterday,
        DateRange::LastThreeDays,
        DateRange::ThisWeek,
        DateRange::ThisMonth,
        DateRange::LastMonth,
        DateRange::All,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DateRange::Today => "today",
            DateRange::Yesterday => "yesterday",
            DateRange::LastThreeDays => "last3days",
            DateRange::ThisWeek => "thisweek",
            DateRange::ThisMonth => "thismonth",
            DateRange::LastMonth => "lastmonth",
            DateRange::All => "all",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DateRange::Today => "आज / Today",
            DateRange::Yesterday => "कल / Yesterday",
            DateRange::LastThreeDays => "पिछले 3 दिन / Last 3 Days",
            DateRange::ThisWeek => "इस सप्ताह / This Week",
            DateRange::ThisMonth => "इस महीने / This Month",
            DateRange::LastMonth => "पिछले महीने / Last Month",
            DateRange::All => "सभी / All",
        }
    }

    /// Whether `date` falls in this range when today is `today`.
    ///
    /// "Last 3 days" and "this week" look back 3 and 7 days from today and
    /// include today.
    pub fn contains(&self, date: Date, today: Date) -> bool {
        match self {
            DateRange::Today => date == today,
            DateRange::Yesterday => Some(date) == today.previous_day(),
            DateRange::LastThreeDays => date >= today - Duration::days(3) && date <= today,
            DateRange::ThisWeek => date >= today - Duration::days(7) && date <= today,
            DateRange::ThisMonth => date.year() == today.year() && date.month() == today.month(),
            DateRange::LastMonth => {
                let (year, month) = previous_month(today);
                date.year() == year && date.month() == month
            }
            DateRange::All => true,
        }
    }
}

impl Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn previous_month(today: Date) -> (i32, Month) {
    match today.month() {
        Month::January => (today.year() - 1, Month::December),
        month => (today.year(), month.previous()),
    }
}

/// Which payment statuses to keep.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentFilter {
    #[default]
    All,
    Paid,
    Due,
}

impl PaymentFilter {
    pub const ALL: [PaymentFilter; 3] = [PaymentFilter::All, PaymentFilter::Paid, PaymentFilter::Due];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentFilter::All => "all",
            PaymentFilter::Paid => "paid",
            PaymentFilter::Due => "due",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentFilter::All => "सभी / All",
            PaymentFilter::Paid => PaymentStatus::Paid.label(),
            PaymentFilter::Due => PaymentStatus::Due.label(),
        }
    }

    fn matches(&self, payment_status: PaymentStatus) -> bool {
        match self {
            PaymentFilter::All => true,
            PaymentFilter::Paid => payment_status == PaymentStatus::Paid,
            PaymentFilter::Due => payment_status == PaymentStatus::Due,
        }
    }
}

impl Display for PaymentFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The filters from the ledger page's query string.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerFilter {
    /// Part of a customer name, matched ignoring case.
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub date_range: DateRange,
    #[serde(default)]
    pub payment: PaymentFilter,
}

impl LedgerFilter {
    /// The search term with surrounding whitespace removed, or `None` if it
    /// is blank.
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }

    /// Keep the records that pass every filter, in their original order.
    pub fn apply(&self, records: Vec<DairyRecord>, today: Date) -> Vec<DairyRecord> {
        let search = self.search_term().map(str::to_lowercase);

        records
            .into_iter()
            .filter(|record| self.date_range.contains(record.date, today))
            .filter(|record| self.payment.matches(record.payment_status))
            .filter(|record| match &search {
                Some(term) => record
                    .customer_name
                    .as_ref()
                    .to_lowercase()
                    .contains(term.as_str()),
                None => true,
            })
            .collect()
    }

    /// The filter as a query string, e.g. for the export link.
    pub fn to_query(&self) -> String {
        let mut query = format!("date_range={}&payment={}", self.date_range, self.payment);

        if let Some(term) = self.search_term() {
            let encoded = serde_urlencoded::to_string([("search", term)]).unwrap_or_default();
            query.push('&');
            query.push_str(&encoded);
        }

        query
    }
}
