//! Core record domain types.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::customer::CustomerName;

/// Database identifier for a record.
pub type RecordId = i64;

/// Whether the amount on a record has been paid.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// The customer has paid the amount.
    Paid,
    /// The amount is still owed.
    #[default]
    Due,
}

impl PaymentStatus {
    /// The value stored in the database and sent in forms.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "paid",
            PaymentStatus::Due => "due",
        }
    }

    /// The bilingual label shown to users.
    pub fn label(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "दिया / Paid",
            PaymentStatus::Due => "बाकी / Due",
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "paid" => Ok(PaymentStatus::Paid),
            "due" => Ok(PaymentStatus::Due),
            other => Err(format!("\"{other}\" is not a payment status")),
        }
    }
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a record reads once saved, derived from its quantity, amount and
/// payment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// No milk was delivered and nothing was paid.
    Absent,
    /// The customer paid money without a delivery.
    Payment,
    /// Milk was delivered.
    MilkSale,
    /// An outstanding balance without a delivery.
    Due,
}

impl EntryKind {
    /// Classify a record from its values.
    pub fn classify(quantity: f64, amount: f64, payment_status: PaymentStatus) -> Self {
        if quantity > 0.0 {
            EntryKind::MilkSale
        } else if amount == 0.0 {
            EntryKind::Absent
        } else if payment_status == PaymentStatus::Paid {
            EntryKind::Payment
        } else {
            EntryKind::Due
        }
    }

    /// The bilingual label shown to users.
    pub fn label(&self) -> &'static str {
        match self {
            EntryKind::Absent => "गैरहाजिर / Absent",
            EntryKind::Payment => "भुगतान / Payment",
            EntryKind::MilkSale => "दूध / Milk",
            EntryKind::Due => "बाकी / Due",
        }
    }
}

/// A milk delivery, payment or absence for one customer on one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DairyRecord {
    /// The ID of the record.
    pub id: RecordId,
    /// The day the record applies to.
    pub date: Date,
    /// The name of the customer the record belongs to.
    pub customer_name: CustomerName,
    /// Litres of milk delivered, zero for payments and absences.
    pub quantity: f64,
    /// Rupees owed or paid.
    pub amount: f64,
    /// Whether `amount` has been paid.
    pub payment_status: PaymentStatus,
    /// When the record was saved, in UTC.
    pub created_at: OffsetDateTime,
}

impl DairyRecord {
    /// Whether this record is a delivery, payment, absence or due balance.
    pub fn kind(&self) -> EntryKind {
        EntryKind::classify(self.quantity, self.amount, self.payment_status)
    }
}

/// The values needed to create a [DairyRecord].
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecord {
    /// The day the record applies to.
    pub date: Date,
    /// The customer, created alongside the record if they do not exist yet.
    pub customer_name: CustomerName,
    /// Litres of milk delivered.
    pub quantity: f64,
    /// Rupees owed or paid.
    pub amount: f64,
    /// Whether `amount` has been paid.
    pub payment_status: PaymentStatus,
}

#[cfg(test)]
mod tests {
    use super::{EntryKind, PaymentStatus};

    #[test]
    fn classifies_absence() {
        assert_eq!(
            EntryKind::classify(0.0, 0.0, PaymentStatus::Due),
            EntryKind::Absent
        );
        assert_eq!(
            EntryKind::classify(0.0, 0.0, PaymentStatus::Paid),
            EntryKind::Absent
        );
    }

    #[test]
    fn classifies_payment_and_due_balance() {
        assert_eq!(
            EntryKind::classify(0.0, 500.0, PaymentStatus::Paid),
            EntryKind::Payment
        );
        assert_eq!(
            EntryKind::classify(0.0, 200.0, PaymentStatus::Due),
            EntryKind::Due
        );
    }

    #[test]
    fn any_quantity_is_a_milk_sale() {
        assert_eq!(
            EntryKind::classify(2.5, 100.0, PaymentStatus::Paid),
            EntryKind::MilkSale
        );
        assert_eq!(
            EntryKind::classify(1.0, 0.0, PaymentStatus::Due),
            EntryKind::MilkSale
        );
    }

    #[test]
    fn payment_status_round_trips_through_str() {
        for status in [PaymentStatus::Paid, PaymentStatus::Due] {
            assert_eq!(status.as_str().parse::<PaymentStatus>(), Ok(status));
        }

        assert!("maybe".parse::<PaymentStatus>().is_err());
    }
}
