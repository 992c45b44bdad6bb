//! Turns a draft from the entry form into a record that can be saved.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    customer::CustomerName,
    record::{NewRecord, PaymentStatus},
};

/// Amounts above this many rupees must be confirmed before they are saved,
/// unless the entry is a payment.
pub const LARGE_AMOUNT_THRESHOLD: f64 = 1000.0;

/// What the user is recording.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// Milk was delivered.
    #[default]
    Milk,
    /// The customer paid money.
    Payment,
    /// The customer did not take milk today.
    Absent,
}

impl EntryType {
    /// All entry types in the order they are shown.
    pub const ALL: [EntryType; 3] = [EntryType::Milk, EntryType::Payment, EntryType::Absent];

    /// The value sent in forms.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Milk => "milk",
            EntryType::Payment => "payment",
            EntryType::Absent => "absent",
        }
    }

    /// The bilingual label shown to users.
    pub fn label(&self) -> &'static str {
        match self {
            EntryType::Milk => "दूध / Milk",
            EntryType::Payment => "भुगतान / Payment",
            EntryType::Absent => "गैरहाजिर / Absent",
        }
    }
}

impl FromStr for EntryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "milk" => Ok(EntryType::Milk),
            "payment" => Ok(EntryType::Payment),
            "absent" => Ok(EntryType::Absent),
            other => Err(format!("\"{other}\" is not an entry type")),
        }
    }
}

impl Display for EntryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The values in the entry form before they are checked.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct EntryDraft {
    /// The customer's name as typed or heard.
    pub customer_name: String,
    /// Litres of milk, if given.
    pub quantity: Option<f64>,
    /// Rupees, if given.
    pub amount: Option<f64>,
    /// The paid/due toggle, only used for milk entries.
    pub payment_status: PaymentStatus,
}

/// Why a draft could not be turned into a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationFailure {
    /// The customer's name was empty.
    #[error("कृपया नाम भरें / Please fill customer name")]
    MissingCustomer,

    /// A milk entry needs a quantity and an amount above zero.
    #[error("कृपया दूध की मात्रा और रकम भरें / Please fill milk quantity and amount")]
    MissingMilkFields,

    /// A payment needs an amount above zero.
    #[error("कृपया रकम भरें / Please fill payment amount")]
    MissingPaymentAmount,

    /// A quantity or amount was negative or not a number.
    #[error("मात्रा और रकम सही होनी चाहिए / Quantity and amount must be positive numbers")]
    InvalidNumber,
}

/// A record that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledEntry {
    /// The record to save.
    pub record: NewRecord,
    /// Whether the user must confirm the amount before the record is saved.
    pub needs_confirmation: bool,
}

/// Check `draft` against the rules for `entry_type` and build the record for
/// `date`.
///
/// Absences always become zero litres, zero rupees and due, whatever else is
/// in the draft. Payments are always paid with zero litres. A milk entry may
/// have zero litres, which is how a spoken due balance is recorded.
pub fn assemble(
    draft: &EntryDraft,
    entry_type: EntryType,
    date: Date,
) -> Result<AssembledEntry, ValidationFailure> {
    let customer_name =
        CustomerName::new(&draft.customer_name).map_err(|_| ValidationFailure::MissingCustomer)?;

    let (quantity, amount, payment_status) = match entry_type {
        EntryType::Milk => {
            let quantity = checked_number(draft.quantity)?;
            let amount = checked_number(draft.amount)?;

            match (quantity, amount) {
                (Some(quantity), Some(amount)) if amount > 0.0 => {
                    (quantity, amount, draft.payment_status)
                }
                _ => return Err(ValidationFailure::MissingMilkFields),
            }
        }
        EntryType::Payment => match checked_number(draft.amount)? {
            Some(amount) if amount > 0.0 => (0.0, amount, PaymentStatus::Paid),
            _ => return Err(ValidationFailure::MissingPaymentAmount),
        },
        EntryType::Absent => (0.0, 0.0, PaymentStatus::Due),
    };

    let needs_confirmation = amount > LARGE_AMOUNT_THRESHOLD && entry_type != EntryType::Payment;

    Ok(AssembledEntry {
        record: NewRecord {
            date,
            customer_name,
            quantity,
            amount,
            payment_status,
        },
        needs_confirmation,
    })
}

fn checked_number(value: Option<f64>) -> Result<Option<f64>, ValidationFailure> {
    match value {
        Some(number) if !number.is_finite() || number < 0.0 => Err(ValidationFailure::InvalidNumber),
        other => Ok(other),
    }
}
