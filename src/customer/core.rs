//! Core customer domain types.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::Error;

/// A validated, non-empty customer name.
///
/// Names are compared exactly, so "Ram" and "ram" are different customers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash, PartialOrd, Ord)]
pub struct CustomerName(String);

impl CustomerName {
    /// Create a customer name from `name` with surrounding whitespace removed.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyCustomerName] if `name` is
    /// empty or only whitespace.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::EmptyCustomerName)
        } else {
            Ok(Self(name.to_owned()))
        }
    }

    /// Create a customer name without validation.
    ///
    /// The caller should ensure that the string is not empty.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl AsRef<str> for CustomerName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for CustomerName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CustomerName::new(s)
    }
}

impl Display for CustomerName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Database identifier for a customer.
pub type CustomerId = i64;

/// Someone the dairy delivers milk to.
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    /// The ID of the customer.
    pub id: CustomerId,
    /// The unique name of the customer.
    pub name: CustomerName,
    /// When the customer was added, in UTC.
    pub created_at: OffsetDateTime,
}

/// The result of adding a customer to the directory.
#[derive(Debug, Clone, PartialEq)]
pub enum CreateOutcome {
    /// The customer was added.
    Created(Customer),
    /// A customer with this exact name already existed, nothing was changed.
    AlreadyExists(CustomerName),
}

/// Form data for adding a customer.
#[derive(Debug, Serialize, Deserialize)]
pub struct CustomerFormData {
    pub name: String,
}
