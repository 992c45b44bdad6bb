//! Per-customer totals for the customers page.

use std::collections::HashMap;

use time::Date;

use crate::{
    customer::{Customer, CustomerName},
    record::{DairyRecord, EntryKind, PaymentStatus},
};

/// What a customer has bought and paid across all of their records.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerSummary {
    pub name: CustomerName,
    /// Litres across milk sales.
    pub total_milk: f64,
    pub total_amount: f64,
    pub paid_amount: f64,
    /// `total_amount - paid_amount`.
    pub due_amount: f64,
    pub absent_days: usize,
    pub record_count: usize,
    /// The most recent record date, if the customer has any records.
    pub last_date: Option<Date>,
}

impl CustomerSummary {
    fn empty(name: CustomerName) -> Self {
        Self {
            name,
            total_milk: 0.0,
            total_amount: 0.0,
            paid_amount: 0.0,
            due_amount: 0.0,
            absent_days: 0,
            record_count: 0,
            last_date: None,
        }
    }

    fn add(&mut self, record: &DairyRecord) {
        if record.quantity > 0.0 {
            self.total_milk += record.quantity;
        }

        self.total_amount += record.amount;

        if record.payment_status == PaymentStatus::Paid {
            self.paid_amount += record.amount;
        }

        if record.kind() == EntryKind::Absent {
            self.absent_days += 1;
        }

        self.record_count += 1;
        self.last_date = self.last_date.max(Some(record.date));
        self.due_amount = self.total_amount - self.paid_amount;
    }

    /// Whether the customer owes anything.
    pub fn has_due(&self) -> bool {
        self.due_amount > 0.0
    }
}

/// Build a summary for every customer, plus any name that only appears in
/// `records`, ordered by total amount with the largest first.
///
/// Ties are broken by name so the order is stable.
pub fn summarize_customers(customers: &[Customer], records: &[DairyRecord]) -> Vec<CustomerSummary> {
    let mut summaries: HashMap<CustomerName, CustomerSummary> = customers
        .iter()
        .map(|customer| {
            (
                customer.name.clone(),
                CustomerSummary::empty(customer.name.clone()),
            )
        })
        .collect();

    for record in records {
        summaries
            .entry(record.customer_name.clone())
            .or_insert_with(|| CustomerSummary::empty(record.customer_name.clone()))
            .add(record);
    }

    let mut summaries: Vec<CustomerSummary> = summaries.into_values().collect();
    summaries.sort_by(|a, b| {
        b.total_amount
            .total_cmp(&a.total_amount)
            .then_with(|| a.name.cmp(&b.name))
    });

    summaries
}

/// Counts for the cards at the top of the customers page.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CustomerOverview {
    /// How many customers there are.
    pub total: usize,
    /// Customers who owe nothing.
    pub clear: usize,
    /// Customers with money due.
    pub with_due: usize,
}

impl CustomerOverview {
    pub fn from_summaries(summaries: &[CustomerSummary]) -> Self {
        let with_due = summaries.iter().filter(|summary| summary.has_due()).count();

        Self {
            total: summaries.len(),
            clear: summaries.len() - with_due,
            with_due,
        }
    }
}
