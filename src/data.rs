// src/data.rs
//
// Records extracted from one account page. Built fresh per fetch and owned by
// the caller; nothing here is cached between fetches.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::Error;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    pub email: String,
    /// Address sub-fields joined with single spaces, in page order.
    pub address: String,
    pub phone: String,
    pub alt_phone: Option<String>,
    pub primary_payment: Option<String>,
    pub backup_payment: Option<String>,
}

impl Profile {
    /// (label, value) pairs in display order. Absent optional fields are skipped.
    pub fn fields(&self) -> Vec<(&'static str, &str)> {
        let mut out = vec![
            ("name", self.name.as_str()),
            ("email", self.email.as_str()),
            ("address", self.address.as_str()),
            ("phone", self.phone.as_str()),
        ];
        let optional = [
            ("alt phone", &self.alt_phone),
            ("primary payment", &self.primary_payment),
            ("backup payment", &self.backup_payment),
        ];
        for (label, value) in optional {
            if let Some(v) = value { out.push((label, v.as_str())); }
        }
        out
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name: {}\nEmail: {}\nPhone: {}\nAddress: {}", self.name, self.email, self.phone, self.address)
    }
}

/// A balance or pass on a card. `value` stays as the site printed it
/// ("$51.40", "Valid till 05/31/2017").
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardProduct {
    pub name: String,
    pub value: String,
}

impl CardProduct {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { name: name.into(), value: value.into() }
    }
}

impl fmt::Display for CardProduct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.value)
    }
}

/// A non-balance annotation on a card, e.g. an auto-reload rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardFeature {
    pub name: String,
    pub value: String,
}

impl CardFeature {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { name: name.into(), value: value.into() }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Card {
    /// Digits only. Unique within one page.
    pub serial_number: String,
    pub nickname: String,
    /// Adult, Senior, Youth, Disabled Discount
    pub kind: String,
    /// Active, Inactive
    pub status: String,
    pub products: Vec<CardProduct>,
    pub features: Vec<CardFeature>,
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} \"{}\" ({} - {})", self.serial_number, self.nickname, self.kind, self.status)?;
        for p in &self.products {
            write!(f, "\n  - {p}")?;
        }
        Ok(())
    }
}

/// Earliest page layout: personal details as a label map plus the cards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Account {
    pub personal_details: BTreeMap<String, String>,
    pub cards: Vec<Card>,
}

/// A card block that could not be turned into a `Card`.
#[derive(Debug)]
pub struct CardFailure {
    /// Position of the block on the page, from 0.
    pub index: usize,
    pub error: Error,
}

/// Cards in page order plus the blocks that failed. Callers pick strictness.
#[derive(Debug, Default)]
pub struct CardsReport {
    pub cards: Vec<Card>,
    pub failures: Vec<CardFailure>,
}

impl CardsReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Fail on the first bad block instead of skipping it.
    pub fn into_strict(self) -> Result<Vec<Card>, Error> {
        match self.failures.into_iter().next() {
            Some(f) => Err(f.error),
            None => Ok(self.cards),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card() -> Card {
        Card {
            serial_number: s!("111"),
            nickname: s!("Golden Gate Bridge Limited Edition"),
            kind: s!("ADULT"),
            status: s!("Active"),
            products: vec![CardProduct::new("Cash value", "$51.40")],
            features: vec![],
        }
    }

    #[test]
    fn card_display_lists_products() {
        assert_eq!(
            card().to_string(),
            "111 \"Golden Gate Bridge Limited Edition\" (ADULT - Active)\n  - Cash value: $51.40"
        );
    }

    #[test]
    fn profile_fields_skip_absent_optionals() {
        let p = Profile {
            name: s!("John Smith"),
            email: s!("jsmith@example.org"),
            address: s!("1 Main St SAN FRANCISCO, CA 94103"),
            phone: s!("415-555-5555"),
            alt_phone: None,
            primary_payment: Some(s!("Visa ending 1234")),
            backup_payment: None,
        };
        let labels: Vec<_> = p.fields().into_iter().map(|(l, _)| l).collect();
        assert_eq!(labels, ["name", "email", "address", "phone", "primary payment"]);
    }

    #[test]
    fn strict_report_surfaces_first_failure() {
        let report = CardsReport {
            cards: vec![card()],
            failures: vec![CardFailure { index: 1, error: content_err!("label \"Status:\"") }],
        };
        assert!(!report.is_complete());
        assert!(report.into_strict().is_err());
    }
}
