use std::collections::BTreeSet;

use serde::Serialize;

/// A single branch or office of an institution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationRecord {
    pub certificate_number: u64,
    /// Branch unique number (`UNINUM`).
    pub unique_number: Option<u64>,
    pub office_name: String,
    pub address: String,
    pub city: String,
    /// Full state name (`STNAME`); the field distinct-state counting keys on.
    pub state_name: String,
    /// Two-letter postal code (`STALP`).
    pub state_code: String,
    pub zip: String,
    /// True for the headquarters office.
    pub main_office: bool,
}

/// Every location listed for one certificate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Locations {
    pub certificate_number: u64,
    pub records: Vec<LocationRecord>,
}

impl Locations {
    /// Number of listed locations. Zero for a certificate with no rows.
    #[must_use]
    pub fn location_count(&self) -> usize {
        self.records.len()
    }

    /// Number of distinct state names across the locations.
    ///
    /// Rows without `STNAME` share the empty name and together count as one state.
    #[must_use]
    pub fn state_count(&self) -> usize {
        self.states().len()
    }

    /// Distinct state names, sorted.
    #[must_use]
    pub fn states(&self) -> BTreeSet<&str> {
        self.records.iter().map(|r| r.state_name.as_str()).collect()
    }

    /// The headquarters office, if the listing marks one.
    #[must_use]
    pub fn main_office(&self) -> Option<&LocationRecord> {
        self.records.iter().find(|r| r.main_office)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
