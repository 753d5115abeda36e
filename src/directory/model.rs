use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::core::BankError;

/// One institution as listed in the BankFind directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstitutionRecord {
    /// FDIC certificate number (`CERT`), the join key across every lookup.
    pub certificate_number: u64,
    /// Legal name (`NAME`).
    pub name: String,
    /// Charter class code (`BKCLASS`), e.g. `N`, `SM`, `NM`, `SB`.
    pub bank_class: String,
    /// Federal Reserve RSSD identifier (`FED_RSSD`); `0` when the directory has none.
    pub federal_reserve_id: u64,
    /// Establishment date (`ESTYMD`), when present and parseable.
    pub established: Option<NaiveDate>,
}

/// A loaded directory snapshot, indexed by certificate number.
///
/// Load it once and query it as often as needed; it is never refreshed in place.
#[derive(Debug, Clone, Default)]
pub struct InstitutionDirectory {
    records: Vec<InstitutionRecord>,
    by_cert: HashMap<u64, usize>,
}

impl InstitutionDirectory {
    /// Builds a directory from records in source order.
    ///
    /// When a certificate appears more than once the first row wins.
    #[must_use]
    pub fn from_records(records: Vec<InstitutionRecord>) -> Self {
        let mut by_cert = HashMap::with_capacity(records.len());
        for (idx, rec) in records.iter().enumerate() {
            by_cert.entry(rec.certificate_number).or_insert(idx);
        }
        Self { records, by_cert }
    }

    /// Returns the record for `cert`, if listed.
    #[must_use]
    pub fn get(&self, cert: u64) -> Option<&InstitutionRecord> {
        self.by_cert.get(&cert).map(|&i| &self.records[i])
    }

    /// Resolves `cert` to its institution record.
    ///
    /// # Errors
    ///
    /// Returns [`BankError::NotFound`] when no row carries this certificate number.
    pub fn resolve(&self, cert: u64) -> Result<&InstitutionRecord, BankError> {
        self.get(cert)
            .ok_or_else(|| BankError::NotFound(format!("no institution with certificate {cert}")))
    }

    /// # Errors
    ///
    /// Returns [`BankError::NotFound`] for an unknown certificate.
    pub fn name(&self, cert: u64) -> Result<&str, BankError> {
        self.resolve(cert).map(|r| r.name.as_str())
    }

    /// # Errors
    ///
    /// Returns [`BankError::NotFound`] for an unknown certificate.
    pub fn bank_class(&self, cert: u64) -> Result<&str, BankError> {
        self.resolve(cert).map(|r| r.bank_class.as_str())
    }

    /// # Errors
    ///
    /// Returns [`BankError::NotFound`] for an unknown certificate.
    pub fn federal_reserve_id(&self, cert: u64) -> Result<u64, BankError> {
        self.resolve(cert).map(|r| r.federal_reserve_id)
    }

    /// # Errors
    ///
    /// Returns [`BankError::NotFound`] for an unknown certificate.
    pub fn established(&self, cert: u64) -> Result<Option<NaiveDate>, BankError> {
        self.resolve(cert).map(|r| r.established)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &InstitutionRecord> {
        self.records.iter()
    }
}
