use serde::Serialize;

/// Extended profile fields from the BankFind history endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstitutionDetail {
    pub certificate_number: u64,
    /// Institution name as recorded on the history event (`INSTNAME`).
    pub bank_name: String,
    /// FDIC unique number (`FI_UNINUM`).
    pub unique_fdic_number: Option<u64>,
    /// Raw insured flag (`BANK_INSURED`), usually `Y` or `N`.
    pub insured_flag: String,
    /// Mailing address (`MADDR`).
    pub address: String,
    pub city: String,
    /// Five-digit mailing zip code (`MZIP5`), zero-padded.
    pub zip_code: String,
    /// Charter class at the time of the event (`FRM_CLASS`).
    pub class_code: String,
}

impl InstitutionDetail {
    #[must_use]
    pub fn is_insured(&self) -> bool {
        self.insured_flag.trim().eq_ignore_ascii_case("Y")
    }
}
