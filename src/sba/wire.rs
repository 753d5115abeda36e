use serde::Deserialize;

/* ---------------- Serde mapping (only what we need) ---------------- */

// Every field is read as text: the FOIA extracts mix "1234", "1234.0", "$1,234.00" and blanks.
#[derive(Deserialize)]
pub(crate) struct LoanRow {
    #[serde(rename = "BorrName", default)]
    pub(crate) borrower_name: Option<String>,
    #[serde(rename = "BorrState", default)]
    pub(crate) borrower_state: Option<String>,
    #[serde(rename = "BankName", default)]
    pub(crate) bank_name: Option<String>,
    #[serde(rename = "BankFDICNumber", default)]
    pub(crate) bank_fdic_number: Option<String>,
    #[serde(rename = "ApprovalFiscalYear", default)]
    pub(crate) approval_fiscal_year: Option<String>,
    #[serde(rename = "GrossApproval", default)]
    pub(crate) gross_approval: Option<String>,
    #[serde(rename = "SBAGuaranteedApproval", default)]
    pub(crate) sba_guaranteed_approval: Option<String>,
}
