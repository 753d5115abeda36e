use serde::Deserialize;

use crate::core::wire::{de_opt_string_lenient, de_opt_u64_lenient};

#[derive(Deserialize)]
pub(crate) struct HistoryNode {
    #[serde(rename = "INSTNAME")]
    pub(crate) institution_name: Option<String>,
    #[serde(rename = "FI_UNINUM", default, deserialize_with = "de_opt_u64_lenient")]
    pub(crate) unique_number: Option<u64>,
    #[serde(rename = "BANK_INSURED", default, deserialize_with = "de_opt_string_lenient")]
    pub(crate) insured: Option<String>,
    #[serde(rename = "MADDR")]
    pub(crate) address: Option<String>,
    #[serde(rename = "MCITY")]
    pub(crate) city: Option<String>,
    #[serde(rename = "MZIP5", default, deserialize_with = "de_opt_string_lenient")]
    pub(crate) zip: Option<String>,
    #[serde(rename = "FRM_CLASS")]
    pub(crate) class_code: Option<String>,
}
