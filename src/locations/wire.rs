use serde::Deserialize;

use crate::core::wire::{de_opt_string_lenient, de_opt_u64_lenient};

#[derive(Deserialize)]
pub(crate) struct LocationNode {
    #[serde(rename = "CERT", default, deserialize_with = "de_opt_u64_lenient")]
    pub(crate) cert: Option<u64>,
    #[serde(rename = "UNINUM", default, deserialize_with = "de_opt_u64_lenient")]
    pub(crate) unique_number: Option<u64>,
    #[serde(rename = "OFFNAME")]
    pub(crate) office_name: Option<String>,
    #[serde(rename = "ADDRESS")]
    pub(crate) address: Option<String>,
    #[serde(rename = "CITY")]
    pub(crate) city: Option<String>,
    #[serde(rename = "STNAME")]
    pub(crate) state_name: Option<String>,
    #[serde(rename = "STALP")]
    pub(crate) state_code: Option<String>,
    #[serde(rename = "ZIP", default, deserialize_with = "de_opt_string_lenient")]
    pub(crate) zip: Option<String>,
    #[serde(rename = "MAINOFF", default, deserialize_with = "de_opt_u64_lenient")]
    pub(crate) main_office: Option<u64>,
}
