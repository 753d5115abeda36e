use serde::Deserialize;

use crate::core::wire::{de_opt_string_lenient, de_opt_u64_lenient};

#[derive(Deserialize)]
pub(crate) struct InstitutionNode {
    #[serde(rename = "CERT", default, deserialize_with = "de_opt_u64_lenient")]
    pub(crate) cert: Option<u64>,
    #[serde(rename = "NAME")]
    pub(crate) name: Option<String>,
    #[serde(rename = "BKCLASS")]
    pub(crate) bank_class: Option<String>,
    #[serde(rename = "FED_RSSD", default, deserialize_with = "de_opt_u64_lenient")]
    pub(crate) fed_rssd: Option<u64>,
    #[serde(rename = "ESTYMD", default, deserialize_with = "de_opt_string_lenient")]
    pub(crate) established: Option<String>,
}
