use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SerializedMosque {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) address: String,
    pub(crate) latitude: f64,
    pub(crate) longitude: f64,
    pub(crate) phone: Option<String>,
    pub(crate) website: Option<String>,
    #[serde(default)]
    pub(crate) prayer_times: BTreeMap<String, String>,
}
