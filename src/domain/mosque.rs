use crate::domain::GeoPoint;
use crate::geo_engine::Locatable;
use crate::repository::Entity;
use std::collections::BTreeMap;

#[derive(Clone, PartialEq, Debug)]
pub struct Mosque {
    pub id: String,
    pub name: String,
    pub address: String,
    pub location: GeoPoint,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub prayer_times: BTreeMap<String, String>, // Prayer name to display time, e.g. "fajr" => "5:30 AM"
}

impl Entity for Mosque {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Locatable for Mosque {
    fn location(&self) -> &GeoPoint {
        &self.location
    }
}
