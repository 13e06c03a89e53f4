use crate::domain::{GeoError, GeoPoint, Mosque};
use crate::mosque_loader::serialized_mosque::SerializedMosque;
use thiserror::Error;

pub fn from_json(json: &str) -> Result<Mosque, MosqueFactoryError> {
    let mosque = serde_json::from_str::<SerializedMosque>(json)?;

    if mosque.id.trim().is_empty() {
        return Err(MosqueFactoryError::BlankField("id"));
    }
    if mosque.name.trim().is_empty() {
        return Err(MosqueFactoryError::BlankField("name"));
    }

    let location = GeoPoint::new(mosque.latitude, mosque.longitude).map_err(|source| MosqueFactoryError::InvalidLocation {
        mosque: mosque.name.clone(),
        source,
    })?;

    Ok(Mosque {
        id: mosque.id,
        name: mosque.name,
        address: mosque.address,
        location,
        phone: mosque.phone,
        website: mosque.website,
        prayer_times: mosque.prayer_times,
    })
}

#[derive(Error, Debug)]
pub enum MosqueFactoryError {
    #[error("invalid mosque json: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("field '{0}' must not be blank")]
    BlankField(&'static str),
    #[error("invalid location for mosque '{mosque}': {source}")]
    InvalidLocation { mosque: String, source: GeoError },
}
