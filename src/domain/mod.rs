mod geo_point;
mod mosque;
mod user;

pub use geo_point::{GeoError, GeoPoint};
pub use mosque::Mosque;
pub use user::{ProfileUpdate, ProfileUpdateError, User};
