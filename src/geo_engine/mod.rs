//! Pure great-circle computations over validated [`GeoPoint`](crate::domain::GeoPoint)s.
//!
//! Nothing in here performs I/O or holds state, so every function is safe to call from any number
//! of request handlers at once.

mod bearing;
mod distance;
mod nearby;
mod qibla;

pub use bearing::bearing_degrees;
pub use distance::distance_km;
pub use nearby::{Locatable, Nearby, find_nearby};
pub use qibla::qibla;
