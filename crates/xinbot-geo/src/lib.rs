#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

//! Address handling for the nearby-service flow: pulling an address out
//! of conversational text, geocoding it with fallback variants, and
//! ranking service locations by haversine distance.

pub mod address;
pub mod geocode;
pub mod points;

pub use address::{extract_address, is_direct_address, mentions_nearby_clinic};
pub use geocode::{geocode_with_fallbacks, NominatimClient};
pub use points::{haversine_km, PointStore, ServicePoint};
