//! Client and record mapping for the `OpenChargeMap` POI API.

pub mod client;
pub mod error;
pub mod normalize;
pub mod types;

pub use client::{OcmClient, OcmClientConfig};
pub use error::OcmError;
pub use normalize::{map_charger, parse_charger};
pub use types::{OcmAddressInfo, OcmCharger, OcmLookup};
