//! Google Compute Engine API client

pub mod client;
pub mod common;
pub mod error;
pub mod self_link;
pub mod subnetworks;

mod test_helpers;

pub use client::{Client, DEFAULT_ENDPOINT};
pub use error::ApiError;
pub use self_link::{SelfLinkError, SubnetworkSelfLink};
