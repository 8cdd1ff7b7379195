pub mod usable_subnetworks;

pub use usable_subnetworks::UsableSubnetworksDataSource;
