//! Infrastructure implementations of the domain repository traits

pub mod remote;

pub use remote::HttpVehicleRegistry;
