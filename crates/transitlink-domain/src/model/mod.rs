//! Domain model types

pub mod alert;

pub use alert::{Alert, AlertKind};
