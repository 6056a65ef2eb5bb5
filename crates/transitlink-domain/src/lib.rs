//! Domain layer: derived model, repository traits, services

pub mod model;
pub mod repository;
pub mod service;
