//! Session domain: the authenticated-actor marker.

pub mod model;

pub use model::Session;
