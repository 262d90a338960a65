//! Domain models, independent of transport

pub mod clarity;
