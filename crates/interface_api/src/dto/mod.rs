//! Data transfer objects

pub mod wizard;

pub use wizard::*;
