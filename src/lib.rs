//! Freight load posting analytics: table building, filtering and
//! aggregation, independent of any rendering layer.

pub mod config;
pub mod data;
