//! Groundwater balance and decision support calculations.
//!
//! Every function here is a pure computation over a well's history and a set
//! of scenario parameters. Nothing is cached or mutated between calls.

pub mod analytics;
pub mod balance;
pub mod classification;
pub mod constants;
pub mod draft;
pub mod error;
pub mod export;
pub mod forecast;
pub mod irrigation;
pub mod preprocessing;
pub mod recharge;
pub mod scenario;
pub mod sustainability;
