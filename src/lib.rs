//! Policy Impact Engine
//!
//! This crate estimates how alternative federal tax-policy regimes affect a
//! household's tax liability and child tax credit. Regimes are static
//! configuration (bracket tables, an optional high-income surtax and child
//! credit parameters) loaded once and evaluated by a single parameterized
//! calculation engine.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
