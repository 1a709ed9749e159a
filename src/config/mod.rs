//! Configuration loading and management for the Policy Impact Engine.
//!
//! This module provides functionality to load policy regimes from YAML files,
//! including bracket tables, high-income surtax rules and child credit
//! parameters. Regimes are immutable once loaded.
//!
//! # Example
//!
//! ```no_run
//! use policy_impact_engine::config::RegimeRegistry;
//!
//! let registry = RegimeRegistry::load("./config/policy").unwrap();
//! println!("Loaded {} regimes", registry.regimes().len());
//! ```

mod loader;
mod types;

pub use loader::RegimeRegistry;
pub use types::{
    BracketTable, ChildCreditParameters, HighIncomeSurtax, PolicyRegime, RegistryMetadata,
    TaxBracket,
};
