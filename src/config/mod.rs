//! Configuration management for gbtree-rust.
//!
//! Hyperparameters are validated when a model is constructed, can be loaded
//! from and saved to JSON or TOML files, and can be overridden through
//! `GBTREE_*` environment variables.

pub mod core;

pub use self::core::{Config, ConfigBuilder};
