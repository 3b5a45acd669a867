//! Core infrastructure module for gbtree-rust.
//!
//! This module provides the foundational components shared by the rest of
//! the crate:
//!
//! - [`types`]: Fundamental data types and enumerations
//! - [`constants`]: Default hyperparameters and numeric constants
//! - [`error`]: Error handling and error types
//! - [`traits`]: The loss-policy and weak-learner abstractions
//!
//! ```rust
//! use gbtree_rust::core::{
//!     constants::DEFAULT_LEARNING_RATE,
//!     error::{GbtError, Result},
//!     types::{ObjectiveType, Score},
//! };
//!
//! let learning_rate = DEFAULT_LEARNING_RATE;
//! let objective = ObjectiveType::Regression;
//! let _score: Score = learning_rate;
//! # let _ = objective;
//! ```

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

pub use constants::*;
pub use error::{GbtError, Result};
pub use traits::*;
pub use types::*;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Once;

static LOGGER_INIT: Once = Once::new();
static CORE_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Initialize logging for the library.
///
/// `RUST_LOG` takes precedence when set; otherwise `verbosity` selects the
/// filter. Safe to call more than once, and harmless if the host application
/// already installed its own logger.
pub fn initialize_core(verbosity: VerbosityLevel) -> Result<()> {
    LOGGER_INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();
        builder.filter_level(verbosity.level_filter());
        if let Ok(filters) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filters);
        }
        if builder.try_init().is_err() {
            log::debug!("a global logger is already installed; keeping it");
        }
        CORE_INITIALIZED.store(true, Ordering::SeqCst);
        log::debug!("gbtree-rust {} initialized", GBTREE_RUST_VERSION);
    });
    Ok(())
}

/// Check if the core module is initialized
pub fn is_core_initialized() -> bool {
    CORE_INITIALIZED.load(Ordering::SeqCst)
}
