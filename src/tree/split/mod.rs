//! Split finding for decision tree construction.

pub mod finder;

pub use finder::{SplitFinder, SplitFinderConfig, SplitInfo};
