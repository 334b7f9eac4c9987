//! Utility modules.

/// Domain name normalization.
pub mod name;
