//! File output for built profiles.

pub mod export;
