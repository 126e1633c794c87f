//! Synthetic load-series generation for plant departments.

/// Department catalogue and equipment drill-down lists.
pub mod department;
/// Seeded normal-distribution series generator.
pub mod generator;

pub use department::{Department, EquipmentUnit, LoadParams};
pub use generator::{NormalSeries, gaussian_noise};
