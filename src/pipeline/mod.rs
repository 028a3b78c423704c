//! Pipeline module - loading the manifest and the survival/fare aggregations

pub mod analysis;
pub mod columns;
pub mod crosstab;
pub mod estimated;
pub mod fare;
pub mod group;
pub mod histogram;
pub mod loader;
pub mod manifest;
pub mod ordering;
pub mod passenger;
pub mod quantile;
pub mod stats;
pub mod survival;

pub use analysis::*;
pub use columns::ColumnNames;
pub use crosstab::*;
pub use estimated::*;
pub use fare::*;
pub use group::GroupKey;
pub use histogram::*;
pub use loader::*;
pub use manifest::Manifest;
pub use ordering::*;
pub use passenger::*;
pub use quantile::*;
pub use stats::*;
pub use survival::*;
