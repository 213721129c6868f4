//! This module is responsible for loading static building metadata
//! and validating it before the estimator sees it.

mod catalog;

pub use catalog::BuildingCatalog;
