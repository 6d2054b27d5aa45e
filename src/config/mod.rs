//! Configuration module
//!
//! Reads DHSVM model input files and turns them into a validated,
//! read-only [`RunConfig`]: option switches, grid and solar geometry, the
//! simulation time window, and the global physical constants.

pub mod constants;
pub mod geometry;
pub mod input;
pub mod loader;
pub mod options;
pub mod parse;
pub mod resolve;
pub mod rules;
pub mod schema;
pub mod time;
pub mod vocab;

pub use constants::{LapseRate, PhysicalConstants};
pub use geometry::{GridGeometry, SolarGeometry};
pub use input::InputTable;
pub use loader::{ConfigLoader, LoadResult, LoadWarning, LoaderOptions, RunConfig};
pub use options::*;
pub use resolve::{ConfigEntry, ConfigLimits, ResolvedTable};
pub use schema::{Key, SCHEMA, SchemaEntry, Section};
pub use time::TimeWindow;
