//! `dhsvm-config` - DHSVM run configuration loader
//!
//! This library reads the sectioned `KEY = VALUE` input files of the
//! Distributed Hydrology Soil Vegetation Model and validates them into a
//! strongly typed run configuration for the simulation engine.

pub mod cli;
pub mod config;
pub mod error;
pub mod observability;
