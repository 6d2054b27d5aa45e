//! Schema registry
//!
//! The fixed, ordered catalogue of every `(section, key, default)` entry the
//! loader recognises. Order only affects which failure is reported first.

use serde::Serialize;
use std::fmt;

use crate::error::ConfigError;

// ============================================================================
// Sections
// ============================================================================

/// Input file section an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Section {
    /// `[OPTIONS]`: model option switches
    Options,
    /// `[AREA]`: grid and solar geometry
    Area,
    /// `[TIME]`: simulation window
    Time,
    /// `[CONSTANTS]`: global physical constants
    Constants,
}

impl Section {
    /// Section name as written in input files.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Options => "OPTIONS",
            Self::Area => "AREA",
            Self::Time => "TIME",
            Self::Constants => "CONSTANTS",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Keys
// ============================================================================

/// Every configuration parameter known to the loader.
///
/// Discriminants index [`SCHEMA`]; the two must stay in the same order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Format,
    Extent,
    Gradient,
    FlowRouting,
    SensibleHeatFlux,
    Sediment,
    SedimentInputFile,
    OverlandRouting,
    Infiltration,
    Interpolation,
    Mm5,
    Qpf,
    Prism,
    CanopyRadiationAttenuation,
    Shading,
    Snotel,
    Outside,
    RhOverride,
    PrecipitationSource,
    WindSource,
    TemperatureLapseMode,
    PrecipitationLapseMode,
    CressmanRadius,
    CressmanStations,
    PrismDataPath,
    PrismDataExtension,
    ShadingDataPath,
    ShadingDataExtension,
    SkyviewDataPath,
    StreamTemperature,
    CanopyShading,
    CoordinateSystem,
    ExtremeNorth,
    ExtremeWest,
    CenterLatitude,
    CenterLongitude,
    TimeZoneMeridian,
    NumberOfRows,
    NumberOfColumns,
    GridSpacing,
    PointNorth,
    PointEast,
    TimeStep,
    ModelStart,
    ModelEnd,
    GroundRoughness,
    SnowRoughness,
    RainThreshold,
    SnowThreshold,
    SnowWaterCapacity,
    ReferenceHeight,
    RainLaiMultiplier,
    SnowLaiMultiplier,
    MinInterceptedSnow,
    OutsideBasinValue,
    TemperatureLapseRate,
    PrecipitationLapseRate,
    PrecipitationMultiplier,
    TreeHeight,
    BufferWidth,
    OverhangCoefficient,
    MonthlyExtinctionCoefficient,
    CanopyBankDistance,
}

impl Key {
    /// Registry entry for this key.
    #[must_use]
    pub fn entry(self) -> &'static SchemaEntry {
        &SCHEMA[self as usize]
    }

    /// Section this key lives in.
    #[must_use]
    pub fn section(self) -> Section {
        self.entry().section
    }

    /// Key name as written in input files.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.entry().name
    }

    /// Builds the standard invalid-value error for this key.
    #[must_use]
    pub fn invalid(self, value: &str, reason: impl Into<String>) -> ConfigError {
        ConfigError::invalid(self.section(), self.name(), value, reason)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.section(), self.name())
    }
}

// ============================================================================
// Registry
// ============================================================================

/// One declared configuration parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaEntry {
    pub key: Key,
    pub section: Section,
    pub name: &'static str,
    /// Value used when the input does not mention the key.
    pub default: &'static str,
}

const fn entry(key: Key, section: Section, name: &'static str) -> SchemaEntry {
    SchemaEntry {
        key,
        section,
        name,
        default: "",
    }
}

/// Number of registered parameters.
pub const SCHEMA_LEN: usize = 63;

/// The schema registry, in resolution order.
pub static SCHEMA: [SchemaEntry; SCHEMA_LEN] = {
    use Key as K;
    use Section::{Area, Constants, Options, Time};
    [
        entry(K::Format, Options, "FORMAT"),
        entry(K::Extent, Options, "EXTENT"),
        entry(K::Gradient, Options, "GRADIENT"),
        entry(K::FlowRouting, Options, "FLOW ROUTING"),
        entry(K::SensibleHeatFlux, Options, "SENSIBLE HEAT FLUX"),
        entry(K::Sediment, Options, "SEDIMENT"),
        entry(K::SedimentInputFile, Options, "SEDIMENT INPUT FILE"),
        entry(K::OverlandRouting, Options, "OVERLAND ROUTING"),
        entry(K::Infiltration, Options, "INFILTRATION"),
        entry(K::Interpolation, Options, "INTERPOLATION"),
        entry(K::Mm5, Options, "MM5"),
        entry(K::Qpf, Options, "QPF"),
        entry(K::Prism, Options, "PRISM"),
        entry(
            K::CanopyRadiationAttenuation,
            Options,
            "CANOPY RADIATION ATTENUATION MODE",
        ),
        entry(K::Shading, Options, "SHADING"),
        entry(K::Snotel, Options, "SNOTEL"),
        entry(K::Outside, Options, "OUTSIDE"),
        entry(K::RhOverride, Options, "RHOVERRIDE"),
        entry(K::PrecipitationSource, Options, "PRECIPITATION SOURCE"),
        entry(K::WindSource, Options, "WIND SOURCE"),
        entry(K::TemperatureLapseMode, Options, "TEMPERATURE LAPSE RATE"),
        entry(K::PrecipitationLapseMode, Options, "PRECIPITATION LAPSE RATE"),
        entry(K::CressmanRadius, Options, "CRESSMAN RADIUS"),
        entry(K::CressmanStations, Options, "CRESSMAN STATIONS"),
        entry(K::PrismDataPath, Options, "PRISM DATA PATH"),
        entry(K::PrismDataExtension, Options, "PRISM DATA EXTENSION"),
        entry(K::ShadingDataPath, Options, "SHADING DATA PATH"),
        entry(K::ShadingDataExtension, Options, "SHADING DATA EXTENSION"),
        entry(K::SkyviewDataPath, Options, "SKYVIEW DATA PATH"),
        entry(K::StreamTemperature, Options, "STREAM TEMPERATURE"),
        entry(K::CanopyShading, Options, "CANOPY SHADING"),
        entry(K::CoordinateSystem, Area, "COORDINATE SYSTEM"),
        entry(K::ExtremeNorth, Area, "EXTREME NORTH"),
        entry(K::ExtremeWest, Area, "EXTREME WEST"),
        entry(K::CenterLatitude, Area, "CENTER LATITUDE"),
        entry(K::CenterLongitude, Area, "CENTER LONGITUDE"),
        entry(K::TimeZoneMeridian, Area, "TIME ZONE MERIDIAN"),
        entry(K::NumberOfRows, Area, "NUMBER OF ROWS"),
        entry(K::NumberOfColumns, Area, "NUMBER OF COLUMNS"),
        entry(K::GridSpacing, Area, "GRID SPACING"),
        entry(K::PointNorth, Area, "POINT NORTH"),
        entry(K::PointEast, Area, "POINT EAST"),
        entry(K::TimeStep, Time, "TIME STEP"),
        entry(K::ModelStart, Time, "MODEL START"),
        entry(K::ModelEnd, Time, "MODEL END"),
        entry(K::GroundRoughness, Constants, "GROUND ROUGHNESS"),
        entry(K::SnowRoughness, Constants, "SNOW ROUGHNESS"),
        entry(K::RainThreshold, Constants, "RAIN THRESHOLD"),
        entry(K::SnowThreshold, Constants, "SNOW THRESHOLD"),
        entry(K::SnowWaterCapacity, Constants, "SNOW WATER CAPACITY"),
        entry(K::ReferenceHeight, Constants, "REFERENCE HEIGHT"),
        entry(K::RainLaiMultiplier, Constants, "RAIN LAI MULTIPLIER"),
        entry(K::SnowLaiMultiplier, Constants, "SNOW LAI MULTIPLIER"),
        entry(K::MinInterceptedSnow, Constants, "MIN INTERCEPTED SNOW"),
        entry(K::OutsideBasinValue, Constants, "OUTSIDE BASIN VALUE"),
        entry(K::TemperatureLapseRate, Constants, "TEMPERATURE LAPSE RATE"),
        entry(K::PrecipitationLapseRate, Constants, "PRECIPITATION LAPSE RATE"),
        entry(K::PrecipitationMultiplier, Constants, "PRECIPITATION MULTIPLIER"),
        entry(K::TreeHeight, Constants, "TREE HEIGHT"),
        entry(K::BufferWidth, Constants, "BUFFER WIDTH"),
        entry(K::OverhangCoefficient, Constants, "OVERHANG COEFFICIENT"),
        entry(
            K::MonthlyExtinctionCoefficient,
            Constants,
            "MONTHLY EXTINCTION COEFFICIENT",
        ),
        entry(K::CanopyBankDistance, Constants, "CANOPY BANK DISTANCE"),
    ]
};

// ============================================================================
// Tests
// ============================================================================
