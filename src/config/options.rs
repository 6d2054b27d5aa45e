//! Run option types.
//!
//! Strongly typed form of the `[OPTIONS]` section. Variants named
//! `NotApplicable` mark fields that do not apply under the selected mode
//! combination; they are never decoded from input.

use serde::Serialize;

/// Storage encoding of model input and output maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileFormat {
    Bin,
    NetCdf,
    /// Binary with swapped byte order.
    ByteSwap,
}

/// Spatial extent of the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Extent {
    /// Single pixel run.
    Point,
    /// Areal run over the whole grid.
    Basin,
}

/// Row/column index of the modelled pixel in point mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PixelIndex {
    pub row: i64,
    pub col: i64,
}

/// Surface used to compute subsurface flow gradients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowGradient {
    Topography,
    WaterTable,
    NotApplicable,
}

/// Meteorological interpolation scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "method")]
pub enum Interpolation {
    InverseDistance,
    Nearest,
    /// Cressman interpolation with a variable search radius.
    VariableCressman { radius: i32, stations: i32 },
}

/// Overland flow routing scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlandRouting {
    Kinematic,
    Conventional,
}

/// Whether the maximum infiltration capacity changes during the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Infiltration {
    Static,
    /// Experimental.
    Dynamic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CanopyRadiationAttenuation {
    Fixed,
    Variable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrecipitationSource {
    Radar,
    Station,
    NotApplicable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WindSource {
    Model,
    Station,
    NotApplicable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TemperatureLapseMode {
    Constant,
    Variable,
    NotApplicable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrecipitationLapseMode {
    Constant,
    Map,
    Variable,
    NotApplicable,
}

/// Sediment model switches.
///
/// The sub-model flags start out off; when the sediment model is enabled the
/// sediment module sets them from `input_file`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SedimentOptions {
    pub enabled: bool,
    pub mass_wasting: bool,
    pub surface_erosion: bool,
    pub erosion_period: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_file: Option<String>,
}

/// Location of a set of gridded data files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataFiles {
    pub path: String,
    pub extension: String,
}

/// Topographic shading inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShadingFiles {
    pub data: DataFiles,
    pub skyview_path: String,
}

/// Decoded `[OPTIONS]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunOptions {
    pub file_format: FileFormat,
    pub extent: Extent,
    /// Modelled pixel, set only for point runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point: Option<PixelIndex>,
    pub flow_gradient: FlowGradient,
    pub interpolation: Interpolation,
    pub has_network: bool,
    pub sensible_heat_flux: bool,
    pub sediment: SedimentOptions,
    pub overland_routing: OverlandRouting,
    pub infiltration: Infiltration,
    pub mm5: bool,
    pub qpf: bool,
    pub prism: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prism_data: Option<DataFiles>,
    pub canopy_radiation_attenuation: CanopyRadiationAttenuation,
    pub shading: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shading_data: Option<ShadingFiles>,
    pub snotel: bool,
    pub stream_temperature: bool,
    pub canopy_shading: bool,
    pub outside: bool,
    pub rh_override: bool,
    pub precipitation_source: PrecipitationSource,
    pub wind_source: WindSource,
    pub temperature_lapse: TemperatureLapseMode,
    pub precipitation_lapse: PrecipitationLapseMode,
}
