//! Literal vocabularies for enumerated option keys.
//!
//! Each accepted literal matches any value that begins with its first
//! `min_len` characters (case-sensitive). Existing input files rely on these
//! abbreviations, e.g. `NETWORK` for `FORMAT` is read as `NETCDF`.
//! The first matching literal wins.

use crate::config::options::{
    CanopyRadiationAttenuation, Extent, FileFormat, FlowGradient, Infiltration, OverlandRouting,
    PrecipitationLapseMode, PrecipitationSource, TemperatureLapseMode, WindSource,
};
use crate::config::schema::Key;
use crate::error::ConfigError;

/// Maximum edit distance for "did you mean" suggestions.
const SUGGESTION_DISTANCE: usize = 3;

/// One accepted literal and the value it decodes to.
#[derive(Debug, Clone, Copy)]
pub struct Literal<T> {
    /// Full spelling, as documented.
    pub token: &'static str,
    /// Number of leading characters that must match.
    pub min_len: usize,
    pub value: T,
}

impl<T> Literal<T> {
    const fn new(token: &'static str, min_len: usize, value: T) -> Self {
        Self {
            token,
            min_len,
            value,
        }
    }

    /// Returns `true` if `raw` starts with this literal's required prefix.
    #[must_use]
    pub fn matches(&self, raw: &str) -> bool {
        let prefix = &self.token.as_bytes()[..self.min_len.min(self.token.len())];
        raw.as_bytes().starts_with(prefix)
    }
}

/// Decodes `raw` against `literals`.
///
/// # Errors
///
/// Returns an invalid-value error naming `key` when no literal matches. The
/// reason lists the accepted spellings and, for near misses, a suggestion.
pub fn decode<T: Copy>(key: Key, raw: &str, literals: &[Literal<T>]) -> Result<T, ConfigError> {
    literals
        .iter()
        .find(|literal| literal.matches(raw))
        .map(|literal| literal.value)
        .ok_or_else(|| key.invalid(raw, expected(raw, literals)))
}

/// Decodes a `TRUE`/`FALSE` switch.
///
/// # Errors
///
/// Returns an invalid-value error naming `key` for anything else.
pub fn decode_bool(key: Key, raw: &str) -> Result<bool, ConfigError> {
    decode(key, raw, BOOLEAN)
}

fn expected<T>(raw: &str, literals: &[Literal<T>]) -> String {
    let tokens: Vec<&str> = literals.iter().map(|l| l.token).collect();
    let mut reason = format!("expected one of {}", tokens.join(", "));
    if let Some(hint) = suggest(raw, &tokens) {
        reason.push_str(&format!("; did you mean '{hint}'?"));
    }
    reason
}

/// Suggests the closest accepted spelling for a typo.
///
/// Comparison ignores case so that `true` suggests `TRUE`.
#[must_use]
pub fn suggest(raw: &str, tokens: &[&'static str]) -> Option<&'static str> {
    let upper = raw.trim().to_ascii_uppercase();
    if upper.is_empty() {
        return None;
    }
    tokens
        .iter()
        .map(|t| (*t, strsim::damerau_levenshtein(&upper, t)))
        .filter(|(_, dist)| *dist <= SUGGESTION_DISTANCE)
        .min_by_key(|(_, dist)| *dist)
        .map(|(token, _)| token)
}

// ============================================================================
// Vocabularies
// ============================================================================

pub const BOOLEAN: &[Literal<bool>] = &[
    Literal::new("TRUE", 4, true),
    Literal::new("FALSE", 5, false),
];

pub const FILE_FORMAT: &[Literal<FileFormat>] = &[
    Literal::new("BIN", 3, FileFormat::Bin),
    Literal::new("NETCDF", 3, FileFormat::NetCdf),
    Literal::new("BYTESWAP", 3, FileFormat::ByteSwap),
];

pub const EXTENT: &[Literal<Extent>] = &[
    Literal::new("POINT", 5, Extent::Point),
    Literal::new("BASIN", 5, Extent::Basin),
];

pub const FLOW_GRADIENT: &[Literal<FlowGradient>] = &[
    Literal::new("TOPO", 4, FlowGradient::Topography),
    Literal::new("WATER", 5, FlowGradient::WaterTable),
];

/// `true` means a road/channel network is present.
pub const FLOW_ROUTING: &[Literal<bool>] = &[
    Literal::new("NETWORK", 7, true),
    Literal::new("UNIT", 4, false),
];

/// Interpolation schemes before their parameters are attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpolationKind {
    InverseDistance,
    Nearest,
    VariableCressman,
}

pub const INTERPOLATION: &[Literal<InterpolationKind>] = &[
    Literal::new("INVDIST", 7, InterpolationKind::InverseDistance),
    Literal::new("NEAREST", 7, InterpolationKind::Nearest),
    Literal::new("VARCRESS", 8, InterpolationKind::VariableCressman),
];

pub const OVERLAND_ROUTING: &[Literal<OverlandRouting>] = &[
    Literal::new("KINEMATIC", 9, OverlandRouting::Kinematic),
    Literal::new("CONVENTIONAL", 12, OverlandRouting::Conventional),
];

pub const INFILTRATION: &[Literal<Infiltration>] = &[
    Literal::new("STATIC", 6, Infiltration::Static),
    Literal::new("DYNAMIC", 7, Infiltration::Dynamic),
];

pub const CANOPY_RADIATION_ATTENUATION: &[Literal<CanopyRadiationAttenuation>] = &[
    Literal::new("FIXED", 3, CanopyRadiationAttenuation::Fixed),
    Literal::new("VARIABLE", 3, CanopyRadiationAttenuation::Variable),
];

pub const PRECIPITATION_SOURCE: &[Literal<PrecipitationSource>] = &[
    Literal::new("RADAR", 5, PrecipitationSource::Radar),
    Literal::new("STATION", 7, PrecipitationSource::Station),
];

pub const WIND_SOURCE: &[Literal<WindSource>] = &[
    Literal::new("MODEL", 5, WindSource::Model),
    Literal::new("STATION", 7, WindSource::Station),
];

pub const TEMPERATURE_LAPSE: &[Literal<TemperatureLapseMode>] = &[
    Literal::new("CONSTANT", 8, TemperatureLapseMode::Constant),
    Literal::new("VARIABLE", 8, TemperatureLapseMode::Variable),
];

pub const PRECIPITATION_LAPSE: &[Literal<PrecipitationLapseMode>] = &[
    Literal::new("CONSTANT", 8, PrecipitationLapseMode::Constant),
    Literal::new("MAP", 3, PrecipitationLapseMode::Map),
    Literal::new("VARIABLE", 8, PrecipitationLapseMode::Variable),
];

// ============================================================================
// Tests
// ============================================================================
