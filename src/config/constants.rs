//! Physical constants.
//!
//! [`PhysicalConstants`] is assigned once by [`assign`] during the load pass
//! and is read-only afterwards: fields are private and only exposed through
//! accessors.

use serde::Serialize;

use crate::config::options::{PrecipitationLapseMode, TemperatureLapseMode};
use crate::config::parse;
use crate::config::resolve::ResolvedTable;
use crate::config::schema::Key;
use crate::error::ConfigError;

/// A lapse rate that is either fixed for the whole run or does not apply.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LapseRate {
    Fixed(f64),
    /// Lapse rates come from maps or time series instead.
    NotApplicable,
}

impl LapseRate {
    /// The fixed rate, if any.
    #[must_use]
    pub const fn fixed(self) -> Option<f64> {
        match self {
            Self::Fixed(rate) => Some(rate),
            Self::NotApplicable => None,
        }
    }
}

/// Global physical constants used throughout the simulation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhysicalConstants {
    ground_roughness: f64,
    snow_roughness: f64,
    rain_threshold: f64,
    snow_threshold: f64,
    liquid_water_capacity: f64,
    reference_height: f64,
    rain_lai_multiplier: f64,
    snow_lai_multiplier: f64,
    min_interception_storage: f64,
    outside_basin: u8,
    temperature_lapse: LapseRate,
    precipitation_lapse: LapseRate,
    precipitation_multiplier: f64,
}

impl PhysicalConstants {
    /// Roughness length of bare ground (m).
    #[must_use]
    pub const fn ground_roughness(&self) -> f64 {
        self.ground_roughness
    }

    /// Roughness length of snow (m).
    #[must_use]
    pub const fn snow_roughness(&self) -> f64 {
        self.snow_roughness
    }

    /// Temperature below which all precipitation is snow (°C).
    #[must_use]
    pub const fn rain_threshold(&self) -> f64 {
        self.rain_threshold
    }

    /// Temperature above which all precipitation is rain (°C).
    #[must_use]
    pub const fn snow_threshold(&self) -> f64 {
        self.snow_threshold
    }

    /// Liquid water holding capacity of snow, as a fraction.
    #[must_use]
    pub const fn liquid_water_capacity(&self) -> f64 {
        self.liquid_water_capacity
    }

    /// Reference height for meteorological inputs (m).
    #[must_use]
    pub const fn reference_height(&self) -> f64 {
        self.reference_height
    }

    #[must_use]
    pub const fn rain_lai_multiplier(&self) -> f64 {
        self.rain_lai_multiplier
    }

    #[must_use]
    pub const fn snow_lai_multiplier(&self) -> f64 {
        self.snow_lai_multiplier
    }

    /// Minimum intercepted snow storage (m).
    #[must_use]
    pub const fn min_interception_storage(&self) -> f64 {
        self.min_interception_storage
    }

    /// Mask value marking cells outside the basin.
    #[must_use]
    pub const fn outside_basin(&self) -> u8 {
        self.outside_basin
    }

    #[must_use]
    pub const fn temperature_lapse(&self) -> LapseRate {
        self.temperature_lapse
    }

    #[must_use]
    pub const fn precipitation_lapse(&self) -> LapseRate {
        self.precipitation_lapse
    }

    #[must_use]
    pub const fn precipitation_multiplier(&self) -> f64 {
        self.precipitation_multiplier
    }
}

/// Parses and assigns every physical constant.
///
/// Lapse rate values are read only when their mode is `Constant`.
///
/// # Errors
///
/// Returns an invalid-value error naming the first constant that fails to
/// parse.
pub fn assign(
    values: &ResolvedTable,
    temperature_mode: TemperatureLapseMode,
    precipitation_mode: PrecipitationLapseMode,
) -> Result<PhysicalConstants, ConfigError> {
    let float = |key: Key| parse::float(key, values.get(key));

    let ground_roughness = float(Key::GroundRoughness)?;
    let snow_roughness = float(Key::SnowRoughness)?;
    let rain_threshold = float(Key::RainThreshold)?;
    let snow_threshold = float(Key::SnowThreshold)?;
    let liquid_water_capacity = float(Key::SnowWaterCapacity)?;
    let reference_height = float(Key::ReferenceHeight)?;
    let rain_lai_multiplier = float(Key::RainLaiMultiplier)?;
    let snow_lai_multiplier = float(Key::SnowLaiMultiplier)?;
    let min_interception_storage = float(Key::MinInterceptedSnow)?;
    let outside_basin = parse::byte(Key::OutsideBasinValue, values.get(Key::OutsideBasinValue))?;

    let temperature_lapse = if temperature_mode == TemperatureLapseMode::Constant {
        LapseRate::Fixed(float(Key::TemperatureLapseRate)?)
    } else {
        LapseRate::NotApplicable
    };
    let precipitation_lapse = if precipitation_mode == PrecipitationLapseMode::Constant {
        LapseRate::Fixed(float(Key::PrecipitationLapseRate)?)
    } else {
        LapseRate::NotApplicable
    };

    let precipitation_multiplier = float(Key::PrecipitationMultiplier)?;

    Ok(PhysicalConstants {
        ground_roughness,
        snow_roughness,
        rain_threshold,
        snow_threshold,
        liquid_water_capacity,
        reference_height,
        rain_lai_multiplier,
        snow_lai_multiplier,
        min_interception_storage,
        outside_basin,
        temperature_lapse,
        precipitation_lapse,
        precipitation_multiplier,
    })
}
