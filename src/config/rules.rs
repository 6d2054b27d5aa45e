//! Option decoding and cross-field rules.
//!
//! [`RuleEngine::run`] decodes the `[OPTIONS]` section as an ordered sequence
//! of named steps. Later steps read the decoded values of earlier ones, so the
//! order below is part of the contract: it decides which keys are consulted at
//! all and which failure is reported first.
//!
//! 1. file format
//! 2. extent
//! 3. flow gradient (basin runs only)
//! 4. interpolation, plus Cressman parameters for `VARCRESS`
//! 5. flow routing (basin runs only)
//! 6. sensible heat flux
//! 7. sediment, plus its input file when enabled
//! 8. overland routing
//! 9. infiltration
//! 10. MM5, QPF, PRISM, canopy radiation attenuation, shading
//! 11. MM5/PRISM/QPF combination
//! 12. SNOTEL, stream temperature, canopy shading, outside stations
//! 13. PRISM and shading data locations
//! 14. RH override
//! 15. meteorological sources and lapse modes

use crate::config::loader::LoadWarning;
use crate::config::options::{
    DataFiles, Extent, FlowGradient, Infiltration, Interpolation, PrecipitationLapseMode,
    PrecipitationSource, RunOptions, SedimentOptions, ShadingFiles, TemperatureLapseMode,
    WindSource,
};
use crate::config::parse;
use crate::config::resolve::ResolvedTable;
use crate::config::schema::Key;
use crate::config::vocab::{self, InterpolationKind};
use crate::error::ConfigError;

/// Sources and lapse modes for meteorological forcing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetSources {
    pub precipitation_source: PrecipitationSource,
    pub wind_source: WindSource,
    pub temperature_lapse: TemperatureLapseMode,
    pub precipitation_lapse: PrecipitationLapseMode,
}

/// Decodes and cross-checks the `[OPTIONS]` section.
#[derive(Debug)]
pub struct RuleEngine<'a> {
    values: &'a ResolvedTable,
    warnings: Vec<LoadWarning>,
}

impl<'a> RuleEngine<'a> {
    #[must_use]
    pub const fn new(values: &'a ResolvedTable) -> Self {
        Self {
            values,
            warnings: Vec::new(),
        }
    }

    /// Runs every step in order.
    ///
    /// The returned options have no pixel index yet; it is derived from the
    /// grid once `[AREA]` has been read.
    ///
    /// # Errors
    ///
    /// Returns the first failing step's error.
    pub fn run(mut self) -> Result<(RunOptions, Vec<LoadWarning>), ConfigError> {
        let file_format = vocab::decode(Key::Format, self.raw(Key::Format), vocab::FILE_FORMAT)?;
        let extent = vocab::decode(Key::Extent, self.raw(Key::Extent), vocab::EXTENT)?;
        let flow_gradient = self.flow_gradient(extent)?;
        let interpolation = self.interpolation()?;
        let has_network = self.flow_routing(extent)?;
        let sensible_heat_flux = self.flag(Key::SensibleHeatFlux)?;
        let sediment = self.sediment()?;
        let overland_routing = vocab::decode(
            Key::OverlandRouting,
            self.raw(Key::OverlandRouting),
            vocab::OVERLAND_ROUTING,
        )?;
        let infiltration = self.infiltration()?;

        let mm5 = self.flag(Key::Mm5)?;
        let qpf = self.flag(Key::Qpf)?;
        let prism = self.flag(Key::Prism)?;
        let canopy_radiation_attenuation = vocab::decode(
            Key::CanopyRadiationAttenuation,
            self.raw(Key::CanopyRadiationAttenuation),
            vocab::CANOPY_RADIATION_ATTENUATION,
        )?;
        let shading = self.flag(Key::Shading)?;
        self.check_prism_with_mm5(mm5, qpf, prism)?;

        let snotel = self.flag(Key::Snotel)?;
        let stream_temperature = self.flag(Key::StreamTemperature)?;
        let canopy_shading = self.canopy_shading(stream_temperature)?;
        let outside = self.flag(Key::Outside)?;

        let prism_data = self.prism_data(prism)?;
        let shading_data = self.shading_data(shading)?;
        let rh_override = self.flag(Key::RhOverride)?;
        let met = self.met_sources(mm5, qpf, prism)?;

        tracing::debug!(?extent, ?flow_gradient, has_network, mm5, qpf, prism, "options decoded");
        tracing::debug!(?met, "meteorological sources decoded");

        let options = RunOptions {
            file_format,
            extent,
            point: None,
            flow_gradient,
            interpolation,
            has_network,
            sensible_heat_flux,
            sediment,
            overland_routing,
            infiltration,
            mm5,
            qpf,
            prism,
            prism_data,
            canopy_radiation_attenuation,
            shading,
            shading_data,
            snotel,
            stream_temperature,
            canopy_shading,
            outside,
            rh_override,
            precipitation_source: met.precipitation_source,
            wind_source: met.wind_source,
            temperature_lapse: met.temperature_lapse,
            precipitation_lapse: met.precipitation_lapse,
        };

        Ok((options, self.warnings))
    }

    // ========================================================================
    // Steps
    // ========================================================================

    /// Requires: extent. Point runs never consult `GRADIENT`.
    fn flow_gradient(&self, extent: Extent) -> Result<FlowGradient, ConfigError> {
        match extent {
            Extent::Point => Ok(FlowGradient::NotApplicable),
            Extent::Basin => {
                vocab::decode(Key::Gradient, self.raw(Key::Gradient), vocab::FLOW_GRADIENT)
            }
        }
    }

    /// `VARCRESS` additionally requires integer `CRESSMAN RADIUS` and
    /// `CRESSMAN STATIONS`.
    fn interpolation(&self) -> Result<Interpolation, ConfigError> {
        let kind = vocab::decode(
            Key::Interpolation,
            self.raw(Key::Interpolation),
            vocab::INTERPOLATION,
        )?;
        Ok(match kind {
            InterpolationKind::InverseDistance => Interpolation::InverseDistance,
            InterpolationKind::Nearest => Interpolation::Nearest,
            InterpolationKind::VariableCressman => Interpolation::VariableCressman {
                radius: parse::int(Key::CressmanRadius, self.raw(Key::CressmanRadius))?,
                stations: parse::int(Key::CressmanStations, self.raw(Key::CressmanStations))?,
            },
        })
    }

    /// Requires: extent. Point runs have no network.
    fn flow_routing(&self, extent: Extent) -> Result<bool, ConfigError> {
        match extent {
            Extent::Point => Ok(false),
            Extent::Basin => {
                vocab::decode(Key::FlowRouting, self.raw(Key::FlowRouting), vocab::FLOW_ROUTING)
            }
        }
    }

    /// Disabling sediment turns every erosion sub-model off and skips the
    /// input file; enabling it requires the input file.
    fn sediment(&mut self) -> Result<SedimentOptions, ConfigError> {
        if !self.flag(Key::Sediment)? {
            self.notice(
                Key::Sediment,
                "Sediment option has not been chosen. All erosion options are being turned off.",
            );
            return Ok(SedimentOptions::default());
        }

        let input_file = self.required(Key::SedimentInputFile)?;
        Ok(SedimentOptions {
            enabled: true,
            input_file: Some(input_file),
            ..SedimentOptions::default()
        })
    }

    fn infiltration(&mut self) -> Result<Infiltration, ConfigError> {
        let infiltration = vocab::decode(
            Key::Infiltration,
            self.raw(Key::Infiltration),
            vocab::INFILTRATION,
        )?;
        if infiltration == Infiltration::Dynamic {
            self.notice(
                Key::Infiltration,
                "Dynamic maximum infiltration capacity has not been fully tested. It is a work in progress.",
            );
        }
        Ok(infiltration)
    }

    /// Requires: MM5, QPF, PRISM. PRISM precipitation cannot be applied to
    /// MM5 fields unless QPF overrides them. Reported on `PRISM`.
    fn check_prism_with_mm5(&self, mm5: bool, qpf: bool, prism: bool) -> Result<(), ConfigError> {
        if mm5 && prism && !qpf {
            return Err(Key::Prism.invalid(
                self.raw(Key::Prism),
                "PRISM cannot be combined with MM5 unless QPF is TRUE",
            ));
        }
        Ok(())
    }

    /// Requires: stream temperature. This violation aborts instead of going
    /// through the invalid-value path.
    fn canopy_shading(&self, stream_temperature: bool) -> Result<bool, ConfigError> {
        let canopy_shading = self.flag(Key::CanopyShading)?;
        if canopy_shading && !stream_temperature {
            return Err(ConfigError::CanopyShadingRequiresStreamTemperature);
        }
        Ok(canopy_shading)
    }

    /// Requires: PRISM.
    fn prism_data(&self, prism: bool) -> Result<Option<DataFiles>, ConfigError> {
        if !prism {
            return Ok(None);
        }
        Ok(Some(DataFiles {
            path: self.required(Key::PrismDataPath)?,
            extension: self.required(Key::PrismDataExtension)?,
        }))
    }

    /// Requires: shading.
    fn shading_data(&self, shading: bool) -> Result<Option<ShadingFiles>, ConfigError> {
        if !shading {
            return Ok(None);
        }
        let data = DataFiles {
            path: self.required(Key::ShadingDataPath)?,
            extension: self.required(Key::ShadingDataExtension)?,
        };
        Ok(Some(ShadingFiles {
            data,
            skyview_path: self.required(Key::SkyviewDataPath)?,
        }))
    }

    /// Requires: MM5, QPF, PRISM.
    ///
    /// With MM5 the station keys are not consulted: everything is not
    /// applicable, except that QPF implies station precipitation and, without
    /// PRISM, a constant precipitation lapse rate.
    fn met_sources(&self, mm5: bool, qpf: bool, prism: bool) -> Result<MetSources, ConfigError> {
        if mm5 {
            return Ok(MetSources {
                precipitation_source: if qpf {
                    PrecipitationSource::Station
                } else {
                    PrecipitationSource::NotApplicable
                },
                wind_source: WindSource::NotApplicable,
                temperature_lapse: TemperatureLapseMode::NotApplicable,
                precipitation_lapse: if qpf && !prism {
                    PrecipitationLapseMode::Constant
                } else {
                    PrecipitationLapseMode::NotApplicable
                },
            });
        }

        Ok(MetSources {
            precipitation_source: vocab::decode(
                Key::PrecipitationSource,
                self.raw(Key::PrecipitationSource),
                vocab::PRECIPITATION_SOURCE,
            )?,
            wind_source: vocab::decode(
                Key::WindSource,
                self.raw(Key::WindSource),
                vocab::WIND_SOURCE,
            )?,
            temperature_lapse: vocab::decode(
                Key::TemperatureLapseMode,
                self.raw(Key::TemperatureLapseMode),
                vocab::TEMPERATURE_LAPSE,
            )?,
            precipitation_lapse: vocab::decode(
                Key::PrecipitationLapseMode,
                self.raw(Key::PrecipitationLapseMode),
                vocab::PRECIPITATION_LAPSE,
            )?,
        })
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn raw(&self, key: Key) -> &'a str {
        self.values.get(key)
    }

    fn flag(&self, key: Key) -> Result<bool, ConfigError> {
        vocab::decode_bool(key, self.raw(key))
    }

    fn required(&self, key: Key) -> Result<String, ConfigError> {
        parse::non_empty(key, self.raw(key))
    }

    fn notice(&mut self, key: Key, message: &str) {
        self.warnings.push(LoadWarning {
            message: message.to_string(),
            location: Some(key.to_string()),
        });
    }
}

// ============================================================================
// Tests
// ============================================================================
