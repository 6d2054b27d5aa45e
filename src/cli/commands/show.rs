//! `show` command handler
//!
//! Loads one input file and prints the validated configuration.

use std::fmt::Write as _;

use crate::cli::args::{ShowArgs, ShowFormat};
use crate::config::{ConfigLoader, LapseRate, RunConfig};
use crate::error::Error;

/// Print the validated run configuration.
///
/// # Errors
///
/// Returns the load error unchanged, so the canopy-shading abort keeps its
/// own exit path, or a serialization error.
pub fn run(args: &ShowArgs) -> Result<(), Error> {
    tracing::info!(file = %args.file.display(), "loading configuration");

    let result = ConfigLoader::with_defaults().load(&args.file)?;
    super::log_warnings(&result.warnings);

    match args.format {
        ShowFormat::Human => print!("{}", render_human(&result.config)),
        ShowFormat::Json => println!("{}", serde_json::to_string_pretty(&*result.config)?),
        ShowFormat::Yaml => print!("{}", serde_yaml::to_string(&*result.config)?),
    }
    Ok(())
}

/// Renders a short human-readable summary.
#[must_use]
pub fn render_human(config: &RunConfig) -> String {
    let options = &config.options;
    let grid = &config.grid;
    let time = &config.time;
    let constants = &config.constants;

    let mut out = String::new();
    let _ = writeln!(out, "[OPTIONS]");
    let _ = writeln!(out, "  format:          {:?}", options.file_format);
    let _ = writeln!(out, "  extent:          {:?}", options.extent);
    if let Some(pixel) = options.point {
        let _ = writeln!(out, "  point pixel:     row {}, col {}", pixel.row, pixel.col);
    }
    let _ = writeln!(out, "  flow gradient:   {:?}", options.flow_gradient);
    let _ = writeln!(out, "  interpolation:   {:?}", options.interpolation);
    let _ = writeln!(out, "  network:         {}", options.has_network);
    let _ = writeln!(out, "  sediment:        {}", options.sediment.enabled);
    let _ = writeln!(
        out,
        "  mm5/qpf/prism:   {}/{}/{}",
        options.mm5, options.qpf, options.prism
    );
    let _ = writeln!(out, "  precipitation:   {:?}", options.precipitation_source);
    let _ = writeln!(out, "  wind:            {:?}", options.wind_source);

    let _ = writeln!(out, "[AREA]");
    let _ = writeln!(out, "  system:          {}", grid.system);
    let _ = writeln!(
        out,
        "  origin:          north {}, west {}",
        grid.north_origin, grid.west_origin
    );
    let _ = writeln!(
        out,
        "  grid:            {} x {} cells of {}",
        grid.rows, grid.cols, grid.dx
    );

    let _ = writeln!(out, "[TIME]");
    let _ = writeln!(out, "  start:           {}", time.start);
    let _ = writeln!(out, "  end:             {}", time.end);
    let _ = writeln!(
        out,
        "  step:            {} s ({} steps)",
        time.step_seconds, time.total_steps
    );

    let _ = writeln!(out, "[CONSTANTS]");
    let _ = writeln!(
        out,
        "  temperature lapse:   {}",
        lapse(constants.temperature_lapse())
    );
    let _ = writeln!(
        out,
        "  precipitation lapse: {}",
        lapse(constants.precipitation_lapse())
    );
    let _ = writeln!(
        out,
        "  reference height:    {}",
        constants.reference_height()
    );
    out
}

fn lapse(rate: LapseRate) -> String {
    rate.fixed()
        .map_or_else(|| "not applicable".to_string(), |r| r.to_string())
}
