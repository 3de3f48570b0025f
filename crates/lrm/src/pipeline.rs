//! The LRM pipeline driver: a fixed sequence of toolkit operations, aborting
//! on the first failure. Based on Hesse (2010), LiDAR-derived Local Relief
//! Models.

use crate::names::LayerNames;
use crate::toolkit::{ColorTable, ContourLevels, GeoToolkit};
use crate::{Error, Result};

pub const DEFAULT_KERNEL: u32 = 25;

/// Maximum spacing between sampled points along the zero contours, map units.
const POINT_SPACING: f64 = 10.0;
/// Attribute column holding the elevation sampled at each point.
const ELEVATION_COLUMN: &str = "along";
/// The point densifier writes its attributes to the second attribute layer.
const POINT_ATTRIBUTE_LAYER: u32 = 2;

#[derive(Debug, Clone)]
pub struct LrmOptions {
    /// Name of the existing elevation raster.
    pub input_map: String,
    /// Prefix for every layer the pipeline writes.
    pub output_prefix: String,
    /// Window size of the low-pass filter.
    pub kernel: u32,
}

impl LrmOptions {
    pub fn new(input_map: impl Into<String>, output_prefix: impl Into<String>) -> Self {
        Self {
            input_map: input_map.into(),
            output_prefix: output_prefix.into(),
            kernel: DEFAULT_KERNEL,
        }
    }

    pub fn with_kernel(mut self, kernel: u32) -> Self {
        self.kernel = kernel;
        self
    }

    fn validate(&self) -> Result {
        if self.input_map.is_empty() {
            return Err(Error::InvalidArgument("input map name is empty".to_string()));
        }
        if self.output_prefix.is_empty() {
            return Err(Error::InvalidArgument("output prefix is empty".to_string()));
        }
        if self.kernel == 0 {
            return Err(Error::InvalidArgument("kernel size must be positive".to_string()));
        }
        Ok(())
    }
}

/// Spline grid spacing derived from the mean distance between points:
/// twice the rounded distance. Rounds half away from zero (`f64::round`),
/// so a mean distance of 4.5 yields a step of 10.
pub fn spline_step(mean_distance: f64) -> f64 {
    mean_distance.round() * 2.0
}

/// Run the full pipeline, returning the names of the created layers.
///
/// Every step writes a named layer into the toolkit workspace; the first
/// failing operation aborts the run and already-created layers are left
/// behind.
pub fn run(toolkit: &dyn GeoToolkit, options: &LrmOptions) -> Result<LayerNames> {
    options.validate()?;
    let names = LayerNames::for_prefix(&options.output_prefix);
    let input = options.input_map.as_str();

    log::info!("Running low pass filter on {input}.");
    toolkit.neighborhood_average(input, &names.low_pass, options.kernel)?;

    log::info!("Subtracting low pass from DEM...");
    toolkit.map_algebra(&names.difference, &format!("{input} - {}", names.low_pass))?;

    log::info!("Extracting zero contours from low pass difference...");
    toolkit.extract_contours(&names.difference, &names.contours, ContourLevels::zero())?;
    toolkit.line_to_points(&names.contours, &names.points, POINT_SPACING)?;
    toolkit.sample_raster_at_points(&names.points, POINT_ATTRIBUTE_LAYER, ELEVATION_COLUMN, input)?;

    let estimate =
        toolkit.estimate_spline_density(&names.points, POINT_ATTRIBUTE_LAYER, ELEVATION_COLUMN, &names.purged)?;
    let step = spline_step(estimate.mean_distance);
    if !step.is_finite() || step <= 0.0 {
        return Err(Error::MalformedReport(format!(
            "mean point distance {} does not yield a usable spline step",
            estimate.mean_distance
        )));
    }

    log::info!("Interpolating purged surface using a spline step value of {step:.0}...");
    toolkit.interpolate_spline_surface(&names.points, POINT_ATTRIBUTE_LAYER, ELEVATION_COLUMN, &names.purged, step)?;

    log::info!("Creating Local Relief Model...");
    toolkit.map_algebra(&names.lrm, &format!("{input} - {}", names.purged))?;
    toolkit.assign_color_table(&names.lrm, ColorTable::Differences)?;

    log::info!("Done.");
    Ok(names)
}
