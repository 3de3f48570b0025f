use crate::Result;

/// Diagnostic reported by the spline estimator: point density over the
/// interpolation region and the mean distance between the sampled points,
/// in map units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplineEstimate {
    pub estimated_density: f64,
    pub mean_distance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplineMethod {
    Linear,
    Bilinear,
}

impl SplineMethod {
    pub fn name(&self) -> &'static str {
        match self {
            SplineMethod::Linear => "linear",
            SplineMethod::Bilinear => "bilinear",
        }
    }
}

/// Contour extraction levels: everything between `min` and `max` with the
/// given step. The step is passed through unused when `min == max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContourLevels {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl ContourLevels {
    /// The single zero-level contour.
    pub fn zero() -> Self {
        Self {
            min: 0.0,
            max: 0.0,
            step: 10.0,
        }
    }
}

/// Predefined color tables of the toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorTable {
    /// Diverging ramp keyed to positive/negative deviation from zero.
    Differences,
    Grey,
}

impl ColorTable {
    pub fn name(&self) -> &'static str {
        match self {
            ColorTable::Differences => "differences",
            ColorTable::Grey => "grey",
        }
    }
}

/// The external geospatial toolkit, one method per opaque operation.
///
/// Layers are addressed by name inside the toolkit's active workspace;
/// implementations overwrite existing layers of the same name.
pub trait GeoToolkit {
    /// Moving-window average filter with the given window size.
    fn neighborhood_average(&self, input: &str, output: &str, window: u32) -> Result;

    /// Raster algebra: evaluate `expression` into the `output` layer.
    fn map_algebra(&self, output: &str, expression: &str) -> Result;

    /// Extract contour lines from a raster.
    fn extract_contours(&self, input: &str, output: &str, levels: ContourLevels) -> Result;

    /// Densify lines into points no further than `max_spacing` apart.
    fn line_to_points(&self, input: &str, output: &str, max_spacing: f64) -> Result;

    /// Sample `raster` at every point, writing the values into `column` on
    /// the given attribute layer.
    fn sample_raster_at_points(&self, points: &str, layer: u32, column: &str, raster: &str) -> Result;

    /// Run the spline estimator in parameter-estimation mode. No raster is
    /// written, but the toolkit still requires the output name.
    fn estimate_spline_density(&self, points: &str, layer: u32, column: &str, output: &str) -> Result<SplineEstimate>;

    /// Interpolate a spline surface from the points, with `step` as the grid
    /// spacing in both planar directions.
    fn interpolate_spline_surface(&self, points: &str, layer: u32, column: &str, output: &str, step: f64) -> Result;

    /// Assign a predefined color table to a raster.
    fn assign_color_table(&self, raster: &str, table: ColorTable) -> Result;
}
