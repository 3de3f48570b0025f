//! GRASS GIS backed toolkit: every operation spawns the corresponding GRASS
//! module as an external process inside the active session. Layers written by
//! the modules persist in the session's workspace.

use std::process::Command;

use crate::session::GrassSession;
use crate::toolkit::{ColorTable, ContourLevels, GeoToolkit, SplineEstimate, SplineMethod};
use crate::{Error, Result};

pub struct GrassToolkit {
    session: GrassSession,
}

impl GrassToolkit {
    pub fn new(session: GrassSession) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &GrassSession {
        &self.session
    }

    /// Execute a GRASS module and capture its output.
    fn run_module(&self, module: &str, args: &[String]) -> Result<String> {
        log::debug!("{module} {}", args.join(" "));
        let output = Command::new(module).args(args).output().map_err(|e| {
            Error::Runtime(format!(
                "Failed to execute {module}: {e}. Make sure the GRASS modules are in PATH."
            ))
        })?;

        if !output.status.success() {
            return Err(Error::ModuleFailure {
                module: module.to_string(),
                status: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl GeoToolkit for GrassToolkit {
    fn neighborhood_average(&self, input: &str, output: &str, window: u32) -> Result {
        self.run_module("r.neighbors", &neighbors_args(input, output, window))?;
        Ok(())
    }

    fn map_algebra(&self, output: &str, expression: &str) -> Result {
        self.run_module("r.mapcalc", &mapcalc_args(output, expression))?;
        Ok(())
    }

    fn extract_contours(&self, input: &str, output: &str, levels: ContourLevels) -> Result {
        self.run_module("r.contour", &contour_args(input, output, levels))?;
        Ok(())
    }

    fn line_to_points(&self, input: &str, output: &str, max_spacing: f64) -> Result {
        self.run_module("v.to.points", &to_points_args(input, output, max_spacing))?;
        Ok(())
    }

    fn sample_raster_at_points(&self, points: &str, layer: u32, column: &str, raster: &str) -> Result {
        self.run_module("v.what.rast", &what_rast_args(points, layer, column, raster))?;
        Ok(())
    }

    fn estimate_spline_density(&self, points: &str, layer: u32, column: &str, output: &str) -> Result<SplineEstimate> {
        let report = self.run_module("v.surf.bspline", &bspline_estimate_args(points, layer, column, output))?;
        parse_spline_estimate(&report)
    }

    fn interpolate_spline_surface(&self, points: &str, layer: u32, column: &str, output: &str, step: f64) -> Result {
        self.run_module("v.surf.bspline", &bspline_surface_args(points, layer, column, output, step))?;
        Ok(())
    }

    fn assign_color_table(&self, raster: &str, table: ColorTable) -> Result {
        self.run_module("r.colors", &colors_args(raster, table))?;
        Ok(())
    }
}

fn neighbors_args(input: &str, output: &str, window: u32) -> Vec<String> {
    vec![
        format!("input={input}"),
        format!("output={output}"),
        format!("size={window}"),
        "method=average".to_string(),
        "--overwrite".to_string(),
    ]
}

fn mapcalc_args(output: &str, expression: &str) -> Vec<String> {
    vec![format!("expression={output} = {expression}"), "--overwrite".to_string()]
}

fn contour_args(input: &str, output: &str, levels: ContourLevels) -> Vec<String> {
    vec![
        format!("input={input}"),
        format!("output={output}"),
        format!("minlevel={}", levels.min),
        format!("maxlevel={}", levels.max),
        format!("step={}", levels.step),
        "--overwrite".to_string(),
    ]
}

fn to_points_args(input: &str, output: &str, max_spacing: f64) -> Vec<String> {
    vec![
        format!("input={input}"),
        "layer=1".to_string(),
        "type=line".to_string(),
        format!("output={output}"),
        format!("dmax={max_spacing}"),
        "--overwrite".to_string(),
    ]
}

fn what_rast_args(points: &str, layer: u32, column: &str, raster: &str) -> Vec<String> {
    vec![
        format!("map={points}"),
        format!("raster={raster}"),
        format!("layer={layer}"),
        format!("column={column}"),
    ]
}

fn bspline_args(points: &str, layer: u32, column: &str, output: &str, method: SplineMethod) -> Vec<String> {
    vec![
        format!("input={points}"),
        format!("raster_output={output}"),
        format!("layer={layer}"),
        format!("column={column}"),
        format!("method={}", method.name()),
    ]
}

/// Estimation mode reports diagnostics on stdout; the output raster is
/// required by the module but not written.
fn bspline_estimate_args(points: &str, layer: u32, column: &str, output: &str) -> Vec<String> {
    let mut args = vec!["-e".to_string()];
    args.extend(bspline_args(points, layer, column, output, SplineMethod::Linear));
    args.push("--overwrite".to_string());
    args
}

fn bspline_surface_args(points: &str, layer: u32, column: &str, output: &str, step: f64) -> Vec<String> {
    let mut args = bspline_args(points, layer, column, output, SplineMethod::Bilinear);
    args.push(format!("sie={step}"));
    args.push(format!("sin={step}"));
    args.push("--overwrite".to_string());
    args
}

fn colors_args(raster: &str, table: ColorTable) -> Vec<String> {
    vec![format!("map={raster}"), format!("color={}", table.name())]
}

/// The estimator prints a single diagnostic line ending with the mean
/// distance between points; its first numeric token is the point density.
fn parse_spline_estimate(report: &str) -> Result<SplineEstimate> {
    let line = report
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .next_back()
        .ok_or_else(|| Error::MalformedReport("estimator produced no output".to_string()))?;

    let mean_distance = line
        .split_whitespace()
        .next_back()
        .and_then(|token| token.parse::<f64>().ok())
        .ok_or_else(|| Error::MalformedReport(format!("'{line}' does not end with the mean point distance")))?;

    let estimated_density = line
        .split_whitespace()
        .find_map(|token| token.parse::<f64>().ok())
        .unwrap_or(mean_distance);

    Ok(SplineEstimate {
        estimated_density,
        mean_distance,
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn neighbors_args_are_complete() {
        assert_eq!(
            neighbors_args("dem", "dem_lpf", 25),
            vec!["input=dem", "output=dem_lpf", "size=25", "method=average", "--overwrite"]
        );
    }

    #[test]
    fn mapcalc_args_hold_the_full_expression() {
        assert_eq!(
            mapcalc_args("dem_lpf_difference", "dem - dem_lpf"),
            vec!["expression=dem_lpf_difference = dem - dem_lpf", "--overwrite"]
        );
    }

    #[test]
    fn contour_args_pass_the_levels_through() {
        assert_eq!(
            contour_args("diff", "diff_contour", ContourLevels::zero()),
            vec![
                "input=diff",
                "output=diff_contour",
                "minlevel=0",
                "maxlevel=0",
                "step=10",
                "--overwrite"
            ]
        );
    }

    #[test]
    fn point_args_densify_lines_on_the_first_layer() {
        assert_eq!(
            to_points_args("contour", "contour_points", 10.0),
            vec![
                "input=contour",
                "layer=1",
                "type=line",
                "output=contour_points",
                "dmax=10",
                "--overwrite"
            ]
        );
        assert_eq!(
            what_rast_args("contour_points", 2, "along", "dem"),
            vec!["map=contour_points", "raster=dem", "layer=2", "column=along"]
        );
    }

    #[test]
    fn bspline_estimation_is_linear_and_flagged() {
        assert_eq!(
            bspline_estimate_args("pts", 2, "along", "purged"),
            vec![
                "-e",
                "input=pts",
                "raster_output=purged",
                "layer=2",
                "column=along",
                "method=linear",
                "--overwrite"
            ]
        );
    }

    #[test]
    fn bspline_surface_is_bilinear_with_the_step_in_both_directions() {
        assert_eq!(
            bspline_surface_args("pts", 2, "along", "purged", 26.0),
            vec![
                "input=pts",
                "raster_output=purged",
                "layer=2",
                "column=along",
                "method=bilinear",
                "sie=26",
                "sin=26",
                "--overwrite"
            ]
        );
    }

    #[test]
    fn color_args_use_the_table_name() {
        assert_eq!(
            colors_args("site_lrm", ColorTable::Differences),
            vec!["map=site_lrm", "color=differences"]
        );
    }

    #[test]
    fn estimate_report_is_parsed_from_the_diagnostic_line() {
        let report = "Estimated point density: 0.0039 estimated mean distance between points: 12.634\n";
        let estimate = parse_spline_estimate(report).unwrap();
        assert_relative_eq!(estimate.estimated_density, 0.0039);
        assert_relative_eq!(estimate.mean_distance, 12.634);
    }

    #[test]
    fn estimate_report_skips_leading_blank_lines() {
        let report = "\n   \nestimated point density and distance: 0.5 4.25\n";
        let estimate = parse_spline_estimate(report).unwrap();
        assert_relative_eq!(estimate.estimated_density, 0.5);
        assert_relative_eq!(estimate.mean_distance, 4.25);
    }

    #[test]
    fn malformed_estimate_reports_are_fatal() {
        assert!(matches!(parse_spline_estimate(""), Err(Error::MalformedReport(_))));
        assert!(matches!(parse_spline_estimate("\n  \n"), Err(Error::MalformedReport(_))));
        assert!(matches!(
            parse_spline_estimate("no points found in the region"),
            Err(Error::MalformedReport(_))
        ));
    }
}
