/// Names of the layers a pipeline run writes into the toolkit workspace,
/// derived once from the output prefix. Existing layers with these names are
/// overwritten by the toolkit, not guarded against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerNames {
    /// Low-pass filtered elevation raster.
    pub low_pass: String,
    /// Input minus low-pass raster.
    pub difference: String,
    /// Zero-level contours of the difference raster.
    pub contours: String,
    /// Contours densified into points, elevation sampled alongside.
    pub points: String,
    /// Spline surface interpolated from the points.
    pub purged: String,
    /// The Local Relief Model itself.
    pub lrm: String,
}

impl LayerNames {
    pub fn for_prefix(prefix: &str) -> Self {
        let contours = format!("{prefix}_diff_contour");
        Self {
            low_pass: format!("{prefix}_lpf"),
            difference: format!("{prefix}_lpf_difference"),
            points: format!("{contours}_points"),
            contours,
            purged: format!("{prefix}_purged"),
            lrm: format!("{prefix}_lrm"),
        }
    }

    /// All six layer names, in creation order.
    pub fn all(&self) -> [&str; 6] {
        [
            &self.low_pass,
            &self.difference,
            &self.contours,
            &self.points,
            &self.purged,
            &self.lrm,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_derive_from_prefix() {
        let names = LayerNames::for_prefix("site42");
        assert_eq!(names.low_pass, "site42_lpf");
        assert_eq!(names.difference, "site42_lpf_difference");
        assert_eq!(names.contours, "site42_diff_contour");
        assert_eq!(names.points, "site42_diff_contour_points");
        assert_eq!(names.purged, "site42_purged");
        assert_eq!(names.lrm, "site42_lrm");
    }

    #[test]
    fn all_lists_the_six_layers_in_creation_order() {
        let names = LayerNames::for_prefix("dem");
        assert_eq!(
            names.all(),
            [
                "dem_lpf",
                "dem_lpf_difference",
                "dem_diff_contour",
                "dem_diff_contour_points",
                "dem_purged",
                "dem_lrm",
            ]
        );
    }
}
