//! Local Relief Model pipeline on top of an external GRASS GIS session.
//!
//! The numerically heavy operations (filtering, raster algebra, contouring,
//! point sampling, spline interpolation) are delegated to GRASS modules
//! running as external processes. This crate owns the sequencing, the
//! derived layer naming and the spline step-size derivation.

#![warn(clippy::unwrap_used)]

pub type Result<T = ()> = std::result::Result<T, Error>;

mod error;
pub mod grass;
mod names;
pub mod pipeline;
mod session;
mod toolkit;

#[doc(inline)]
pub use error::Error;
#[doc(inline)]
pub use names::LayerNames;
pub use pipeline::LrmOptions;
pub use session::{GrassSession, GISBASE_ENV};
pub use toolkit::{ColorTable, ContourLevels, GeoToolkit, SplineEstimate, SplineMethod};
