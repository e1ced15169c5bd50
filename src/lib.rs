//! biaplot: scatter and 2D-histogram artists for interactive feature plots.
//!
//! Artists render a point set onto an abstract [`render::Canvas`] and color
//! it from per-point class tags through a palette and a normalization. The
//! 2D histogram also overlays a per-bin statistic of the tags. Selectors keep
//! a synchronized copy of the points and report which of them fall inside a
//! drawn shape; [`CanvasWidget`] ties both together and writes selections back
//! as class tags.
//!
//! Everything runs synchronously on one thread. Recoverable coloring problems
//! are logged through `tracing` and kept on the artist (`last_warnings`).

pub mod api;
pub mod artists;
pub mod core;
pub mod error;
pub mod render;
pub mod selectors;
pub mod telemetry;

pub use api::{ArtistType, CanvasWidget, CanvasWidgetConfig, SelectorType};
pub use artists::{AnyArtist, Artist, Histogram2D, Scatter};
pub use error::{PlotError, PlotResult};
