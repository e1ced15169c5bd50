use std::fmt;

use tracing::{debug, trace};

use crate::artists::config::{DEFAULT_MARKER_SIZE, ScatterConfig};
use crate::artists::{
    Artist, ArtistCallback, ArtistEvent, ArtistEventKind, EventBus, MarkerSize, SubscriptionId,
};
use crate::core::{
    ColorIndexUpdate, ColorIndices, ColorMapping, ColorWarning, ColormapTarget, DataPoint,
    NormalizationMethod, map_values_to_colors,
};
use crate::error::PlotResult;
use crate::render::{CanvasHandle, Color, PointSetPrimitive, SharedCanvas};

/// Point cloud colored per point from its color indices.
pub struct Scatter {
    canvas: SharedCanvas,
    data: Vec<DataPoint>,
    visible: bool,
    color_indices: ColorIndices,
    colors: Vec<Color>,
    marker_size: MarkerSize,
    fallback_marker_size: f64,
    overlay_colormap: ColorMapping,
    color_normalization_method: NormalizationMethod,
    handle: Option<CanvasHandle>,
    events: EventBus,
    last_warnings: Vec<ColorWarning>,
}

impl Scatter {
    /// Creates an empty scatter; nothing is drawn until the first `set_data`.
    pub fn new(canvas: SharedCanvas, config: ScatterConfig) -> PlotResult<Self> {
        config.validate()?;
        let overlay_colormap = ColorMapping::try_from(&config.overlay_colormap)?;
        let fallback_marker_size = match config.marker_size {
            MarkerSize::Uniform(size) => size,
            MarkerSize::PerPoint(_) => DEFAULT_MARKER_SIZE,
        };
        Ok(Self {
            canvas,
            data: Vec::new(),
            visible: true,
            color_indices: ColorIndices::default(),
            colors: Vec::new(),
            marker_size: config.marker_size,
            fallback_marker_size,
            overlay_colormap,
            color_normalization_method: config.color_normalization_method,
            handle: None,
            events: EventBus::default(),
            last_warnings: Vec::new(),
        })
    }

    #[must_use]
    pub fn overlay_colormap(&self) -> &ColorMapping {
        &self.overlay_colormap
    }

    /// Swaps the palette and recolors the current indices.
    pub fn set_overlay_colormap(&mut self, colormap: ColorMapping) -> PlotResult<()> {
        let indices = self.color_indices.clone();
        self.apply_coloring(indices, &colormap, self.color_normalization_method)?;
        self.overlay_colormap = colormap;
        Ok(())
    }

    /// Normalization in effect. Reads back `Linear` after a categorical
    /// palette overrode the requested method.
    #[must_use]
    pub fn color_normalization_method(&self) -> NormalizationMethod {
        self.color_normalization_method
    }

    pub fn set_color_normalization_method(&mut self, method: NormalizationMethod) -> PlotResult<()> {
        let indices = self.color_indices.clone();
        let colormap = self.overlay_colormap.clone();
        self.apply_coloring(indices, &colormap, method)
    }

    #[must_use]
    pub fn marker_size(&self) -> &MarkerSize {
        &self.marker_size
    }

    /// Sets marker areas. A per-point array must match the current point count.
    pub fn set_marker_size(&mut self, size: impl Into<MarkerSize>) -> PlotResult<()> {
        let size = size.into();
        size.validate()?;
        if !self.data.is_empty() {
            let sizes = size.resolve(self.data.len())?;
            self.push_points(self.data.clone(), self.colors.clone(), sizes)?;
        }
        if let MarkerSize::Uniform(uniform) = size {
            self.fallback_marker_size = uniform;
        }
        self.marker_size = size;
        self.draw();
        Ok(())
    }

    /// Current per-point fill colors.
    #[must_use]
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    #[must_use]
    pub fn handle(&self) -> Option<CanvasHandle> {
        self.handle
    }

    fn sizes_for(&self, len: usize) -> (MarkerSize, Vec<f64>) {
        match self.marker_size.resolve(len) {
            Ok(sizes) => (self.marker_size.clone(), sizes),
            Err(_) => {
                debug!(
                    points = len,
                    fallback = self.fallback_marker_size,
                    "per-point marker sizes no longer match the data; using uniform size"
                );
                (
                    MarkerSize::Uniform(self.fallback_marker_size),
                    vec![self.fallback_marker_size; len],
                )
            }
        }
    }

    fn push_points(
        &mut self,
        points: Vec<DataPoint>,
        colors: Vec<Color>,
        sizes: Vec<f64>,
    ) -> PlotResult<()> {
        let primitive = PointSetPrimitive {
            points,
            colors,
            sizes,
            visible: self.visible,
        };
        let mut canvas = self.canvas.borrow_mut();
        match self.handle {
            Some(handle) => canvas.update_point_set(handle, primitive),
            None => {
                self.handle = Some(canvas.draw_point_set(primitive)?);
                Ok(())
            }
        }
    }

    /// Recolors with `indices`, pushes the result to the canvas and commits
    /// only once the canvas accepted it. Under a log floor the stored tags
    /// carry the floored values.
    fn apply_coloring(
        &mut self,
        mut indices: ColorIndices,
        colormap: &ColorMapping,
        method: NormalizationMethod,
    ) -> PlotResult<()> {
        let outcome = map_values_to_colors(
            &indices.to_f64_vec(),
            indices.is_integer(),
            colormap,
            method,
            ColormapTarget::Overlay,
        );
        if !self.data.is_empty() {
            let (_, sizes) = self.sizes_for(self.data.len());
            self.push_points(self.data.clone(), outcome.colors.clone(), sizes)?;
        }
        if let Some(floor) = outcome.log_floor {
            indices.apply_log_floor(floor);
        }
        self.colors = outcome.colors;
        self.color_normalization_method = outcome.method;
        self.last_warnings = outcome.warnings;
        self.color_indices = indices;
        self.events
            .emit(&ArtistEvent::ColorIndicesChanged(&self.color_indices));
        self.draw();
        Ok(())
    }
}

impl Artist for Scatter {
    fn data(&self) -> &[DataPoint] {
        &self.data
    }

    fn set_data(&mut self, points: Vec<DataPoint>) -> PlotResult<()> {
        if points.is_empty() {
            trace!("ignoring empty scatter data update");
            return Ok(());
        }
        let len = points.len();
        let mut indices = self.color_indices.resized(len);
        let outcome = map_values_to_colors(
            &indices.to_f64_vec(),
            indices.is_integer(),
            &self.overlay_colormap,
            self.color_normalization_method,
            ColormapTarget::Overlay,
        );
        let (marker_size, sizes) = self.sizes_for(len);
        self.push_points(points.clone(), outcome.colors.clone(), sizes)?;
        if let Some(floor) = outcome.log_floor {
            indices.apply_log_floor(floor);
        }

        self.data = points;
        self.marker_size = marker_size;
        self.colors = outcome.colors;
        self.color_normalization_method = outcome.method;
        self.last_warnings = outcome.warnings;
        self.color_indices = indices;
        debug!(points = len, "scatter data replaced");

        self.events.emit(&ArtistEvent::DataChanged(&self.data));
        self.events
            .emit(&ArtistEvent::ColorIndicesChanged(&self.color_indices));
        self.draw();
        Ok(())
    }

    fn visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) -> PlotResult<()> {
        if let Some(handle) = self.handle {
            self.canvas.borrow_mut().set_visible(handle, visible)?;
        }
        self.visible = visible;
        self.draw();
        Ok(())
    }

    fn color_indices(&self) -> &ColorIndices {
        &self.color_indices
    }

    fn set_color_indices(&mut self, update: ColorIndexUpdate) -> PlotResult<()> {
        let indices = update.resolve(self.data.len())?;
        let colormap = self.overlay_colormap.clone();
        self.apply_coloring(indices, &colormap, self.color_normalization_method)
    }

    fn draw(&mut self) {
        self.canvas.borrow_mut().request_redraw();
    }

    fn subscribe(&mut self, kind: ArtistEventKind, callback: ArtistCallback) -> SubscriptionId {
        self.events.subscribe(kind, callback)
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    fn last_warnings(&self) -> &[ColorWarning] {
        &self.last_warnings
    }
}

impl fmt::Debug for Scatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scatter")
            .field("points", &self.data.len())
            .field("visible", &self.visible)
            .field("overlay_colormap", &self.overlay_colormap.name())
            .field("color_normalization_method", &self.color_normalization_method)
            .field("handle", &self.handle)
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}
