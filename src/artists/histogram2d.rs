use std::fmt;

use tracing::{debug, trace, warn};

use crate::artists::config::{Histogram2DConfig, validate_bins, validate_opacity};
use crate::artists::{Artist, ArtistCallback, ArtistEvent, ArtistEventKind, EventBus, SubscriptionId};
use crate::core::{
    BinIndex, ColorIndexUpdate, ColorIndices, ColorMapping, ColorWarning, ColormapTarget,
    DataPoint, Extent, Grid, HistogramGrid, NormalizationMethod, Statistic, map_values_to_colors,
    statistic_grid,
};
use crate::error::PlotResult;
use crate::render::{CanvasHandle, CanvasLayer, ImagePrimitive, RgbaImage, SharedCanvas};

/// One rendered raster layer together with what its coloring pass decided.
#[derive(Debug, Clone)]
struct LayerFrame {
    image: RgbaImage,
    method: NormalizationMethod,
    log_floor: Option<f64>,
    warnings: Vec<ColorWarning>,
}

/// Overlay statistic grid plus its rendered raster, absent when no bin
/// holds a defined value.
#[derive(Debug, Clone)]
struct OverlayFrame {
    grid: Grid,
    layer: Option<LayerFrame>,
}

/// Square 2D histogram of the point density, with an optional translucent
/// overlay showing a per-bin statistic of the color indices.
pub struct Histogram2D {
    canvas: SharedCanvas,
    data: Vec<DataPoint>,
    visible: bool,
    color_indices: ColorIndices,
    bins: usize,
    histogram_colormap: ColorMapping,
    overlay_colormap: ColorMapping,
    histogram_normalization_method: NormalizationMethod,
    overlay_normalization_method: NormalizationMethod,
    overlay_opacity: f64,
    overlay_visible: bool,
    histogram_interpolation: String,
    overlay_interpolation: String,
    overlay_statistic: Statistic,
    histogram: Option<HistogramGrid>,
    bin_assignment: Vec<BinIndex>,
    histogram_image: Option<RgbaImage>,
    overlay_grid: Option<Grid>,
    overlay_image: Option<RgbaImage>,
    histogram_handle: Option<CanvasHandle>,
    overlay_handle: Option<CanvasHandle>,
    events: EventBus,
    last_warnings: Vec<ColorWarning>,
}

impl Histogram2D {
    /// Creates an empty histogram; nothing is drawn until the first `set_data`.
    pub fn new(canvas: SharedCanvas, config: Histogram2DConfig) -> PlotResult<Self> {
        config.validate()?;
        let histogram_colormap = ColorMapping::try_from(&config.histogram_colormap)?;
        let overlay_colormap = ColorMapping::try_from(&config.overlay_colormap)?;
        Ok(Self {
            canvas,
            data: Vec::new(),
            visible: true,
            color_indices: ColorIndices::default(),
            bins: config.bins,
            histogram_colormap,
            overlay_colormap,
            histogram_normalization_method: config.histogram_normalization_method,
            overlay_normalization_method: config.overlay_normalization_method,
            overlay_opacity: config.overlay_opacity,
            overlay_visible: config.overlay_visible,
            histogram_interpolation: config.histogram_interpolation,
            overlay_interpolation: config.overlay_interpolation,
            overlay_statistic: config.overlay_statistic,
            histogram: None,
            bin_assignment: Vec::new(),
            histogram_image: None,
            overlay_grid: None,
            overlay_image: None,
            histogram_handle: None,
            overlay_handle: None,
            events: EventBus::default(),
            last_warnings: Vec::new(),
        })
    }

    #[must_use]
    pub fn bins(&self) -> usize {
        self.bins
    }

    /// Changes the grid resolution and rebins the current data.
    pub fn set_bins(&mut self, bins: usize) -> PlotResult<()> {
        validate_bins(bins)?;
        let previous = self.bins;
        self.bins = bins;
        if self.data.is_empty() {
            return Ok(());
        }
        if let Err(err) = self.rebuild(self.data.clone()) {
            self.bins = previous;
            return Err(err);
        }
        self.draw();
        Ok(())
    }

    #[must_use]
    pub fn histogram_colormap(&self) -> &ColorMapping {
        &self.histogram_colormap
    }

    pub fn set_histogram_colormap(&mut self, colormap: ColorMapping) -> PlotResult<()> {
        let previous = std::mem::replace(&mut self.histogram_colormap, colormap);
        if let Err(err) = self.refresh_counts_layer() {
            self.histogram_colormap = previous;
            return Err(err);
        }
        Ok(())
    }

    /// Normalization in effect for the counts layer.
    #[must_use]
    pub fn histogram_normalization_method(&self) -> NormalizationMethod {
        self.histogram_normalization_method
    }

    pub fn set_histogram_normalization_method(
        &mut self,
        method: NormalizationMethod,
    ) -> PlotResult<()> {
        let previous = std::mem::replace(&mut self.histogram_normalization_method, method);
        if let Err(err) = self.refresh_counts_layer() {
            self.histogram_normalization_method = previous;
            return Err(err);
        }
        Ok(())
    }

    #[must_use]
    pub fn histogram_interpolation(&self) -> &str {
        &self.histogram_interpolation
    }

    pub fn set_histogram_interpolation(
        &mut self,
        interpolation: impl Into<String>,
    ) -> PlotResult<()> {
        let previous =
            std::mem::replace(&mut self.histogram_interpolation, interpolation.into());
        if let Err(err) = self.refresh_counts_layer() {
            self.histogram_interpolation = previous;
            return Err(err);
        }
        Ok(())
    }

    #[must_use]
    pub fn overlay_colormap(&self) -> &ColorMapping {
        &self.overlay_colormap
    }

    pub fn set_overlay_colormap(&mut self, colormap: ColorMapping) -> PlotResult<()> {
        let previous = std::mem::replace(&mut self.overlay_colormap, colormap);
        if let Err(err) = self.refresh_overlay(self.color_indices.clone()) {
            self.overlay_colormap = previous;
            return Err(err);
        }
        Ok(())
    }

    /// Normalization in effect for the overlay layer.
    #[must_use]
    pub fn overlay_normalization_method(&self) -> NormalizationMethod {
        self.overlay_normalization_method
    }

    pub fn set_overlay_normalization_method(
        &mut self,
        method: NormalizationMethod,
    ) -> PlotResult<()> {
        let previous = std::mem::replace(&mut self.overlay_normalization_method, method);
        if let Err(err) = self.refresh_overlay(self.color_indices.clone()) {
            self.overlay_normalization_method = previous;
            return Err(err);
        }
        Ok(())
    }

    #[must_use]
    pub fn overlay_interpolation(&self) -> &str {
        &self.overlay_interpolation
    }

    pub fn set_overlay_interpolation(
        &mut self,
        interpolation: impl Into<String>,
    ) -> PlotResult<()> {
        let previous = std::mem::replace(&mut self.overlay_interpolation, interpolation.into());
        if let Err(err) = self.refresh_overlay(self.color_indices.clone()) {
            self.overlay_interpolation = previous;
            return Err(err);
        }
        Ok(())
    }

    #[must_use]
    pub fn overlay_statistic(&self) -> Statistic {
        self.overlay_statistic
    }

    pub fn set_overlay_statistic(&mut self, statistic: Statistic) -> PlotResult<()> {
        let previous = std::mem::replace(&mut self.overlay_statistic, statistic);
        if let Err(err) = self.refresh_overlay(self.color_indices.clone()) {
            self.overlay_statistic = previous;
            return Err(err);
        }
        Ok(())
    }

    #[must_use]
    pub fn overlay_opacity(&self) -> f64 {
        self.overlay_opacity
    }

    pub fn set_overlay_opacity(&mut self, opacity: f64) -> PlotResult<()> {
        validate_opacity(opacity)?;
        let previous = std::mem::replace(&mut self.overlay_opacity, opacity);
        if let Err(err) = self.refresh_overlay(self.color_indices.clone()) {
            self.overlay_opacity = previous;
            return Err(err);
        }
        Ok(())
    }

    #[must_use]
    pub fn overlay_visible(&self) -> bool {
        self.overlay_visible
    }

    /// Shows or hides only the overlay; the counts layer is unaffected.
    pub fn set_overlay_visible(&mut self, visible: bool) -> PlotResult<()> {
        if let Some(handle) = self.overlay_handle {
            self.canvas
                .borrow_mut()
                .set_visible(handle, self.visible && visible)?;
        }
        self.overlay_visible = visible;
        self.draw();
        Ok(())
    }

    /// Counts and edges of the current data, if any data was set.
    #[must_use]
    pub fn histogram(&self) -> Option<&HistogramGrid> {
        self.histogram.as_ref()
    }

    /// Per-point cells used for the overlay statistic.
    #[must_use]
    pub fn bin_assignment(&self) -> &[BinIndex] {
        &self.bin_assignment
    }

    /// Statistic of the color indices per bin; NaN marks bins without points.
    /// Under log normalization non-positive cells hold the log floor.
    #[must_use]
    pub fn overlay_grid(&self) -> Option<&Grid> {
        self.overlay_grid.as_ref()
    }

    #[must_use]
    pub fn histogram_image(&self) -> Option<&RgbaImage> {
        self.histogram_image.as_ref()
    }

    #[must_use]
    pub fn overlay_image(&self) -> Option<&RgbaImage> {
        self.overlay_image.as_ref()
    }

    #[must_use]
    pub fn histogram_handle(&self) -> Option<CanvasHandle> {
        self.histogram_handle
    }

    #[must_use]
    pub fn overlay_handle(&self) -> Option<CanvasHandle> {
        self.overlay_handle
    }

    /// Indices of the points lying in any bin whose count exceeds `threshold`.
    ///
    /// Bins are visited in `[x][y]` order; within a bin indices ascend. A
    /// threshold below every count returns each point exactly once.
    #[must_use]
    pub fn indices_in_patches_above_threshold(&self, threshold: f64) -> Vec<usize> {
        match &self.histogram {
            Some(histogram) => histogram.indices_above_threshold(&self.data, threshold),
            None => Vec::new(),
        }
    }

    fn counts_frame(&self, histogram: &HistogramGrid) -> PlotResult<LayerFrame> {
        grid_to_rgba(
            histogram.counts(),
            true,
            &self.histogram_colormap,
            self.histogram_normalization_method,
            ColormapTarget::Histogram,
        )
    }

    /// Aggregates `indices` per bin. A grid without any defined cell yields
    /// no layer, which clears the overlay.
    fn overlay_frame(
        &self,
        assignment: &[BinIndex],
        indices: &ColorIndices,
    ) -> PlotResult<OverlayFrame> {
        let mut grid = statistic_grid(
            assignment,
            &indices.to_f64_vec(),
            self.overlay_statistic,
            (self.bins, self.bins),
        )?;
        if grid.all_nan() {
            return Ok(OverlayFrame { grid, layer: None });
        }
        let layer = grid_to_rgba(
            &grid,
            indices.is_integer(),
            &self.overlay_colormap,
            self.overlay_normalization_method,
            ColormapTarget::Overlay,
        )?;
        if let Some(floor) = layer.log_floor {
            grid.apply_log_floor(floor);
        }
        Ok(OverlayFrame {
            grid,
            layer: Some(layer),
        })
    }

    fn counts_primitive(&self, image: RgbaImage, extent: Extent) -> ImagePrimitive {
        ImagePrimitive {
            image,
            extent,
            layer: CanvasLayer::HistogramCounts,
            interpolation: self.histogram_interpolation.clone(),
            alpha: 1.0,
            visible: self.visible,
        }
    }

    fn overlay_primitive(&self, image: RgbaImage, extent: Extent) -> ImagePrimitive {
        ImagePrimitive {
            image,
            extent,
            layer: CanvasLayer::HistogramOverlay,
            interpolation: self.overlay_interpolation.clone(),
            alpha: self.overlay_opacity,
            visible: self.visible && self.overlay_visible,
        }
    }

    /// Draws the new counts image before removing the old one.
    fn replace_counts_image(&mut self, primitive: ImagePrimitive) -> PlotResult<()> {
        let mut canvas = self.canvas.borrow_mut();
        let handle = canvas.draw_image(primitive)?;
        if let Some(previous) = self.histogram_handle.replace(handle) {
            canvas.remove_image(previous)?;
        }
        Ok(())
    }

    /// Draws the new overlay image, if any, before removing the old one.
    fn replace_overlay_image(&mut self, primitive: Option<ImagePrimitive>) -> PlotResult<()> {
        let mut canvas = self.canvas.borrow_mut();
        let handle = primitive
            .map(|primitive| canvas.draw_image(primitive))
            .transpose()?;
        if let Some(previous) = std::mem::replace(&mut self.overlay_handle, handle) {
            canvas.remove_image(previous)?;
        }
        Ok(())
    }

    /// Draws both new images, then removes the ones they replace. If the
    /// overlay cannot be drawn the new counts image is withdrawn and the old
    /// layers stay on the canvas.
    fn swap_images(
        &mut self,
        counts: ImagePrimitive,
        overlay: Option<ImagePrimitive>,
    ) -> PlotResult<()> {
        let mut canvas = self.canvas.borrow_mut();
        let counts_handle = canvas.draw_image(counts)?;
        let overlay_handle = match overlay
            .map(|primitive| canvas.draw_image(primitive))
            .transpose()
        {
            Ok(handle) => handle,
            Err(err) => {
                if let Err(cleanup) = canvas.remove_image(counts_handle) {
                    warn!(handle = counts_handle.0, %cleanup, "failed to withdraw counts image");
                }
                return Err(err);
            }
        };
        let stale = [
            std::mem::replace(&mut self.histogram_handle, Some(counts_handle)),
            std::mem::replace(&mut self.overlay_handle, overlay_handle),
        ];
        for previous in stale.into_iter().flatten() {
            canvas.remove_image(previous)?;
        }
        Ok(())
    }

    /// Rebins `points` and regenerates both layers. Both images are validated
    /// before the canvas is touched and artist state is committed last;
    /// returns without emitting events.
    fn rebuild(&mut self, points: Vec<DataPoint>) -> PlotResult<()> {
        let histogram = HistogramGrid::compute(&points, self.bins)?;
        let assignment = histogram.assign_bins(&points);
        let indices = self.color_indices.resized(points.len());
        let counts = self.counts_frame(&histogram)?;
        let overlay = self.overlay_frame(&assignment, &indices)?;

        let extent = histogram.extent();
        let counts_primitive = self.counts_primitive(counts.image.clone(), extent);
        let overlay_primitive = overlay
            .layer
            .as_ref()
            .map(|layer| self.overlay_primitive(layer.image.clone(), extent));
        counts_primitive.validate()?;
        if let Some(primitive) = &overlay_primitive {
            primitive.validate()?;
        }
        self.swap_images(counts_primitive, overlay_primitive)?;
        debug!(
            points = points.len(),
            bins = self.bins,
            "histogram rebinned"
        );

        self.histogram_normalization_method = counts.method;
        self.histogram_image = Some(counts.image);
        self.last_warnings = counts.warnings;
        self.data = points;
        self.histogram = Some(histogram);
        self.bin_assignment = assignment;
        self.color_indices = indices;
        self.commit_overlay(overlay);
        Ok(())
    }

    fn commit_overlay(&mut self, overlay: OverlayFrame) {
        self.overlay_grid = Some(overlay.grid);
        match overlay.layer {
            Some(layer) => {
                self.overlay_normalization_method = layer.method;
                self.overlay_image = Some(layer.image);
                self.last_warnings.extend(layer.warnings);
            }
            None => {
                trace!("overlay statistic undefined in every bin; overlay cleared");
                self.overlay_image = None;
            }
        }
    }

    fn refresh_counts_layer(&mut self) -> PlotResult<()> {
        let Some(histogram) = &self.histogram else {
            return Ok(());
        };
        let counts = self.counts_frame(histogram)?;
        let primitive = self.counts_primitive(counts.image.clone(), histogram.extent());
        primitive.validate()?;
        self.replace_counts_image(primitive)?;
        self.histogram_normalization_method = counts.method;
        self.histogram_image = Some(counts.image);
        self.last_warnings = counts.warnings;
        self.draw();
        Ok(())
    }

    /// Recomputes the overlay for `indices`, commits them and notifies
    /// observers. Without data only the indices are stored.
    fn refresh_overlay(&mut self, indices: ColorIndices) -> PlotResult<()> {
        if let Some(histogram) = &self.histogram {
            let overlay = self.overlay_frame(&self.bin_assignment, &indices)?;
            let extent = histogram.extent();
            let primitive = overlay
                .layer
                .as_ref()
                .map(|layer| self.overlay_primitive(layer.image.clone(), extent));
            if let Some(primitive) = &primitive {
                primitive.validate()?;
            }
            self.replace_overlay_image(primitive)?;
            self.last_warnings.clear();
            self.commit_overlay(overlay);
        } else {
            trace!("no histogram yet; storing color indices only");
        }
        self.color_indices = indices;
        self.events
            .emit(&ArtistEvent::ColorIndicesChanged(&self.color_indices));
        self.draw();
        Ok(())
    }
}

/// Colors a `[x][y]` grid into an image whose rows follow y and columns x.
fn grid_to_rgba(
    grid: &Grid,
    integer_tags: bool,
    colormap: &ColorMapping,
    method: NormalizationMethod,
    target: ColormapTarget,
) -> PlotResult<LayerFrame> {
    let (nx, ny) = grid.shape();
    let mut values = Vec::with_capacity(nx * ny);
    for y in 0..ny {
        for x in 0..nx {
            values.push(grid.get(x, y).unwrap_or(f64::NAN));
        }
    }
    let outcome = map_values_to_colors(&values, integer_tags, colormap, method, target);
    let image = RgbaImage::from_pixels(nx, ny, outcome.colors)?;
    Ok(LayerFrame {
        image,
        method: outcome.method,
        log_floor: outcome.log_floor,
        warnings: outcome.warnings,
    })
}

impl Artist for Histogram2D {
    fn data(&self) -> &[DataPoint] {
        &self.data
    }

    fn set_data(&mut self, points: Vec<DataPoint>) -> PlotResult<()> {
        if points.is_empty() {
            trace!("ignoring empty histogram data update");
            return Ok(());
        }
        self.rebuild(points)?;
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
        {
            let mut canvas = self.canvas.borrow_mut();
            if let Some(handle) = self.histogram_handle {
                canvas.set_visible(handle, visible)?;
            }
            if let Some(handle) = self.overlay_handle {
                canvas.set_visible(handle, visible && self.overlay_visible)?;
            }
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
        self.refresh_overlay(indices)
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

impl fmt::Debug for Histogram2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Histogram2D")
            .field("points", &self.data.len())
            .field("bins", &self.bins)
            .field("visible", &self.visible)
            .field("overlay_statistic", &self.overlay_statistic)
            .field("histogram_handle", &self.histogram_handle)
            .field("overlay_handle", &self.overlay_handle)
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}
