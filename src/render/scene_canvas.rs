use indexmap::IndexMap;
use tracing::trace;

use crate::core::Extent;
use crate::error::{PlotError, PlotResult};
use crate::render::{Canvas, CanvasHandle, CanvasLayer, ImagePrimitive, PointSetPrimitive};

/// One retained item of a `SceneCanvas`.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneItem {
    PointSet(PointSetPrimitive),
    Image(ImagePrimitive),
}

impl SceneItem {
    #[must_use]
    pub fn layer(&self) -> CanvasLayer {
        match self {
            Self::PointSet(_) => CanvasLayer::Points,
            Self::Image(image) => image.layer,
        }
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        match self {
            Self::PointSet(points) => points.visible,
            Self::Image(image) => image.visible,
        }
    }

    #[must_use]
    pub fn extent(&self) -> Option<Extent> {
        match self {
            Self::PointSet(points) => Extent::from_points(&points.points),
            Self::Image(image) => Some(image.extent),
        }
    }
}

/// Headless retained canvas used by tests, snapshots and offscreen painting.
///
/// Every command is validated before it is stored, so invalid geometry fails
/// at the artist call site instead of inside a paint backend.
#[derive(Debug, Default)]
pub struct SceneCanvas {
    next_handle: u64,
    items: IndexMap<CanvasHandle, SceneItem>,
    redraw_requests: usize,
    dirty: bool,
}

impl SceneCanvas {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn item(&self, handle: CanvasHandle) -> Option<&SceneItem> {
        self.items.get(&handle)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn images(&self) -> impl Iterator<Item = (CanvasHandle, &ImagePrimitive)> + '_ {
        self.items.iter().filter_map(|(handle, item)| match item {
            SceneItem::Image(image) => Some((*handle, image)),
            SceneItem::PointSet(_) => None,
        })
    }

    pub fn point_sets(&self) -> impl Iterator<Item = (CanvasHandle, &PointSetPrimitive)> + '_ {
        self.items.iter().filter_map(|(handle, item)| match item {
            SceneItem::PointSet(points) => Some((*handle, points)),
            SceneItem::Image(_) => None,
        })
    }

    /// Visible items bottom first; equal layers keep insertion order.
    #[must_use]
    pub fn paint_order(&self) -> Vec<(CanvasHandle, &SceneItem)> {
        let mut visible: Vec<(CanvasHandle, &SceneItem)> = self
            .items
            .iter()
            .filter(|(_, item)| item.is_visible())
            .map(|(handle, item)| (*handle, item))
            .collect();
        visible.sort_by_key(|(_, item)| item.layer().z_order());
        visible
    }

    /// Union of the extents of all visible items.
    #[must_use]
    pub fn data_extent(&self) -> Option<Extent> {
        self.paint_order()
            .into_iter()
            .filter_map(|(_, item)| item.extent())
            .reduce(Extent::union)
    }

    /// Total number of redraw requests received so far.
    #[must_use]
    pub fn redraw_requests(&self) -> usize {
        self.redraw_requests
    }

    /// Returns whether a redraw was requested since the last call and clears
    /// the flag.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    fn allocate(&mut self, item: SceneItem) -> CanvasHandle {
        self.next_handle += 1;
        let handle = CanvasHandle(self.next_handle);
        trace!(handle = handle.0, layer = ?item.layer(), "canvas item added");
        self.items.insert(handle, item);
        handle
    }

    fn missing(handle: CanvasHandle) -> PlotError {
        PlotError::InvalidData(format!("unknown canvas handle {}", handle.0))
    }
}

impl Canvas for SceneCanvas {
    fn draw_point_set(&mut self, points: PointSetPrimitive) -> PlotResult<CanvasHandle> {
        points.validate()?;
        Ok(self.allocate(SceneItem::PointSet(points)))
    }

    fn update_point_set(
        &mut self,
        handle: CanvasHandle,
        points: PointSetPrimitive,
    ) -> PlotResult<()> {
        points.validate()?;
        match self.items.get_mut(&handle) {
            Some(SceneItem::PointSet(existing)) => {
                *existing = points;
                Ok(())
            }
            Some(SceneItem::Image(_)) => Err(PlotError::InvalidData(format!(
                "canvas handle {} is an image, not a point set",
                handle.0
            ))),
            None => Err(Self::missing(handle)),
        }
    }

    fn draw_image(&mut self, image: ImagePrimitive) -> PlotResult<CanvasHandle> {
        image.validate()?;
        Ok(self.allocate(SceneItem::Image(image)))
    }

    fn remove_image(&mut self, handle: CanvasHandle) -> PlotResult<()> {
        match self.items.get(&handle) {
            Some(SceneItem::Image(_)) => {
                self.items.shift_remove(&handle);
                Ok(())
            }
            Some(SceneItem::PointSet(_)) => Err(PlotError::InvalidData(format!(
                "canvas handle {} is a point set, not an image",
                handle.0
            ))),
            None => Err(Self::missing(handle)),
        }
    }

    fn set_visible(&mut self, handle: CanvasHandle, visible: bool) -> PlotResult<()> {
        match self.items.get_mut(&handle) {
            Some(SceneItem::PointSet(points)) => points.visible = visible,
            Some(SceneItem::Image(image)) => image.visible = visible,
            None => return Err(Self::missing(handle)),
        }
        Ok(())
    }

    fn request_redraw(&mut self) {
        self.redraw_requests += 1;
        self.dirty = true;
    }
}
