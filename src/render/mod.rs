mod image;
mod layer_stack;
mod primitives;
mod scene_canvas;

pub use image::RgbaImage;
pub use layer_stack::CanvasLayer;
pub use primitives::{CanvasHandle, Color, ImagePrimitive, PointSetPrimitive};
pub use scene_canvas::{SceneCanvas, SceneItem};

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::PlotResult;

/// Drawing surface the artists paint onto.
///
/// Artists issue retained-mode commands and keep the returned handles; the
/// surface decides when to actually paint. `request_redraw` only marks the
/// surface dirty.
pub trait Canvas {
    fn draw_point_set(&mut self, points: PointSetPrimitive) -> PlotResult<CanvasHandle>;
    fn update_point_set(
        &mut self,
        handle: CanvasHandle,
        points: PointSetPrimitive,
    ) -> PlotResult<()>;
    fn draw_image(&mut self, image: ImagePrimitive) -> PlotResult<CanvasHandle>;
    fn remove_image(&mut self, handle: CanvasHandle) -> PlotResult<()>;
    fn set_visible(&mut self, handle: CanvasHandle, visible: bool) -> PlotResult<()>;
    fn request_redraw(&mut self);
}

/// Canvas shared by every artist of one plot. Single-threaded by contract.
pub type SharedCanvas = Rc<RefCell<dyn Canvas>>;

/// Wraps a concrete canvas so callers keep typed access while artists get a
/// `SharedCanvas` clone.
#[must_use]
pub fn share<C: Canvas + 'static>(canvas: C) -> Rc<RefCell<C>> {
    Rc::new(RefCell::new(canvas))
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoRenderStats, CairoSceneRenderer};
