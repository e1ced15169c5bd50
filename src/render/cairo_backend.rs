use cairo::{Context, Filter, Format, ImageSurface};
use std::f64::consts::PI;

use crate::core::{DataPoint, PlotTransform, Viewport};
use crate::error::{PlotError, PlotResult};
use crate::render::{Color, ImagePrimitive, PointSetPrimitive, SceneCanvas, SceneItem};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub points_drawn: usize,
    pub images_drawn: usize,
}

/// Paints a `SceneCanvas` with Cairo.
///
/// Supports offscreen rendering into an owned image surface through `render`
/// and in-place rendering on an external context (for example a GTK
/// `DrawingArea` callback) through `render_on_cairo_context`.
#[derive(Debug)]
pub struct CairoSceneRenderer {
    surface: ImageSurface,
    clear_color: Color,
    last_stats: CairoRenderStats,
}

impl CairoSceneRenderer {
    pub fn new(width: i32, height: i32) -> PlotResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(PlotError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            clear_color: Color::rgb(1.0, 1.0, 1.0),
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    pub fn set_clear_color(&mut self, color: Color) -> PlotResult<()> {
        color.validate()?;
        self.clear_color = color;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    /// Paints `scene` into the owned surface.
    pub fn render(&mut self, scene: &SceneCanvas) -> PlotResult<()> {
        let viewport = Viewport::new(
            self.surface.width().max(0) as u32,
            self.surface.height().max(0) as u32,
        );
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_on_cairo_context(&context, scene, viewport)
    }

    pub fn render_on_cairo_context(
        &mut self,
        context: &Context,
        scene: &SceneCanvas,
        viewport: Viewport,
    ) -> PlotResult<()> {
        apply_color(context, self.clear_color);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        let mut stats = CairoRenderStats::default();
        let Some(extent) = scene.data_extent() else {
            self.last_stats = stats;
            return Ok(());
        };
        let transform = PlotTransform::new(extent, viewport)?;

        for (_, item) in scene.paint_order() {
            match item {
                SceneItem::Image(image) => {
                    paint_image(context, image, transform)?;
                    stats.images_drawn += 1;
                }
                SceneItem::PointSet(points) => {
                    stats.points_drawn += paint_points(context, points, transform)?;
                }
            }
        }

        self.last_stats = stats;
        Ok(())
    }
}

fn paint_image(
    context: &Context,
    image: &ImagePrimitive,
    transform: PlotTransform,
) -> PlotResult<()> {
    let raster = &image.image;
    let width = raster.width() as i32;
    let height = raster.height() as i32;
    let stride = Format::ARgb32
        .stride_for_width(raster.width() as u32)
        .map_err(|err| map_backend_error("failed to compute image stride", err))?;

    // cairo rows run top to bottom, the raster's row 0 is the bottom row
    let mut data = vec![0_u8; stride as usize * raster.height()];
    for row in 0..raster.height() {
        let source_row = raster.height() - 1 - row;
        for column in 0..raster.width() {
            let color = raster
                .pixel(source_row, column)
                .unwrap_or(Color::TRANSPARENT);
            let offset = row * stride as usize + column * 4;
            data[offset..offset + 4].copy_from_slice(&premultiplied_argb(color).to_ne_bytes());
        }
    }
    let surface = ImageSurface::create_for_data(data, Format::ARgb32, width, height, stride)
        .map_err(|err| map_backend_error("failed to create image surface", err))?;

    let (left, top) =
        transform.data_to_pixel(DataPoint::new(image.extent.x_min, image.extent.y_max))?;
    let (right, bottom) =
        transform.data_to_pixel(DataPoint::new(image.extent.x_max, image.extent.y_min))?;

    context
        .save()
        .map_err(|err| map_backend_error("failed to save cairo state", err))?;
    context.translate(left, top);
    context.scale(
        (right - left) / f64::from(width),
        (bottom - top) / f64::from(height),
    );
    context
        .set_source_surface(&surface, 0.0, 0.0)
        .map_err(|err| map_backend_error("failed to set image source", err))?;
    let filter = match image.interpolation.as_str() {
        "nearest" | "none" => Filter::Nearest,
        _ => Filter::Bilinear,
    };
    context.source().set_filter(filter);
    context
        .paint_with_alpha(image.alpha)
        .map_err(|err| map_backend_error("failed to paint image", err))?;
    context
        .restore()
        .map_err(|err| map_backend_error("failed to restore cairo state", err))
}

fn paint_points(
    context: &Context,
    points: &PointSetPrimitive,
    transform: PlotTransform,
) -> PlotResult<usize> {
    let mut drawn = 0;
    for ((point, color), size) in points.points.iter().zip(&points.colors).zip(&points.sizes) {
        if !point.is_finite() || color.is_transparent() {
            continue;
        }
        let (x, y) = transform.data_to_pixel(*point)?;
        apply_color(context, *color);
        context.new_sub_path();
        context.arc(x, y, size.sqrt() * 0.5, 0.0, 2.0 * PI);
        context
            .fill()
            .map_err(|err| map_backend_error("failed to fill marker", err))?;
        drawn += 1;
    }
    Ok(drawn)
}

fn premultiplied_argb(color: Color) -> u32 {
    let channel = |value: f64| (value.clamp(0.0, 1.0) * 255.0).round() as u32;
    let alpha = color.alpha;
    (channel(alpha) << 24)
        | (channel(color.red * alpha) << 16)
        | (channel(color.green * alpha) << 8)
        | channel(color.blue * alpha)
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> PlotError {
    PlotError::InvalidData(format!("{prefix}: {err}"))
}
