//! CPU raster surface.

use image::{ImageFormat, RgbaImage, imageops};
use kurbo::{Point, Rect};
use notecanvas_core::surface::{
    DEFAULT_SURFACE_HEIGHT, DEFAULT_SURFACE_WIDTH, Surface, SurfaceError, SurfaceResult,
};
use notecanvas_core::{LineCap, RasterSnapshot, SerializableColor, StrokeStyle};

/// Segments shorter than this are painted as their cap shape alone.
const DEGENERATE_LENGTH: f64 = 1e-9;

/// A flattened RGBA8 pixel buffer.
///
/// Pixels are tested at their centres with hard edges; there is no
/// anti-aliasing. Every paint call composites source-over, so overlapping
/// translucent segments darken where they meet.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    pixels: RgbaImage,
}

impl Default for RasterSurface {
    fn default() -> Self {
        Self::new(DEFAULT_SURFACE_WIDTH, DEFAULT_SURFACE_HEIGHT)
    }
}

impl RasterSurface {
    /// Create a fully transparent surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::new(width, height),
        }
    }

    /// Colour at pixel `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<SerializableColor> {
        self.pixels
            .get_pixel_checked(x, y)
            .map(|p| SerializableColor::new(p[0], p[1], p[2], p[3]))
    }

    /// Raw RGBA bytes, row-major.
    pub fn rgba(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    /// Encode the pixels as PNG.
    pub fn to_png(&self) -> SurfaceResult<Vec<u8>> {
        let mut png_data = Vec::new();
        {
            let mut encoder =
                png::Encoder::new(&mut png_data, self.pixels.width(), self.pixels.height());
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder
                .write_header()
                .map_err(|e| SurfaceError::Encode(e.to_string()))?;
            writer
                .write_image_data(self.pixels.as_raw())
                .map_err(|e| SurfaceError::Encode(e.to_string()))?;
            writer
                .finish()
                .map_err(|e| SurfaceError::Encode(e.to_string()))?;
        }
        Ok(png_data)
    }

    /// Composite `color` over pixel `(x, y)` with extra opacity `alpha`.
    fn blend(&mut self, x: u32, y: u32, color: SerializableColor, alpha: f64) {
        let src_a = (f64::from(color.a) / 255.0 * alpha).clamp(0.0, 1.0);
        if src_a <= 0.0 {
            return;
        }
        let dst = self.pixels.get_pixel_mut(x, y);
        let dst_a = f64::from(dst[3]) / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);
        let channel = |src: u8, dst: u8| {
            let premul = f64::from(src) * src_a + f64::from(dst) * dst_a * (1.0 - src_a);
            (premul / out_a).round().clamp(0.0, 255.0) as u8
        };
        dst[0] = channel(color.r, dst[0]);
        dst[1] = channel(color.g, dst[1]);
        dst[2] = channel(color.b, dst[2]);
        dst[3] = (out_a * 255.0).round() as u8;
    }

    /// Pixel index range whose centres may fall inside `rect`.
    fn pixel_span(&self, rect: Rect) -> Option<(u32, u32, u32, u32)> {
        let width = f64::from(self.pixels.width());
        let height = f64::from(self.pixels.height());
        let x0 = (rect.x0 - 0.5).ceil().max(0.0);
        let y0 = (rect.y0 - 0.5).ceil().max(0.0);
        let x1 = (rect.x1 - 0.5).floor().min(width - 1.0);
        let y1 = (rect.y1 - 0.5).floor().min(height - 1.0);
        if x1 < x0 || y1 < y0 {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }
}

/// Whether `p` lies inside the stroked outline of `from -> to`.
fn segment_covers(p: Point, from: Point, to: Point, half: f64, cap: LineCap) -> bool {
    let d = to - from;
    let len = d.hypot();
    let rel = p - from;

    if len < DEGENERATE_LENGTH {
        return match cap {
            LineCap::Round => rel.hypot() <= half,
            LineCap::Square => rel.x.abs() <= half && rel.y.abs() <= half,
            LineCap::Butt => false,
        };
    }

    let dir = d / len;
    let along = rel.dot(dir);
    let across = rel.cross(dir).abs();
    match cap {
        LineCap::Round => {
            let t = along.clamp(0.0, len);
            (rel - dir * t).hypot() <= half
        }
        LineCap::Square => across <= half && along >= -half && along <= len + half,
        LineCap::Butt => across <= half && (0.0..=len).contains(&along),
    }
}

impl Surface for RasterSurface {
    fn width(&self) -> u32 {
        self.pixels.width()
    }

    fn height(&self) -> u32 {
        self.pixels.height()
    }

    fn fill_rect(&mut self, rect: Rect, color: SerializableColor) {
        let Some((x0, y0, x1, y1)) = self.pixel_span(rect.abs()) else {
            return;
        };
        if color.a == 255 {
            let pixel = image::Rgba([color.r, color.g, color.b, color.a]);
            for y in y0..=y1 {
                for x in x0..=x1 {
                    self.pixels.put_pixel(x, y, pixel);
                }
            }
            return;
        }
        for y in y0..=y1 {
            for x in x0..=x1 {
                self.blend(x, y, color, 1.0);
            }
        }
    }

    fn stroke_segment(&mut self, from: Point, to: Point, style: &StrokeStyle) {
        if !(style.width > 0.0) || !(style.opacity > 0.0) {
            return;
        }
        let half = style.width / 2.0;
        // Square caps reach half * sqrt(2) at the corners.
        let reach = half * std::f64::consts::SQRT_2;
        let bounds = Rect::from_points(from, to).inflate(reach, reach);
        let Some((x0, y0, x1, y1)) = self.pixel_span(bounds) else {
            return;
        };
        for y in y0..=y1 {
            for x in x0..=x1 {
                let center = Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
                if segment_covers(center, from, to, half, style.cap) {
                    self.blend(x, y, style.color, style.opacity);
                }
            }
        }
    }

    fn draw_snapshot(&mut self, snapshot: &RasterSnapshot) -> SurfaceResult<()> {
        let png_data = snapshot.png_bytes().ok_or_else(|| {
            SurfaceError::Snapshot(format!("{:?} is not a PNG data URL", snapshot))
        })?;
        let decoded = image::load_from_memory_with_format(&png_data, ImageFormat::Png)
            .map_err(|e| SurfaceError::Decode(e.to_string()))?
            .to_rgba8();
        if decoded.dimensions() != self.pixels.dimensions() {
            log::debug!(
                "Drawing {}x{} snapshot onto {}x{} surface",
                decoded.width(),
                decoded.height(),
                self.pixels.width(),
                self.pixels.height()
            );
        }
        imageops::overlay(&mut self.pixels, &decoded, 0, 0);
        Ok(())
    }

    fn encode(&self) -> SurfaceResult<RasterSnapshot> {
        Ok(RasterSnapshot::from_png_bytes(&self.to_png()?))
    }

    fn blank(&self) -> Self {
        Self::new(self.pixels.width(), self.pixels.height())
    }
}
