//! The drawing surface boundary.

use crate::color::SerializableColor;
use crate::snapshot::RasterSnapshot;
use crate::tools::StrokeStyle;
use kurbo::{Point, Rect};
use thiserror::Error;

/// Surface width in the reference deployment.
pub const DEFAULT_SURFACE_WIDTH: u32 = 800;
/// Surface height in the reference deployment.
pub const DEFAULT_SURFACE_HEIGHT: u32 = 1100;

/// Surface errors.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("Snapshot is not a decodable image: {0}")]
    Decode(String),
    #[error("Encoding failed: {0}")]
    Encode(String),
    #[error("Unsupported snapshot: {0}")]
    Snapshot(String),
}

/// Result type for surface operations.
pub type SurfaceResult<T> = Result<T, SurfaceError>;

/// A fixed-size 2D pixel surface.
///
/// Implementations hold a flattened raster; every call paints directly into
/// it. Coordinates are surface-local logical units.
pub trait Surface {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Fill a rectangle with an opaque or translucent colour.
    fn fill_rect(&mut self, rect: Rect, color: SerializableColor);

    /// Stroke the straight segment `from -> to`. A zero-length segment
    /// paints the cap shape (a dot for round caps).
    fn stroke_segment(&mut self, from: Point, to: Point, style: &StrokeStyle);

    /// Decode `snapshot` and draw it at the origin over current pixels.
    fn draw_snapshot(&mut self, snapshot: &RasterSnapshot) -> SurfaceResult<()>;

    /// Encode the current pixels.
    fn encode(&self) -> SurfaceResult<RasterSnapshot>;

    /// A fresh, fully transparent surface with the same dimensions.
    fn blank(&self) -> Self
    where
        Self: Sized;

    /// The whole surface as a rectangle.
    fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width()), f64::from(self.height()))
    }
}
