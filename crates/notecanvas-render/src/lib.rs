//! NoteCanvas Render Library
//!
//! A CPU pixel buffer implementing the core [`Surface`](notecanvas_core::Surface)
//! trait. Snapshots are PNG data URLs.

mod raster;

pub use raster::RasterSurface;
