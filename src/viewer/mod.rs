//! The name table viewer session.
//!
//! A [`NameTableViewer`] is refreshed from a timer through
//! [`NameTableViewer::update`]. Each pass that isn't skipped classifies the
//! current mirroring, then decodes all four logical tables through the
//! host's pattern tables and the viewer's palette cache.

mod cache;
mod config;
mod mirroring;
mod session;
mod source;
mod tile;

#[cfg(feature = "minifb")]
pub mod backend;

pub use cache::{PaletteCache, PaletteGroup, TableCache, FORCED_GROUP, FORCED_PALETTE};
pub use config::{ConfigError, ViewerConfig, MAX_REFRESH_RATE, MAX_SCANLINE};
pub use mirroring::classify;
pub use session::{AlreadyOpen, NameTableViewer, ViewerSlot, TABLE_HEIGHT, TABLE_WIDTH};
pub use source::PpuSource;
pub use tile::{decode_tile, draw_tile, TilePixels, ATTRIBUTE_VIEW_TILE};
