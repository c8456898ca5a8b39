//! Name table viewer for the NES PPU.
//!
//! The [`viewer`] module holds the viewer session: it polls a host PPU through
//! the read-only [`viewer::PpuSource`] interface and decodes the four logical
//! name tables into RGBA images. The [`ppu`] module is a small host-side PPU
//! memory model implementing that interface.

macro_rules! new_wrapping {
    ($t:ty, $val:expr $(,)*) => {{
        debug_assert_eq!(<$t>::MIN_VALUE, 0);
        <$t>::new($val % (<$t>::MAX_VALUE + 1)).unwrap()
    }};
}

pub mod ines;
pub mod ppu;
pub mod viewer;

pub use ines::{Header, Rom, RomError};
pub use ppu::{Bank, HostError, Mirroring, Vram};
pub use viewer::{AlreadyOpen, NameTableViewer, PpuSource, ViewerConfig, ViewerSlot};
