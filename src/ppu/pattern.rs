use std::convert::TryFrom;

use super::palette::TileColor;
use super::{PixelCoord, Point};

pub const PATTERN_LEN: usize = 0x2000;
pub const TILE_LEN: usize = 16;

/// Both pattern tables, $0000-$1FFF of PPU address space.
#[derive(Clone)]
pub struct PatternTables(Box<[u8; PATTERN_LEN]>);

/// One tile's two bitplanes, each row packed into a byte of a `u64`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TileData {
    front: u64,
    back: u64,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PTIdx {
    Left,
    Right,
}

impl Default for PTIdx {
    fn default() -> Self { PTIdx::Left }
}

impl PTIdx {
    pub fn base(self) -> u16 {
        match self {
            PTIdx::Left => 0x0000,
            PTIdx::Right => 0x1000,
        }
    }
}

impl Default for PatternTables {
    fn default() -> Self { Self::new() }
}

impl PatternTables {
    pub fn new() -> Self { PatternTables(Box::new([0; PATTERN_LEN])) }

    /// Uses the first 8KB of `chr`. Shorter images are zero padded, which is
    /// what an empty CHR RAM looks like.
    pub fn from_chr(chr: &[u8]) -> Self {
        let mut tables = Self::new();
        let len = chr.len().min(PATTERN_LEN);
        tables.0[..len].copy_from_slice(&chr[..len]);
        tables
    }

    pub fn read(&self, addr: u16) -> u8 { self.0[usize::from(addr) % PATTERN_LEN] }

    pub fn write(&mut self, addr: u16, val: u8) { self.0[usize::from(addr) % PATTERN_LEN] = val; }

    /// The 16 bytes starting at `addr`, wrapping at the end of CHR.
    pub fn tile(&self, addr: u16) -> [u8; TILE_LEN] {
        let start = usize::from(addr) % PATTERN_LEN;
        match <[u8; TILE_LEN]>::try_from(self.0.get(start..start + TILE_LEN).unwrap_or(&[])) {
            Ok(tile) => tile,
            Err(_) => {
                let mut tile = [0; TILE_LEN];
                for (i, byte) in tile.iter_mut().enumerate() {
                    *byte = self.read(addr.wrapping_add(i as u16));
                }
                tile
            }
        }
    }
}

impl TileData {
    /// Pixel values are read most significant bit first, so column 0 is bit 7
    /// of each row byte.
    pub fn get_pixel(&self, pix: Point<PixelCoord>) -> TileColor {
        let bit = (7 - pix.x.get()) + pix.y.get() * 8;
        let lsb = (self.front & 1 << bit != 0) as u8;
        let msb = (self.back & 1 << bit != 0) as u8;
        new_wrapping!(TileColor, lsb | (msb << 1))
    }
}

impl From<&[u8; TILE_LEN]> for TileData {
    fn from(chr: &[u8; TILE_LEN]) -> TileData {
        let val = u128::from_le_bytes(*chr);
        let front = (val & ((1 << 64) - 1)) as u64;
        let back = (val >> 64) as u64;
        TileData { front, back }
    }
}
