use bounded_integer::bounded_integer;
use image::Rgb;

pub const PALETTE_LEN: usize = 0x20;

/// Palette RAM as seen from $3F00. The background entries of the sprite
/// palettes ($3F10, $3F14, $3F18, $3F1C) alias $3F00, $3F04, $3F08, $3F0C.
#[derive(Debug, Clone, Default)]
pub struct PaletteRam([u8; PALETTE_LEN]);

bounded_integer!(pub struct ColorCode { 0..0x40 });
bounded_integer!(pub struct TileColor { 0..4 });
bounded_integer!(pub struct PaletteIdx { 0..4 });

impl Default for PaletteIdx {
    fn default() -> Self { PaletteIdx::MIN }
}

impl PaletteRam {
    fn slot(idx: u8) -> usize {
        let idx = usize::from(idx) % PALETTE_LEN;
        if idx >= 0x10 && idx % 4 == 0 {
            idx - 0x10
        } else {
            idx
        }
    }

    pub fn write(&mut self, idx: u8, val: u8) {
        self.0[Self::slot(idx)] = val;
    }

    pub fn read(&self, idx: u8) -> u8 {
        self.0[Self::slot(idx)]
    }

    /// The 32 bytes as the PPU exposes them, aliases resolved.
    pub fn as_bytes(&self) -> [u8; PALETTE_LEN] {
        let mut bytes = [0; PALETTE_LEN];
        for (idx, byte) in bytes.iter_mut().enumerate() {
            *byte = self.read(idx as u8);
        }
        bytes
    }

    pub fn load(&mut self, bytes: &[u8; PALETTE_LEN]) {
        for (idx, &val) in bytes.iter().enumerate() {
            self.write(idx as u8, val);
        }
    }
}

impl ColorCode {
    pub fn as_rgb(self) -> Rgb<u8> { DEFAULT_PALETTE[usize::from(self.get())] }
}

const DEFAULT_PALETTE: [Rgb<u8>; 0x40] = [
    Rgb([84, 84, 84]),
    Rgb([0, 30, 116]),
    Rgb([8, 16, 144]),
    Rgb([48, 0, 136]),
    Rgb([68, 0, 100]),
    Rgb([92, 0, 48]),
    Rgb([84, 4, 0]),
    Rgb([60, 24, 0]),
    Rgb([32, 42, 0]),
    Rgb([8, 58, 0]),
    Rgb([0, 64, 0]),
    Rgb([0, 60, 0]),
    Rgb([0, 50, 60]),
    Rgb([0, 0, 0]),
    Rgb([0, 0, 0]),
    Rgb([0, 0, 0]),
    Rgb([152, 150, 152]),
    Rgb([8, 76, 196]),
    Rgb([48, 50, 236]),
    Rgb([92, 30, 228]),
    Rgb([136, 20, 176]),
    Rgb([160, 20, 100]),
    Rgb([152, 34, 32]),
    Rgb([120, 60, 0]),
    Rgb([84, 90, 0]),
    Rgb([40, 114, 0]),
    Rgb([8, 124, 0]),
    Rgb([0, 118, 40]),
    Rgb([0, 102, 120]),
    Rgb([0, 0, 0]),
    Rgb([0, 0, 0]),
    Rgb([0, 0, 0]),
    Rgb([236, 238, 236]),
    Rgb([76, 154, 236]),
    Rgb([120, 124, 236]),
    Rgb([176, 98, 236]),
    Rgb([228, 84, 236]),
    Rgb([236, 88, 180]),
    Rgb([236, 106, 100]),
    Rgb([212, 136, 32]),
    Rgb([160, 170, 0]),
    Rgb([116, 196, 0]),
    Rgb([76, 208, 32]),
    Rgb([56, 204, 108]),
    Rgb([56, 180, 204]),
    Rgb([60, 60, 60]),
    Rgb([0, 0, 0]),
    Rgb([0, 0, 0]),
    Rgb([236, 238, 236]),
    Rgb([168, 204, 236]),
    Rgb([188, 188, 236]),
    Rgb([212, 178, 236]),
    Rgb([236, 174, 236]),
    Rgb([236, 174, 212]),
    Rgb([236, 180, 176]),
    Rgb([228, 196, 144]),
    Rgb([204, 210, 120]),
    Rgb([180, 222, 120]),
    Rgb([168, 226, 144]),
    Rgb([152, 226, 180]),
    Rgb([160, 214, 228]),
    Rgb([160, 162, 160]),
    Rgb([0, 0, 0]),
    Rgb([0, 0, 0]),
];
