use image::{Pixel, Rgb, RgbaImage};

use super::cache::{PaletteCache, PaletteGroup};
use crate::ppu::{PixelCoord, Point, TileCoord, TileData, TileRow, TILE_LEN};

/// Stands in for every tile while viewing attributes: each quadrant of the
/// tile shows one of the four colours of its palette group.
pub const ATTRIBUTE_VIEW_TILE: [u8; TILE_LEN] = [
    0x0F, 0x0F, 0x0F, 0x0F, 0x0F, 0x0F, 0x0F, 0x0F, //
    0x00, 0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF,
];

pub type TilePixels = [[Rgb<u8>; 8]; 8];

/// Decodes a tile's two bitplanes into display colours, indexed `[y][x]`.
pub fn decode_tile(chr: &[u8; TILE_LEN], group: PaletteGroup, palette: &PaletteCache) -> TilePixels {
    let tile = TileData::from(chr);
    let mut pixels = [[Rgb([0, 0, 0]); 8]; 8];
    for (y, row) in pixels.iter_mut().enumerate() {
        for (x, pixel) in row.iter_mut().enumerate() {
            let color = tile.get_pixel(Point {
                x: new_wrapping!(PixelCoord, x as u8),
                y: new_wrapping!(PixelCoord, y as u8),
            });
            *pixel = palette.color(color, group).as_rgb();
        }
    }
    pixels
}

/// Decodes a tile straight into its cell of a 256x240 table image.
pub fn draw_tile(
    dst: &mut RgbaImage,
    x: TileCoord,
    y: TileRow,
    chr: &[u8; TILE_LEN],
    group: PaletteGroup,
    palette: &PaletteCache,
) {
    let (ox, oy) = (u32::from(x.get()) * 8, u32::from(y.get()) * 8);
    for (py, row) in decode_tile(chr, group, palette).iter().enumerate() {
        for (px, pixel) in row.iter().enumerate() {
            dst.put_pixel(ox + px as u32, oy + py as u32, pixel.to_rgba());
        }
    }
}
