use image::{Pixel, Rgba};

use ntview::ppu::{NTAddr, PaletteIdx, TileColor};
use ntview::viewer::{decode_tile, PaletteCache, PaletteGroup, FORCED_GROUP, FORCED_PALETTE};
use ntview::{Bank, NameTableViewer, PpuSource, ViewerConfig, Vram};

const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

fn nt(n: u8) -> NTAddr { NTAddr::new(n).unwrap() }

fn group(n: u8) -> PaletteGroup { PaletteGroup::new(n).unwrap() }

fn ramp() -> [u8; 32] {
    let mut ram = [0; 32];
    for (i, byte) in ram.iter_mut().enumerate() {
        *byte = i as u8;
    }
    ram
}

fn eager() -> ViewerConfig {
    ViewerConfig {
        refresh_rate: 0,
        scanline: None,
        ..ViewerConfig::default()
    }
}

/// Writes a tile whose rows are all `low`/`high` into pattern memory.
fn put_tile(vram: &mut Vram, addr: u16, low: u8, high: u8) {
    for row in 0..8 {
        vram.set_ppu(addr + row, low);
        vram.set_ppu(addr + row + 8, high);
    }
}

#[test]
fn blank_tile_is_backdrop_of_its_group() {
    let mut palette = PaletteCache::new();
    palette.sync(&ramp());

    for g in 0..=8 {
        let expected = palette.color(TileColor::MIN, group(g)).as_rgb();
        let pixels = decode_tile(&[0; 16], group(g), &palette);
        assert!(pixels.iter().flatten().all(|&px| px == expected), "group {}", g);
    }
}

#[test]
fn forced_group_ignores_palette_ram() {
    let chr = [0x55, 0xAA, 0x0F, 0xF0, 0x33, 0xCC, 0x00, 0xFF, 0x0F, 0x0F, 0xF0, 0xF0, 0x3C, 0xC3, 0xFF, 0x00];

    let mut ramped = PaletteCache::new();
    ramped.sync(&ramp());
    let mut dark = PaletteCache::new();
    dark.sync(&[0x0F; 32]);

    let a = decode_tile(&chr, FORCED_GROUP, &ramped);
    let b = decode_tile(&chr, FORCED_GROUP, &dark);
    assert_eq!(a, b);

    let forced: Vec<_> = FORCED_PALETTE
        .iter()
        .map(|&code| ntview::ppu::ColorCode::new(code).unwrap().as_rgb())
        .collect();
    assert!(a.iter().flatten().all(|px| forced.contains(px)));
}

#[test]
fn black_backdrop_draws_black_tile() {
    let mut vram = Vram::new();
    vram.set_ppu(0x3F00, 0x0F);

    let mut viewer = NameTableViewer::new(eager());
    assert!(viewer.update(&vram, None, false));

    let table = viewer.table(nt(0));
    for y in 0..8 {
        for x in 0..8 {
            assert_eq!(*table.get_pixel(x, y), BLACK);
        }
    }
}

#[test]
fn attribute_view_shows_checkerboard_in_attribute_colours() {
    let mut vram = Vram::new();
    for (i, &code) in [0x0F, 0x16, 0x2A, 0x30, 0x01, 0x11, 0x21, 0x31].iter().enumerate() {
        vram.set_ppu(0x3F00 + i as u16, code);
    }
    // junk tiles everywhere, which the attribute view must hide
    put_tile(&mut vram, 0x0010, 0xA5, 0x5A);
    for addr in 0x2000..0x23C0 {
        vram.set_ppu(addr, 1);
    }
    // top-left 2x2 tiles use palette 1, the rest of the block palette 0
    vram.set_ppu(0x23C0, 0b01);

    let mut config = eager();
    config.attribute_view = true;
    let mut viewer = NameTableViewer::new(config);
    viewer.update(&vram, None, true);
    let table = viewer.table(nt(0));

    let palette = vram.palette_ram();
    let expect = |base: usize, x: u32, y: u32| {
        let idx = (x >= 4) as usize | ((y >= 4) as usize) << 1;
        ntview::ppu::ColorCode::new(palette[base + idx]).unwrap().as_rgb().to_rgba()
    };

    for y in 0..8 {
        for x in 0..8 {
            assert_eq!(*table.get_pixel(x, y), expect(4, x, y), "palette 1 at ({}, {})", x, y);
            assert_eq!(*table.get_pixel(16 + x, y), expect(0, x, y), "palette 0 at ({}, {})", x, y);
        }
    }
}

#[test]
fn hide_palette_draws_with_forced_entries() {
    let mut vram = Vram::new();
    put_tile(&mut vram, 0x0000, 0xFF, 0xFF);
    vram.set_ppu(0x3F03, 0x16);

    let mut config = eager();
    config.hide_palette = true;
    let mut viewer = NameTableViewer::new(config);
    viewer.update(&vram, None, false);

    let white = ntview::ppu::ColorCode::new(FORCED_PALETTE[3]).unwrap().as_rgb().to_rgba();
    assert_eq!(*viewer.table(nt(0)).get_pixel(3, 3), white);
}

#[test]
fn redecoding_unchanged_tables_is_stable() {
    let mut vram = Vram::new();
    put_tile(&mut vram, 0x0020, 0x81, 0x18);
    for addr in 0x2000..0x2400 {
        vram.set_ppu(addr, (addr % 3) as u8);
    }

    let mut viewer = NameTableViewer::new(eager());
    viewer.update(&vram, None, false);
    let first: Vec<_> = NTAddr::all().map(|t| viewer.table(t).clone()).collect();

    viewer.update(&vram, None, false);
    for table in NTAddr::all() {
        assert_eq!(viewer.decoded_cells(table), 32 * 30);
        assert_eq!(*viewer.table(table), first[table.index()]);
    }
}

#[test]
fn background_table_follows_control_register() {
    let mut vram = Vram::new();
    vram.set_ppu(0x3F01, 0x30);
    put_tile(&mut vram, 0x1000, 0xFF, 0x00);

    let mut viewer = NameTableViewer::new(eager());
    viewer.update(&vram, None, false);
    let left = *viewer.table(nt(0)).get_pixel(0, 0);

    vram.registers.set_control(0x10);
    viewer.update(&vram, None, false);
    let right = *viewer.table(nt(0)).get_pixel(0, 0);

    assert_ne!(left, right);
    assert_eq!(right, ntview::ppu::ColorCode::new(0x30).unwrap().as_rgb().to_rgba());
}

#[test]
fn unmapped_table_reads_its_column() {
    let mut vram = Vram::new();
    vram.set_ppu(0x3F01, 0x30);
    put_tile(&mut vram, 0x0010, 0xFF, 0x00);
    vram.set_ppu(0x2000, 1);
    vram.map(nt(3), None);
    assert_eq!(vram.resolve(nt(3)), Bank::Ciram0);

    let mut viewer = NameTableViewer::new(eager());
    viewer.update(&vram, None, false);

    assert_eq!(viewer.table(nt(3)).get_pixel(0, 0), viewer.table(nt(0)).get_pixel(0, 0));
    assert_ne!(viewer.table(nt(2)).get_pixel(0, 0), viewer.table(nt(0)).get_pixel(0, 0));
}

#[test]
fn attribute_lookup_uses_quadrants() {
    let mut vram = Vram::new();
    vram.set_ppu(0x23C9, 0b11_10_01_00);
    let attr = |x, y| vram.attribute(nt(0), ntview::ppu::TileCoord::new(x).unwrap(), ntview::ppu::TileRow::new(y).unwrap());

    assert_eq!(attr(4, 4), PaletteIdx::new(0).unwrap());
    assert_eq!(attr(7, 5), PaletteIdx::new(1).unwrap());
    assert_eq!(attr(5, 6), PaletteIdx::new(2).unwrap());
    assert_eq!(attr(6, 7), PaletteIdx::new(3).unwrap());
}
