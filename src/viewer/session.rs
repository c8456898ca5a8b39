use image::{ImageBuffer, Rgba, RgbaImage};
use log::{debug, trace};
use thiserror::Error;

use super::cache::{PaletteCache, PaletteGroup, TableCache, FORCED_GROUP};
use super::config::ViewerConfig;
use super::mirroring::classify;
use super::source::PpuSource;
use super::tile::{draw_tile, ATTRIBUTE_VIEW_TILE};
use crate::ppu::{Mirroring, NTAddr, Nametable, TileCoord, TileRow};

pub const TABLE_WIDTH: u32 = 256;
pub const TABLE_HEIGHT: u32 = 240;
const COLUMNS: u8 = 32;
const ROWS: u8 = 30;

/// Skip counter value on open, so the first refresh always draws.
const INITIAL_SKIP: u8 = 100;
const SCROLL_LINE: Rgba<u8> = Rgba([255, 255, 255, 255]);

type MirroringHook = Box<dyn FnMut(Mirroring, Mirroring)>;

/// One open name table viewer: its settings, caches and decoded images.
pub struct NameTableViewer {
    config: ViewerConfig,
    palette: PaletteCache,
    caches: [TableCache; 4],
    tables: [RgbaImage; 4],
    decoded: [usize; 4],
    mirroring: Mirroring,
    on_mirroring: Option<MirroringHook>,
    scroll: (u16, u16),
    skip: u8,
    toggles: (bool, bool),
    chr_changed: bool,
    redraw: bool,
}

#[derive(Debug, Error)]
#[error("name table viewer is already open")]
pub struct AlreadyOpen;

/// Holds the viewer while its window is open. Refreshes do nothing while
/// the slot is empty.
#[derive(Default)]
pub struct ViewerSlot {
    session: Option<NameTableViewer>,
}

fn blank_table() -> RgbaImage { ImageBuffer::new(TABLE_WIDTH, TABLE_HEIGHT) }

impl NameTableViewer {
    pub fn new(config: ViewerConfig) -> Self {
        let toggles = (config.attribute_view, config.hide_palette);
        NameTableViewer {
            config,
            palette: PaletteCache::new(),
            caches: Default::default(),
            tables: [blank_table(), blank_table(), blank_table(), blank_table()],
            decoded: [0; 4],
            mirroring: Mirroring::None,
            on_mirroring: None,
            scroll: (0, 0),
            skip: INITIAL_SKIP,
            toggles,
            chr_changed: false,
            redraw: true,
        }
    }

    pub fn config(&self) -> &ViewerConfig { &self.config }

    pub fn config_mut(&mut self) -> &mut ViewerConfig { &mut self.config }

    /// Called with `(old, new)` whenever a refresh sees the mirroring mode
    /// change.
    pub fn on_mirroring_change<F>(&mut self, hook: F)
    where
        F: FnMut(Mirroring, Mirroring) + 'static,
    {
        self.on_mirroring = Some(Box::new(hook));
    }

    /// The host calls this when CHR is rewritten or bank switched.
    pub fn notify_chr_changed(&mut self) { self.chr_changed = true; }

    pub fn mirroring(&self) -> Mirroring { self.mirroring }

    pub fn table(&self, table: NTAddr) -> &RgbaImage { &self.tables[table.index()] }

    /// How many tiles of `table` the last pass redrew.
    pub fn decoded_cells(&self, table: NTAddr) -> usize { self.decoded[table.index()] }

    /// Returns whether a repaint is due, clearing the flag.
    pub fn take_repaint(&mut self) -> bool { std::mem::replace(&mut self.redraw, false) }

    /// Runs one refresh tick. `scanline` is the scanline the host is calling
    /// from, or `None` for an unconditional refresh. Returns whether the
    /// tables were redrawn.
    pub fn update<S>(&mut self, src: &S, scanline: Option<u16>, draw_all: bool) -> bool
    where
        S: PpuSource + ?Sized,
    {
        if let (Some(line), Some(target)) = (scanline, self.config.scanline) {
            if line != target {
                return false;
            }
        }

        self.scroll = src.scroll();

        if self.skip < self.config.refresh_rate {
            self.skip += 1;
            return false;
        }
        self.skip = 0;

        let mut invalidate = draw_all || self.chr_changed;
        if self.palette.sync(&src.palette_ram()) {
            invalidate = true;
        }
        let toggles = (self.config.attribute_view, self.config.hide_palette);
        if toggles != self.toggles {
            trace!("display toggles changed, redrawing all tiles");
            self.toggles = toggles;
            invalidate = true;
        }

        self.resolve_mirroring(src);

        for table in NTAddr::all() {
            self.decoded[table.index()] = self.draw_table(src, table, invalidate);
        }

        self.chr_changed = false;
        self.redraw = true;
        true
    }

    /// A timer tick from a host that reports its own scanline.
    pub fn refresh<S>(&mut self, src: &S) -> bool
    where
        S: PpuSource + ?Sized,
    {
        self.update(src, Some(src.scanline()), false)
    }

    fn resolve_mirroring<S>(&mut self, src: &S)
    where
        S: PpuSource + ?Sized,
    {
        let mut mapping = [None; 4];
        for table in NTAddr::all() {
            mapping[table.index()] = src.mapping(table);
        }

        let mode = classify(&mapping, src.has_extra_banks());
        if mode != self.mirroring {
            debug!("mirroring changed from {:?} to {:?}", self.mirroring, mode);
            if let Some(hook) = self.on_mirroring.as_mut() {
                hook(self.mirroring, mode);
            }
            self.mirroring = mode;
        }
    }

    fn draw_table<S>(&mut self, src: &S, table: NTAddr, invalidate: bool) -> usize
    where
        S: PpuSource + ?Sized,
    {
        let n = table.index();
        let mapped = src.mapping(table);
        let data: &Nametable = src.bank(src.resolve(table));
        let pattern_base = src.control().bg_table.base();

        let cache = &mut self.caches[n];
        let mut invalid = invalidate;
        if cache.remap(mapped) {
            invalid = true;
        }
        if !self.config.honor_cache {
            invalid = true;
        }

        let mut decoded = 0;
        for row in 0..ROWS {
            let y = new_wrapping!(TileRow, row);
            for col in 0..COLUMNS {
                let x = new_wrapping!(TileCoord, col);
                let ntaddr = u16::from(row) * 32 + u16::from(col);
                let attraddr = Nametable::attr_addr(x, y);
                if !invalid && !cache.is_stale(data, ntaddr, attraddr) {
                    continue;
                }

                let group = if self.config.hide_palette {
                    FORCED_GROUP
                } else {
                    PaletteGroup::from(src.attribute(table, x, y))
                };

                let chr = if self.config.attribute_view {
                    ATTRIBUTE_VIEW_TILE
                } else {
                    let tile = u16::from(data.read(ntaddr));
                    src.pattern_tile(pattern_base + tile * 16, ntaddr)
                };

                draw_tile(&mut self.tables[n], x, y, &chr, group, &self.palette);
                cache.store(data, ntaddr, attraddr);
                decoded += 1;
            }
        }
        trace!("table {} redrew {} tiles", n, decoded);
        decoded
    }

    /// All four tables laid out 2x2 in a 512x480 image, with the scroll
    /// lines drawn over it if enabled.
    pub fn compose(&self) -> RgbaImage {
        let mut out = ImageBuffer::new(TABLE_WIDTH * 2, TABLE_HEIGHT * 2);
        for (n, table) in self.tables.iter().enumerate() {
            let (ox, oy) = ((n as u32 % 2) * TABLE_WIDTH, (n as u32 / 2) * TABLE_HEIGHT);
            for (x, y, pixel) in table.enumerate_pixels() {
                out.put_pixel(ox + x, oy + y, *pixel);
            }
        }

        if self.config.show_scroll_lines {
            let x = u32::from(self.scroll.0) % (TABLE_WIDTH * 2);
            let y = u32::from(self.scroll.1) % (TABLE_HEIGHT * 2);
            for row in 0..TABLE_HEIGHT * 2 {
                out.put_pixel(x, row, SCROLL_LINE);
            }
            for col in 0..TABLE_WIDTH * 2 {
                out.put_pixel(col, y, SCROLL_LINE);
            }
        }
        out
    }
}

impl ViewerSlot {
    pub fn open(&mut self, config: ViewerConfig) -> Result<&mut NameTableViewer, AlreadyOpen> {
        if self.session.is_some() {
            return Err(AlreadyOpen);
        }
        debug!("opening name table viewer");
        Ok(self.session.insert(NameTableViewer::new(config)))
    }

    pub fn close(&mut self) -> Option<NameTableViewer> {
        let session = self.session.take();
        if session.is_some() {
            debug!("closing name table viewer");
        }
        session
    }

    pub fn is_open(&self) -> bool { self.session.is_some() }

    pub fn get(&self) -> Option<&NameTableViewer> { self.session.as_ref() }

    pub fn get_mut(&mut self) -> Option<&mut NameTableViewer> { self.session.as_mut() }

    pub fn update<S>(&mut self, src: &S, scanline: Option<u16>, draw_all: bool) -> bool
    where
        S: PpuSource + ?Sized,
    {
        match self.session.as_mut() {
            Some(viewer) => viewer.update(src, scanline, draw_all),
            None => false,
        }
    }
}
