use bounded_integer::bounded_integer;

use crate::ppu::{Bank, ColorCode, Nametable, PaletteIdx, TileColor, NAMETABLE_LEN, PALETTE_LEN};

// Palette group a tile is drawn with: 0-3 background, 4-7 sprites, 8 forced.
bounded_integer!(pub struct PaletteGroup { 0..9 });

/// Draws with a fixed greyscale ramp regardless of palette RAM, so a table
/// stays visible while the game has every palette set to black.
pub const FORCED_GROUP: PaletteGroup = PaletteGroup::MAX;
pub const FORCED_PALETTE: [u8; 4] = [0x0F, 0x00, 0x10, 0x20];

const CACHE_LEN: usize = PALETTE_LEN + FORCED_PALETTE.len();

impl From<PaletteIdx> for PaletteGroup {
    fn from(idx: PaletteIdx) -> Self { new_wrapping!(PaletteGroup, idx.get()) }
}

/// Shadow of palette RAM followed by the forced entries.
#[derive(Debug, Clone)]
pub struct PaletteCache([u8; CACHE_LEN]);

impl Default for PaletteCache {
    fn default() -> Self { Self::new() }
}

impl PaletteCache {
    pub fn new() -> Self {
        let mut entries = [0; CACHE_LEN];
        entries[PALETTE_LEN..].copy_from_slice(&FORCED_PALETTE);
        PaletteCache(entries)
    }

    /// Copies in `ram` if it differs from the shadow. Returns whether it did.
    pub fn sync(&mut self, ram: &[u8; PALETTE_LEN]) -> bool {
        if self.0[..PALETTE_LEN] == ram[..] {
            return false;
        }
        self.0[..PALETTE_LEN].copy_from_slice(ram);
        true
    }

    pub fn color(&self, pixel: TileColor, group: PaletteGroup) -> ColorCode {
        new_wrapping!(ColorCode, self.0[usize::from(pixel.get() + group.get() * 4)])
    }
}

/// The bytes a table held when it was last decoded, and the bank it was
/// mapped to at the time.
#[derive(Clone)]
pub struct TableCache {
    bank: Option<Bank>,
    bytes: Box<[u8; NAMETABLE_LEN]>,
}

impl Default for TableCache {
    fn default() -> Self {
        TableCache {
            bank: None,
            bytes: Box::new([0; NAMETABLE_LEN]),
        }
    }
}

impl TableCache {
    /// Records the table's current mapping. Returns whether it moved since the
    /// previous pass.
    pub fn remap(&mut self, bank: Option<Bank>) -> bool {
        std::mem::replace(&mut self.bank, bank) != bank
    }

    pub fn is_stale(&self, table: &Nametable, ntaddr: u16, attraddr: u16) -> bool {
        table.read(ntaddr) != self.bytes[usize::from(ntaddr)]
            || table.read(attraddr) != self.bytes[usize::from(attraddr)]
    }

    pub fn store(&mut self, table: &Nametable, ntaddr: u16, attraddr: u16) {
        self.bytes[usize::from(ntaddr)] = table.read(ntaddr);
        self.bytes[usize::from(attraddr)] = table.read(attraddr);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sync_reports_changes_once() {
        let mut cache = PaletteCache::new();
        let mut ram = [0; PALETTE_LEN];
        assert!(!cache.sync(&ram));
        ram[5] = 0x21;
        assert!(cache.sync(&ram));
        assert!(!cache.sync(&ram));
        assert_eq!(cache.color(TileColor::MAX, FORCED_GROUP).get(), 0x20);
    }

    #[test]
    fn remap_tracks_the_previous_bank() {
        let mut cache = TableCache::default();
        assert!(cache.remap(Some(Bank::Ciram1)));
        assert!(!cache.remap(Some(Bank::Ciram1)));
        assert!(cache.remap(None));
    }
}
