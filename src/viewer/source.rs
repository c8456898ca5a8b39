use crate::ppu::{Bank, Control, NTAddr, Nametable, PaletteIdx, TileCoord, TileRow, PALETTE_LEN, TILE_LEN};

/// Read-only view of the emulator's PPU state, polled on every refresh.
///
/// The viewer never writes through this interface and never caches what it
/// returns beyond a single refresh.
pub trait PpuSource {
    /// The physical bank a logical table is currently mapped to, or `None`
    /// if the mapper left it unset.
    fn mapping(&self, table: NTAddr) -> Option<Bank>;

    /// Whether the cartridge provides the two extra name table banks.
    fn has_extra_banks(&self) -> bool;

    fn bank(&self, bank: Bank) -> &Nametable;

    fn control(&self) -> Control;

    fn palette_ram(&self) -> [u8; PALETTE_LEN];

    /// The 16 bitplane bytes at `addr` in pattern memory. `refresh_addr` is
    /// the tile's offset within its name table, for mappers that switch CHR
    /// per tile.
    fn pattern_tile(&self, addr: u16, refresh_addr: u16) -> [u8; TILE_LEN];

    /// The palette group the PPU would use for tile `(x, y)` of `table`.
    /// Mappers with extended attributes answer here, so callers must not
    /// decode the attribute table themselves.
    fn attribute(&self, table: NTAddr, x: TileCoord, y: TileRow) -> PaletteIdx;

    fn scanline(&self) -> u16;

    /// Scroll position in the 512x480 space of all four tables.
    fn scroll(&self) -> (u16, u16);

    /// The bank to read `table` from. An unset table falls back to the
    /// mapping of its column (table 0 or 1), then to on-board RAM.
    fn resolve(&self, table: NTAddr) -> Bank {
        self.mapping(table)
            .or_else(|| self.mapping(table.column()))
            .unwrap_or_else(|| Bank::ciram(table.get()))
    }
}
