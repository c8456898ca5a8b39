//! A host-side model of PPU memory: name table banks and their mapping,
//! palette RAM, CHR and the registers the viewer cares about.

use bounded_integer::bounded_integer;
use log::debug;
use thiserror::Error;

use crate::ines::{self, Rom};
use crate::viewer::PpuSource;

pub mod loopy;
pub mod nametable;
pub mod palette;
pub mod pattern;
pub mod regs;

pub use nametable::{Bank, Mirroring, Nametable, NAMETABLE_LEN};
pub use palette::{ColorCode, PaletteIdx, PaletteRam, TileColor, PALETTE_LEN};
pub use pattern::{PTIdx, PatternTables, TileData, TILE_LEN};
pub use regs::{Control, Registers};

bounded_integer!(pub struct NTAddr { 0..4 });
bounded_integer!(pub struct TileCoord { 0..32 });
bounded_integer!(pub struct TileRow { 0..30 });
bounded_integer!(pub struct PixelCoord { 0..8 });

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Point<T> {
    pub x: T,
    pub y: T,
}

#[derive(Debug, Error)]
pub enum HostError {
    #[error("name table dump must be {expected} bytes, got {got}")]
    NametableDump { expected: usize, got: usize },
    #[error("palette dump must be 32 bytes, got {0}")]
    PaletteDump(usize),
}

pub struct Vram {
    ciram: [Nametable; 2],
    extra: Option<Box<[Nametable; 2]>>,
    mapping: [Option<Bank>; 4],
    pub palette: PaletteRam,
    patterns: PatternTables,
    pub registers: Registers,
    scanline: u16,
    chr_changed: bool,
}

impl Default for Vram {
    fn default() -> Self { Self::new() }
}

impl Vram {
    /// Two kilobytes of on-board name table RAM, horizontally mirrored, with
    /// blank CHR.
    pub fn new() -> Self {
        let mut vram = Vram {
            ciram: [Nametable::new(), Nametable::new()],
            extra: None,
            mapping: [None; 4],
            palette: PaletteRam::default(),
            patterns: PatternTables::new(),
            registers: Registers::default(),
            scanline: 0,
            chr_changed: false,
        };
        vram.set_mirroring(Mirroring::Horizontal);
        vram
    }

    /// Adds the cartridge's extra 2KB of name table RAM used by four-screen
    /// boards.
    pub fn with_extra_banks(mut self) -> Self {
        self.extra = Some(Box::new([Nametable::new(), Nametable::new()]));
        self
    }

    pub fn from_rom(rom: &Rom<'_>) -> Self {
        let mut vram = Vram::new();
        vram.patterns = PatternTables::from_chr(rom.chr);
        match rom.mirror() {
            ines::Mirroring::Horizontal => vram.set_mirroring(Mirroring::Horizontal),
            ines::Mirroring::Vertical => vram.set_mirroring(Mirroring::Vertical),
            ines::Mirroring::Ignore => {
                vram = vram.with_extra_banks();
                vram.set_mirroring(Mirroring::FourScreen);
            }
        }
        vram
    }

    /// Points the logical tables at physical banks for `mode`. Modes that need
    /// the extra banks leave those mappings alone when the board has none.
    pub fn set_mirroring(&mut self, mode: Mirroring) {
        use Bank::*;

        let extra = self.extra.is_some();
        let map = &mut self.mapping;
        match mode {
            Mirroring::Horizontal => *map = [Some(Ciram0), Some(Ciram0), Some(Ciram1), Some(Ciram1)],
            Mirroring::Vertical => *map = [Some(Ciram0), Some(Ciram1), Some(Ciram0), Some(Ciram1)],
            Mirroring::FourScreen => {
                map[0] = Some(Ciram0);
                map[1] = Some(Ciram1);
                if extra {
                    map[2] = Some(Extra0);
                    map[3] = Some(Extra1);
                }
            }
            Mirroring::SingleScreen0 => *map = [Some(Ciram0); 4],
            Mirroring::SingleScreen1 => *map = [Some(Ciram1); 4],
            Mirroring::SingleScreen2 if extra => *map = [Some(Extra0); 4],
            Mirroring::SingleScreen3 if extra => *map = [Some(Extra1); 4],
            Mirroring::SingleScreen2 | Mirroring::SingleScreen3 | Mirroring::None => (),
        }
        debug!("mirroring set to {:?}: {:?}", mode, self.mapping);
    }

    /// Maps a single logical table, as a mapper with nametable control would.
    pub fn map(&mut self, table: NTAddr, bank: Option<Bank>) {
        self.mapping[table.index()] = bank;
    }

    pub fn set_scanline(&mut self, scanline: u16) { self.scanline = scanline; }

    /// Returns whether CHR was written since the last call.
    pub fn take_chr_changed(&mut self) -> bool { std::mem::replace(&mut self.chr_changed, false) }

    pub fn get_ppu(&self, addr: u16) -> u8 {
        let addr = addr & 0x3FFF;
        match addr {
            0x0000..=0x1FFF => self.patterns.read(addr),
            0x2000..=0x3EFF => {
                let table = new_wrapping!(NTAddr, (addr >> 10) as u8);
                self.bank(self.resolve(table)).read(addr)
            }
            _ => self.palette.read(addr as u8),
        }
    }

    pub fn set_ppu(&mut self, addr: u16, val: u8) {
        let addr = addr & 0x3FFF;
        match addr {
            0x0000..=0x1FFF => {
                self.patterns.write(addr, val);
                self.chr_changed = true;
            }
            0x2000..=0x3EFF => {
                let table = new_wrapping!(NTAddr, (addr >> 10) as u8);
                let bank = self.resolve(table);
                self.bank_mut(bank).write(addr, val);
            }
            _ => self.palette.write(addr as u8, val),
        }
    }

    /// Loads a dump of name table RAM: 2KB of on-board RAM, optionally
    /// followed by 2KB for the extra banks.
    pub fn load_nametables(&mut self, dump: &[u8]) -> Result<(), HostError> {
        let expected = if self.extra.is_some() { 4 * NAMETABLE_LEN } else { 2 * NAMETABLE_LEN };
        if dump.len() != 2 * NAMETABLE_LEN && dump.len() != expected {
            return Err(HostError::NametableDump { expected, got: dump.len() });
        }
        let banks = [Bank::Ciram0, Bank::Ciram1, Bank::Extra0, Bank::Extra1];
        for (chunk, &bank) in dump.chunks_exact(NAMETABLE_LEN).zip(banks.iter()) {
            let mut bytes = [0; NAMETABLE_LEN];
            bytes.copy_from_slice(chunk);
            self.bank_mut(bank).load(&bytes);
        }
        Ok(())
    }

    pub fn load_palette(&mut self, dump: &[u8]) -> Result<(), HostError> {
        if dump.len() != PALETTE_LEN {
            return Err(HostError::PaletteDump(dump.len()));
        }
        let mut bytes = [0; PALETTE_LEN];
        bytes.copy_from_slice(dump);
        self.palette.load(&bytes);
        Ok(())
    }

    fn bank_mut(&mut self, bank: Bank) -> &mut Nametable {
        match (bank, &mut self.extra) {
            (Bank::Extra0, Some(extra)) => &mut extra[0],
            (Bank::Extra1, Some(extra)) => &mut extra[1],
            (Bank::Ciram1, _) | (Bank::Extra1, None) => &mut self.ciram[1],
            (Bank::Ciram0, _) | (Bank::Extra0, None) => &mut self.ciram[0],
        }
    }
}

impl PpuSource for Vram {
    fn mapping(&self, table: NTAddr) -> Option<Bank> { self.mapping[table.index()] }

    fn has_extra_banks(&self) -> bool { self.extra.is_some() }

    fn bank(&self, bank: Bank) -> &Nametable {
        match (bank, &self.extra) {
            (Bank::Extra0, Some(extra)) => &extra[0],
            (Bank::Extra1, Some(extra)) => &extra[1],
            (Bank::Ciram1, _) | (Bank::Extra1, None) => &self.ciram[1],
            (Bank::Ciram0, _) | (Bank::Extra0, None) => &self.ciram[0],
        }
    }

    fn control(&self) -> Control { self.registers.control }

    fn palette_ram(&self) -> [u8; PALETTE_LEN] { self.palette.as_bytes() }

    fn pattern_tile(&self, addr: u16, _refresh_addr: u16) -> [u8; TILE_LEN] { self.patterns.tile(addr) }

    fn attribute(&self, table: NTAddr, x: TileCoord, y: TileRow) -> PaletteIdx {
        new_wrapping!(PaletteIdx, self.bank(self.resolve(table)).attribute(x, y))
    }

    fn scanline(&self) -> u16 { self.scanline }

    fn scroll(&self) -> (u16, u16) { self.registers.addr.scroll_position() }
}
