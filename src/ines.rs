use std::fmt::{self, Display, Formatter};

use log::debug;
use thiserror::Error;

pub const HEADER_LEN: usize = 16;
pub const TRAINER_LEN: usize = 512;
pub const PRG_BANK_SIZE: usize = 0x4000;
pub const CHR_BANK_SIZE: usize = 0x2000;

pub struct Rom<'a> {
    pub header: Header,
    pub prg: &'a [u8],
    pub chr: &'a [u8],
}

#[derive(Debug, Clone, Copy)]
pub struct Header {
    prg_size: u32,
    chr_size: u32,
    flags6: Flags6,
    flags7: Flags7,
    region: Region,
    mapper: Mapper,
    version: Version,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mirroring {
    Horizontal,
    Vertical,
    /// Four-screen: the board carries its own extra name table RAM.
    Ignore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    NTSC,
    PAL,
}

#[derive(Debug, Clone, Copy)]
pub struct Flags6 {
    mirror: Mirroring,
    battery: bool,
    trainer: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct Flags7 {
    vs_unisystem: bool,
    play_choice: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Version {
    Archaic,
    INes,
    Nes2_0,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mapper(pub u16);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RomError {
    #[error("not an iNES image")]
    BadMagic,
    #[error("ROM truncated: need {needed} bytes, have {have}")]
    Truncated { needed: usize, have: usize },
}

impl<'a> Rom<'a> {
    pub fn parse(rom: &'a [u8]) -> Result<Self, RomError> {
        let header = Header::parse(rom)?;

        let rom_start = HEADER_LEN + if header.flags6.trainer { TRAINER_LEN } else { 0 };
        let prg_end = rom_start + header.prg_size as usize;
        let chr_end = prg_end + header.chr_size as usize;
        if rom.len() < chr_end {
            return Err(RomError::Truncated {
                needed: chr_end,
                have: rom.len(),
            });
        }
        let prg = &rom[rom_start..prg_end];
        let chr = &rom[prg_end..chr_end];
        Ok(Self { header, prg, chr })
    }

    pub fn version(&self) -> Version { self.header.version }

    pub fn mapper(&self) -> Mapper { self.header.mapper }

    pub fn mirror(&self) -> Mirroring { self.header.flags6.mirror }

    pub fn region(&self) -> Region { self.header.region }

    /// Boards without CHR ROM use 8KB of CHR RAM instead.
    pub fn has_chr_ram(&self) -> bool { self.chr.is_empty() }
}

impl Header {
    pub fn parse(rom: &[u8]) -> Result<Header, RomError> {
        if rom.len() < HEADER_LEN {
            return Err(RomError::Truncated {
                needed: HEADER_LEN,
                have: rom.len(),
            });
        }
        if &rom[0..4] != b"NES\x1a" {
            return Err(RomError::BadMagic);
        }
        let prg_size = rom[4] as u32 * PRG_BANK_SIZE as u32;
        let chr_size = rom[5] as u32 * CHR_BANK_SIZE as u32;
        let flags6 = Flags6::from(rom[6]);
        let flags7 = Flags7::from(rom[7]);
        let region = if rom[9] & 1 == 0 {
            Region::NTSC
        } else {
            Region::PAL
        };

        let version = if rom[7] & 0x0C == 0x08 {
            Version::Nes2_0
        } else if rom[7] & 0x0C == 0x00 && rom[12..16] == [0; 4] {
            Version::INes
        } else {
            Version::Archaic
        };

        // Archaic headers have junk in byte 7, so only the low nibble is used.
        let mapper = match version {
            Version::Archaic => Mapper(u16::from(rom[6] >> 4)),
            Version::INes => Mapper(u16::from(rom[6] >> 4 | rom[7] & 0xF0)),
            Version::Nes2_0 => Mapper(u16::from(rom[6] >> 4 | rom[7] & 0xF0) | u16::from(rom[8] & 0x0F) << 8),
        };

        debug!(
            "prg: {} [{:#X}] ({} banks), chr: {} [{:#X}] ({} banks), {:?} {}",
            prg_size, prg_size, rom[4], chr_size, chr_size, rom[5], version, mapper
        );

        Ok(Self {
            prg_size,
            chr_size,
            flags6,
            flags7,
            region,
            version,
            mapper,
        })
    }

    pub fn has_battery(&self) -> bool { self.flags6.battery }

    pub fn is_play_choice(&self) -> bool { self.flags7.play_choice }

    pub fn is_vs_unisystem(&self) -> bool { self.flags7.vs_unisystem }
}

impl From<u8> for Flags6 {
    fn from(bits: u8) -> Self {
        let mirror = if bits & 8 != 0 {
            Mirroring::Ignore
        } else if bits & 1 == 0 {
            Mirroring::Horizontal
        } else {
            Mirroring::Vertical
        };
        let battery = bits & 2 != 0;
        let trainer = bits & 4 != 0;
        Self {
            mirror,
            battery,
            trainer,
        }
    }
}

impl From<u8> for Flags7 {
    fn from(bits: u8) -> Self {
        let vs_unisystem = bits & 1 != 0;
        let play_choice = bits & 2 != 0;
        Self {
            vs_unisystem,
            play_choice,
        }
    }
}

impl Display for Mapper {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "mapper {:03}", self.0)
    }
}
