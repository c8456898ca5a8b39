use ntview::ines::{Mapper, Mirroring, Version, CHR_BANK_SIZE, PRG_BANK_SIZE};
use ntview::viewer::classify;
use ntview::ppu::NTAddr;
use ntview::{PpuSource, Rom, RomError, Vram};

fn image(flags6: u8, flags7: u8, prg_banks: u8, chr_banks: u8) -> Vec<u8> {
    let mut rom = b"NES\x1a".to_vec();
    rom.extend_from_slice(&[prg_banks, chr_banks, flags6, flags7]);
    rom.resize(16, 0);
    rom.resize(16 + prg_banks as usize * PRG_BANK_SIZE, 0xEA);
    for i in 0..chr_banks as usize * CHR_BANK_SIZE {
        rom.push(i as u8);
    }
    rom
}

#[test]
fn parses_banks_and_flags() {
    let bytes = image(0x11, 0x00, 1, 1);
    let rom = Rom::parse(&bytes).unwrap();

    assert_eq!(rom.version(), Version::INes);
    assert_eq!(rom.mapper(), Mapper(1));
    assert_eq!(rom.mapper().to_string(), "mapper 001");
    assert_eq!(rom.mirror(), Mirroring::Vertical);
    assert_eq!(rom.prg.len(), PRG_BANK_SIZE);
    assert_eq!(rom.chr.len(), CHR_BANK_SIZE);
    assert_eq!(rom.chr[0x11], 0x11);
    assert!(!rom.has_chr_ram());
    assert!(!rom.header.has_battery());
}

#[test]
fn chr_rom_becomes_pattern_memory() {
    let bytes = image(0x01, 0x00, 1, 1);
    let rom = Rom::parse(&bytes).unwrap();
    let vram = Vram::from_rom(&rom);

    assert_eq!(vram.get_ppu(0x0123), 0x23);
    assert_eq!(vram.mapping(NTAddr::new(1).unwrap()), Some(ntview::Bank::Ciram1));
    assert_eq!(vram.mapping(NTAddr::new(2).unwrap()), Some(ntview::Bank::Ciram0));
}

#[test]
fn four_screen_boards_get_extra_banks() {
    let bytes = image(0x08, 0x00, 1, 0);
    let rom = Rom::parse(&bytes).unwrap();
    assert_eq!(rom.mirror(), Mirroring::Ignore);
    assert!(rom.has_chr_ram());

    let vram = Vram::from_rom(&rom);
    assert!(vram.has_extra_banks());
    let map: Vec<_> = NTAddr::all().map(|t| vram.mapping(t)).collect();
    let map = [map[0], map[1], map[2], map[3]];
    assert_eq!(classify(&map, true), ntview::Mirroring::FourScreen);
}

#[test]
fn rejects_bad_images() {
    assert_eq!(Rom::parse(b"NES").err(), Some(RomError::Truncated { needed: 16, have: 3 }));

    let mut bytes = image(0x00, 0x00, 1, 1);
    bytes[3] = 0;
    assert_eq!(Rom::parse(&bytes).err(), Some(RomError::BadMagic));

    let bytes = image(0x00, 0x00, 1, 1);
    let short = &bytes[..bytes.len() - 1];
    assert_eq!(
        Rom::parse(short).err(),
        Some(RomError::Truncated {
            needed: 16 + PRG_BANK_SIZE + CHR_BANK_SIZE,
            have: 16 + PRG_BANK_SIZE + CHR_BANK_SIZE - 1,
        })
    );
}
