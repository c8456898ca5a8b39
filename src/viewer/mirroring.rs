use crate::ppu::{Bank, Mirroring};

/// Works out the mirroring mode from which banks the four logical tables
/// point at. Mappers can remap tables at any time, so this looks at the
/// mapping itself rather than any header or mapper setting.
pub fn classify(mapping: &[Option<Bank>; 4], has_extra: bool) -> Mirroring {
    let mut mode = Mirroring::None;
    if mapping[0] == mapping[1] {
        mode = Mirroring::Horizontal;
    }
    if mapping[0] == mapping[2] {
        mode = Mirroring::Vertical;
    }
    if mapping[0] != mapping[1] && mapping[0] != mapping[2] {
        mode = Mirroring::FourScreen;
    }

    if mapping.iter().all(|&bank| bank == mapping[0]) {
        match mapping[0] {
            Some(Bank::Ciram0) => mode = Mirroring::SingleScreen0,
            Some(Bank::Ciram1) => mode = Mirroring::SingleScreen1,
            Some(Bank::Extra0) if has_extra => mode = Mirroring::SingleScreen2,
            Some(Bank::Extra1) if has_extra => mode = Mirroring::SingleScreen3,
            _ => (),
        }
    }
    mode
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ppu::Bank::*;

    #[test]
    fn vertical_wins_when_everything_matches_an_unset_table() {
        assert_eq!(classify(&[None; 4], false), Mirroring::Vertical);
    }

    #[test]
    fn extra_banks_need_hardware() {
        assert_eq!(classify(&[Some(Extra1); 4], true), Mirroring::SingleScreen3);
        assert_eq!(classify(&[Some(Extra1); 4], false), Mirroring::Vertical);
    }
}
