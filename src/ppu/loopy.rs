use super::{NTAddr, PixelCoord, TileCoord};

/// The internal `v`/`t`/`x`/`w` scroll registers.
#[derive(Debug, Copy, Clone)]
pub struct AddrReg {
    address: u16,
    temp: u16,
    fine_x: PixelCoord,
    latch: AddrLatch,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum AddrLatch {
    High,
    Low,
}

impl Default for AddrReg {
    fn default() -> Self { Self::new() }
}

impl AddrReg {
    pub fn new() -> Self {
        AddrReg {
            address: 0,
            temp: 0,
            fine_x: PixelCoord::MIN,
            latch: AddrLatch::High,
        }
    }

    pub fn write_scroll(&mut self, val: u8) {
        match self.latch {
            AddrLatch::High => {
                self.set_fine_x(new_wrapping!(PixelCoord, val));
                self.set_coarse_x(new_wrapping!(TileCoord, val >> 3));
                self.latch = AddrLatch::Low;
            }
            AddrLatch::Low => {
                self.set_fine_y(new_wrapping!(PixelCoord, val));
                self.set_coarse_y(new_wrapping!(TileCoord, val >> 3));
                self.update();
                self.latch = AddrLatch::High;
            }
        }
    }

    pub fn update(&mut self) { self.address = self.temp; }

    pub fn set_coarse_x(&mut self, val: TileCoord) {
        self.temp &= 0b1_111_11_11111_00000;
        self.temp |= u16::from(val.get());
    }

    pub fn set_coarse_y(&mut self, val: TileCoord) {
        self.temp &= 0b1_111_11_00000_11111;
        self.temp |= u16::from(val.get()) << 5;
    }

    pub fn set_nametable(&mut self, nt: NTAddr) {
        self.temp &= 0b1_111_00_11111_11111;
        self.temp |= u16::from(nt.get()) << 10;
    }

    pub fn set_fine_y(&mut self, val: PixelCoord) {
        self.temp &= 0b1_000_11_11111_11111;
        self.temp |= u16::from(val.get()) << 12;
    }

    pub fn set_fine_x(&mut self, val: PixelCoord) { self.fine_x = val; }

    pub fn get_coarse_x(&self) -> TileCoord { new_wrapping!(TileCoord, self.address as u8) }

    pub fn get_coarse_y(&self) -> TileCoord { new_wrapping!(TileCoord, (self.address >> 5) as u8) }

    pub fn get_nametable(&self) -> NTAddr { new_wrapping!(NTAddr, (self.address >> 10) as u8) }

    pub fn get_fine_y(&self) -> PixelCoord { new_wrapping!(PixelCoord, (self.address >> 12) as u8) }

    pub fn get_fine_x(&self) -> PixelCoord { self.fine_x }

    /// Scroll position in the 512x480 space spanned by all four name tables.
    pub fn scroll_position(&self) -> (u16, u16) {
        let nt = u16::from(self.get_nametable().get());
        let x = (nt & 1) * 256
            + u16::from(self.get_coarse_x().get()) * 8
            + u16::from(self.get_fine_x().get());
        let y = (nt >> 1) * 240
            + u16::from(self.get_coarse_y().get()) * 8
            + u16::from(self.get_fine_y().get());
        (x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_writes() {
        let mut reg = AddrReg::new();
        reg.set_nametable(new_wrapping!(NTAddr, 3u8));
        reg.write_scroll(0x7D);
        reg.write_scroll(0x5E);
        assert_eq!(reg.get_coarse_x().get(), 0x0F);
        assert_eq!(reg.get_fine_x().get(), 5);
        assert_eq!(reg.get_coarse_y().get(), 0x0B);
        assert_eq!(reg.get_fine_y().get(), 6);
        assert_eq!(reg.scroll_position(), (256 + 0x7D, 240 + 0x5E));
    }
}
