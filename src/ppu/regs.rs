use super::loopy::AddrReg;
use super::pattern::PTIdx;
use super::NTAddr;

#[derive(Default, Debug, Clone)]
pub struct Registers {
    pub control: Control,
    pub addr: AddrReg,
}

/// The PPUCTRL ($2000) bits that affect background fetches.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Control {
    pub base_nt: NTAddr,
    pub bg_table: PTIdx,
}

impl Registers {
    pub fn set_control(&mut self, val: u8) {
        let reg = Control::from(val);
        self.control = reg;
        self.addr.set_nametable(reg.base_nt);
    }

    pub fn write_scroll(&mut self, val: u8) { self.addr.write_scroll(val); }
}

impl Default for NTAddr {
    fn default() -> Self { NTAddr::MIN }
}

#[inline]
pub fn test_bit<T>(val: u8, bit: u8, on: T, off: T) -> T {
    if val & (1 << bit) != 0 {
        on
    } else {
        off
    }
}

impl From<u8> for Control {
    #[inline]
    fn from(bits: u8) -> Control {
        Control {
            base_nt: new_wrapping!(NTAddr, bits),
            bg_table: test_bit(bits, 4, PTIdx::Right, PTIdx::Left),
        }
    }
}
