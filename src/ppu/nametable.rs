use super::{NTAddr, TileCoord, TileRow};

pub const NAMETABLE_LEN: usize = 0x400;
pub const ATTR_OFFSET: usize = 0x3C0;

/// One kilobyte of name table memory: 32x30 tile indices followed by the
/// 64 byte attribute table.
#[derive(Clone)]
pub struct Nametable([u8; NAMETABLE_LEN]);

/// A physical name table bank. Logical tables are compared by which bank
/// they map to, never by address.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Bank {
	Ciram0,
	Ciram1,
	Extra0,
	Extra1,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Mirroring {
	None,
	Horizontal,
	Vertical,
	FourScreen,
	SingleScreen0,
	SingleScreen1,
	SingleScreen2,
	SingleScreen3,
}

impl Default for Mirroring {
	fn default() -> Self { Mirroring::None }
}

impl Bank {
	pub fn ciram(idx: u8) -> Self {
		if idx & 1 == 0 {
			Bank::Ciram0
		} else {
			Bank::Ciram1
		}
	}
}

impl Default for Nametable {
	fn default() -> Self { Self::new() }
}

impl Nametable {
	pub const fn new() -> Self {
		Nametable([0; NAMETABLE_LEN])
	}

	pub fn read(&self, idx: u16) -> u8 {
		self.0[usize::from(idx) % NAMETABLE_LEN]
	}

	pub fn write(&mut self, idx: u16, val: u8) {
		self.0[usize::from(idx) % NAMETABLE_LEN] = val;
	}

	pub fn as_bytes(&self) -> &[u8; NAMETABLE_LEN] {
		&self.0
	}

	pub fn load(&mut self, bytes: &[u8; NAMETABLE_LEN]) {
		self.0.copy_from_slice(bytes);
	}

	/// Offset of the attribute byte covering tile `(x, y)`.
	pub fn attr_addr(x: TileCoord, y: TileRow) -> u16 {
		ATTR_OFFSET as u16 + (u16::from(y.get() >> 2) << 3) + u16::from(x.get() >> 2)
	}

	/// The 2 bit palette selector for tile `(x, y)` as plain hardware would
	/// fetch it.
	pub fn attribute(&self, x: TileCoord, y: TileRow) -> u8 {
		let shift = ((y.get() & 2) << 1) + (x.get() & 2);
		(self.read(Self::attr_addr(x, y)) >> shift) & 0x03
	}
}

impl NTAddr {
	pub fn all() -> impl Iterator<Item = NTAddr> {
		(0..4).map(|n: u8| new_wrapping!(NTAddr, n))
	}

	/// The table sharing this one's column: 0 for 0 and 2, 1 for 1 and 3.
	pub fn column(self) -> NTAddr {
		new_wrapping!(NTAddr, self.get() & 1)
	}

	pub fn index(self) -> usize {
		usize::from(self.get())
	}
}
