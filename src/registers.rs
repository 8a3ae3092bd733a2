//! OV7670 register map and the compiled-in bring-up table.

pub const REG_BRIGHTNESS: u8 = 0xCC;
pub const REG_GAIN: u16 = 0xCC12;

/// One register write of a configuration table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConfigEntry {
    pub register: u8,
    pub value: u8,
}

impl ConfigEntry {
    pub const fn new(register: u8, value: u8) -> Self {
        Self { register, value }
    }

    pub const fn is_sentinel(&self) -> bool {
        self.register == SENTINEL.register && self.value == SENTINEL.value
    }
}

/// Marks the end of a sentinel-terminated table.  Entries after it are never applied.
pub const SENTINEL: ConfigEntry = ConfigEntry::new(0xFF, 0xFF);

/// An ordered list of register writes.  Order matters: later entries can depend on clock and PLL
/// settings made by earlier ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConfigurationTable<'a> {
    entries: &'a [ConfigEntry],
    counted: bool,
}

impl<'a> ConfigurationTable<'a> {
    /// A variable-length table, ending at the first [`SENTINEL`] or at the end of `entries`.
    pub const fn new(entries: &'a [ConfigEntry]) -> Self {
        Self {
            entries,
            counted: false,
        }
    }

    /// A fixed-length table: every entry is applied, a trailing [`SENTINEL`] included.
    pub const fn counted(entries: &'a [ConfigEntry]) -> Self {
        Self {
            entries,
            counted: true,
        }
    }

    /// Entries in application order.
    pub fn iter(&self) -> impl Iterator<Item = &'a ConfigEntry> {
        let counted = self.counted;
        self.entries
            .iter()
            .take_while(move |entry| counted || !entry.is_sentinel())
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// VGA (640x480) YUV bring-up.  Fixed length: the closing (0xFF, 0xFF) pair is written too.
pub static OV7670_VGA: ConfigurationTable<'static> = ConfigurationTable::counted(&VGA_ENTRIES);

static VGA_ENTRIES: [ConfigEntry; 166] = [
    ConfigEntry::new(0x3A, 0x04),
    ConfigEntry::new(0x40, 0xC0),
    ConfigEntry::new(0x12, 0x00), // COM7: VGA, YUV
    ConfigEntry::new(0x32, 0x80),
    ConfigEntry::new(0x17, 0x16),
    ConfigEntry::new(0x18, 0x04),
    ConfigEntry::new(0x19, 0x02),
    ConfigEntry::new(0x1A, 0x7B),
    ConfigEntry::new(0x03, 0x06),
    ConfigEntry::new(0x0C, 0x00),
    ConfigEntry::new(0x3E, 0x00),
    ConfigEntry::new(0x70, 0x3A),
    ConfigEntry::new(0x71, 0x35),
    ConfigEntry::new(0x72, 0x11),
    ConfigEntry::new(0x73, 0xF0),
    ConfigEntry::new(0xA2, 0x02),
    ConfigEntry::new(0x11, 0x01), // CLKRC: input clock / 2
    ConfigEntry::new(0x7A, 0x20), // gamma curve, 0x7A..=0x89
    ConfigEntry::new(0x7B, 0x1C),
    ConfigEntry::new(0x7C, 0x28),
    ConfigEntry::new(0x7D, 0x3C),
    ConfigEntry::new(0x7E, 0x55),
    ConfigEntry::new(0x7F, 0x68),
    ConfigEntry::new(0x80, 0x76),
    ConfigEntry::new(0x81, 0x80),
    ConfigEntry::new(0x82, 0x88),
    ConfigEntry::new(0x83, 0x8F),
    ConfigEntry::new(0x84, 0x96),
    ConfigEntry::new(0x85, 0xA3),
    ConfigEntry::new(0x86, 0xAF),
    ConfigEntry::new(0x87, 0xC4),
    ConfigEntry::new(0x88, 0xD7),
    ConfigEntry::new(0x89, 0xE8),
    ConfigEntry::new(0x13, 0xE0),
    ConfigEntry::new(0x00, 0x00),
    ConfigEntry::new(0x10, 0x00),
    ConfigEntry::new(0x0D, 0x00),
    ConfigEntry::new(0x14, 0x28),
    ConfigEntry::new(0xA5, 0x05),
    ConfigEntry::new(0xAB, 0x07),
    ConfigEntry::new(0x24, 0x75),
    ConfigEntry::new(0x25, 0x63),
    ConfigEntry::new(0x26, 0xA5),
    ConfigEntry::new(0x9F, 0x78),
    ConfigEntry::new(0xA0, 0x68),
    ConfigEntry::new(0xA1, 0x03),
    ConfigEntry::new(0xA6, 0xDF),
    ConfigEntry::new(0xA7, 0xDF),
    ConfigEntry::new(0xA8, 0xF0),
    ConfigEntry::new(0xA9, 0x90),
    ConfigEntry::new(0xAA, 0x94),
    ConfigEntry::new(0x13, 0xE5),
    ConfigEntry::new(0x0E, 0x61),
    ConfigEntry::new(0x0F, 0x4B),
    ConfigEntry::new(0x16, 0x02),
    ConfigEntry::new(0x1E, 0x17),
    ConfigEntry::new(0x21, 0x02),
    ConfigEntry::new(0x22, 0x91),
    ConfigEntry::new(0x29, 0x07),
    ConfigEntry::new(0x33, 0x0B),
    ConfigEntry::new(0x35, 0x0B),
    ConfigEntry::new(0x37, 0x1D),
    ConfigEntry::new(0x38, 0x71),
    ConfigEntry::new(0x39, 0x2A),
    ConfigEntry::new(0x3C, 0x78),
    ConfigEntry::new(0x4D, 0x40),
    ConfigEntry::new(0x4E, 0x20),
    ConfigEntry::new(0x69, 0x00),
    ConfigEntry::new(0x6B, 0x40), // DBLV: PLL x4
    ConfigEntry::new(0x74, 0x19),
    ConfigEntry::new(0x8D, 0x4F),
    ConfigEntry::new(0x8E, 0x00),
    ConfigEntry::new(0x8F, 0x00),
    ConfigEntry::new(0x90, 0x00),
    ConfigEntry::new(0x91, 0x00),
    ConfigEntry::new(0x92, 0x00),
    ConfigEntry::new(0x96, 0x00),
    ConfigEntry::new(0x9A, 0x80),
    ConfigEntry::new(0xB0, 0x84),
    ConfigEntry::new(0xB1, 0x0C),
    ConfigEntry::new(0xB2, 0x0E),
    ConfigEntry::new(0xB3, 0x82),
    ConfigEntry::new(0xB8, 0x0A),
    ConfigEntry::new(0x43, 0x14),
    ConfigEntry::new(0x44, 0xF0),
    ConfigEntry::new(0x45, 0x34),
    ConfigEntry::new(0x46, 0x58),
    ConfigEntry::new(0x47, 0x28),
    ConfigEntry::new(0x48, 0x3A),
    ConfigEntry::new(0x59, 0x88),
    ConfigEntry::new(0x5A, 0x88),
    ConfigEntry::new(0x5B, 0x44),
    ConfigEntry::new(0x5C, 0x67),
    ConfigEntry::new(0x5D, 0x49),
    ConfigEntry::new(0x5E, 0x0E),
    ConfigEntry::new(0x64, 0x04),
    ConfigEntry::new(0x65, 0x20),
    ConfigEntry::new(0x66, 0x05),
    ConfigEntry::new(0x94, 0x04),
    ConfigEntry::new(0x95, 0x08),
    ConfigEntry::new(0x6C, 0x0A),
    ConfigEntry::new(0x6D, 0x55),
    ConfigEntry::new(0x6E, 0x11),
    ConfigEntry::new(0x6F, 0x9F),
    ConfigEntry::new(0x6A, 0x40),
    ConfigEntry::new(0x01, 0x40),
    ConfigEntry::new(0x02, 0x40),
    ConfigEntry::new(0x13, 0xE7),
    ConfigEntry::new(0x15, 0x02),
    ConfigEntry::new(0x4F, 0x40), // colour matrix, 0x4F..=0x58
    ConfigEntry::new(0x50, 0x34),
    ConfigEntry::new(0x51, 0x0C),
    ConfigEntry::new(0x52, 0x17),
    ConfigEntry::new(0x53, 0x29),
    ConfigEntry::new(0x54, 0x40),
    ConfigEntry::new(0x58, 0x1E),
    ConfigEntry::new(0x41, 0x08),
    ConfigEntry::new(0x3F, 0x00),
    ConfigEntry::new(0x75, 0x05),
    ConfigEntry::new(0x76, 0xE1),
    ConfigEntry::new(0x4C, 0x00),
    ConfigEntry::new(0x77, 0x01),
    ConfigEntry::new(0x3D, 0xC2),
    ConfigEntry::new(0x4B, 0x09),
    ConfigEntry::new(0xC9, 0x60),
    ConfigEntry::new(0x41, 0x38),
    ConfigEntry::new(0x56, 0x40),
    ConfigEntry::new(0x34, 0x11),
    ConfigEntry::new(0x3B, 0x02),
    ConfigEntry::new(0xA4, 0x89),
    ConfigEntry::new(0x96, 0x00),
    ConfigEntry::new(0x97, 0x30),
    ConfigEntry::new(0x98, 0x20),
    ConfigEntry::new(0x99, 0x30),
    ConfigEntry::new(0x9A, 0x84),
    ConfigEntry::new(0x9B, 0x29),
    ConfigEntry::new(0x9C, 0x03),
    ConfigEntry::new(0x9D, 0x4C),
    ConfigEntry::new(0x9E, 0x3F),
    ConfigEntry::new(0x78, 0x04),
    ConfigEntry::new(0x79, 0x01),
    ConfigEntry::new(0xC8, 0xF0),
    ConfigEntry::new(0x79, 0x0F),
    ConfigEntry::new(0xC8, 0x00),
    ConfigEntry::new(0x79, 0x10),
    ConfigEntry::new(0xC8, 0x7E),
    ConfigEntry::new(0x79, 0x0A),
    ConfigEntry::new(0xC8, 0x80),
    ConfigEntry::new(0x79, 0x0B),
    ConfigEntry::new(0xC8, 0x01),
    ConfigEntry::new(0x79, 0x0C),
    ConfigEntry::new(0xC8, 0x0F),
    ConfigEntry::new(0x79, 0x0D),
    ConfigEntry::new(0xC8, 0x20),
    ConfigEntry::new(0x79, 0x09),
    ConfigEntry::new(0xC8, 0x80),
    ConfigEntry::new(0x79, 0x02),
    ConfigEntry::new(0xC8, 0xC0),
    ConfigEntry::new(0x79, 0x03),
    ConfigEntry::new(0xC8, 0x40),
    ConfigEntry::new(0x79, 0x05),
    ConfigEntry::new(0xC8, 0x30),
    ConfigEntry::new(0x79, 0x26),
    ConfigEntry::new(0x09, 0x03),
    ConfigEntry::new(0x3B, 0x42),
    SENTINEL,
];
