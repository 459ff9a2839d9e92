//! Reference color tables of the emulated hardware.

use crate::color::Rgb;

/// Original Game Boy (DMG-01) green shades, darkest to lightest.
pub(crate) const GAMEBOY: [Rgb; 4] = [
    Rgb::from_hex(0x0F380F),
    Rgb::from_hex(0x306230),
    Rgb::from_hex(0x8BAC0F),
    Rgb::from_hex(0x9BBC0F),
];

/// IBM CGA graphics mode 4, palette 0, low intensity.
pub(crate) const CGA: [Rgb; 4] = [
    Rgb::from_hex(0x000000),
    Rgb::from_hex(0x00AA00),
    Rgb::from_hex(0xAA0000),
    Rgb::from_hex(0xAA5500),
];

/// NES 2C02 PPU colors in hardware order with the duplicate blacks
/// (0x0E, 0x0F, 0x1D-0x1F, 0x2E, 0x2F, 0x3E, 0x3F) removed.
#[rustfmt::skip]
pub(crate) const NES: [Rgb; 55] = [
    // 0x00 - 0x0D
    Rgb::from_hex(0x7C7C7C), Rgb::from_hex(0x0000FC), Rgb::from_hex(0x0000BC), Rgb::from_hex(0x4428BC),
    Rgb::from_hex(0x940084), Rgb::from_hex(0xA80020), Rgb::from_hex(0xA81000), Rgb::from_hex(0x881400),
    Rgb::from_hex(0x503000), Rgb::from_hex(0x007800), Rgb::from_hex(0x006800), Rgb::from_hex(0x005800),
    Rgb::from_hex(0x004058), Rgb::from_hex(0x000000),
    // 0x10 - 0x1C
    Rgb::from_hex(0xBCBCBC), Rgb::from_hex(0x0078F8), Rgb::from_hex(0x0058F8), Rgb::from_hex(0x6844FC),
    Rgb::from_hex(0xD800CC), Rgb::from_hex(0xE40058), Rgb::from_hex(0xF83800), Rgb::from_hex(0xE45C10),
    Rgb::from_hex(0xAC7C00), Rgb::from_hex(0x00B800), Rgb::from_hex(0x00A800), Rgb::from_hex(0x00A844),
    Rgb::from_hex(0x008888),
    // 0x20 - 0x2D
    Rgb::from_hex(0xF8F8F8), Rgb::from_hex(0x3CBCFC), Rgb::from_hex(0x6888FC), Rgb::from_hex(0x9878F8),
    Rgb::from_hex(0xF878F8), Rgb::from_hex(0xF85898), Rgb::from_hex(0xF87858), Rgb::from_hex(0xFCA044),
    Rgb::from_hex(0xF8B800), Rgb::from_hex(0xB8F818), Rgb::from_hex(0x58D854), Rgb::from_hex(0x58F898),
    Rgb::from_hex(0x00E8D8), Rgb::from_hex(0x787878),
    // 0x30 - 0x3D
    Rgb::from_hex(0xFCFCFC), Rgb::from_hex(0xA4E4FC), Rgb::from_hex(0xB8B8F8), Rgb::from_hex(0xD8B8F8),
    Rgb::from_hex(0xF8B8F8), Rgb::from_hex(0xF8A4C0), Rgb::from_hex(0xF0D0B0), Rgb::from_hex(0xFCE0A8),
    Rgb::from_hex(0xF8D878), Rgb::from_hex(0xD8F878), Rgb::from_hex(0xB8F8B8), Rgb::from_hex(0xB8F8D8),
    Rgb::from_hex(0x00FCFC), Rgb::from_hex(0xF8D8F8),
];
