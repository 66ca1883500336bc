//! Fixed 22-color palette of the target drawing canvas
//!
//! The canvas exposes its colors as two rows of eleven square swatches next
//! to the drawing area. Both the color values and the swatch geometry are
//! properties of the remote service and are hard-coded here; nothing about
//! this table is derived at runtime.

/// RGB color representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Squared distance to another color in RGB space
    #[inline]
    pub fn distance_squared(&self, other: Rgb) -> u32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        (dr * dr + dg * dg + db * db) as u32
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.r, self.g, self.b)
    }
}

/// The canvas substrate color. Pixels of this color are never drawn.
pub const BACKGROUND: Rgb = Rgb::new(255, 255, 255);

/// Swatch edge length in physical units
pub const SWATCH_SIZE: i32 = 24;

/// Offset from a swatch's corner to its hit-point (the swatch center)
pub const SWATCH_HIT: i32 = 12;

/// Swatches per palette row
pub const SWATCHES_PER_ROW: usize = 11;

/// The canvas palette, in swatch order: top row left to right, then the
/// bottom row. Index 0 is the white background.
pub const CANVAS_PALETTE: [Rgb; 22] = [
    Rgb::new(255, 255, 255),
    Rgb::new(193, 193, 193),
    Rgb::new(239, 19, 11),
    Rgb::new(255, 115, 0),
    Rgb::new(255, 228, 0),
    Rgb::new(0, 204, 0),
    Rgb::new(0, 178, 255),
    Rgb::new(35, 31, 211),
    Rgb::new(163, 0, 186),
    Rgb::new(211, 124, 170),
    Rgb::new(160, 82, 45),
    Rgb::new(0, 0, 0),
    Rgb::new(76, 76, 76),
    Rgb::new(116, 11, 7),
    Rgb::new(194, 56, 0),
    Rgb::new(232, 162, 0),
    Rgb::new(0, 85, 16),
    Rgb::new(0, 86, 158),
    Rgb::new(14, 8, 101),
    Rgb::new(85, 0, 105),
    Rgb::new(167, 85, 116),
    Rgb::new(99, 48, 13),
];

/// PNG palette bytes (RGB triplets) - same values, for indexed encoding
pub const PNG_PALETTE: [u8; 66] = [
    255, 255, 255, //
    193, 193, 193, //
    239, 19, 11, //
    255, 115, 0, //
    255, 228, 0, //
    0, 204, 0, //
    0, 178, 255, //
    35, 31, 211, //
    163, 0, 186, //
    211, 124, 170, //
    160, 82, 45, //
    0, 0, 0, //
    76, 76, 76, //
    116, 11, 7, //
    194, 56, 0, //
    232, 162, 0, //
    0, 85, 16, //
    0, 86, 158, //
    14, 8, 101, //
    85, 0, 105, //
    167, 85, 116, //
    99, 48, 13, //
];

/// Get the palette color for an index. Panics on an out-of-range index,
/// which cannot be produced by [`nearest`].
#[inline]
pub fn color(index: u8) -> Rgb {
    CANVAS_PALETTE[index as usize]
}

/// Find the palette index of the closest entry to a color.
///
/// Exact matches win immediately; otherwise the entry with the smallest
/// squared RGB distance is chosen, ties broken by declaration order.
pub fn nearest(color: Rgb) -> u8 {
    let mut best_index = 0u8;
    let mut best_dist = u32::MAX;

    for (i, &entry) in CANVAS_PALETTE.iter().enumerate() {
        if entry == color {
            return i as u8;
        }
        let dist = entry.distance_squared(color);
        if dist < best_dist {
            best_dist = dist;
            best_index = i as u8;
        }
    }

    best_index
}

/// Physical offset of a color's swatch hit-point relative to the palette
/// origin, or `None` if the color is not on the palette.
pub fn swatch_offset(color: Rgb) -> Option<(i32, i32)> {
    CANVAS_PALETTE.iter().position(|&entry| entry == color).map(|i| {
        let col = (i % SWATCHES_PER_ROW) as i32;
        let row = (i / SWATCHES_PER_ROW) as i32;
        (col * SWATCH_SIZE + SWATCH_HIT, row * SWATCH_SIZE + SWATCH_HIT)
    })
}
