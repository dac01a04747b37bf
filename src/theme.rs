//! Palette set and the cyclic theme selector.

/// 24-bit colour used by palettes and particles.
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

    /// Scale every channel by `factor` (clamped to `[0, 1]`).
    pub fn scaled(self, factor: f32) -> Self {
        let factor = factor.clamp(0.0, 1.0);
        let scale = |c: u8| (c as f32 * factor).round() as u8;
        Self::new(scale(self.r), scale(self.g), scale(self.b))
    }

    /// Convert hue/saturation/lightness (h in degrees, s and l in `[0, 1]`).
    pub fn from_hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        let h = hue.rem_euclid(360.0) / 60.0;
        let s = saturation.clamp(0.0, 1.0);
        let l = lightness.clamp(0.0, 1.0);
        let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };
        let m = l - chroma / 2.0;
        let to_u8 = |c: f32| ((c + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Self::new(to_u8(r), to_u8(g), to_u8(b))
    }
}

/// Colours for one visual theme. Consumed entirely by the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub name: &'static str,
    /// Background gradient stops, first to last.
    pub background: [Rgb; 3],
    pub accent: Rgb,
    pub increment_button: (Rgb, Rgb),
    pub reset_button: (Rgb, Rgb),
}

pub const PALETTES: &[Palette] = &[
    Palette {
        name: "aurora",
        background: [
            Rgb::new(0x93, 0x33, 0xea),
            Rgb::new(0x43, 0x38, 0xca),
            Rgb::new(0x1e, 0x40, 0xaf),
        ],
        accent: Rgb::new(0x43, 0x38, 0xca),
        increment_button: (Rgb::new(0x63, 0x66, 0xf1), Rgb::new(0xa8, 0x55, 0xf7)),
        reset_button: (Rgb::new(0x4b, 0x55, 0x63), Rgb::new(0x6b, 0x72, 0x80)),
    },
    Palette {
        name: "sunset",
        background: [
            Rgb::new(0xf9, 0x73, 0x16),
            Rgb::new(0xdb, 0x27, 0x77),
            Rgb::new(0x7c, 0x3a, 0xed),
        ],
        accent: Rgb::new(0xea, 0x58, 0x0c),
        increment_button: (Rgb::new(0xf5, 0x9e, 0x0b), Rgb::new(0xef, 0x44, 0x44)),
        reset_button: (Rgb::new(0x57, 0x53, 0x4e), Rgb::new(0x78, 0x71, 0x6c)),
    },
    Palette {
        name: "ocean",
        background: [
            Rgb::new(0x06, 0xb6, 0xd4),
            Rgb::new(0x25, 0x63, 0xeb),
            Rgb::new(0x1e, 0x3a, 0x8a),
        ],
        accent: Rgb::new(0x02, 0x84, 0xc7),
        increment_button: (Rgb::new(0x0e, 0xa5, 0xe9), Rgb::new(0x3b, 0x82, 0xf6)),
        reset_button: (Rgb::new(0x47, 0x55, 0x69), Rgb::new(0x64, 0x74, 0x8b)),
    },
    Palette {
        name: "forest",
        background: [
            Rgb::new(0x22, 0xc5, 0x5e),
            Rgb::new(0x05, 0x96, 0x69),
            Rgb::new(0x13, 0x4e, 0x4a),
        ],
        accent: Rgb::new(0x04, 0x78, 0x57),
        increment_button: (Rgb::new(0x10, 0xb9, 0x81), Rgb::new(0x84, 0xcc, 0x16)),
        reset_button: (Rgb::new(0x52, 0x52, 0x5b), Rgb::new(0x71, 0x71, 0x7a)),
    },
];

/// Look up a palette by name (case-insensitive).
pub fn palette_named(name: &str) -> Option<usize> {
    PALETTES
        .iter()
        .position(|p| p.name.eq_ignore_ascii_case(name))
}

/// Cyclic selector into a non-empty palette set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeCycle {
    palettes: &'static [Palette],
    index: usize,
}

impl Default for ThemeCycle {
    fn default() -> Self {
        Self::new(PALETTES)
    }
}

impl ThemeCycle {
    /// # Panics
    /// Panics if `palettes` is empty.
    pub fn new(palettes: &'static [Palette]) -> Self {
        assert!(!palettes.is_empty(), "theme cycle needs at least one palette");
        Self { palettes, index: 0 }
    }

    /// Start at `index`, wrapped into range.
    pub fn starting_at(palettes: &'static [Palette], index: usize) -> Self {
        let mut cycle = Self::new(palettes);
        cycle.index = index % palettes.len();
        cycle
    }

    pub fn advance(&mut self) -> &Palette {
        self.index = (self.index + 1) % self.palettes.len();
        self.current()
    }

    pub fn current(&self) -> &Palette {
        &self.palettes[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.palettes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.palettes.is_empty()
    }
}
