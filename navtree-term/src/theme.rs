//! Colors and text styles used when drawing the outline.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Text attributes of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextStyle {
    pub bold: bool,
    pub dim: bool,
    pub underline: bool,
}

impl TextStyle {
    pub const fn new() -> Self {
        Self {
            bold: false,
            dim: false,
            underline: false,
        }
    }

    pub const fn bold() -> Self {
        Self {
            bold: true,
            ..Self::new()
        }
    }

    pub const fn dim() -> Self {
        Self {
            dim: true,
            ..Self::new()
        }
    }
}

/// Palette for the outline, header and footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub background: Rgb,
    pub text: Rgb,
    pub link: Rgb,
    pub connector: Rgb,
    pub selected: Rgb,
    pub cursor_bg: Rgb,
    pub bar_bg: Rgb,
    pub muted: Rgb,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Rgb::new(24, 24, 28),
            text: Rgb::new(220, 220, 225),
            link: Rgb::new(130, 170, 255),
            connector: Rgb::new(95, 95, 110),
            selected: Rgb::new(255, 200, 90),
            cursor_bg: Rgb::new(50, 55, 75),
            bar_bg: Rgb::new(38, 38, 46),
            muted: Rgb::new(140, 140, 150),
        }
    }
}
