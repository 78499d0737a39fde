pub mod draw;

pub use draw::{build_frame, DrawCommand};

/// Linear RGBA, components in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Parse `#RRGGBB` or `#RGB`
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').filter(|d| d.chars().all(|c| c.is_ascii_hexdigit()))?;
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        match digits.len() {
            6 => Some(Self::rgb(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            3 => {
                let short = |s: &str| channel(s).map(|v| v * 17);
                Some(Self::rgb(
                    short(&digits[0..1])?,
                    short(&digits[1..2])?,
                    short(&digits[2..3])?,
                ))
            }
            _ => None,
        }
    }
}

/// Colours not carried by the Rule Set
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: Color,
    pub border: Color,
    pub primary: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::rgb(0x0B, 0x0B, 0x1A),
            border: Color::rgb(0x3A, 0x3A, 0x5C).with_alpha(0.5),
            primary: Color::rgb(0xBF, 0x40, 0xBF),
        }
    }
}

impl Theme {
    /// Rule Set colour, or the theme primary when it does not parse
    pub fn resolve(&self, hex: &str) -> Color {
        Color::from_hex(hex).unwrap_or(self.primary)
    }
}

/// Anything that can put a frame's draw commands on screen
pub trait Surface {
    fn present(&mut self, frame: &[DrawCommand]);
}

/// Surface that keeps the last frame instead of drawing it
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub frames_presented: u64,
    pub last_frame: Vec<DrawCommand>,
}

impl Surface for RecordingSurface {
    fn present(&mut self, frame: &[DrawCommand]) {
        self.frames_presented += 1;
        self.last_frame = frame.to_vec();
    }
}
