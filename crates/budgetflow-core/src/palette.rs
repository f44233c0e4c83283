use serde::{Deserialize, Serialize};

/// A CSS hex color (`#rrggbb`) carried through the geometry untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorToken(String);

impl ColorToken {
    pub fn new(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Linear RGB interpolation from `self` (t = 0) to `other` (t = 1).
    ///
    /// Tokens that are not hex colors are returned unchanged: the nearer endpoint wins.
    pub fn mix(&self, other: &ColorToken, t: f64) -> ColorToken {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        match (parse_hex_rgb01(&self.0), parse_hex_rgb01(&other.0)) {
            (Some(a), Some(b)) => ColorToken(rgb01_to_hex(Rgb01 {
                r: a.r + (b.r - a.r) * t,
                g: a.g + (b.g - a.g) * t,
                b: a.b + (b.b - a.b) * t,
            })),
            _ if t < 0.5 => self.clone(),
            _ => other.clone(),
        }
    }
}

impl std::fmt::Display for ColorToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Expense category colors, assigned by sorted position and cycled.
pub const CATEGORY_PALETTE: [&str; 10] = [
    "#4e79a7", "#f28e2c", "#e15759", "#76b7b2", "#59a14f", "#edc949", "#af7aa1", "#ff9da7",
    "#9c755f", "#bab0ab",
];

pub const INCOME_COLOR: &str = "#2e7d5b";
pub const SAVINGS_COLOR: &str = "#3b82f6";
pub const REMAINING_COLOR: &str = "#22c55e";
pub const OVER_BUDGET_COLOR: &str = "#dc2626";

pub fn category_color(index: usize) -> ColorToken {
    ColorToken::new(CATEGORY_PALETTE[index % CATEGORY_PALETTE.len()])
}

pub fn income_color() -> ColorToken {
    ColorToken::new(INCOME_COLOR)
}

pub fn savings_color() -> ColorToken {
    ColorToken::new(SAVINGS_COLOR)
}

pub fn remaining_color() -> ColorToken {
    ColorToken::new(REMAINING_COLOR)
}

pub fn over_budget_color() -> ColorToken {
    ColorToken::new(OVER_BUDGET_COLOR)
}

#[derive(Debug, Clone, Copy)]
struct Rgb01 {
    r: f64,
    g: f64,
    b: f64,
}

fn parse_hex_rgb01(s: &str) -> Option<Rgb01> {
    let hex = s.trim().strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    let (r, g, b) = match hex.len() {
        3 => {
            let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).ok()?;
            (r, g, b)
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            (r, g, b)
        }
        _ => return None,
    };
    Some(Rgb01 {
        r: (r as f64) / 255.0,
        g: (g as f64) / 255.0,
        b: (b as f64) / 255.0,
    })
}

fn rgb01_to_hex(rgb: Rgb01) -> String {
    let r = (rgb.r.clamp(0.0, 1.0) * 255.0).round() as i64;
    let g = (rgb.g.clamp(0.0, 1.0) * 255.0).round() as i64;
    let b = (rgb.b.clamp(0.0, 1.0) * 255.0).round() as i64;
    format!(
        "#{:02x}{:02x}{:02x}",
        r.clamp(0, 255),
        g.clamp(0, 255),
        b.clamp(0, 255)
    )
}
