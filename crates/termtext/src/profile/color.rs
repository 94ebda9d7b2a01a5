//! Colors accepted in custom profile files.
//!
//! A role's color is one of the eight ANSI names (`gray`/`grey` alias
//! `white`), a `bright_` name, a palette index `0..=255`, or `#rgb` /
//! `#rrggbb`. Hex colors are mapped onto the 256-color cube so that every
//! profile stays within what `console` renders everywhere.

use console::Color;
use serde_yaml::Value;

use crate::util::rgb_to_ansi256;

const BASE_COLORS: [(&str, Color); 8] = [
    ("black", Color::Black),
    ("red", Color::Red),
    ("green", Color::Green),
    ("yellow", Color::Yellow),
    ("blue", Color::Blue),
    ("magenta", Color::Magenta),
    ("cyan", Color::Cyan),
    ("white", Color::White),
];

/// A color as written in a profile file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorDef {
    Named(Color),
    Color256(u8),
    Rgb(u8, u8, u8),
}

impl ColorDef {
    /// Reads a color from a YAML scalar. The error is a human-readable reason.
    pub fn parse_value(value: &Value) -> Result<Self, String> {
        match value {
            Value::String(s) => Self::parse_string(s),
            Value::Number(n) => n
                .as_u64()
                .and_then(|i| u8::try_from(i).ok())
                .map(ColorDef::Color256)
                .ok_or_else(|| format!("palette index must be 0-255, got {}", n)),
            other => Err(format!("expected a color name, index or hex, got {:?}", other)),
        }
    }

    pub fn parse_string(s: &str) -> Result<Self, String> {
        let s = s.trim().to_ascii_lowercase();
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| format!("'#{}' is not a 3 or 6 digit hex color", hex));
        }
        if let Some(base) = s.strip_prefix("bright_") {
            // Bright variants sit right after the base colors in the palette.
            return base_index(base)
                .map(|i| ColorDef::Color256(i as u8 + 8))
                .ok_or_else(|| format!("unknown color 'bright_{}'", base));
        }
        let name = match s.as_str() {
            "gray" | "grey" => "white",
            other => other,
        };
        base_index(name)
            .map(|i| ColorDef::Named(BASE_COLORS[i].1))
            .ok_or_else(|| format!("unknown color '{}'", s))
    }

    pub fn to_console_color(&self) -> Color {
        match *self {
            ColorDef::Named(c) => c,
            ColorDef::Color256(i) => Color::Color256(i),
            ColorDef::Rgb(r, g, b) => Color::Color256(rgb_to_ansi256((r, g, b))),
        }
    }
}

fn base_index(name: &str) -> Option<usize> {
    BASE_COLORS.iter().position(|(n, _)| *n == name)
}

fn parse_hex(hex: &str) -> Option<ColorDef> {
    if !hex.is_ascii() {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 => {
            let mut it = hex.chars().map(|c| channel(&c.to_string()).map(|v| v * 17));
            Some(ColorDef::Rgb(it.next()??, it.next()??, it.next()??))
        }
        6 => Some(ColorDef::Rgb(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        _ => None,
    }
}
