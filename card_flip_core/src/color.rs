use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// 展示用颜色，JSON 中写作 `"#RRGGBB"`
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Rgb {
        Rgb { r, g, b }
    }

    /// 按倍率大小分档的默认颜色。
    /// 只比较区间，不依赖倍率表的顺序或与表中数值的相等比较。
    pub fn for_multiplier(value: f64) -> Rgb {
        match value {
            v if v >= 10.0 => Rgb::new(0xFF, 0xD7, 0x00), // 金
            v if v >= 5.0 => Rgb::new(0xFF, 0x6B, 0x6B),
            v if v >= 3.0 => Rgb::new(0xFF, 0x8C, 0x42),
            v if v >= 2.0 => Rgb::new(0xFF, 0xA0, 0x7A),
            v if v >= 1.0 => Rgb::new(0x90, 0xEE, 0x90),
            v if v >= 0.6 => Rgb::new(0x87, 0xCE, 0xEB),
            v if v > 0.0 => Rgb::new(0xB0, 0xC4, 0xDE),
            _ => Rgb::new(0x80, 0x80, 0x80), // 0x 灰色
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("expected a #RRGGBB colour, got {0:?}")]
pub struct ParseRgbError(String);

impl FromStr for Rgb {
    type Err = ParseRgbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseRgbError(s.to_string());
        let hex = s.strip_prefix('#').ok_or_else(err)?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(err());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
        Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for Rgb {
    type Error = ParseRgbError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}
