//! Emitted blocks and the lattice they live on.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Integer lattice point.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct LatticePos {
    /// X coordinate (pillar width axis).
    pub x: i32,
    /// Y coordinate (pillar depth axis).
    pub y: i32,
    /// Z coordinate (vertical axis).
    pub z: i32,
}

impl LatticePos {
    /// The lattice origin.
    pub const ORIGIN: Self = Self::new(0, 0, 0);

    /// Construct a lattice point.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Offset every axis by the same amount.
    pub fn offset_all(self, delta: i32) -> Self {
        Self::new(self.x + delta, self.y + delta, self.z + delta)
    }
}

impl fmt::Display for LatticePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.x, self.y, self.z)
    }
}

/// Axis-aligned bounds of a structure: `min` inclusive, `max` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    /// Minimum corner.
    pub min: LatticePos,
    /// Exclusive maximum corner.
    pub max: LatticePos,
}

impl Bounds {
    /// Extent along each axis.
    pub fn extent(&self) -> (i32, i32, i32) {
        (
            self.max.x - self.min.x,
            self.max.y - self.min.y,
            self.max.z - self.min.z,
        )
    }
}

/// Errors raised when parsing a `#rrggbb` colour.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    /// The string does not start with `#`.
    #[error("colour {0:?} must start with '#'")]
    MissingHash(String),
    /// The string is not exactly six hex digits after the `#`.
    #[error("colour {0:?} must have exactly six hex digits")]
    WrongLength(String),
    /// A character is not a hex digit.
    #[error("colour {0:?} contains a non-hex digit")]
    InvalidDigit(String),
}

/// 8-bit RGB colour carried by every cuboid.
///
/// Serialized as a lowercase `#rrggbb` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Light grey used when no colour is configured.
    pub const DEFAULT_GREY: Self = Self::new(0xb4, 0xb4, 0xb4);

    /// Construct a colour from channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::DEFAULT_GREY
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ColorParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        let hex = trimmed
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(input.to_string()))?;
        if hex.len() != 6 {
            return Err(ColorParseError::WrongLength(input.to_string()));
        }
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidDigit(input.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|_| ColorParseError::InvalidDigit(input.to_string()))
        };
        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl TryFrom<String> for Rgb {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_string()
    }
}

/// Axis-aligned cube of solid lattice cells.
///
/// Identity is the origin: no two cuboids emitted by one generation call share
/// an origin. Covers `[origin, origin + size)` on every axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cuboid {
    /// Minimum corner.
    #[serde(flatten)]
    pub origin: LatticePos,
    /// Edge length in cells (always positive).
    pub size: u32,
    /// Base colour.
    pub color: Rgb,
}

impl Cuboid {
    /// Construct a cuboid.
    pub fn new(origin: LatticePos, size: u32, color: Rgb) -> Self {
        debug_assert!(size > 0, "cuboids must have a positive edge length");
        Self {
            origin,
            size,
            color,
        }
    }

    /// Identity key (the origin triple).
    pub fn key(&self) -> (i32, i32, i32) {
        (self.origin.x, self.origin.y, self.origin.z)
    }

    /// Edge length as a signed lattice offset.
    pub fn extent(&self) -> i32 {
        self.size as i32
    }

    /// Exclusive maximum corner.
    pub fn max_corner(&self) -> LatticePos {
        self.origin.offset_all(self.extent())
    }

    /// Number of covered cells.
    pub fn volume(&self) -> u64 {
        u64::from(self.size).pow(3)
    }

    /// Whether `pos` lies inside this cuboid.
    pub fn contains(&self, pos: LatticePos) -> bool {
        let max = self.max_corner();
        (self.origin.x..max.x).contains(&pos.x)
            && (self.origin.y..max.y).contains(&pos.y)
            && (self.origin.z..max.z).contains(&pos.z)
    }

    /// Whether the two cuboids share at least one cell.
    pub fn overlaps(&self, other: &Cuboid) -> bool {
        let (a_max, b_max) = (self.max_corner(), other.max_corner());
        self.origin.x < b_max.x
            && other.origin.x < a_max.x
            && self.origin.y < b_max.y
            && other.origin.y < a_max.y
            && self.origin.z < b_max.z
            && other.origin.z < a_max.z
    }

    /// Iterate every covered lattice cell (x fastest, then y, then z).
    pub fn cells(&self) -> impl Iterator<Item = LatticePos> {
        let origin = self.origin;
        let extent = self.extent();
        (0..extent).flat_map(move |dz| {
            (0..extent).flat_map(move |dy| {
                (0..extent).map(move |dx| LatticePos::new(origin.x + dx, origin.y + dy, origin.z + dz))
            })
        })
    }
}

impl fmt::Display for Cuboid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.origin, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_parses_and_prints_lowercase_hex() {
        let color: Rgb = "#B4a0FF".parse().expect("valid colour");
        assert_eq!(color, Rgb::new(0xb4, 0xa0, 0xff));
        assert_eq!(color.to_string(), "#b4a0ff");
    }

    #[test]
    fn rgb_rejects_malformed_strings() {
        assert!(matches!(
            "b4b4b4".parse::<Rgb>(),
            Err(ColorParseError::MissingHash(_))
        ));
        assert!(matches!(
            "#b4b4".parse::<Rgb>(),
            Err(ColorParseError::WrongLength(_))
        ));
        assert!(matches!(
            "#b4b4zz".parse::<Rgb>(),
            Err(ColorParseError::InvalidDigit(_))
        ));
    }

    #[test]
    fn cuboid_serializes_flat_with_hex_colour() {
        let cuboid = Cuboid::new(LatticePos::new(1, -2, 3), 4, Rgb::DEFAULT_GREY);
        let json = serde_json::to_value(cuboid).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({"x": 1, "y": -2, "z": 3, "size": 4, "color": "#b4b4b4"})
        );
        let back: Cuboid = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back, cuboid);
    }

    #[test]
    fn identity_is_the_origin() {
        let cuboid = Cuboid::new(LatticePos::new(3, 0, -7), 2, Rgb::DEFAULT_GREY);
        assert_eq!(cuboid.key(), (3, 0, -7));
        assert_eq!(cuboid.to_string(), "3,0,-7");
    }

    #[test]
    fn cells_cover_exactly_the_volume() {
        let cuboid = Cuboid::new(LatticePos::new(-1, 2, 0), 3, Rgb::DEFAULT_GREY);
        let cells: Vec<_> = cuboid.cells().collect();
        assert_eq!(cells.len() as u64, cuboid.volume());
        assert_eq!(cells[0], LatticePos::new(-1, 2, 0));
        assert_eq!(cells[1], LatticePos::new(0, 2, 0));
        assert!(cells.iter().all(|&cell| cuboid.contains(cell)));
        assert!(!cuboid.contains(cuboid.max_corner()));
    }

    #[test]
    fn flush_neighbours_do_not_overlap() {
        let base = Cuboid::new(LatticePos::ORIGIN, 4, Rgb::DEFAULT_GREY);
        let beside = Cuboid::new(LatticePos::new(4, 0, 0), 2, Rgb::DEFAULT_GREY);
        let below = Cuboid::new(LatticePos::new(0, 0, -3), 3, Rgb::DEFAULT_GREY);
        let inside = Cuboid::new(LatticePos::new(3, 3, 3), 5, Rgb::DEFAULT_GREY);
        assert!(!base.overlaps(&beside));
        assert!(!base.overlaps(&below));
        assert!(base.overlaps(&inside));
        assert!(inside.overlaps(&base));
    }
}
