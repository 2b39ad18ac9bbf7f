//! Generation parameters and their validation.

use crate::cuboid::Rgb;
use crate::sampler::BiasedSizeSampler;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Largest accepted pillar width or depth.
pub const MAX_PILLAR_SIDE: u32 = 50;
/// Largest accepted pillar height.
pub const MAX_PILLAR_HEIGHT: u32 = 200;
/// Largest accepted cube edge length.
pub const MAX_CUBE_SIZE: u32 = 20;
/// Largest accepted iteration count.
pub const MAX_ITERATIONS: u32 = 2000;

/// Which pipeline produces the structure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    /// Cubes sprout from a seed cube, face by face.
    #[default]
    Additive,
    /// Cubes are carved from a solid pillar, then the remainder is re-meshed.
    Subtractive,
}

impl GenerationMode {
    /// Lowercase name used in config files and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            GenerationMode::Additive => "additive",
            GenerationMode::Subtractive => "subtractive",
        }
    }
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GenerationMode {
    type Err = ParamError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_ascii_lowercase().as_str() {
            "additive" | "add" => Ok(GenerationMode::Additive),
            "subtractive" | "sub" => Ok(GenerationMode::Subtractive),
            _ => Err(ParamError::UnknownMode(input.to_string())),
        }
    }
}

/// Parameter values the generator refuses to work with.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamError {
    /// A pillar dimension is zero.
    #[error("pillar {axis} must be at least 1")]
    ZeroDimension {
        /// Offending axis name.
        axis: &'static str,
    },
    /// Zero iterations requested.
    #[error("iterations must be at least 1")]
    ZeroIterations,
    /// Minimum cube size is zero.
    #[error("minimum cube size must be at least 1")]
    ZeroMinSize,
    /// Minimum cube size exceeds the maximum.
    #[error("minimum cube size {min} exceeds maximum {max}")]
    InvertedSizeRange {
        /// Configured minimum.
        min: u32,
        /// Configured maximum.
        max: u32,
    },
    /// A value is above the largest accepted setting.
    #[error("{field} {value} exceeds the limit of {limit}")]
    AboveLimit {
        /// Offending field name.
        field: &'static str,
        /// Configured value.
        value: u32,
        /// Largest accepted value.
        limit: u32,
    },
    /// Mode string not recognised.
    #[error("unknown generation mode {0:?} (expected \"additive\" or \"subtractive\")")]
    UnknownMode(String),
}

/// Everything a generation call depends on.
///
/// Pillar dimensions only matter in [`GenerationMode::Subtractive`].
/// `iterations` is the target cube count in additive mode and the number of
/// removal passes in subtractive mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationParameters {
    /// Pipeline selection.
    pub mode: GenerationMode,
    /// Stream seed.
    pub seed: u32,
    /// Pillar extent along X.
    pub width: u32,
    /// Pillar extent along Y.
    pub depth: u32,
    /// Pillar extent along Z.
    pub height: u32,
    /// Target cube count (additive) or removal passes (subtractive).
    pub iterations: u32,
    /// Smallest cube edge length.
    pub min_cube_size: u32,
    /// Largest cube edge length.
    pub max_cube_size: u32,
    /// Colour stamped onto every emitted cuboid.
    pub color: Rgb,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            mode: GenerationMode::Additive,
            seed: 0,
            width: 30,
            depth: 30,
            height: 100,
            iterations: 1000,
            min_cube_size: 1,
            max_cube_size: 20,
            color: Rgb::DEFAULT_GREY,
        }
    }
}

impl GenerationParameters {
    /// Check the ranges the generator relies on. The generator itself never
    /// validates; callers run this before handing parameters over.
    ///
    /// Upper limits keep the pillar grid and single-cube cell sets small
    /// enough to allocate and scan.
    pub fn validate(&self) -> Result<(), ParamError> {
        for (axis, value, limit) in [
            ("width", self.width, MAX_PILLAR_SIDE),
            ("depth", self.depth, MAX_PILLAR_SIDE),
            ("height", self.height, MAX_PILLAR_HEIGHT),
        ] {
            if value == 0 {
                return Err(ParamError::ZeroDimension { axis });
            }
            if value > limit {
                return Err(ParamError::AboveLimit {
                    field: axis,
                    value,
                    limit,
                });
            }
        }
        if self.iterations == 0 {
            return Err(ParamError::ZeroIterations);
        }
        if self.min_cube_size == 0 {
            return Err(ParamError::ZeroMinSize);
        }
        if self.min_cube_size > self.max_cube_size {
            return Err(ParamError::InvertedSizeRange {
                min: self.min_cube_size,
                max: self.max_cube_size,
            });
        }
        for (field, value, limit) in [
            ("iterations", self.iterations, MAX_ITERATIONS),
            ("maximum cube size", self.max_cube_size, MAX_CUBE_SIZE),
        ] {
            if value > limit {
                return Err(ParamError::AboveLimit { field, value, limit });
            }
        }
        Ok(())
    }

    /// Sampler over the configured cube size range.
    pub fn size_sampler(&self) -> BiasedSizeSampler {
        BiasedSizeSampler::new(self.min_cube_size, self.max_cube_size)
    }

    /// Pillar dimensions as `(width, depth, height)`.
    pub fn pillar(&self) -> (usize, usize, usize) {
        (
            self.width as usize,
            self.depth as usize,
            self.height as usize,
        )
    }
}
