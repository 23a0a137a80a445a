use std::fmt;
use std::str::FromStr;

use crate::error::VolcamError;

/// Type of samples stored in a raw volume file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoxelType {
    U8,
    U16,
    F32,
    F64,
}

impl VoxelType {
    pub const NAMES: &'static [&'static str] = &["uint8", "uint16", "float32", "float64"];

    /// Size of one sample in bytes
    pub fn size(&self) -> usize {
        match self {
            VoxelType::U8 => 1,
            VoxelType::U16 => 2,
            VoxelType::F32 => 4,
            VoxelType::F64 => 8,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            VoxelType::U8 => "uint8",
            VoxelType::U16 => "uint16",
            VoxelType::F32 => "float32",
            VoxelType::F64 => "float64",
        }
    }
}

impl FromStr for VoxelType {
    type Err = VolcamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "uint8" => Ok(VoxelType::U8),
            "uint16" => Ok(VoxelType::U16),
            "float32" => Ok(VoxelType::F32),
            "float64" => Ok(VoxelType::F64),
            _ => Err(VolcamError::UnknownVoxelType(s.to_owned())),
        }
    }
}

impl fmt::Display for VoxelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Byte order of multi-byte samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Endianness {
    Big,
    #[default]
    Little,
}
