/*
 * Copyright (C) Oscar Shrimpton 2020
 *
 * This program is free software: you can redistribute it and/or modify it
 * under the terms of the GNU General Public License as published by the Free
 * Software Foundation, either version 3 of the License, or (at your option)
 * any later version.
 *
 * This program is distributed in the hope that it will be useful, but WITHOUT
 * ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or
 * FITNESS FOR A PARTICULAR PURPOSE.  See the GNU General Public License for
 * more details.
 *
 * You should have received a copy of the GNU General Public License along
 * with this program.  If not, see <http://www.gnu.org/licenses/>.
 */

//! Various types used in parsed BSP files.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// RGBA Colour (0-255)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Interpret the given bytes as an RGBA colour.
    pub fn from_bytes(bytes: [u8; 4]) -> Rgba {
        Rgba {
            r: bytes[0],
            g: bytes[1],
            b: bytes[2],
            a: bytes[3],
        }
    }
}

/// An error encountered while parsing.
///
/// All variants are terminal for the decode call that raised them: the
/// decoder never pads a short buffer, never clamps an index and never
/// recovers a partial result.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("file too short for magic and version")]
    TruncatedHeader,

    #[error("file too short for the 17-entry lump directory")]
    TruncatedLumpTable,

    #[error("record at offset {offset} runs past the end of the buffer")]
    TruncatedRecord { offset: usize },

    #[error("lump {index} extends past the end of the file")]
    LumpOutOfBounds { index: usize },

    #[error("lump length {length} is not a multiple of record size {record_size}")]
    MisalignedLump { length: usize, record_size: usize },

    #[error("index {index} is outside 0..{limit}")]
    IndexOutOfRange { index: i64, limit: usize },

    #[error("face has {count} meshverts, not a whole number of triangles")]
    IrregularTriangleList { count: i32 },

    #[error("bad magic {found:?}, expected \"IBSP\"")]
    InvalidMagic { found: [u8; 4] },

    #[error("unsupported format version {found:#x}")]
    UnsupportedVersion { found: i32 },

    #[error("texture name at index {index} is not valid utf-8")]
    InvalidName { index: usize },
}

/// Standard result type.
pub type Result<T> = std::result::Result<T, ParseError>;
