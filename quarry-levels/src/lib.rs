//! Parses Quake 3 BSP files into renderer-agnostic level geometry.
//!
//! [`BspLevel::parse`] decodes the texture, vertex, meshvert and face lumps
//! out of an in-memory file; [`DecodedLevel::assemble`] flattens the result
//! into plain vertex/triangle/name buffers for whatever builds the scene.
//! Lumps for everything else a BSP carries (entities, brushes, lightmaps,
//! visibility) are never read.

extern crate nalgebra as na;

pub mod geometry;
pub mod helpers;
pub mod parts;
pub mod q3;
pub mod types;

pub use geometry::DecodedLevel;
pub use q3::{BspLevel, DecodeSettings};
pub use types::{ParseError, Result};
