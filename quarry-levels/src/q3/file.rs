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

//! A complete BSP level

// Trait implementations are stored in their own files.

use log::debug;

use super::header::{
    Header, FACES_LUMP, MESHVERTS_LUMP, TEXTURES_LUMP, VERTICES_LUMP,
};
use super::{faces, textures, vertices};
use crate::parts::data::{Face, Texture, Vertex};
use crate::types::Result;

/// Caller-tunable knobs for [`BspLevel::parse`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecodeSettings {
    /// Uniform multiplier applied to each vertex position as it is decoded.
    /// Quake 3 maps are built at roughly 50 units to the metre.
    pub scale_factor: f32,
}

impl Default for DecodeSettings {
    fn default() -> Self {
        DecodeSettings { scale_factor: 0.02 }
    }
}

/// The level geometry parsed from a Quake 3 BSP file.
///
/// Holds only the lumps this crate decodes; everything else in the file
/// (entities, brushes, lightmaps, the vis tree) is left untouched.
pub struct BspLevel {
    pub(crate) vertices: Box<[Vertex]>,
    pub(crate) faces: Box<[Face]>,
    pub(crate) textures: Box<[Texture]>,
}

impl BspLevel {
    /// Parse `data` as a quake 3 bsp file.
    ///
    /// The meshverts lump only exists to be resolved against each face's
    /// base vertex, so it is consumed here and not retained.
    pub fn parse(data: &[u8], settings: DecodeSettings) -> Result<BspLevel> {
        let header = Header::from(data)?;

        let textures = textures::from_data(header.get_lump(data, TEXTURES_LUMP)?)?;
        let vertices =
            vertices::verts_from_data(header.get_lump(data, VERTICES_LUMP)?, settings.scale_factor)?;
        let meshverts = vertices::meshverts_from_data(header.get_lump(data, MESHVERTS_LUMP)?)?;
        let faces = faces::from_data(
            header.get_lump(data, FACES_LUMP)?,
            &meshverts,
            vertices.len() as u32,
        )?;

        debug!(
            "parsed level: {} vertices, {} meshverts, {} polygon faces, {} textures",
            vertices.len(),
            meshverts.len(),
            faces.len(),
            textures.len()
        );

        Ok(BspLevel {
            vertices,
            faces,
            textures,
        })
    }
}

#[cfg(test)]
pub(crate) mod test_file {
    use super::super::header::LUMP_COUNT;

    /// A synthetic BSP file: one quad (4 vertices, 2 triangles), one
    /// texture. Lumps this crate never reads are left zero-length.
    pub fn quad_level_bytes() -> Vec<u8> {
        let mut verts = Vec::new();
        for position in [
            [0.0_f32, 0.0, 0.0],
            [100.0, 0.0, 0.0],
            [100.0, 100.0, 0.0],
            [0.0, 100.0, 0.0],
        ]
        .iter()
        {
            for component in position.iter() {
                verts.extend_from_slice(&component.to_le_bytes());
            }
            for uv in [0.0_f32, 1.0, 0.5, 0.5].iter() {
                verts.extend_from_slice(&uv.to_le_bytes());
            }
            for component in [0.0_f32, 0.0, 1.0].iter() {
                verts.extend_from_slice(&component.to_le_bytes());
            }
            verts.extend_from_slice(&[255, 255, 255, 255]);
        }

        let mut meshverts = Vec::new();
        for displacement in [0_i32, 1, 2, 0, 2, 3].iter() {
            meshverts.extend_from_slice(&displacement.to_le_bytes());
        }

        let mut face = Vec::new();
        for field in [0_i32, -1, 1, 0, 4, 0, 6].iter() {
            face.extend_from_slice(&field.to_le_bytes());
        }
        face.resize(104, 0);

        let mut texture = b"wall01".to_vec();
        texture.resize(64, 0);
        texture.extend_from_slice(&[0; 8]);

        build_file(&verts, &meshverts, &face, &texture)
    }

    /// Lay the four lumps out after the header and directory, pointing
    /// every other directory entry at a zero-length region.
    pub fn build_file(verts: &[u8], meshverts: &[u8], faces: &[u8], textures: &[u8]) -> Vec<u8> {
        let dir_len = 8 + LUMP_COUNT * 8;
        let mut lumps: [&[u8]; LUMP_COUNT] = [&[]; LUMP_COUNT];
        lumps[1] = textures;
        lumps[10] = verts;
        lumps[11] = meshverts;
        lumps[13] = faces;

        let mut buf = Vec::new();
        buf.extend_from_slice(b"IBSP");
        buf.extend_from_slice(&0x2e_i32.to_le_bytes());

        let mut offset = dir_len;
        for lump in lumps.iter() {
            buf.extend_from_slice(&(offset as u32).to_le_bytes());
            buf.extend_from_slice(&(lump.len() as u32).to_le_bytes());
            offset += lump.len();
        }
        for lump in lumps.iter() {
            buf.extend_from_slice(lump);
        }
        buf
    }
}

#[cfg(test)]
mod tests {
    use super::test_file::quad_level_bytes;
    use super::*;
    use crate::parts::{HasFaces, HasTextures, HasVertices};
    use crate::types::ParseError;
    use std::convert::TryInto;

    #[test]
    fn parse_quad_level() {
        let buf = quad_level_bytes();
        let level = BspLevel::parse(&buf, DecodeSettings::default()).unwrap();

        assert_eq!(level.vertices_len(), 4);
        assert_eq!(level.get_vertex(1).unwrap().position, na::Vector3::new(2.0, 0.0, 0.0));

        assert_eq!(level.faces_len(), 1);
        let face = level.get_face(0).unwrap();
        assert_eq!(face.texture_idx, 0);
        assert_eq!(&*face.triangles, &[[0, 1, 2], [0, 2, 3]]);

        assert_eq!(level.textures_len(), 1);
        assert_eq!(level.get_texture(0).unwrap().name, "wall01");
    }

    #[test]
    fn parse_respects_scale_factor() {
        let buf = quad_level_bytes();
        let level = BspLevel::parse(&buf, DecodeSettings { scale_factor: 1.0 }).unwrap();

        assert_eq!(
            level.get_vertex(2).unwrap().position,
            na::Vector3::new(100.0, 100.0, 0.0)
        );
    }

    #[test]
    fn parse_rejects_face_indexing_past_vertices() {
        // drop the last vertex; the face's second triangle now refers to
        // vertex 3 of a 3-vertex buffer
        let buf = quad_level_bytes();
        let level = {
            let verts_start = 8 + 17 * 8 + 72; // after directory and texture lump
            let mut short = buf.clone();
            short.drain(verts_start + 3 * 44..verts_start + 4 * 44);
            // rewrite the vertex lump length and shift later lump offsets
            let mut rewritten = Vec::new();
            rewritten.extend_from_slice(&short[..8]);
            for n in 0..17 {
                let entry = 8 + n * 8;
                let offset = u32::from_le_bytes(buf[entry..entry + 4].try_into().unwrap());
                let length = u32::from_le_bytes(buf[entry + 4..entry + 8].try_into().unwrap());
                let (offset, length) = match n {
                    10 => (offset, length - 44),
                    11 | 13 => (offset - 44, length),
                    _ => (offset, length),
                };
                rewritten.extend_from_slice(&offset.to_le_bytes());
                rewritten.extend_from_slice(&length.to_le_bytes());
            }
            rewritten.extend_from_slice(&short[8 + 17 * 8..]);
            BspLevel::parse(&rewritten, DecodeSettings::default())
        };

        assert_eq!(
            level.err().unwrap(),
            ParseError::IndexOutOfRange { index: 3, limit: 3 }
        );
    }

    #[test]
    fn parse_truncated_file_fails_on_lump_bounds() {
        let buf = quad_level_bytes();
        assert_eq!(
            BspLevel::parse(&buf[..buf.len() - 1], DecodeSettings::default())
                .err()
                .unwrap(),
            ParseError::LumpOutOfBounds { index: 13 }
        );
    }
}
