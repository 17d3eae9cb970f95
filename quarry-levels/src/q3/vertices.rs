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

use super::file::BspLevel;
use crate::helpers::Cursor;
use crate::parts::data::{TexCoord, Vertex, VertexRef};
use crate::parts::HasVertices;
use crate::types::{ParseError, Result};

/// The size of one vertex record
const VERTEX_SIZE: usize = (4 * 3) + (2 * 2 * 4) + (4 * 3) + 4;

/// A meshvert: a displacement relative to some face's first vertex, not an
/// absolute vertex index.
pub type MeshVert = i32;

/// Parse the given data as the vertex lump.
///
/// `scale_factor` multiplies each position as it is decoded; texture
/// coordinates, normals and colours are copied through untouched.
/// # Format
/// float[3] position
/// float[2][2] texcoord    0=surface, 1=lightmap.
/// float[3] normal
/// ubyte[4] color          RGBA.
pub fn verts_from_data(data: &[u8], scale_factor: f32) -> Result<Box<[Vertex]>> {
    if data.len() % VERTEX_SIZE != 0 {
        return Err(ParseError::MisalignedLump {
            length: data.len(),
            record_size: VERTEX_SIZE,
        });
    }
    let length = data.len() / VERTEX_SIZE;

    let mut cursor = Cursor::new(data);
    let mut vertices = Vec::with_capacity(length);
    for _ in 0..length {
        vertices.push(Vertex {
            position: cursor.read_vec3()? * scale_factor,
            tex: TexCoord {
                surface: cursor.read_vec2()?,
                lightmap: cursor.read_vec2()?,
            },
            normal: cursor.read_vec3()?,
            color: cursor.read_rgba()?,
        });
    }

    Ok(vertices.into_boxed_slice())
}

/// Parse the given data as the meshverts lump.
pub fn meshverts_from_data(data: &[u8]) -> Result<Box<[MeshVert]>> {
    if data.len() % 4 != 0 {
        return Err(ParseError::MisalignedLump {
            length: data.len(),
            record_size: 4,
        });
    }
    let length = data.len() / 4;

    let mut cursor = Cursor::new(data);
    let mut meshverts = Vec::with_capacity(length);
    for _ in 0..length {
        meshverts.push(cursor.read_i32()?);
    }

    Ok(meshverts.into_boxed_slice())
}

impl HasVertices for BspLevel {
    fn get_vertex(&self, index: VertexRef) -> Option<&Vertex> {
        self.vertices.get(index as usize)
    }

    fn vertices_len(&self) -> u32 {
        self.vertices.len() as u32
    }
}

#[cfg(test)]
fn test_vertex_bytes(position: [f32; 3]) -> Vec<u8> {
    let mut buf = Vec::new();
    for component in position.iter() {
        buf.extend_from_slice(&component.to_le_bytes());
    }
    for uv in [0.5_f32, 0.25, 0.75, 1.0].iter() {
        buf.extend_from_slice(&uv.to_le_bytes());
    }
    for component in [0.0_f32, 1.0, 0.0].iter() {
        buf.extend_from_slice(&component.to_le_bytes());
    }
    buf.extend_from_slice(&[255, 128, 64, 255]);
    buf
}

#[test]
fn vertices_single_vertex_scaled() {
    let buf = test_vertex_bytes([100.0, 200.0, -50.0]);
    let verts = verts_from_data(&buf, 0.02).unwrap();

    assert_eq!(verts.len(), 1);
    assert_eq!(verts[0].position, na::Vector3::new(2.0, 4.0, -1.0));
    assert_eq!(verts[0].tex.surface, na::Vector2::new(0.5, 0.25));
    assert_eq!(verts[0].tex.lightmap, na::Vector2::new(0.75, 1.0));
    assert_eq!(verts[0].normal, na::Vector3::new(0.0, 1.0, 0.0));
    assert_eq!(verts[0].color.g, 128);
}

#[test]
fn vertices_scale_only_touches_position() {
    let buf = test_vertex_bytes([8.0, -8.0, 16.0]);
    let small = verts_from_data(&buf, 1.0).unwrap();
    let large = verts_from_data(&buf, 4.0).unwrap();

    assert_eq!(large[0].position, small[0].position * 4.0);
    assert_eq!(large[0].tex, small[0].tex);
    assert_eq!(large[0].normal, small[0].normal);
    assert_eq!(large[0].color, small[0].color);
}

#[test]
fn vertices_misaligned_lump() {
    let buf = test_vertex_bytes([0.0, 0.0, 0.0]);
    assert_eq!(
        verts_from_data(&buf[..40], 1.0),
        Err(ParseError::MisalignedLump {
            length: 40,
            record_size: VERTEX_SIZE
        })
    );
}

#[test]
fn meshverts_decode_in_order() {
    let mut buf = Vec::new();
    for value in [0_i32, 2, 1, -1].iter() {
        buf.extend_from_slice(&value.to_le_bytes());
    }

    let meshverts = meshverts_from_data(&buf).unwrap();
    assert_eq!(&*meshverts, &[0, 2, 1, -1]);
}

#[test]
fn meshverts_misaligned_lump() {
    assert_eq!(
        meshverts_from_data(&[0x00, 0x00, 0x00]),
        Err(ParseError::MisalignedLump {
            length: 3,
            record_size: 4
        })
    );
}
