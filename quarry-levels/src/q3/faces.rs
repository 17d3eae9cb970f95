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
use super::vertices::MeshVert;
use crate::helpers::Cursor;
use crate::parts::data::{Face, FaceRef, FaceType, Triangle};
use crate::parts::HasFaces;
use crate::types::{ParseError, Result};

const FACE_SIZE: usize = (4 * 8) + (4 * 2) + (4 * 2) + (4 * 3) + ((4 * 3) * 2) + (4 * 3) + (4 * 2);

/// Parse the given data as the face lump, resolving each polygon face's
/// draw list to triangles through the meshverts lump.
///
/// Faces of any type other than polygon carry no geometry this crate
/// decodes; they are skipped and contribute nothing to the output.
/// # Format
/// int texture         Texture index.
/// int effect          Index into the effects lump, or -1.
/// int type            1=polygon, 2=patch, 3=mesh, 4=billboard.
/// int vertex          Index of first vertex.
/// int n_vertexes      Number of vertices.
/// int meshvert        Index of first meshvert.
/// int n_meshverts     Number of meshverts.
/// int lm_index        Lightmap index.
/// int[2] lm_start     Corner of this face's lightmap image.
/// int[2] lm_size      Size of this face's lightmap image.
/// float[3] lm_origin  World space origin of lightmap.
/// float[2][3] lm_vecs World space lightmap s and t unit vectors.
/// float[3] normal     Surface normal.
/// int[2] size         Patch dimensions.
pub fn from_data(data: &[u8], meshverts: &[MeshVert], n_vertices: u32) -> Result<Box<[Face]>> {
    if data.len() % FACE_SIZE != 0 {
        return Err(ParseError::MisalignedLump {
            length: data.len(),
            record_size: FACE_SIZE,
        });
    }
    let length = data.len() / FACE_SIZE;

    let mut faces = Vec::with_capacity(length);
    for n in 0..length {
        let mut cursor = Cursor::at(data, n * FACE_SIZE);

        let texture_idx = cursor.read_u32()?;
        let _effect_idx = cursor.read_i32()?;
        let face_type = FaceType::from_i32(cursor.read_i32()?);
        let base_vertex = cursor.read_i32()?;
        let _n_vertexes = cursor.read_i32()?;
        let base_meshvert = cursor.read_i32()?;
        let n_meshverts = cursor.read_i32()?;
        // lightmap fields, normal and patch size are not consumed

        if face_type != FaceType::Polygon {
            continue;
        }

        faces.push(Face {
            texture_idx,
            triangles: resolve_triangles(
                base_vertex,
                base_meshvert,
                n_meshverts,
                meshverts,
                n_vertices,
            )?,
        });
    }

    Ok(faces.into_boxed_slice())
}

/// Turn one face's slice of the meshverts lump into triangles.
///
/// Each meshvert is a displacement from `base_vertex`; the resolved draw
/// list is already triangle-listed, so it is grouped into consecutive
/// non-overlapping triples. A count that isn't a whole number of triangles
/// is treated as corrupt input, not truncated.
fn resolve_triangles(
    base_vertex: i32,
    base_meshvert: i32,
    n_meshverts: i32,
    meshverts: &[MeshVert],
    n_vertices: u32,
) -> Result<Box<[Triangle]>> {
    if n_meshverts % 3 != 0 {
        return Err(ParseError::IrregularTriangleList { count: n_meshverts });
    }

    let mut indices = Vec::with_capacity(n_meshverts as usize);
    for k in 0..n_meshverts {
        let meshvert = (base_meshvert as i64) + (k as i64);
        if meshvert < 0 || meshvert >= meshverts.len() as i64 {
            return Err(ParseError::IndexOutOfRange {
                index: meshvert,
                limit: meshverts.len(),
            });
        }

        let vertex = (base_vertex as i64) + (meshverts[meshvert as usize] as i64);
        if vertex < 0 || vertex >= n_vertices as i64 {
            return Err(ParseError::IndexOutOfRange {
                index: vertex,
                limit: n_vertices as usize,
            });
        }

        indices.push(vertex as u32);
    }

    // winding is kept as stored in the file
    Ok(indices
        .chunks_exact(3)
        .map(|tri| [tri[0], tri[1], tri[2]])
        .collect())
}

impl HasFaces for BspLevel {
    fn get_face(&self, index: FaceRef) -> Option<&Face> {
        self.faces.get(index as usize)
    }

    fn faces_len(&self) -> u32 {
        self.faces.len() as u32
    }
}

#[cfg(test)]
fn test_face_bytes(
    texture: i32,
    face_type: i32,
    base_vertex: i32,
    base_meshvert: i32,
    n_meshverts: i32,
) -> Vec<u8> {
    let mut buf = Vec::new();
    for field in [
        texture,
        -1, // effect
        face_type,
        base_vertex,
        3, // n_vertexes
        base_meshvert,
        n_meshverts,
    ]
    .iter()
    {
        buf.extend_from_slice(&field.to_le_bytes());
    }
    buf.resize(FACE_SIZE, 0);
    buf
}

#[test]
fn faces_polygon_resolves_triangles() {
    let buf = test_face_bytes(2, 1, 4, 1, 6);
    let meshverts = [9, 0, 1, 2, 0, 2, 3];

    let faces = from_data(&buf, &meshverts, 8).unwrap();

    assert_eq!(faces.len(), 1);
    assert_eq!(faces[0].texture_idx, 2);
    assert_eq!(&*faces[0].triangles, &[[4, 5, 6], [4, 6, 7]]);
}

#[test]
fn faces_skip_non_polygon_types() {
    let mut buf = test_face_bytes(0, 2, 0, 0, 3); // patch
    buf.extend(test_face_bytes(0, 3, 0, 0, 3)); // mesh
    buf.extend(test_face_bytes(0, 4, 0, 0, 3)); // billboard
    buf.extend(test_face_bytes(0, 7, 0, 0, 3)); // unknown
    buf.extend(test_face_bytes(1, 1, 0, 0, 3)); // polygon

    let faces = from_data(&buf, &[0, 1, 2], 3).unwrap();

    assert_eq!(faces.len(), 1);
    assert_eq!(faces[0].texture_idx, 1);
    assert_eq!(&*faces[0].triangles, &[[0, 1, 2]]);
}

#[test]
fn faces_misaligned_lump() {
    let buf = test_face_bytes(0, 1, 0, 0, 3);
    assert_eq!(
        from_data(&buf[..100], &[], 0),
        Err(ParseError::MisalignedLump {
            length: 100,
            record_size: FACE_SIZE
        })
    );
}

#[test]
fn faces_irregular_triangle_list() {
    let buf = test_face_bytes(0, 1, 0, 0, 4);
    assert_eq!(
        from_data(&buf, &[0, 1, 2, 1], 3),
        Err(ParseError::IrregularTriangleList { count: 4 })
    );
}

#[test]
fn faces_meshvert_out_of_range() {
    let buf = test_face_bytes(0, 1, 0, 1, 3);
    assert_eq!(
        from_data(&buf, &[0, 1, 2], 3),
        Err(ParseError::IndexOutOfRange { index: 3, limit: 3 })
    );
}

#[test]
fn faces_vertex_out_of_range() {
    // meshvert 2 resolves to vertex 2, past the 2-vertex buffer
    let buf = test_face_bytes(0, 1, 0, 0, 3);
    assert_eq!(
        from_data(&buf, &[0, 1, 2], 2),
        Err(ParseError::IndexOutOfRange { index: 2, limit: 2 })
    );
}

#[test]
fn faces_negative_vertex_out_of_range() {
    let buf = test_face_bytes(0, 1, 0, 0, 3);
    assert_eq!(
        from_data(&buf, &[-1, 0, 1], 3),
        Err(ParseError::IndexOutOfRange {
            index: -1,
            limit: 3
        })
    );
}

#[test]
fn faces_irregular_list_checked_before_indices() {
    // a 2-meshvert face fails on shape even though every index resolves
    let buf = test_face_bytes(0, 1, 0, 0, 2);
    assert_eq!(
        from_data(&buf, &[0, 1], 2),
        Err(ParseError::IrregularTriangleList { count: 2 })
    );
}
