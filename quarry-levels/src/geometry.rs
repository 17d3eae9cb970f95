//! Assembling parsed lumps into a renderer-agnostic level description.

use serde::{Deserialize, Serialize};

use crate::parts::data::{TextureRef, Triangle, Vertex};
use crate::q3::file::BspLevel;

/// Everything a consumer needs to build a renderable level, with no
/// reference back to the file it came from.
///
/// `triangles` pairs each triangle with the index of its texture name in
/// `texture_names`. That index comes straight from the face lump and is not
/// validated here; a consumer must bounds-check it before resolving the
/// name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodedLevel {
    pub vertices: Box<[Vertex]>,
    pub triangles: Box<[(TextureRef, Triangle)]>,
    pub texture_names: Box<[String]>,
}

impl DecodedLevel {
    /// Flatten a parsed level into its final form.
    ///
    /// Triangles keep file order, within and across faces. Vertices are
    /// passed through as decoded: no deduplication, no recomputed normals,
    /// no coordinate conversion beyond the scale applied at parse time.
    pub fn assemble(level: BspLevel) -> DecodedLevel {
        let BspLevel {
            vertices,
            faces,
            textures,
        } = level;

        let triangles = faces
            .into_vec()
            .into_iter()
            .flat_map(|face| {
                let texture_idx = face.texture_idx;
                face.triangles
                    .into_vec()
                    .into_iter()
                    .map(move |triangle| (texture_idx, triangle))
            })
            .collect();

        let texture_names = textures
            .into_vec()
            .into_iter()
            .map(|texture| texture.name)
            .collect();

        DecodedLevel {
            vertices,
            triangles,
            texture_names,
        }
    }
}

impl From<BspLevel> for DecodedLevel {
    fn from(level: BspLevel) -> DecodedLevel {
        DecodedLevel::assemble(level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::q3::file::test_file::{build_file, quad_level_bytes};
    use crate::q3::DecodeSettings;

    #[test]
    fn assemble_flattens_quad_level() {
        let buf = quad_level_bytes();
        let level = BspLevel::parse(&buf, DecodeSettings::default()).unwrap();
        let decoded = DecodedLevel::assemble(level);

        assert_eq!(decoded.vertices.len(), 4);
        assert_eq!(&*decoded.triangles, &[(0, [0, 1, 2]), (0, [0, 2, 3])]);
        assert_eq!(&*decoded.texture_names, &["wall01".to_owned()]);
    }

    #[test]
    fn assemble_keeps_file_order_across_faces() {
        let mut verts = Vec::new();
        for _ in 0..3 {
            verts.extend_from_slice(&[0; 44]);
        }
        let mut meshverts = Vec::new();
        for displacement in [0_i32, 1, 2].iter() {
            meshverts.extend_from_slice(&displacement.to_le_bytes());
        }

        let mut faces = Vec::new();
        for texture in [1_i32, 0].iter() {
            for field in [*texture, -1, 1, 0, 3, 0, 3].iter() {
                faces.extend_from_slice(&field.to_le_bytes());
            }
            faces.resize(faces.len() + 104 - 28, 0);
        }

        let mut textures = Vec::new();
        for name in [&b"floor"[..], &b"ceiling"[..]].iter() {
            let mut record = name.to_vec();
            record.resize(72, 0);
            textures.extend(record);
        }

        let buf = build_file(&verts, &meshverts, &faces, &textures);
        let level = BspLevel::parse(&buf, DecodeSettings::default()).unwrap();
        let decoded = DecodedLevel::assemble(level);

        // second face's texture index still points at the first name
        assert_eq!(&*decoded.triangles, &[(1, [0, 1, 2]), (0, [0, 1, 2])]);
        assert_eq!(
            &*decoded.texture_names,
            &["floor".to_owned(), "ceiling".to_owned()]
        );
    }

    #[test]
    fn assemble_empty_level() {
        let buf = build_file(&[], &[], &[], &[]);
        let level = BspLevel::parse(&buf, DecodeSettings::default()).unwrap();
        let decoded = DecodedLevel::assemble(level);

        assert!(decoded.vertices.is_empty());
        assert!(decoded.triangles.is_empty());
        assert!(decoded.texture_names.is_empty());
    }
}
