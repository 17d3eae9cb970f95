use super::textures::TextureRef;
use super::vertices::VertexRef;
use serde::{Deserialize, Serialize};

pub type FaceRef = u32;

/// Three absolute vertex indices, wound as stored in the file.
pub type Triangle = [VertexRef; 3];

/// The geometry class of a raw face record.
///
/// Only [`FaceType::Polygon`] faces carry geometry this crate decodes;
/// every other class is skipped without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceType {
    Polygon,
    Patch,
    Mesh,
    Billboard,
    Unknown(i32),
}

impl FaceType {
    pub fn from_i32(tag: i32) -> FaceType {
        match tag {
            1 => FaceType::Polygon,
            2 => FaceType::Patch,
            3 => FaceType::Mesh,
            4 => FaceType::Billboard,
            other => FaceType::Unknown(other),
        }
    }
}

/// A polygon face, with its draw list already resolved to triangles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Face {
    pub texture_idx: TextureRef,
    pub triangles: Box<[Triangle]>,
}

pub trait HasFaces {
    fn get_face(&self, index: FaceRef) -> Option<&Face>;
    fn faces_len(&self) -> u32;
    fn iter_faces(&self) -> Faces<Self> {
        Faces {
            next: 0,
            container: self,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Faces<'a, T: HasFaces + ?Sized> {
    next: FaceRef,
    container: &'a T,
}

impl<'a, T: HasFaces> Iterator for Faces<'a, T> {
    type Item = &'a Face;

    fn next(&mut self) -> Option<Self::Item> {
        let res = self.container.get_face(self.next);
        self.next += 1;
        res
    }
}
