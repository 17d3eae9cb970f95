use crate::types::Rgba;
use na::{Vector2, Vector3};
use serde::{Deserialize, Serialize};

pub type VertexRef = u32;

/// A vertex, used to describe a face.
///
/// The position has already had the caller's uniform scale applied; every
/// other field is exactly as stored in the file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub position: Vector3<f32>,
    pub tex: TexCoord,
    pub normal: Vector3<f32>,
    pub color: Rgba,
}

/// The two texture coordinate sets carried by each vertex.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TexCoord {
    pub surface: Vector2<f32>,
    pub lightmap: Vector2<f32>,
}

pub trait HasVertices {
    fn get_vertex(&self, index: VertexRef) -> Option<&Vertex>;
    fn vertices_len(&self) -> u32;
    fn iter_vertices(&self) -> Vertices<Self> {
        Vertices {
            next: 0,
            container: self,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Vertices<'a, T: HasVertices + ?Sized> {
    next: VertexRef,
    container: &'a T,
}

impl<'a, T: HasVertices> Iterator for Vertices<'a, T> {
    type Item = &'a Vertex;

    fn next(&mut self) -> Option<Self::Item> {
        let res = self.container.get_vertex(self.next);
        self.next += 1;
        res
    }
}
