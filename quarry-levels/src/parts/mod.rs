mod faces;
mod textures;
mod vertices;

pub mod data {
    pub use super::faces::{Face, FaceRef, FaceType, Triangle};
    pub use super::textures::{Texture, TextureRef};
    pub use super::vertices::{TexCoord, Vertex, VertexRef};
}

pub use faces::HasFaces;
pub use textures::HasTextures;
pub use vertices::HasVertices;
