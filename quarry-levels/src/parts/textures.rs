// This program is free software: you can redistribute it and/or modify it
// under the terms of the GNU General Public License as published by the Free
// Software Foundation, either version 3 of the License, or (at your option)
// any later version.

// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or
// FITNESS FOR A PARTICULAR PURPOSE.  See the GNU General Public License for
// more details.

// You should have received a copy of the GNU General Public License along
// with this program.  If not, see <http://www.gnu.org/licenses/>.

use serde::{Deserialize, Serialize};
use std::iter::Iterator;

pub type TextureRef = u32;

/// A texture reference from the materials lump.
///
/// Resolving `name` to an image on disk belongs to whatever consumes the
/// decoded level, not to this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Texture {
    pub name: String,
}

pub trait HasTextures {
    fn get_texture(&self, idx: TextureRef) -> Option<&Texture>;
    fn textures_len(&self) -> u32;
    fn iter_textures(&self) -> Textures<Self> {
        Textures {
            next: 0,
            container: self,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Textures<'a, T: HasTextures + ?Sized> {
    next: TextureRef,
    container: &'a T,
}

impl<'a, T: HasTextures> Iterator for Textures<'a, T> {
    type Item = &'a Texture;

    fn next(&mut self) -> Option<Self::Item> {
        let res = self.container.get_texture(self.next);
        self.next += 1;
        res
    }
}
