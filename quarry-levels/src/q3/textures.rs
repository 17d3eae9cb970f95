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

use std::str;

use super::file::BspLevel;
use crate::helpers::Cursor;
use crate::parts::data::{Texture, TextureRef};
use crate::parts::HasTextures;
use crate::types::{ParseError, Result};

const TEXTURE_SIZE: usize = 64 + 4 + 4;

/// Parse the given data as the textures lump.
///
/// Only the name survives decoding; the surface and content flags describe
/// gameplay behaviour this crate has no use for. Trailing NUL padding is
/// stripped from each name.
/// # Format
/// Each texture is:
/// string[64] name     Texture name, NUL padded.
/// int flags           Surface flags.
/// int contents        Content flags.
pub fn from_data(lump: &[u8]) -> Result<Box<[Texture]>> {
    if lump.len() % TEXTURE_SIZE != 0 {
        return Err(ParseError::MisalignedLump {
            length: lump.len(),
            record_size: TEXTURE_SIZE,
        });
    }
    let length = lump.len() / TEXTURE_SIZE;

    let mut textures = Vec::with_capacity(length);
    for n in 0..length {
        let mut cursor = Cursor::at(lump, n * TEXTURE_SIZE);
        let name = cursor.read_bytes(64)?;

        textures.push(Texture {
            name: str::from_utf8(name)
                .map_err(|_| ParseError::InvalidName { index: n })?
                .trim_end_matches('\0')
                .to_owned(),
        });
    }

    Ok(textures.into_boxed_slice())
}

impl HasTextures for BspLevel {
    fn get_texture(&self, idx: TextureRef) -> Option<&Texture> {
        self.textures.get(idx as usize)
    }

    fn textures_len(&self) -> u32 {
        self.textures.len() as u32
    }
}

#[cfg(test)]
fn test_texture_bytes(name: &[u8]) -> Vec<u8> {
    let mut buf = name.to_vec();
    buf.resize(64, 0);
    buf.extend_from_slice(&0x04_i32.to_le_bytes()); // flags
    buf.extend_from_slice(&0x01_i32.to_le_bytes()); // contents
    buf
}

#[test]
fn textures_name_stripped_of_padding() {
    let buf = test_texture_bytes(b"wall01");
    let lump = from_data(&buf).unwrap();

    assert_eq!(lump.len(), 1);
    assert_eq!(lump[0].name, "wall01");
}

#[test]
fn textures_order_preserved() {
    let mut buf = test_texture_bytes(b"textures/base/floor");
    buf.extend(test_texture_bytes(b"textures/base/ceiling"));

    let lump = from_data(&buf).unwrap();

    assert_eq!(lump.len(), 2);
    assert_eq!(lump[0].name, "textures/base/floor");
    assert_eq!(lump[1].name, "textures/base/ceiling");
}

#[test]
fn textures_empty_lump_is_empty() {
    assert_eq!(from_data(&[]).unwrap().len(), 0);
}

#[test]
fn textures_misaligned_lump() {
    let buf = test_texture_bytes(b"wall01");
    assert_eq!(
        from_data(&buf[..70]),
        Err(ParseError::MisalignedLump {
            length: 70,
            record_size: TEXTURE_SIZE
        })
    );
}

#[test]
fn textures_invalid_utf8_name() {
    let mut buf = test_texture_bytes(b"ok");
    buf.extend(test_texture_bytes(&[0xff, 0xfe]));

    assert_eq!(from_data(&buf), Err(ParseError::InvalidName { index: 1 }));
}
