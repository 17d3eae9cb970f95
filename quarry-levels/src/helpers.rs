//! Helpers for decoding the fixed-layout records in a BSP file.

use crate::types::{ParseError, Result, Rgba};
use na::{Vector2, Vector3};
use std::convert::TryInto;

/// A sequential, bounds-checked reader over a byte buffer.
///
/// All reads are little-endian, the only layout a BSP file uses; the host's
/// byte order is never consulted. A read past the end of the buffer fails
/// with [`ParseError::TruncatedRecord`] and leaves the cursor where it was.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    buf: &'a [u8],
    offset: usize,
}

impl<'a> Cursor<'a> {
    /// A cursor at the start of `buf`.
    pub fn new(buf: &'a [u8]) -> Cursor<'a> {
        Cursor { buf, offset: 0 }
    }

    /// A cursor `offset` bytes into `buf`.
    pub fn at(buf: &'a [u8], offset: usize) -> Cursor<'a> {
        Cursor { buf, offset }
    }

    /// Current position, in bytes from the start of the buffer.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Read the next `len` bytes, advancing the cursor past them.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        let end = self
            .offset
            .checked_add(len)
            .filter(|end| *end <= self.buf.len())
            .ok_or(ParseError::TruncatedRecord {
                offset: self.offset,
            })?;

        let bytes = &self.buf[self.offset..end];
        self.offset = end;
        Ok(bytes)
    }

    /// Read a le i32, the int datatype in a BSP file.
    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(i32::from_le_bytes(self.read_bytes(4)?.try_into().unwrap()))
    }

    /// Read a le u32, used for indices into other lumps.
    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.read_bytes(4)?.try_into().unwrap()))
    }

    /// Read a le f32, the float datatype in a BSP file.
    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(f32::from_bits(u32::from_le_bytes(
            self.read_bytes(4)?.try_into().unwrap(),
        )))
    }

    /// Read two floats as a 2D vector.
    pub fn read_vec2(&mut self) -> Result<Vector2<f32>> {
        Ok(Vector2::new(self.read_f32()?, self.read_f32()?))
    }

    /// Read three floats as a 3D vector.
    pub fn read_vec3(&mut self) -> Result<Vector3<f32>> {
        Ok(Vector3::new(
            self.read_f32()?,
            self.read_f32()?,
            self.read_f32()?,
        ))
    }

    /// Read four bytes as an RGBA colour.
    pub fn read_rgba(&mut self) -> Result<Rgba> {
        Ok(Rgba::from_bytes(self.read_bytes(4)?.try_into().unwrap()))
    }
}

#[test]
fn cursor_reads_advance_in_order() {
    let buf: &[u8] = &[
        0x2e, 0x00, 0x00, 0x00, // 46
        0xff, 0xff, 0xff, 0xff, // -1
        0x00, 0x00, 0x80, 0x3f, // 1.0
        0x0a, 0x14, 0x1e, 0x28, // rgba
    ];
    let mut cursor = Cursor::new(buf);

    assert_eq!(cursor.read_i32().unwrap(), 46);
    assert_eq!(cursor.read_i32().unwrap(), -1);
    assert_eq!(cursor.read_f32().unwrap(), 1.0);
    assert_eq!(
        cursor.read_rgba().unwrap(),
        Rgba {
            r: 10,
            g: 20,
            b: 30,
            a: 40
        }
    );
    assert_eq!(cursor.offset(), buf.len());
}

#[test]
fn cursor_fails_past_end_without_advancing() {
    let buf: &[u8] = &[0x01, 0x02];
    let mut cursor = Cursor::new(buf);

    assert_eq!(
        cursor.read_i32(),
        Err(ParseError::TruncatedRecord { offset: 0 })
    );
    assert_eq!(cursor.offset(), 0);
    assert_eq!(cursor.read_bytes(2).unwrap(), &[0x01, 0x02]);
}

#[test]
fn cursor_at_offset() {
    let buf: &[u8] = &[0x00, 0x00, 0x00, 0x00, 0x05, 0x00, 0x00, 0x00];
    let mut cursor = Cursor::at(buf, 4);

    assert_eq!(cursor.read_u32().unwrap(), 5);
    assert_eq!(
        cursor.read_u32(),
        Err(ParseError::TruncatedRecord { offset: 8 })
    );
}
