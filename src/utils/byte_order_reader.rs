/*
This code is part of the shape_ingest geospatial library.
Created: 19/10/2026
Last Modified: 19/10/2026
License: MIT

Notes: A cursor over a borrowed byte buffer. The byte order can be switched
between reads, which the shapefile format requires since it mixes big-endian
and little-endian words in the same header.
*/
use byteorder::{BigEndian, ByteOrder, LittleEndian};

/// Raised when a read would run past the end of the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("attempted to read {needed} bytes at offset {offset}, past the end of the buffer")]
pub struct ReadPastEnd {
    pub offset: usize,
    pub needed: usize,
}

pub struct ByteOrderReader<'a> {
    pub byte_order: Endianness,
    buffer: &'a [u8],
    pos: usize,
}

impl<'a> ByteOrderReader<'a> {
    pub fn new(buffer: &'a [u8], byte_order: Endianness) -> ByteOrderReader<'a> {
        ByteOrderReader {
            buffer,
            byte_order,
            pos: 0usize,
        }
    }

    pub fn seek(&mut self, position: usize) {
        self.pos = position;
    }

    pub fn inc_pos(&mut self, skip: usize) {
        self.pos += skip;
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.pos)
    }

    fn take(&mut self, length: usize) -> Result<&'a [u8], ReadPastEnd> {
        if self.remaining() < length {
            return Err(ReadPastEnd {
                offset: self.pos,
                needed: length,
            });
        }
        let buffer: &'a [u8] = self.buffer;
        let buf = &buffer[self.pos..self.pos + length];
        self.pos += length;
        Ok(buf)
    }

    pub fn read_bytes(&mut self, length: usize) -> Result<&'a [u8], ReadPastEnd> {
        self.take(length)
    }

    pub fn read_utf8(&mut self, length: usize) -> Result<String, ReadPastEnd> {
        Ok(String::from_utf8_lossy(self.take(length)?).to_string())
    }

    pub fn read_u8(&mut self) -> Result<u8, ReadPastEnd> {
        // There's really no need for endian issues when reading single bytes.
        Ok(self.take(1)?[0])
    }

    pub fn peek_u8(&self) -> Result<u8, ReadPastEnd> {
        self.buffer.get(self.pos).copied().ok_or(ReadPastEnd {
            offset: self.pos,
            needed: 1,
        })
    }

    pub fn read_u16(&mut self) -> Result<u16, ReadPastEnd> {
        let buf = self.take(2)?;
        Ok(match self.byte_order {
            Endianness::LittleEndian => LittleEndian::read_u16(buf),
            Endianness::BigEndian => BigEndian::read_u16(buf),
        })
    }

    pub fn read_u32(&mut self) -> Result<u32, ReadPastEnd> {
        let buf = self.take(4)?;
        Ok(match self.byte_order {
            Endianness::LittleEndian => LittleEndian::read_u32(buf),
            Endianness::BigEndian => BigEndian::read_u32(buf),
        })
    }

    pub fn read_i32(&mut self) -> Result<i32, ReadPastEnd> {
        let buf = self.take(4)?;
        Ok(match self.byte_order {
            Endianness::LittleEndian => LittleEndian::read_i32(buf),
            Endianness::BigEndian => BigEndian::read_i32(buf),
        })
    }

    pub fn read_f64(&mut self) -> Result<f64, ReadPastEnd> {
        let buf = self.take(8)?;
        Ok(match self.byte_order {
            Endianness::LittleEndian => LittleEndian::read_f64(buf),
            Endianness::BigEndian => BigEndian::read_f64(buf),
        })
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Endianness {
    LittleEndian,
    BigEndian,
}

impl Default for Endianness {
    fn default() -> Endianness {
        Endianness::LittleEndian
    }
}
