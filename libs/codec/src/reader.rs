//! Bounds-checked little-endian cursor over a byte buffer

use crate::error::{CodecError, CodecResult};

pub struct ByteReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Next byte without consuming it
    pub fn peek(&self) -> Option<u8> {
        self.data.get(self.offset).copied()
    }

    pub fn read_bytes(&mut self, len: usize, context: &str) -> CodecResult<&'a [u8]> {
        if self.remaining() < len {
            return Err(CodecError::truncated(
                len,
                self.offset,
                self.data.len(),
                context,
            ));
        }
        let bytes = &self.data[self.offset..self.offset + len];
        self.offset += len;
        Ok(bytes)
    }

    pub fn read_u8(&mut self, context: &str) -> CodecResult<u8> {
        Ok(self.read_bytes(1, context)?[0])
    }

    pub fn read_u16_le(&mut self, context: &str) -> CodecResult<u16> {
        let bytes = self.read_bytes(2, context)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_u32_le(&mut self, context: &str) -> CodecResult<u32> {
        let bytes = self.read_bytes(4, context)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn read_u64_le(&mut self, context: &str) -> CodecResult<u64> {
        let bytes = self.read_bytes(8, context)?;
        let mut raw = [0u8; 8];
        raw.copy_from_slice(bytes);
        Ok(u64::from_le_bytes(raw))
    }

    /// Bitcoin CompactSize integer
    pub fn read_varint(&mut self, context: &str) -> CodecResult<u64> {
        match self.read_u8(context)? {
            0xfd => Ok(u64::from(self.read_u16_le(context)?)),
            0xfe => Ok(u64::from(self.read_u32_le(context)?)),
            0xff => self.read_u64_le(context),
            small => Ok(u64::from(small)),
        }
    }

    /// CompactSize length followed by that many bytes
    pub fn read_var_bytes(&mut self, context: &str) -> CodecResult<&'a [u8]> {
        let len = self.read_varint(context)?;
        let len = usize::try_from(len).map_err(|_| {
            CodecError::truncated(usize::MAX, self.offset, self.data.len(), context)
        })?;
        self.read_bytes(len, context)
    }
}
