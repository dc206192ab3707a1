//! Forward-only cursor over an immutable byte buffer

use super::error::{CodecError, CodecResult};

/// Read cursor consumed by exactly one decode operation
///
/// The cursor only moves forward. A failed read leaves it where it was.
#[derive(Debug)]
pub struct ByteContainer<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> ByteContainer<'a> {
    /// Wrap a buffer, starting at its first byte
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    /// Offset of the next unread byte
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of unread bytes
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.position
    }

    /// Whether every byte has been consumed
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Consume the next `len` bytes
    pub fn take(&mut self, len: usize) -> CodecResult<&'a [u8]> {
        let remaining = self.remaining();
        if len > remaining {
            return Err(CodecError::Truncated {
                needed: len,
                remaining,
                offset: self.position,
            });
        }
        let slice = &self.bytes[self.position..self.position + len];
        self.position += len;
        Ok(slice)
    }

    /// Consume exactly `N` bytes into an array
    pub fn take_array<const N: usize>(&mut self) -> CodecResult<[u8; N]> {
        let slice = self.take(N)?;
        let mut array = [0u8; N];
        array.copy_from_slice(slice);
        Ok(array)
    }
}
