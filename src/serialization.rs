use crate::errors::{SidxError, SidxResult};

pub fn write_u32_be(dst: &mut Vec<u8>, x: u32) {
  dst.extend_from_slice(&x.to_be_bytes());
}

pub fn write_i32_be(dst: &mut Vec<u8>, x: i32) {
  dst.extend_from_slice(&x.to_be_bytes());
}

pub fn write_u64_be(dst: &mut Vec<u8>, x: u64) {
  dst.extend_from_slice(&x.to_be_bytes());
}

/// A small sequential big-endian reader over a borrowed byte slice, used
/// both for full deserialization of a structure and for the "serialized
/// form" reads that parse a DIV image's header without materializing its
/// `IntVector`s.
pub struct ByteReader<'a> {
  src: &'a [u8],
  pos: usize,
}

impl<'a> ByteReader<'a> {
  pub fn new(src: &'a [u8]) -> Self {
    ByteReader { src, pos: 0 }
  }

  fn take(&mut self, n: usize) -> SidxResult<&'a [u8]> {
    if self.pos + n > self.src.len() {
      return Err(SidxError::malformed_image(format!(
        "expected {} more bytes at offset {}, only {} remain",
        n,
        self.pos,
        self.src.len().saturating_sub(self.pos)
      )));
    }
    let slice = &self.src[self.pos..self.pos + n];
    self.pos += n;
    Ok(slice)
  }

  /// Takes the next `n` bytes as a borrowed, un-decoded slice, without
  /// inspecting them. Used when the caller wants to build a view directly
  /// over a region of raw words rather than materialize them.
  pub fn take_bytes(&mut self, n: usize) -> SidxResult<&'a [u8]> {
    self.take(n)
  }

  pub fn read_u32(&mut self) -> SidxResult<u32> {
    let bytes = self.take(4)?;
    Ok(u32::from_be_bytes(bytes.try_into().unwrap()))
  }

  pub fn read_i32(&mut self) -> SidxResult<i32> {
    let bytes = self.take(4)?;
    Ok(i32::from_be_bytes(bytes.try_into().unwrap()))
  }

  pub fn read_u64(&mut self) -> SidxResult<u64> {
    let bytes = self.take(8)?;
    Ok(u64::from_be_bytes(bytes.try_into().unwrap()))
  }

  pub fn rest(&self) -> &'a [u8] {
    &self.src[self.pos..]
  }
}
