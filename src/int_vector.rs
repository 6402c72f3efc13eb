use crate::bit_vector::{BitSource, BitVector, RawBitView};
use crate::constants::Bitlen;
use crate::errors::{SidxError, SidxResult};
use crate::serialization::{write_u32_be, ByteReader};

/// Any source of fixed-width packed integers addressable by index. Lets
/// `DeltaIntVector` run its algorithms over an owned [`IntVector`] or a
/// borrowed view straight over a serialized image.
pub(crate) trait IntSource {
  fn get(&self, i: usize) -> u64;
}

/// A packed array of non-negative integers, each exactly `width` bits wide.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IntVector {
  width: Bitlen,
  count: usize,
  bits: BitVector,
}

impl IntVector {
  pub fn empty() -> Self {
    IntVector {
      width: 0,
      count: 0,
      bits: BitVector::empty(),
    }
  }

  pub fn is_empty(&self) -> bool {
    self.width == 0
  }

  pub fn len(&self) -> usize {
    self.count
  }

  pub fn width(&self) -> Bitlen {
    self.width
  }

  /// Packs `values` into a new vector of fixed `width` bits per entry.
  /// `width` must be large enough to hold every value; violating that is a
  /// programmer error, not a recoverable condition, since widths are
  /// computed from the data itself (see `delta_int_vector::build`).
  pub fn pack(values: &[u64], width: Bitlen) -> Self {
    if width == 0 || values.is_empty() {
      return IntVector::empty();
    }
    let mut bitvec = BitVector::with_capacity(values.len() * width as usize);
    for (i, &v) in values.iter().enumerate() {
      debug_assert!(
        width >= 64 || v < (1u64 << width),
        "value {} overflows width {}",
        v,
        width
      );
      bitvec.set_value(i * width as usize, v, width);
    }
    IntVector {
      width,
      count: values.len(),
      bits: bitvec,
    }
  }

  pub fn get(&self, i: usize) -> u64 {
    if self.width == 0 {
      return 0;
    }
    self.bits.get_value(i * self.width as usize, self.width)
  }

  /// Serializes as `width(u32) | count(u32) | bits`.
  pub fn serialize(&self, dst: &mut Vec<u8>) {
    write_u32_be(dst, self.width);
    write_u32_be(dst, self.count as u32);
    self.bits.serialize(dst);
  }

  /// Byte length of [`Self::serialize`]'s output.
  pub fn serialized_len(&self) -> usize {
    8 + self.bits.serialized_len()
  }

  pub(crate) fn deserialize(r: &mut ByteReader) -> SidxResult<Self> {
    let width = r.read_u32()?;
    Self::deserialize_body(width, r)
  }

  pub(crate) fn deserialize_body(width: Bitlen, r: &mut ByteReader) -> SidxResult<Self> {
    let count = r.read_u32()? as usize;
    let bits = BitVector::deserialize(r)?;
    if width == 0 && count != 0 {
      return Err(SidxError::malformed_image(
        "int vector has zero width but nonzero count",
      ));
    }
    Ok(IntVector { width, count, bits })
  }
}

impl IntSource for IntVector {
  fn get(&self, i: usize) -> u64 {
    IntVector::get(self, i)
  }
}

/// A borrowed view over the serialized payload of an `IntVector`
/// (`width`, plus the word bytes of its backing `BitVector`), without
/// materializing either.
pub(crate) struct RawIntView<'a> {
  width: Bitlen,
  words: RawBitView<'a>,
}

impl<'a> RawIntView<'a> {
  pub(crate) fn new(width: Bitlen, word_bytes: &'a [u8]) -> Self {
    RawIntView {
      width,
      words: RawBitView::new(word_bytes),
    }
  }

  pub(crate) fn empty() -> Self {
    RawIntView {
      width: 0,
      words: RawBitView::empty(),
    }
  }
}

impl<'a> IntSource for RawIntView<'a> {
  fn get(&self, i: usize) -> u64 {
    if self.width == 0 {
      return 0;
    }
    self.words.get_value(i * self.width as usize, self.width)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn pack_and_get() {
    let values = vec![0u64, 5, 1000, 3, 999];
    let iv = IntVector::pack(&values, 10);
    for (i, &v) in values.iter().enumerate() {
      assert_eq!(iv.get(i), v);
    }
  }

  #[test]
  fn empty_vector_reads_zero() {
    let iv = IntVector::empty();
    assert_eq!(iv.get(0), 0);
    assert_eq!(iv.get(100), 0);
  }

  #[test]
  fn serialize_deserialize_round_trip() {
    let values = vec![1u64, 2, 3, 4, 5];
    let iv = IntVector::pack(&values, 3);
    let mut buf = Vec::new();
    iv.serialize(&mut buf);
    let mut r = ByteReader::new(&buf);
    let back = IntVector::deserialize(&mut r).unwrap();
    assert_eq!(back, iv);
  }

  #[test]
  fn raw_view_matches_owned_vector() {
    let values = vec![7u64, 200, 55, 1, 900];
    let iv = IntVector::pack(&values, 10);
    let mut buf = Vec::new();
    iv.serialize(&mut buf);
    // skip width/count/numBits/numWords (16 bytes) to reach the word payload
    let view = RawIntView::new(10, &buf[16..]);
    for i in 0..values.len() {
      assert_eq!(view.get(i), iv.get(i));
    }
  }
}
