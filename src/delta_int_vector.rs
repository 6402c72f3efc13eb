//! A delta-coded, sampled, monotonically non-decreasing integer vector.
//!
//! Absolute samples are stored every `sampling_rate` elements; the gaps
//! between samples are gamma-coded (`crate::delta`) into a single bit
//! stream, with per-sample bit offsets recorded so any gap can be located
//! directly. A 64K-entry prefix table (`crate::prefix_tables`) lets both
//! `get` and `binary_search` skip whole runs of codewords at a time instead
//! of decoding bit-by-bit.

use crate::bit_vector::{BitSource, BitVector, RawBitView};
use crate::bits;
use crate::constants::{BLOCK_BITS, DEFAULT_SAMPLING_RATE};
use crate::delta;
use crate::errors::{SidxError, SidxResult};
use crate::int_vector::{IntSource, IntVector, RawIntView};
use crate::prefix_tables;
use crate::serialization::{write_u32_be, ByteReader};

/// A delta-coded, sampled, non-decreasing `u64` sequence. See the module
/// documentation for the storage layout.
#[derive(Clone, Debug, Default)]
pub struct DeltaIntVector {
  samples: IntVector,
  delta_offsets: IntVector,
  deltas: BitVector,
  sampling_rate: usize,
}

impl DeltaIntVector {
  /// Builds a `DeltaIntVector` over `elements` using
  /// [`DEFAULT_SAMPLING_RATE`], for callers without a specific
  /// space/access-time tradeoff in mind.
  pub fn build_default(elements: &[u64]) -> Self {
    Self::build(elements, DEFAULT_SAMPLING_RATE)
  }

  /// Builds a `DeltaIntVector` over `elements`, which must be
  /// non-decreasing. `sampling_rate` must be positive.
  pub fn build(elements: &[u64], sampling_rate: usize) -> Self {
    assert!(sampling_rate > 0, "sampling rate must be positive");

    if elements.is_empty() {
      return DeltaIntVector {
        samples: IntVector::empty(),
        delta_offsets: IntVector::empty(),
        deltas: BitVector::empty(),
        sampling_rate,
      };
    }

    let num_samples = bits::ceil_div(elements.len(), sampling_rate);
    let mut sample_values = Vec::with_capacity(num_samples);
    let mut delta_offset_values = Vec::with_capacity(num_samples);
    let mut deltas_buf = Vec::with_capacity(elements.len() - num_samples);

    let mut last_value = 0u64;
    let mut cumulative_delta_bits: u64 = 0;
    let mut max_sample = 0u64;
    let mut max_delta_offset = 0u64;

    for (i, &value) in elements.iter().enumerate() {
      if i % sampling_rate == 0 {
        sample_values.push(value);
        delta_offset_values.push(cumulative_delta_bits);
        max_sample = max_sample.max(value);
        max_delta_offset = max_delta_offset.max(cumulative_delta_bits);
      } else {
        debug_assert!(
          value >= last_value,
          "DeltaIntVector requires a non-decreasing sequence"
        );
        let d = value - last_value;
        deltas_buf.push(d);
        cumulative_delta_bits += delta::encoded_bits(d) as u64;
      }
      last_value = value;
    }

    let sample_width = bits::bitwidth(max_sample);
    let delta_offset_width = bits::bitwidth(max_delta_offset);

    let samples = IntVector::pack(&sample_values, sample_width);
    let delta_offsets = IntVector::pack(&delta_offset_values, delta_offset_width);

    let deltas = if cumulative_delta_bits == 0 {
      BitVector::empty()
    } else {
      let mut bv = BitVector::with_capacity(cumulative_delta_bits as usize + BLOCK_BITS as usize);
      let mut pos = 0;
      for &d in &deltas_buf {
        pos = delta::encode_into(&mut bv, pos, d);
      }
      bv
    };

    DeltaIntVector {
      samples,
      delta_offsets,
      deltas,
      sampling_rate,
    }
  }

  pub fn sampling_rate(&self) -> usize {
    self.sampling_rate
  }

  /// Random access. `i` must be a valid index into the original sequence;
  /// out-of-range access is a programmer error (the vector does not store
  /// its own length, matching the external offsets-array contract it's
  /// built to serve).
  pub fn get(&self, i: usize) -> u64 {
    get_impl(&self.samples, &self.delta_offsets, &self.deltas, self.sampling_rate, i)
  }

  /// Searches the non-decreasing sub-range `[lo, hi]` (inclusive) for
  /// `val`. If `val` is present, returns the smallest matching index. If
  /// absent, `flag` chooses which neighbor to report: `true` returns the
  /// floor index (largest index with a value `< val`, or `hi` if every
  /// value in range is `< val`), `false` returns the ceiling index
  /// (smallest index with a value `> val`, or `lo` if every value in range
  /// is `> val`). Returns `hi` when `hi < lo`.
  pub fn binary_search(&self, val: u64, lo: usize, hi: usize, flag: bool) -> i64 {
    binary_search_impl(
      &self.samples,
      &self.delta_offsets,
      &self.deltas,
      self.sampling_rate,
      val,
      lo,
      hi,
      flag,
    )
  }

  pub fn serialize(&self, dst: &mut Vec<u8>) {
    write_u32_be(dst, self.sampling_rate as u32);
    write_optional_int_vector(dst, &self.samples);
    write_optional_int_vector(dst, &self.delta_offsets);
    write_optional_bit_vector(dst, &self.deltas);
  }

  /// Byte length of [`Self::serialize`]'s output, without materializing it.
  pub fn serialized_len(&self) -> usize {
    4 + optional_int_vector_len(&self.samples)
      + optional_int_vector_len(&self.delta_offsets)
      + optional_bit_vector_len(&self.deltas)
  }

  pub fn deserialize(bytes: &[u8]) -> SidxResult<Self> {
    let mut r = ByteReader::new(bytes);
    let sampling_rate = r.read_u32()? as usize;
    if sampling_rate == 0 {
      return Err(SidxError::malformed_image("sampling rate must be positive"));
    }
    let samples = read_optional_int_vector(&mut r)?;
    let delta_offsets = read_optional_int_vector(&mut r)?;
    let deltas = read_optional_bit_vector(&mut r)?;
    Ok(DeltaIntVector {
      samples,
      delta_offsets,
      deltas,
      sampling_rate,
    })
  }
}

fn write_optional_int_vector(dst: &mut Vec<u8>, iv: &IntVector) {
  if iv.is_empty() {
    write_u32_be(dst, 0);
  } else {
    iv.serialize(dst);
  }
}

fn optional_int_vector_len(iv: &IntVector) -> usize {
  if iv.is_empty() {
    4
  } else {
    iv.serialized_len()
  }
}

fn optional_bit_vector_len(bv: &BitVector) -> usize {
  if bv.is_empty() {
    4
  } else {
    bv.serialized_len()
  }
}

fn write_optional_bit_vector(dst: &mut Vec<u8>, bv: &BitVector) {
  if bv.is_empty() {
    write_u32_be(dst, 0);
  } else {
    bv.serialize(dst);
  }
}

fn read_optional_int_vector(r: &mut ByteReader) -> SidxResult<IntVector> {
  let width = r.read_u32()?;
  if width == 0 {
    Ok(IntVector::empty())
  } else {
    IntVector::deserialize_body(width, r)
  }
}

fn read_optional_bit_vector(r: &mut ByteReader) -> SidxResult<BitVector> {
  let num_bits = r.read_u32()? as usize;
  if num_bits == 0 {
    Ok(BitVector::empty())
  } else {
    BitVector::deserialize_body(num_bits, r)
  }
}

// ---------------------------------------------------------------------
// Algorithms, generic over the storage representation (owned vectors or
// borrowed raw views), so the serialized-form entry points below share
// their implementation with `DeltaIntVector`'s own methods.
// ---------------------------------------------------------------------

fn prefix_sum<B: BitSource>(deltas: &B, start: usize, r: u32) -> u64 {
  let mut sum: u64 = 0;
  let mut idx: u32 = 0;
  let mut cur = start;

  while idx != r {
    let block = deltas.get_value(cur, BLOCK_BITS) as u16;
    let cnt = prefix_tables::pre_count(block) as u32;

    if cnt == 0 {
      let (d, new_cur) = delta::decode_one(deltas, cur);
      sum += d;
      cur = new_cur;
      idx += 1;
    } else if idx + cnt <= r {
      sum += prefix_tables::pre_sum(block);
      cur += prefix_tables::pre_offset(block) as usize;
      idx += cnt;
    } else {
      while idx != r {
        let (d, new_cur) = delta::decode_one(deltas, cur);
        sum += d;
        cur = new_cur;
        idx += 1;
      }
    }
  }

  sum
}

fn get_impl<I: IntSource, J: IntSource, B: BitSource>(
  samples: &I,
  delta_offsets: &J,
  deltas: &B,
  sampling_rate: usize,
  i: usize,
) -> u64 {
  let k = i / sampling_rate;
  let r = i % sampling_rate;
  let val = samples.get(k);
  if r == 0 {
    return val;
  }
  let off = delta_offsets.get(k) as usize;
  val + prefix_sum(deltas, off, r as u32)
}

/// Lower-bound binary search over `samples[lo_k..=hi_k]` for the leftmost
/// index with `samples[idx] == val`, or the floor index (largest with
/// `samples[idx] <= val`) when `val` is absent. A single lower-bound pass
/// is sufficient here because `samples` is non-decreasing: the first index
/// whose value is `>= val` is either an exact match (necessarily the
/// leftmost one) or one past the floor.
fn binary_search_samples<I: IntSource>(samples: &I, val: u64, lo_k: usize, hi_k: usize) -> usize {
  let mut sp = lo_k;
  let mut ep = hi_k + 1;
  while sp < ep {
    let m = sp + (ep - sp) / 2;
    if samples.get(m) >= val {
      ep = m;
    } else {
      sp = m + 1;
    }
  }

  if sp <= hi_k && samples.get(sp) == val {
    sp
  } else if sp > lo_k {
    sp - 1
  } else {
    lo_k
  }
}

#[allow(clippy::too_many_arguments)]
fn binary_search_impl<I: IntSource, J: IntSource, B: BitSource>(
  samples: &I,
  delta_offsets: &J,
  deltas: &B,
  sampling_rate: usize,
  val: u64,
  lo: usize,
  hi: usize,
  flag: bool,
) -> i64 {
  if hi < lo {
    return hi as i64;
  }

  let s = sampling_rate;
  let lo_k = lo / s;
  let hi_k = hi / s;
  let k = binary_search_samples(samples, val, lo_k, hi_k);
  let sample_val = samples.get(k);
  let delta_limit = (hi - k * s).min(s) as u32;

  let mut delta_offset = delta_offsets.get(k) as usize;
  let val_remaining: i64 = val as i64 - sample_val as i64;
  let mut delta_idx: u32 = 0;
  let mut delta_sum: i64 = 0;

  while delta_sum < val_remaining && delta_idx < delta_limit {
    let block = deltas.get_value(delta_offset, BLOCK_BITS) as u16;
    let cnt = prefix_tables::pre_count(block) as u32;
    let block_sum = prefix_tables::pre_sum(block) as i64;

    if cnt == 0 {
      let (d, new_offset) = delta::decode_one(deltas, delta_offset);
      delta_sum += d as i64;
      delta_offset = new_offset;
      delta_idx += 1;
      if delta_idx == s as u32 {
        delta_idx -= 1;
        delta_sum -= d as i64;
        break;
      }
    } else if delta_sum + block_sum < val_remaining && delta_idx + cnt < delta_limit {
      delta_sum += block_sum;
      delta_offset += prefix_tables::pre_offset(block) as usize;
      delta_idx += cnt;
    } else {
      let mut last_d: u64 = 0;
      while delta_sum < val_remaining && delta_idx < delta_limit {
        let (d, new_offset) = delta::decode_one(deltas, delta_offset);
        last_d = d;
        delta_sum += d as i64;
        delta_offset = new_offset;
        delta_idx += 1;
      }
      if delta_idx == s as u32 {
        delta_idx -= 1;
        delta_sum -= last_d as i64;
        break;
      }
    }
  }

  let ret = (k * s + delta_idx as usize) as i64;
  if val_remaining == delta_sum {
    return ret;
  }
  if flag {
    if delta_sum < val_remaining {
      ret
    } else {
      ret - 1
    }
  } else if delta_sum > val_remaining {
    ret
  } else {
    ret + 1
  }
}

// ---------------------------------------------------------------------
// Serialized-form operations: parse a DIV image's header fields and read
// packed words directly out of the byte slice, without materializing any
// `IntVector`/`BitVector`.
// ---------------------------------------------------------------------

struct ImageHeader<'a> {
  sampling_rate: usize,
  samples: RawIntView<'a>,
  delta_offsets: RawIntView<'a>,
  deltas: RawBitView<'a>,
}

impl<'a> ImageHeader<'a> {
  fn parse(image: &'a [u8]) -> SidxResult<Self> {
    let mut r = ByteReader::new(image);
    let sampling_rate = r.read_u32()? as usize;
    if sampling_rate == 0 {
      return Err(SidxError::malformed_image("sampling rate must be positive"));
    }
    let samples = read_raw_int_view(&mut r)?;
    let delta_offsets = read_raw_int_view(&mut r)?;
    let deltas = read_raw_bit_view(&mut r)?;
    Ok(ImageHeader {
      sampling_rate,
      samples,
      delta_offsets,
      deltas,
    })
  }
}

fn read_raw_int_view<'a>(r: &mut ByteReader<'a>) -> SidxResult<RawIntView<'a>> {
  let width = r.read_u32()?;
  if width == 0 {
    return Ok(RawIntView::empty());
  }
  let _count = r.read_u32()?;
  let num_bits = r.read_u32()? as usize;
  let num_words = r.read_u32()? as usize;
  if num_words != bits::ceil_div(num_bits, 64) {
    return Err(SidxError::malformed_image(
      "int vector word count inconsistent with bit count",
    ));
  }
  let word_bytes = r.take_bytes(num_words * 8)?;
  Ok(RawIntView::new(width, word_bytes))
}

fn read_raw_bit_view<'a>(r: &mut ByteReader<'a>) -> SidxResult<RawBitView<'a>> {
  let num_bits = r.read_u32()? as usize;
  if num_bits == 0 {
    return Ok(RawBitView::empty());
  }
  let num_words = r.read_u32()? as usize;
  if num_words != bits::ceil_div(num_bits, 64) {
    return Err(SidxError::malformed_image(
      "bit vector word count inconsistent with bit count",
    ));
  }
  let word_bytes = r.take_bytes(num_words * 8)?;
  Ok(RawBitView::new(word_bytes))
}

/// Serialized-form `Get`: reads `image[i]` without materializing the DIV's
/// sub-vectors.
pub fn get_from_image(image: &[u8], i: usize) -> SidxResult<u64> {
  let h = ImageHeader::parse(image)?;
  Ok(get_impl(&h.samples, &h.delta_offsets, &h.deltas, h.sampling_rate, i))
}

/// Serialized-form `BinarySearch`: same semantics as
/// [`DeltaIntVector::binary_search`], but reads directly out of a
/// serialized image.
pub fn binary_search_image(image: &[u8], val: u64, lo: usize, hi: usize, flag: bool) -> SidxResult<i64> {
  let h = ImageHeader::parse(image)?;
  Ok(binary_search_impl(
    &h.samples,
    &h.delta_offsets,
    &h.deltas,
    h.sampling_rate,
    val,
    lo,
    hi,
    flag,
  ))
}
