use crate::errors::{SidxError, SidxResult};
use crate::serialization::{write_i32_be, write_u32_be, ByteReader};
use crate::succinct_file_buffer::SuccinctFileBuffer;
use std::collections::BTreeSet;

/// Record-level index over a [`SuccinctFileBuffer`]: maps record ids to
/// byte ranges in the underlying text and back, and turns substring search
/// into a set of matching record ids.
pub struct SuccinctIndexedFileBuffer<S: SuccinctFileBuffer> {
  succ_fbuf: S,
  offsets: Vec<i32>,
}

impl<S: SuccinctFileBuffer> SuccinctIndexedFileBuffer<S> {
  /// `offsets[r]` must be the start byte of record `r` in the text
  /// `succ_fbuf` was built from: strictly increasing, `offsets[0] == 0`.
  pub fn new(succ_fbuf: S, offsets: Vec<i32>) -> SidxResult<Self> {
    validate_offsets(&offsets)?;
    Ok(SuccinctIndexedFileBuffer { succ_fbuf, offsets })
  }

  pub fn record_count(&self) -> usize {
    self.offsets.len()
  }

  pub fn record_offset(&self, r: usize) -> SidxResult<i32> {
    self.offsets.get(r).copied().ok_or_else(|| {
      SidxError::out_of_range(format!(
        "record id {} out of range (0..{})",
        r,
        self.offsets.len()
      ))
    })
  }

  /// The byte just past the end of record `r`'s body, i.e. the offset of
  /// its terminator for all but the last record, and `OriginalSize - 1`
  /// for the last.
  fn record_end(&self, r: usize) -> i32 {
    if r == self.offsets.len() - 1 {
      self.succ_fbuf.original_size() - 1
    } else {
      self.offsets[r + 1]
    }
  }

  /// The record's body, without its terminator, as raw bytes.
  pub fn record_bytes(&self, r: usize) -> SidxResult<Vec<u8>> {
    let beg = self.record_offset(r)?;
    let len = self.record_end(r) - beg - 1;
    self.succ_fbuf.extract_bytes(beg as i64, len)
  }

  /// The record's body, without its terminator, as a UTF-8 string.
  pub fn record(&self, r: usize) -> SidxResult<String> {
    let beg = self.record_offset(r)?;
    let len = self.record_end(r) - beg - 1;
    self.succ_fbuf.extract(beg as i64, len)
  }

  /// Up to `len` bytes starting at `off` bytes into record `r`'s body,
  /// clamped so as never to cross into the next record's terminator.
  /// `len == 0` yields an empty string.
  pub fn extract_record(&self, r: usize, off: i32, len: i32) -> SidxResult<String> {
    let base = self.record_offset(r)?;
    if len == 0 {
      return Ok(String::new());
    }
    let beg = base + off;
    let next_record_offset = self.record_end(r);
    let clamped_len = len.min(next_record_offset - beg - 1).max(0);
    if clamped_len == 0 {
      return Ok(String::new());
    }
    self.succ_fbuf.extract(beg as i64, clamped_len)
  }

  /// Binary-searches `Offsets` for the greatest index `i` with
  /// `Offsets[i] <= pos`. Returns `-1` for `pos < Offsets[0]`.
  pub fn offset_to_record_id(&self, pos: i64) -> i64 {
    let mut sp: i64 = 0;
    let mut ep: i64 = self.offsets.len() as i64 - 1;

    while sp <= ep {
      let m = (sp + ep) / 2;
      let off = self.offsets[m as usize] as i64;
      if off == pos {
        return m;
      } else if pos < off {
        ep = m - 1;
      } else {
        sp = m + 1;
      }
    }

    ep
  }

  pub fn same_record(&self, a: i64, b: i64) -> bool {
    self.offset_to_record_id(a) == self.offset_to_record_id(b)
  }

  /// Record ids whose body contains `pattern` as a substring, found via
  /// the underlying `SuccFBuf`'s backward search plus suffix-array lookup.
  /// Returned as a `BTreeSet` for deterministic ordering.
  pub fn record_search_ids(&self, pattern: &[u8]) -> BTreeSet<usize> {
    let (sp, ep) = self.succ_fbuf.bwd_search(pattern);
    let mut result = BTreeSet::new();
    if ep < sp {
      return result;
    }

    for i in 0..=(ep - sp) {
      let text_pos = self.succ_fbuf.look_up_sa(sp + i);
      let rid = self.offset_to_record_id(text_pos);
      if rid >= 0 {
        result.insert(rid as usize);
      }
    }

    result
  }

  /// Serializes only the offsets array, as `len(u32)` then `len` ×
  /// `i32` big-endian. The wrapped `SuccFBuf` serializes and deserializes
  /// itself independently; callers reconstruct it separately and pass it to
  /// [`SuccinctIndexedFileBuffer::new`] alongside the offsets this method's
  /// counterpart reads back.
  pub fn serialize_offsets(&self, dst: &mut Vec<u8>) {
    write_u32_be(dst, self.offsets.len() as u32);
    for &o in &self.offsets {
      write_i32_be(dst, o);
    }
  }

  pub fn deserialize_offsets(bytes: &[u8]) -> SidxResult<Vec<i32>> {
    let mut r = ByteReader::new(bytes);
    let len = r.read_u32()? as usize;
    let mut offsets = Vec::with_capacity(len);
    for _ in 0..len {
      offsets.push(r.read_i32()?);
    }
    validate_offsets(&offsets)?;
    Ok(offsets)
  }
}

fn validate_offsets(offsets: &[i32]) -> SidxResult<()> {
  if offsets.is_empty() {
    return Err(SidxError::malformed_image("offsets array must not be empty"));
  }
  if offsets[0] != 0 {
    return Err(SidxError::malformed_image("offsets[0] must be 0"));
  }
  if !offsets.windows(2).all(|w| w[0] < w[1]) {
    return Err(SidxError::malformed_image("offsets must be strictly increasing"));
  }
  Ok(())
}
