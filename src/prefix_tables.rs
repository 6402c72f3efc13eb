//! Precomputed lookups over every possible 16-bit snapshot of the `Deltas`
//! bit stream, letting `DeltaIntVector` batch-decode several codewords at
//! once instead of walking bit-by-bit. Built once, lazily, on first use, and
//! shared for the lifetime of the process; the table is immutable once
//! built and costs a few hundred KB, so there is no benefit to rebuilding
//! it per instance.

use crate::constants::Bitlen;
use std::sync::OnceLock;

#[derive(Clone, Copy)]
struct PrefixEntry {
  count: u16,
  sum: u64,
  offset: Bitlen,
}

static TABLE: OnceLock<Vec<PrefixEntry>> = OnceLock::new();

fn table() -> &'static [PrefixEntry] {
  TABLE.get_or_init(build_table)
}

fn build_table() -> Vec<PrefixEntry> {
  (0..=u16::MAX).map(compute_entry).collect()
}

/// Decodes as many whole codewords as fit entirely within the 16-bit
/// `pattern`, scanning left to right (bit 0 = MSB). Each codeword decodes a
/// value `e >= 1`; the real delta it represents is `e - 1` (see
/// `delta::decode_one` for the non-tabular version of the same scan).
fn compute_entry(pattern: u16) -> PrefixEntry {
  let mut pos: Bitlen = 0;
  let mut count: u16 = 0;
  let mut sum: u64 = 0;

  loop {
    if pos >= 16 {
      break;
    }

    // unary zero-prefix scan for the terminating `1` bit
    let mut width: Bitlen = 0;
    let mut scan = pos;
    loop {
      if scan >= 16 {
        return PrefixEntry {
          count,
          sum,
          offset: pos,
        };
      }
      if bit_at(pattern, scan) == 1 {
        break;
      }
      width += 1;
      scan += 1;
    }

    let payload_start = scan + 1;
    let payload_end = payload_start + width;
    if payload_end > 16 {
      return PrefixEntry {
        count,
        sum,
        offset: pos,
      };
    }

    let mut payload: u64 = 0;
    for k in 0..width {
      payload = (payload << 1) | bit_at(pattern, payload_start + k) as u64;
    }
    let e = (1u64 << width) + payload;

    count += 1;
    sum += e - 1;
    pos = payload_end;
  }

  PrefixEntry {
    count,
    sum,
    offset: pos,
  }
}

#[inline]
fn bit_at(pattern: u16, pos: Bitlen) -> u8 {
  ((pattern >> (15 - pos)) & 1) as u8
}

pub fn pre_count(block: u16) -> u16 {
  table()[block as usize].count
}

pub fn pre_sum(block: u16) -> u64 {
  table()[block as usize].sum
}

pub fn pre_offset(block: u16) -> Bitlen {
  table()[block as usize].offset
}
