//! Single-codeword gamma encode/decode for `DeltaIntVector`'s `Deltas`
//! stream.
//!
//! A real delta `d >= 0` is encoded as `e = d + 1` using a standard gamma
//! code (`b - 1` zero bits, a `1` terminator, then `b - 1` payload bits,
//! where `b = bitwidth(e)`). Shifting by one lets `d = 0` round-trip
//! through a scheme that otherwise cannot represent it, without changing
//! the "exactly one codeword per non-sample index" invariant the rest of
//! `DeltaIntVector` depends on.

use crate::bit_vector::{BitSource, BitVector};
use crate::bits;
use crate::constants::Bitlen;

/// Bit cost of encoding `delta`.
pub fn encoded_bits(delta: u64) -> Bitlen {
  let e = delta + 1;
  2 * bits::bitwidth(e) - 1
}

/// Writes `delta`'s codeword starting at bit position `pos` and returns the
/// position just past it. `bv` must already be zeroed in `[pos, pos +
/// encoded_bits(delta))`, which holds for a freshly allocated
/// [`BitVector`].
pub fn encode_into(bv: &mut BitVector, pos: usize, delta: u64) -> usize {
  let e = delta + 1;
  let b = bits::bitwidth(e);
  let terminator_pos = pos + (b - 1) as usize;
  bv.set_bit(terminator_pos);
  if b > 1 {
    let payload = e - (1u64 << (b - 1));
    bv.set_value(terminator_pos + 1, payload, b - 1);
  }
  terminator_pos + 1 + (b - 1) as usize
}

/// Decodes a single codeword starting at bit position `pos`, returning the
/// real delta and the position just past the codeword.
pub(crate) fn decode_one<B: BitSource>(src: &B, pos: usize) -> (u64, usize) {
  let mut width: Bitlen = 0;
  let mut scan = pos;
  while src.get_bit(scan) == 0 {
    width += 1;
    scan += 1;
  }
  let payload_pos = scan + 1;
  let payload = if width == 0 {
    0
  } else {
    src.get_value(payload_pos, width)
  };
  let e = (1u64 << width) + payload;
  (e - 1, payload_pos + width as usize)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn single_codeword_round_trips() {
    for &d in &[0u64, 1, 2, 3, 7, 8, 255, 256, 1_000_000] {
      let mut bv = BitVector::with_capacity(encoded_bits(d) as usize);
      let end = encode_into(&mut bv, 0, d);
      assert_eq!(end, encoded_bits(d) as usize);
      let (decoded, new_pos) = decode_one(&bv, 0);
      assert_eq!(decoded, d);
      assert_eq!(new_pos, end);
    }
  }

  #[test]
  fn zero_delta_costs_one_bit() {
    assert_eq!(encoded_bits(0), 1);
  }

  #[test]
  fn sequence_of_codewords_round_trips() {
    let deltas = [0u64, 5, 0, 0, 12, 1, 300];
    let total_bits: usize = deltas.iter().map(|&d| encoded_bits(d) as usize).sum();
    let mut bv = BitVector::with_capacity(total_bits + 16);
    let mut pos = 0;
    for &d in &deltas {
      pos = encode_into(&mut bv, pos, d);
    }

    let mut cur = 0;
    for &d in &deltas {
      let (decoded, new_cur) = decode_one(&bv, cur);
      assert_eq!(decoded, d);
      cur = new_cur;
    }
  }
}
