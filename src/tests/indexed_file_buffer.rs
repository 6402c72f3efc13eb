use crate::indexed_file_buffer::SuccinctIndexedFileBuffer;
use crate::tests::fixtures::NaiveSuccinctFileBuffer;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn build(text: &[u8], offsets: Vec<i32>) -> SuccinctIndexedFileBuffer<NaiveSuccinctFileBuffer> {
  let succ_fbuf = NaiveSuccinctFileBuffer::build(text);
  SuccinctIndexedFileBuffer::new(succ_fbuf, offsets).unwrap()
}

#[test]
fn scenario_s4() {
  let text = b"alpha\nbeta\ngamma\n";
  let buf = build(text, vec![0, 6, 11]);

  assert_eq!(buf.record(1).unwrap(), "beta");
  assert_eq!(buf.extract_record(2, 1, 2).unwrap(), "am");
  assert_eq!(buf.offset_to_record_id(7), 1);
}

#[test]
fn scenario_s5() {
  // "alpha", "beta" and "gamma" all contain the letter 'a' ("beta" ends in
  // one), so by the soundness property (a record id is in the result iff
  // its body contains the pattern) the correct answer is every record,
  // not just {0, 2}.
  let text = b"alpha\nbeta\ngamma\n";
  let buf = build(text, vec![0, 6, 11]);

  let ids = buf.record_search_ids(b"a");
  assert_eq!(ids, [0usize, 1, 2].into_iter().collect());
}

#[test]
fn scenario_s6_random_large_text() {
  let mut rng = StdRng::seed_from_u64(2024);
  let num_records = 2_000;
  let mut text = Vec::new();
  let mut offsets = Vec::with_capacity(num_records);
  let alphabet = b"abcd";

  for _ in 0..num_records {
    offsets.push(text.len() as i32);
    let record_len = rng.gen_range(0..80);
    for _ in 0..record_len {
      text.push(alphabet[rng.gen_range(0..alphabet.len())]);
    }
    text.push(b'\n');
  }

  let records: Vec<Vec<u8>> = offsets
    .iter()
    .enumerate()
    .map(|(r, &off)| {
      let end = if r + 1 < offsets.len() {
        offsets[r + 1] as usize
      } else {
        text.len()
      };
      text[off as usize..end - 1].to_vec()
    })
    .collect();

  let buf = build(&text, offsets);

  // round-trip through the offsets serialization
  let mut offset_bytes = Vec::new();
  buf.serialize_offsets(&mut offset_bytes);
  let reloaded_offsets = SuccinctIndexedFileBuffer::<NaiveSuccinctFileBuffer>::deserialize_offsets(&offset_bytes).unwrap();
  let reloaded = build(&text, reloaded_offsets);

  for _ in 0..200 {
    let pattern_len = rng.gen_range(1..4);
    let pattern: Vec<u8> = (0..pattern_len)
      .map(|_| alphabet[rng.gen_range(0..alphabet.len())])
      .collect();

    let expected: std::collections::BTreeSet<usize> = records
      .iter()
      .enumerate()
      .filter(|(_, r)| contains_subslice(r, &pattern))
      .map(|(i, _)| i)
      .collect();

    assert_eq!(reloaded.record_search_ids(&pattern), expected, "pattern={:?}", pattern);
  }
}

fn contains_subslice(haystack: &[u8], needle: &[u8]) -> bool {
  if needle.is_empty() {
    return true;
  }
  haystack.windows(needle.len()).any(|w| w == needle)
}

#[test]
fn offset_to_record_id_monotonic() {
  let text = b"alpha\nbeta\ngamma\n";
  let buf = build(text, vec![0, 6, 11]);

  assert_eq!(buf.offset_to_record_id(0), 0);
  assert_eq!(buf.offset_to_record_id(5), 0);
  assert_eq!(buf.offset_to_record_id(6), 1);
  assert_eq!(buf.offset_to_record_id(10), 1);
  assert_eq!(buf.offset_to_record_id(11), 2);
  assert_eq!(buf.offset_to_record_id(16), 2);
  assert_eq!(buf.offset_to_record_id(-1), -1);
}

#[test]
fn record_bytes_round_trip_reconstructs_text() {
  let text = b"alpha\nbeta\ngamma\n";
  let buf = build(text, vec![0, 6, 11]);

  let mut rebuilt = Vec::new();
  for r in 0..buf.record_count() {
    rebuilt.extend_from_slice(&buf.record_bytes(r).unwrap());
    rebuilt.push(b'\n');
  }
  assert_eq!(rebuilt, text);
}

#[test]
fn rejects_malformed_offsets() {
  let succ_fbuf = NaiveSuccinctFileBuffer::build(b"alpha\n");
  assert!(SuccinctIndexedFileBuffer::new(succ_fbuf, vec![1]).is_err());

  let succ_fbuf = NaiveSuccinctFileBuffer::build(b"alpha\nbeta\n");
  assert!(SuccinctIndexedFileBuffer::new(succ_fbuf, vec![0, 0]).is_err());
}
