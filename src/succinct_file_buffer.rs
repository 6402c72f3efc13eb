use crate::errors::SidxResult;

/// The external, already-built succinct (FM-index style) text
/// representation that [`crate::indexed_file_buffer::SuccinctIndexedFileBuffer`]
/// layers record-level structure on top of.
///
/// Building the suffix array, Burrows-Wheeler transform, and rank/select
/// structures that make backward search and positional lookup possible is
/// outside this crate's scope; see the crate-level documentation. This
/// crate ships [`crate::tests::fixtures::NaiveSuccinctFileBuffer`] purely so
/// the indexed-buffer layer can be exercised in tests.
pub trait SuccinctFileBuffer {
  /// Returns the `len` bytes of original text starting at byte `pos`, as a
  /// UTF-8 string.
  fn extract(&self, pos: i64, len: i32) -> SidxResult<String>;

  /// Same as [`Self::extract`] but returns raw bytes without a UTF-8 check.
  fn extract_bytes(&self, pos: i64, len: i32) -> SidxResult<Vec<u8>>;

  /// Backward search for `pattern`, returning the suffix-array range
  /// `[sp, ep]` (inclusive) of suffixes prefixed by `pattern`. `ep < sp`
  /// means the pattern does not occur.
  fn bwd_search(&self, pattern: &[u8]) -> (i64, i64);

  /// Maps suffix-array rank `i` to its starting position in the original
  /// text.
  fn look_up_sa(&self, i: i64) -> i64;

  /// The length, in bytes, of the original (uncompressed) text.
  fn original_size(&self) -> i32;
}
