/// A bit length or bit offset. Kept as its own alias so call sites read as
/// "this is a width/position count", matching how the rest of this crate
/// family names the same concept.
pub type Bitlen = u32;

/// Sampling rate used when callers don't have a more specific one in mind;
/// a reasonable default for suffix-array-like monotone sequences.
pub const DEFAULT_SAMPLING_RATE: usize = 128;

/// Width, in bits, of the block probed at once by the prefix-table
/// acceleration in `prefix_tables` and used by `DeltaIntVector`'s
/// `PrefixSum`/`BinarySearch` walks.
pub const BLOCK_BITS: Bitlen = 16;
