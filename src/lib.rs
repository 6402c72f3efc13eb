#![doc = include_str!("../README.md")]
#![deny(clippy::unused_unit)]

#[doc = include_str!("../README.md")]
#[cfg(doctest)]
struct ReadmeDoctest;

pub use bit_vector::BitVector;
pub use delta_int_vector::{binary_search_image, get_from_image, DeltaIntVector};
pub use errors::{ErrorKind, SidxError, SidxResult};
pub use indexed_file_buffer::SuccinctIndexedFileBuffer;
pub use int_vector::IntVector;
pub use succinct_file_buffer::SuccinctFileBuffer;

pub mod bit_vector;
pub mod delta_int_vector;
pub mod errors;
pub mod indexed_file_buffer;
pub mod int_vector;
pub mod succinct_file_buffer;

mod bits;
mod constants;
mod delta;
mod prefix_tables;
mod serialization;

#[cfg(test)]
mod tests;
