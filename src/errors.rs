use std::error::Error;
use std::fmt::{Display, Formatter};
use std::{fmt, io};

/// The different kinds of errors this crate can return.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
  /// An index (record id, bit position, sample index, ...) exceeded the
  /// declared length of the structure it was used against.
  OutOfRange,
  /// A serialized image failed a structural check during deserialization
  /// (size mismatch, a width of 0 paired with a nonzero count, offsets
  /// that are not strictly increasing, ...).
  MalformedImage,
  /// An underlying `Read`/`Write` failed.
  Io(io::ErrorKind),
}

/// The error type returned by this crate's fallible operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SidxError {
  pub kind: ErrorKind,
  pub message: String,
}

impl SidxError {
  pub(crate) fn new<S: AsRef<str>>(kind: ErrorKind, message: S) -> Self {
    SidxError {
      kind,
      message: message.as_ref().to_string(),
    }
  }

  pub(crate) fn out_of_range<S: AsRef<str>>(message: S) -> Self {
    Self::new(ErrorKind::OutOfRange, message)
  }

  pub(crate) fn malformed_image<S: AsRef<str>>(message: S) -> Self {
    Self::new(ErrorKind::MalformedImage, message)
  }
}

impl Display for SidxError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "sidx {:?} error: {}", self.kind, &self.message)
  }
}

impl From<io::Error> for SidxError {
  fn from(err: io::Error) -> Self {
    SidxError {
      kind: ErrorKind::Io(err.kind()),
      message: format!("{}", err),
    }
  }
}

impl Error for SidxError {}

/// The result type returned by this crate's fallible operations.
pub type SidxResult<T> = Result<T, SidxError>;
