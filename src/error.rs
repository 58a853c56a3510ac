use std::io;

/// Every way an encode or decode call can fail.
///
/// The codecs never correct or truncate malformed input; each problem is reported at the
/// point it is found and handed back to the caller.
#[derive(Debug, thiserror::Error)]
pub enum CmprError {
    /// Unknown container tag, or an unknown algorithm name on the command line.
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// The container is shorter than its header claims.
    #[error("truncated header: needed {needed} bytes, found {found}")]
    TruncatedHeader { needed: usize, found: usize },

    /// The payload or metadata is structurally invalid for its codec.
    #[error("corrupt payload: {0}")]
    CorruptPayload(String),

    /// A BitReader was asked for more bits than it has left.
    #[error("out of data: requested {requested} bits, {remaining} remaining")]
    OutOfData { requested: u8, remaining: usize },

    /// The decoded length disagrees with the length recorded in the container.
    #[error("size mismatch: expected {expected} bytes, decoded {found}")]
    SizeMismatch { expected: usize, found: usize },

    /// The input is longer than the 4-byte original length field can describe.
    #[error("input of {0} bytes is too large for the container")]
    InputTooLarge(usize),

    /// Only produced by the file-level helpers, never by the codecs.
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, CmprError>;
