//! Lossless single file compression with three interchangeable codecs.
//!
//! - RLE: (count, byte) pairs, runs capped at 255.
//! - Huffman: prefix codes built from byte frequencies, with the code table stored alongside.
//! - LZW: variable width codes (9 to 16 bits) over a growing dictionary.
//!
//! Every compressed buffer is a self-describing container, so decoding never needs to be told
//! which algorithm produced it:
//!
//! ```
//! use cmpr::{decode, encode, Algorithm};
//!
//! let data = b"TOBEORNOTTOBEORTOBEORNOT";
//! let packed = encode(data, Algorithm::Lzw).unwrap();
//! assert_eq!(decode(&packed).unwrap(), data);
//! ```
//!
//! The command line front end is the `cmpr` binary:
//!
//! `$> cmpr compress notes.txt --algorithm huffman`
//!
//! This writes notes.txt.cmp. `cmpr decompress notes.txt.cmp` restores notes.txt.
//!
pub mod bitstream;
pub mod compression;
pub mod error;
pub mod huffman_coding;
pub mod lzw_coding;
pub mod tools;

pub use compression::compress::encode;
pub use compression::container::Algorithm;
pub use compression::decompress::decode;
pub use error::{CmprError, Result};
