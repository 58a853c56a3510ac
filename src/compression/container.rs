//! The container is the self-describing envelope around every compressed payload.
//!
//! | field           | size          | notes                                  |
//! |-----------------|---------------|----------------------------------------|
//! | algorithm tag   | 1 byte        | 0 = RLE, 1 = Huffman, 2 = LZW          |
//! | original length | 4 bytes, BE   | uncompressed byte count                |
//! | metadata length | 4 bytes, BE   | 0 for RLE and LZW                      |
//! | metadata        | variable      | serialized code table (Huffman only)   |
//! | payload         | rest          | codec output                           |
//!
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use log::error;

use crate::error::{CmprError, Result};

/// Tag byte + original length + metadata length.
pub const HEADER_SIZE: usize = 9;

/// The three codecs a container can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Algorithm {
    Rle,
    Huffman,
    #[default]
    Lzw,
}

impl Algorithm {
    /// Every algorithm, in tag order.
    pub const ALL: [Algorithm; 3] = [Algorithm::Rle, Algorithm::Huffman, Algorithm::Lzw];

    pub fn tag(self) -> u8 {
        match self {
            Algorithm::Rle => 0,
            Algorithm::Huffman => 1,
            Algorithm::Lzw => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Rle => "rle",
            Algorithm::Huffman => "huffman",
            Algorithm::Lzw => "lzw",
        }
    }
}

impl TryFrom<u8> for Algorithm {
    type Error = CmprError;

    fn try_from(tag: u8) -> Result<Self> {
        match tag {
            0 => Ok(Algorithm::Rle),
            1 => Ok(Algorithm::Huffman),
            2 => Ok(Algorithm::Lzw),
            other => Err(CmprError::UnsupportedAlgorithm(format!("tag {}", other))),
        }
    }
}

impl FromStr for Algorithm {
    type Err = CmprError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "rle" => Ok(Algorithm::Rle),
            "huffman" => Ok(Algorithm::Huffman),
            "lzw" => Ok(Algorithm::Lzw),
            _ => Err(CmprError::UnsupportedAlgorithm(format!(
                "{} (expected rle, huffman or lzw)",
                s
            ))),
        }
    }
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A parsed or about-to-be-written container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub algorithm: Algorithm,
    pub original_len: u32,
    pub metadata: Vec<u8>,
    pub payload: Vec<u8>,
}

impl Container {
    /// Serialize the header, metadata and payload into one buffer.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(HEADER_SIZE + self.metadata.len() + self.payload.len());
        out.push(self.algorithm.tag());
        out.extend_from_slice(&self.original_len.to_be_bytes());
        out.extend_from_slice(&(self.metadata.len() as u32).to_be_bytes());
        out.extend_from_slice(&self.metadata);
        out.extend_from_slice(&self.payload);
        out
    }

    /// Split a buffer into its parts. The payload itself is not inspected.
    pub fn from_bytes(bytes: &[u8]) -> Result<Container> {
        if bytes.len() < HEADER_SIZE {
            error!(
                "Container of {} bytes is shorter than the {} byte header",
                bytes.len(),
                HEADER_SIZE
            );
            return Err(CmprError::TruncatedHeader {
                needed: HEADER_SIZE,
                found: bytes.len(),
            });
        }
        let algorithm = Algorithm::try_from(bytes[0]).map_err(|e| {
            error!("Unknown algorithm tag {}", bytes[0]);
            e
        })?;
        let original_len = read_u32(&bytes[1..5]);
        let metadata_len = read_u32(&bytes[5..9]) as usize;

        let metadata_end = HEADER_SIZE.saturating_add(metadata_len);
        if metadata_end > bytes.len() {
            error!(
                "Metadata of {} bytes runs past the end of the container",
                metadata_len
            );
            return Err(CmprError::TruncatedHeader {
                needed: metadata_end,
                found: bytes.len(),
            });
        }
        if metadata_len > 0 && algorithm != Algorithm::Huffman {
            return Err(CmprError::CorruptPayload(format!(
                "{} container carries {} bytes of metadata",
                algorithm, metadata_len
            )));
        }

        Ok(Container {
            algorithm,
            original_len,
            metadata: bytes[HEADER_SIZE..metadata_end].to_vec(),
            payload: bytes[metadata_end..].to_vec(),
        })
    }
}

/// Big endian u32 from exactly four bytes.
fn read_u32(bytes: &[u8]) -> u32 {
    bytes
        .iter()
        .take(4)
        .fold(0_u32, |acc, &b| acc << 8 | b as u32)
}
