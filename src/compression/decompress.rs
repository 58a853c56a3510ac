use std::fs;
use std::time::Instant;

use log::{error, info};

use super::container::{Algorithm, Container};
use crate::error::{CmprError, Result};
use crate::huffman_coding::huffman;
use crate::lzw_coding::lzw;
use crate::tools::{cli::CmprOpts, report::Report, rle};

/// Decode a serialized container back into the original bytes.
pub fn decode(bytes: &[u8]) -> Result<Vec<u8>> {
    let container = Container::from_bytes(bytes)?;
    let original_len = container.original_len as usize;
    info!(
        "Found a {} container for {} bytes",
        container.algorithm, original_len
    );

    let out = match container.algorithm {
        Algorithm::Rle => rle::decode(&container.payload, original_len)?,
        Algorithm::Huffman => {
            huffman::decode(&container.metadata, &container.payload, original_len)?
        }
        Algorithm::Lzw => lzw::decode(&container.payload, original_len)?,
    };

    if out.len() != original_len {
        error!(
            "Decoded {} bytes but the header says {}",
            out.len(),
            original_len
        );
        return Err(CmprError::SizeMismatch {
            expected: original_len,
            found: out.len(),
        });
    }
    Ok(out)
}

/// Decompress the input file named in opts into the output file.
pub fn decompress(opts: &CmprOpts) -> Result<Report> {
    let (input, output) = match (&opts.input, &opts.output) {
        (Some(input), Some(output)) => (input, output),
        _ => {
            return Err(CmprError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "decompress needs an input and an output file",
            )))
        }
    };
    let start = Instant::now();
    let compressed = fs::read(input)?;
    let algorithm = Container::from_bytes(&compressed)?.algorithm;
    info!("Decompressing {} with {}", input, algorithm);

    let data = decode(&compressed)?;
    fs::write(output, &data)?;
    info!("Wrote {} bytes to {}", data.len(), output);

    Ok(Report {
        algorithm,
        original_size: data.len(),
        compressed_size: compressed.len(),
        elapsed: start.elapsed(),
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::compression::compress::encode;

    #[test]
    fn dispatch_test() {
        let data = b"TOBEORNOTTOBEORTOBEORNOT";
        for alg in Algorithm::ALL {
            assert_eq!(decode(&encode(data, alg).unwrap()).unwrap(), data);
        }
    }

    #[test]
    fn zero_length_buffer_test() {
        assert!(matches!(
            decode(&[]),
            Err(CmprError::TruncatedHeader { .. })
        ));
    }

    #[test]
    fn unknown_tag_test() {
        let mut bytes = encode(b"hello", Algorithm::Lzw).unwrap();
        bytes[0] = 255;
        assert!(matches!(
            decode(&bytes),
            Err(CmprError::UnsupportedAlgorithm(_))
        ));
    }

    #[test]
    fn wrong_length_test() {
        let mut bytes = encode(b"hello", Algorithm::Rle).unwrap();
        // Claim six bytes instead of five.
        bytes[4] = 6;
        assert!(matches!(
            decode(&bytes),
            Err(CmprError::SizeMismatch {
                expected: 6,
                found: 5
            })
        ));
    }
}
