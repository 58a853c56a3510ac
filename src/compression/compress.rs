use std::fs;
use std::time::Instant;

use log::{debug, info};

use super::container::{Algorithm, Container};
use crate::error::{CmprError, Result};
use crate::huffman_coding::huffman;
use crate::lzw_coding::lzw;
use crate::tools::{cli::CmprOpts, report::Report, rle};

/// Compress `data` with `algorithm` and return the serialized container.
pub fn encode(data: &[u8], algorithm: Algorithm) -> Result<Vec<u8>> {
    let original_len =
        u32::try_from(data.len()).map_err(|_| CmprError::InputTooLarge(data.len()))?;

    let (metadata, payload) = match algorithm {
        Algorithm::Rle => (Vec::new(), rle::encode(data)),
        Algorithm::Huffman => huffman::encode(data),
        Algorithm::Lzw => (Vec::new(), lzw::encode(data)),
    };
    debug!(
        "{} produced {} bytes of metadata and {} bytes of payload",
        algorithm,
        metadata.len(),
        payload.len()
    );

    let container = Container {
        algorithm,
        original_len,
        metadata,
        payload,
    };
    Ok(container.to_bytes())
}

/// Compress the input file named in opts into the output file.
pub fn compress(opts: &CmprOpts) -> Result<Report> {
    let (input, output) = match (&opts.input, &opts.output) {
        (Some(input), Some(output)) => (input, output),
        _ => {
            return Err(CmprError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "compress needs an input and an output file",
            )))
        }
    };
    let start = Instant::now();
    let data = fs::read(input)?;
    info!(
        "Compressing {} ({} bytes) with {}",
        input,
        data.len(),
        opts.algorithm
    );

    let compressed = encode(&data, opts.algorithm)?;
    fs::write(output, &compressed)?;
    info!("Wrote {} bytes to {}", compressed.len(), output);

    Ok(Report {
        algorithm: opts.algorithm,
        original_size: data.len(),
        compressed_size: compressed.len(),
        elapsed: start.elapsed(),
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::compression::container::HEADER_SIZE;

    #[test]
    fn rle_container_test() {
        let out = encode(&[0xaa; 300], Algorithm::Rle).unwrap();
        assert_eq!(&out[..HEADER_SIZE], &[0, 0, 0, 1, 44, 0, 0, 0, 0]);
        assert_eq!(&out[HEADER_SIZE..], &[255, 0xaa, 45, 0xaa]);
    }

    #[test]
    fn huffman_has_metadata_test() {
        let out = encode(b"aaaabbbccd", Algorithm::Huffman).unwrap();
        let container = Container::from_bytes(&out).unwrap();
        assert_eq!(container.algorithm, Algorithm::Huffman);
        assert_eq!(container.original_len, 10);
        assert!(!container.metadata.is_empty());
    }

    #[test]
    fn empty_input_test() {
        for alg in Algorithm::ALL {
            let out = encode(&[], alg).unwrap();
            assert_eq!(out, vec![alg.tag(), 0, 0, 0, 0, 0, 0, 0, 0]);
        }
    }

    #[test]
    fn missing_files_test() {
        let opts = CmprOpts::new();
        assert!(matches!(compress(&opts), Err(CmprError::Io(_))));
    }
}
