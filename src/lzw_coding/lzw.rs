use log::{debug, error, trace};

use super::dictionary::{DecoderDictionary, EncoderDictionary, FIRST_CODE, MAX_CODE_WIDTH};
use crate::bitstream::{bitreader::BitReader, bitwriter::BitWriter};
use crate::error::{CmprError, Result};

/// LZW encode the input with the default dictionary limit.
pub fn encode(data: &[u8]) -> Vec<u8> {
    encode_with_limit(data, MAX_CODE_WIDTH)
}

/// LZW decode `original_len` bytes with the default dictionary limit.
pub fn decode(payload: &[u8], original_len: usize) -> Result<Vec<u8>> {
    decode_with_limit(payload, original_len, MAX_CODE_WIDTH)
}

/// LZW encode with the dictionary frozen once codes need more than `max_width` bits.
pub fn encode_with_limit(data: &[u8], max_width: u8) -> Vec<u8> {
    let mut bw = BitWriter::new(data.len() / 2);
    for (code, width) in code_stream(data, max_width) {
        bw.write_bits(code as u64, width);
    }
    debug!("LZW payload is {} bits", bw.bits_written());
    bw.flush()
}

/// The sequence of (code, width) pairs the encoder emits for `data`.
fn code_stream(data: &[u8], max_width: u8) -> Vec<(u32, u8)> {
    let mut dict = EncoderDictionary::new(max_width);
    let mut codes = Vec::new();
    // Code of the current match, None until the first byte is seen.
    let mut w: Option<u32> = None;

    for &c in data {
        w = match w {
            None => Some(c as u32),
            Some(prefix) => match dict.get(prefix, c) {
                Some(code) => Some(code),
                None => {
                    codes.push((prefix, dict.width()));
                    dict.insert(prefix, c);
                    Some(c as u32)
                }
            },
        };
    }
    if let Some(prefix) = w {
        codes.push((prefix, dict.width()));
    }
    debug!(
        "LZW emitted {} codes, dictionary holds {} entries{}",
        codes.len(),
        dict.len(),
        if dict.is_full() { " (full)" } else { "" }
    );
    codes
}

/// LZW decode with the same dictionary limit the encoder used.
pub fn decode_with_limit(payload: &[u8], original_len: usize, max_width: u8) -> Result<Vec<u8>> {
    let mut br = BitReader::new(payload);
    let mut dict = DecoderDictionary::new(max_width);
    let mut out = Vec::with_capacity(original_len.min(payload.len() * 64));
    let mut prev: Option<u32> = None;

    while out.len() < original_len {
        let width = dict.width();
        let code = br.read_bits(width)? as u32;
        trace!("code {} ({} bits) at {}", code, width, br.loc());

        match prev {
            // The first code has nothing to extend and must be a single byte.
            None if code < FIRST_CODE => out.push(code as u8),
            Some(p) if dict.contains(code) => {
                let start = out.len();
                dict.expand(code, &mut out);
                dict.insert(p, out[start]);
            }
            // The encoder used the entry it had just created: previous + its own first byte.
            Some(p) if code as usize == dict.len() && !dict.is_full() => {
                let first = dict.first_byte(p);
                dict.expand(p, &mut out);
                out.push(first);
                dict.insert(p, first);
            }
            _ => {
                error!(
                    "LZW code {} is not in a dictionary of {} entries",
                    code,
                    dict.len()
                );
                return Err(CmprError::CorruptPayload(format!(
                    "code {} references an unassigned dictionary entry (size {})",
                    code,
                    dict.len()
                )));
            }
        }
        prev = Some(code);
    }

    if out.len() != original_len {
        return Err(CmprError::SizeMismatch {
            expected: original_len,
            found: out.len(),
        });
    }
    if br.remaining() >= 8 {
        error!("{} bits left over after the last code", br.remaining());
        return Err(CmprError::CorruptPayload(format!(
            "{} unused bytes after the last code",
            br.remaining() / 8
        )));
    }
    debug!("LZW decoded {} bytes, dictionary holds {} entries", out.len(), dict.len());
    Ok(out)
}
