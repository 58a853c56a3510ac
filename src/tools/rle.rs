//! Run-Length Encoding: each maximal run of identical bytes becomes a `[count, value]` pair.
//!
//! Counts are a single byte, so a run longer than 255 is split over several pairs. This is
//! byte aligned and does not go through the bitstream layer. Data without runs doubles in
//! size, which is expected for this codec.
//!
use log::{debug, error};

use crate::error::{CmprError, Result};

/// Longest run a single pair can describe.
pub const MAX_RUN: usize = 255;
/// Bytes per encoded pair.
pub const PAIR_SIZE: usize = 2;

/// Encode the input as `[count, value]` pairs. Empty input gives an empty payload.
pub fn encode(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len().min(1024) * PAIR_SIZE);
    let mut idx = 0;
    while idx < data.len() {
        let run = count_run(data, idx);
        out.push(run as u8);
        out.push(data[idx]);
        idx += run;
    }
    debug!(
        "RLE encoded {} bytes into {} pairs",
        data.len(),
        out.len() / PAIR_SIZE
    );
    out
}

/// Helper function for encode to count how many identical bytes start at `idx` (1-255).
fn count_run(data: &[u8], idx: usize) -> usize {
    let compare = data[idx];
    data.iter()
        .skip(idx)
        .take(MAX_RUN)
        .position(|&x| x != compare)
        .unwrap_or_else(|| (data.len() - idx).min(MAX_RUN))
}

/// Expand `[count, value]` pairs. The expanded length must equal `original_len`.
pub fn decode(payload: &[u8], original_len: usize) -> Result<Vec<u8>> {
    if payload.len() % PAIR_SIZE != 0 {
        error!("RLE payload of {} bytes is not a whole number of pairs", payload.len());
        return Err(CmprError::CorruptPayload(format!(
            "RLE payload length {} is not a multiple of {}",
            payload.len(),
            PAIR_SIZE
        )));
    }
    // Total the runs first so a bad header cannot make us allocate or expand blindly.
    let mut expanded = 0_usize;
    for pair in payload.chunks_exact(PAIR_SIZE) {
        if pair[0] == 0 {
            return Err(CmprError::CorruptPayload(
                "RLE pair with a zero run length".to_string(),
            ));
        }
        expanded += pair[0] as usize;
    }
    if expanded != original_len {
        error!(
            "RLE payload expands to {} bytes, header says {}",
            expanded, original_len
        );
        return Err(CmprError::SizeMismatch {
            expected: original_len,
            found: expanded,
        });
    }

    let mut out = Vec::with_capacity(expanded);
    for pair in payload.chunks_exact(PAIR_SIZE) {
        out.resize(out.len() + pair[0] as usize, pair[1]);
    }
    Ok(out)
}
