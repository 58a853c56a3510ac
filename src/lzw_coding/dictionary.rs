//! Encoder and decoder dictionaries for LZW.
//!
//! Both start with the 256 single byte strings at codes 0-255 and assign new codes in
//! sequence. A string is stored as (prefix code, last byte), so every entry is one step longer
//! than an existing entry. The encoder keys a hash map on that pair; the decoder keeps an arena
//! of entries indexed by code and rebuilds strings by walking prefixes.
//!
//! Once `2^max_width` codes are assigned the dictionary is frozen on both sides.
//!
use rustc_hash::FxHashMap;

/// Codes are never narrower than this.
pub const MIN_CODE_WIDTH: u8 = 9;
/// Default limit. 65536 codes, then the dictionary stops growing.
pub const MAX_CODE_WIDTH: u8 = 16;
/// First code assigned after the single byte strings.
pub const FIRST_CODE: u32 = 256;

/// Bits needed to write `code`, never less than MIN_CODE_WIDTH.
pub fn width_for(code: u32) -> u8 {
    ((u32::BITS - code.leading_zeros()) as u8).max(MIN_CODE_WIDTH)
}

/// Number of codes a dictionary limited to `max_width` bits may hold.
fn capacity(max_width: u8) -> u32 {
    1_u32 << max_width.clamp(MIN_CODE_WIDTH, 24)
}

/// String -> code map used while encoding.
#[derive(Debug)]
pub struct EncoderDictionary {
    map: FxHashMap<(u32, u8), u32>,
    next_code: u32,
    max_codes: u32,
}

impl EncoderDictionary {
    pub fn new(max_width: u8) -> Self {
        Self {
            map: FxHashMap::default(),
            next_code: FIRST_CODE,
            max_codes: capacity(max_width),
        }
    }

    /// Code for the string `prefix + byte`, if it has been assigned.
    pub fn get(&self, prefix: u32, byte: u8) -> Option<u32> {
        self.map.get(&(prefix, byte)).copied()
    }

    /// Assign the next code to `prefix + byte`. Returns None once the dictionary is frozen.
    pub fn insert(&mut self, prefix: u32, byte: u8) -> Option<u32> {
        if self.is_full() {
            return None;
        }
        let code = self.next_code;
        self.map.insert((prefix, byte), code);
        self.next_code += 1;
        Some(code)
    }

    /// Number of assigned codes, including the 256 initial ones.
    pub fn len(&self) -> usize {
        self.next_code as usize
    }

    pub fn is_empty(&self) -> bool {
        self.next_code == 0
    }

    pub fn is_full(&self) -> bool {
        self.next_code >= self.max_codes
    }

    /// Width of the next emitted code: enough for the highest code assigned so far.
    pub fn width(&self) -> u8 {
        width_for(self.next_code - 1)
    }
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    prefix: Option<u32>,
    byte: u8,
    first: u8,
    len: u32,
}

/// Code -> string arena used while decoding.
#[derive(Debug)]
pub struct DecoderDictionary {
    entries: Vec<Entry>,
    max_codes: u32,
}

impl DecoderDictionary {
    pub fn new(max_width: u8) -> Self {
        let max_codes = capacity(max_width);
        let mut entries = Vec::with_capacity(max_codes.min(1 << 16) as usize);
        entries.extend((0..=255_u8).map(|b| Entry {
            prefix: None,
            byte: b,
            first: b,
            len: 1,
        }));
        Self { entries, max_codes }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() as u32 >= self.max_codes
    }

    pub fn contains(&self, code: u32) -> bool {
        (code as usize) < self.entries.len()
    }

    /// Width of the next code to read. The decoder is one entry behind the encoder, so its
    /// own length is the encoder's highest assigned code.
    pub fn width(&self) -> u8 {
        width_for((self.entries.len() as u32).min(self.max_codes - 1))
    }

    /// Add `prefix + byte` under the next code. Returns false once the dictionary is frozen.
    pub fn insert(&mut self, prefix: u32, byte: u8) -> bool {
        if self.is_full() {
            return false;
        }
        let parent = self.entries[prefix as usize];
        self.entries.push(Entry {
            prefix: Some(prefix),
            byte,
            first: parent.first,
            len: parent.len + 1,
        });
        true
    }

    /// First byte of the string for `code`. The code must be present.
    pub fn first_byte(&self, code: u32) -> u8 {
        self.entries[code as usize].first
    }

    /// Append the string for `code` to `out`. The code must be present.
    pub fn expand(&self, code: u32, out: &mut Vec<u8>) {
        let len = self.entries[code as usize].len as usize;
        let start = out.len();
        out.resize(start + len, 0);
        // Walk back from the last byte to the first.
        let mut pos = start + len;
        let mut idx = Some(code);
        while let Some(code) = idx {
            let entry = &self.entries[code as usize];
            pos -= 1;
            out[pos] = entry.byte;
            idx = entry.prefix;
        }
    }
}
