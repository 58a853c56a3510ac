//! The code table is the only Huffman state that travels in the container. The encoder derives
//! it from the tree, serializes it into the metadata block, and the decoder rebuilds a walkable
//! tree from it. The tree used for encoding is never transmitted.
//!
//! Serialized layout, packed through the BitWriter, most significant bit first:
//! - 16 bit count of entries (1-256)
//! - per entry: 8 bit symbol, 8 bit code length (1-64), then the code bits
//!
//! The block is padded with zeros to a byte boundary. An empty table serializes to zero bytes.
//!
use std::fmt::{Display, Formatter};

use log::{error, trace};

use crate::bitstream::{bitreader::BitReader, bitwriter::BitWriter};
use crate::error::{CmprError, Result};

/// Longest code we can carry in a u64. Unreachable for inputs a 4 byte length can describe.
pub const MAX_CODE_LEN: u8 = 64;

/// A prefix code: the low `len` bits of `bits`, read most significant bit first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Code {
    pub bits: u64,
    pub len: u8,
}

impl Code {
    /// Extend this code by one bit (false for a left edge, true for a right edge).
    pub fn push(self, bit: bool) -> Code {
        Code {
            bits: self.bits << 1 | bit as u64,
            len: self.len + 1,
        }
    }

    /// Bit `i` of the code, counting from the first bit written.
    fn bit(&self, i: u8) -> bool {
        (self.bits >> (self.len - 1 - i)) & 1 == 1
    }
}

impl Display for Code {
    /// Show the code as a string of 0s and 1s.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for i in 0..self.len {
            write!(f, "{}", if self.bit(i) { '1' } else { '0' })?;
        }
        Ok(())
    }
}

/// Maps each byte value present in the input to its code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: [Option<Code>; 256],
}

impl CodeTable {
    pub fn new() -> Self {
        Self { codes: [None; 256] }
    }

    pub fn insert(&mut self, symbol: u8, code: Code) {
        self.codes[symbol as usize] = Some(code);
    }

    pub fn get(&self, symbol: u8) -> Option<Code> {
        self.codes[symbol as usize]
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.codes.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over (symbol, code) in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(sym, code)| code.map(|c| (sym as u8, c)))
    }

    /// Length of the longest code, 0 for an empty table.
    pub fn max_len(&self) -> u8 {
        self.iter().map(|(_, c)| c.len).max().unwrap_or(0)
    }

    /// Pack the table into the container metadata form.
    pub fn serialize(&self) -> Vec<u8> {
        if self.is_empty() {
            return Vec::new();
        }
        let mut bw = BitWriter::new(2 + self.len() * 3);
        bw.write_bits(self.len() as u64, 16);
        for (symbol, code) in self.iter() {
            bw.write_u8(symbol);
            bw.write_u8(code.len);
            bw.write_bits(code.bits, code.len);
        }
        bw.flush()
    }

    /// Rebuild a table from container metadata. Only the layout is checked here; the
    /// prefix-free check happens when the decode tree is built.
    pub fn deserialize(metadata: &[u8]) -> Result<CodeTable> {
        let mut table = CodeTable::new();
        if metadata.is_empty() {
            return Ok(table);
        }
        let mut br = BitReader::new(metadata);
        let count = br.read_bits(16).map_err(truncated)? as usize;
        if count == 0 || count > 256 {
            error!("Code table claims {} entries", count);
            return Err(CmprError::CorruptPayload(format!(
                "code table entry count {} out of range",
                count
            )));
        }
        for _ in 0..count {
            let symbol = br.byte().map_err(truncated)?;
            let len = br.byte().map_err(truncated)?;
            if len == 0 || len > MAX_CODE_LEN {
                return Err(CmprError::CorruptPayload(format!(
                    "code length {} for symbol {} out of range",
                    len, symbol
                )));
            }
            if table.get(symbol).is_some() {
                return Err(CmprError::CorruptPayload(format!(
                    "symbol {} appears twice in the code table",
                    symbol
                )));
            }
            let bits = br.read_bits(len).map_err(truncated)?;
            table.insert(symbol, Code { bits, len });
        }
        if br.remaining() >= 8 {
            return Err(CmprError::CorruptPayload(format!(
                "{} unused bits after the code table",
                br.remaining()
            )));
        }
        trace!("Read code table with {} entries", count);
        Ok(table)
    }
}

impl Default for CodeTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Metadata that ends early is a bad table, not a short payload.
fn truncated(_: CmprError) -> CmprError {
    CmprError::CorruptPayload("code table is truncated".to_string())
}

#[derive(Debug, Clone, Copy)]
enum DecodeNode {
    Branch([Option<usize>; 2]),
    Leaf(u8),
}

/// Binary tree rebuilt from a code table, stored as an arena indexed by position. Node 0 is
/// the root.
#[derive(Debug)]
pub struct DecodeTree {
    nodes: Vec<DecodeNode>,
}

impl DecodeTree {
    /// Build the tree, rejecting any table where one code is a prefix of another.
    pub fn from_table(table: &CodeTable) -> Result<DecodeTree> {
        let mut nodes = vec![DecodeNode::Branch([None, None])];
        for (symbol, code) in table.iter() {
            let mut idx = 0;
            for i in 0..code.len {
                let last = i == code.len - 1;
                let children = match nodes[idx] {
                    DecodeNode::Branch(children) => children,
                    DecodeNode::Leaf(other) => return Err(not_prefix_free(other, symbol)),
                };
                let side = code.bit(i) as usize;
                match children[side] {
                    Some(_) if last => {
                        return Err(CmprError::CorruptPayload(format!(
                            "code {} for symbol {} is a prefix of another code",
                            code, symbol
                        )))
                    }
                    Some(child) => idx = child,
                    None => {
                        nodes.push(if last {
                            DecodeNode::Leaf(symbol)
                        } else {
                            DecodeNode::Branch([None, None])
                        });
                        let child = nodes.len() - 1;
                        if let DecodeNode::Branch(ref mut kids) = nodes[idx] {
                            kids[side] = Some(child);
                        }
                        idx = child;
                    }
                }
            }
        }
        Ok(DecodeTree { nodes })
    }

    /// Walk from the root one bit at a time until a leaf is reached.
    pub fn decode_symbol(&self, br: &mut BitReader<'_>) -> Result<u8> {
        let mut idx = 0;
        loop {
            match self.nodes[idx] {
                DecodeNode::Leaf(symbol) => return Ok(symbol),
                DecodeNode::Branch(children) => {
                    let side = br.bit()? as usize;
                    idx = children[side].ok_or_else(|| {
                        CmprError::CorruptPayload(format!(
                            "bit sequence at {} matches no code",
                            br.loc()
                        ))
                    })?;
                }
            }
        }
    }
}

fn not_prefix_free(prefix_of: u8, symbol: u8) -> CmprError {
    CmprError::CorruptPayload(format!(
        "code for symbol {} is a prefix of the code for symbol {}",
        prefix_of, symbol
    ))
}

#[cfg(test)]
mod test {
    use super::*;

    fn code(s: &str) -> Code {
        s.chars().fold(Code { bits: 0, len: 0 }, |c, b| c.push(b == '1'))
    }

    fn sample() -> CodeTable {
        let mut table = CodeTable::new();
        table.insert(b'a', code("0"));
        table.insert(b'b', code("10"));
        table.insert(b'c', code("111"));
        table.insert(b'd', code("110"));
        table
    }

    #[test]
    fn code_display_test() {
        assert_eq!(code("0110").to_string(), "0110");
        assert_eq!(code("1").len, 1);
    }

    #[test]
    fn serialize_layout_test() {
        let mut table = CodeTable::new();
        table.insert(0x41, code("1"));
        // count 1, symbol 0x41, len 1, bit 1, then 7 bits of padding
        assert_eq!(table.serialize(), vec![0x00, 0x01, 0x41, 0x01, 0b1000_0000]);
    }

    #[test]
    fn serialize_and_back_test() {
        let table = sample();
        let restored = CodeTable::deserialize(&table.serialize()).unwrap();
        assert_eq!(restored, table);
        assert_eq!(restored.max_len(), 3);
    }

    #[test]
    fn empty_table_test() {
        let table = CodeTable::new();
        assert!(table.serialize().is_empty());
        assert!(CodeTable::deserialize(&[]).unwrap().is_empty());
    }

    #[test]
    fn truncated_metadata_test() {
        let bytes = sample().serialize();
        assert!(matches!(
            CodeTable::deserialize(&bytes[..bytes.len() - 2]),
            Err(CmprError::CorruptPayload(_))
        ));
    }

    #[test]
    fn zero_length_code_test() {
        assert!(matches!(
            CodeTable::deserialize(&[0x00, 0x01, 0x41, 0x00]),
            Err(CmprError::CorruptPayload(_))
        ));
    }

    #[test]
    fn decode_tree_test() {
        let tree = DecodeTree::from_table(&sample()).unwrap();
        // a b d c -> 0 10 110 111
        let bits = [0b0101_1011_u8, 0b1000_0000];
        let mut br = BitReader::new(&bits);
        let decoded = (0..4)
            .map(|_| tree.decode_symbol(&mut br).unwrap())
            .collect::<Vec<u8>>();
        assert_eq!(decoded, b"abdc");
    }

    #[test]
    fn prefix_violation_test() {
        let mut table = sample();
        table.insert(b'e', code("11"));
        assert!(matches!(
            DecodeTree::from_table(&table),
            Err(CmprError::CorruptPayload(_))
        ));

        let mut table = CodeTable::new();
        table.insert(b'x', code("01"));
        table.insert(b'y', code("011"));
        assert!(DecodeTree::from_table(&table).is_err());
    }

    #[test]
    fn unused_branch_test() {
        let mut table = CodeTable::new();
        table.insert(b'z', code("0"));
        let tree = DecodeTree::from_table(&table).unwrap();
        let bits = [0b0100_0000_u8];
        let mut br = BitReader::new(&bits);
        assert_eq!(tree.decode_symbol(&mut br).unwrap(), b'z');
        assert!(matches!(
            tree.decode_symbol(&mut br),
            Err(CmprError::CorruptPayload(_))
        ));
    }
}
