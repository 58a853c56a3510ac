use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::{debug, error, trace};

use super::code_table::{Code, CodeTable, DecodeTree};
use crate::bitstream::{bitreader::BitReader, bitwriter::BitWriter};
use crate::error::{CmprError, Result};
use crate::tools::freq_count::{distinct, freqs, FrequencyTable};

#[derive(Debug)]
pub enum NodeData {
    Kids(Box<Node>, Box<Node>),
    Leaf(u8),
}

#[derive(Debug)]
pub struct Node {
    pub weight: u64,
    /// Order in which the node was created: leaves by ascending byte value, then each merge.
    pub seq: u32,
    pub node_data: NodeData,
}

impl Node {
    /// Create a new node
    pub fn new(weight: u64, seq: u32, node_data: NodeData) -> Node {
        Node {
            weight,
            seq,
            node_data,
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.seq == other.seq
    }
}
impl Eq for Node {}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Node {
    /// Reversed so the max-heap pops the lightest node first, and the oldest of equal weights.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Build the Huffman tree for a frequency table. Returns None when no symbol has a count.
pub fn build_tree(freqs: &FrequencyTable) -> Option<Node> {
    let mut heap = freqs
        .iter()
        .enumerate()
        .filter(|(_, f)| **f > 0)
        .enumerate()
        .map(|(seq, (sym, &f))| Node::new(f, seq as u32, NodeData::Leaf(sym as u8)))
        .collect::<BinaryHeap<Node>>();

    let mut seq = heap.len() as u32;
    // Pare the heap down to one single node with child nodes. The first node popped goes left.
    while heap.len() > 1 {
        let (left_child, right_child) = match (heap.pop(), heap.pop()) {
            (Some(l), Some(r)) => (l, r),
            _ => break,
        };
        heap.push(Node::new(
            left_child.weight + right_child.weight,
            seq,
            NodeData::Kids(Box::new(left_child), Box::new(right_child)),
        ));
        seq += 1;
    }
    heap.pop()
}

/// Derive the code table from a tree: 0 for a left edge, 1 for a right edge.
pub fn code_table(root: &Node) -> CodeTable {
    let mut table = CodeTable::new();
    match root.node_data {
        // A lone symbol still needs one bit per occurrence.
        NodeData::Leaf(sym) => table.insert(sym, Code { bits: 0, len: 1 }),
        NodeData::Kids(..) => return_codes(root, Code { bits: 0, len: 0 }, &mut table),
    }
    table
}

/// Recursively walk the tree, accumulating the path to each leaf.
fn return_codes(node: &Node, code: Code, table: &mut CodeTable) {
    match &node.node_data {
        NodeData::Kids(left_child, right_child) => {
            return_codes(left_child, code.push(false), table);
            return_codes(right_child, code.push(true), table);
        }
        NodeData::Leaf(sym) => {
            trace!("symbol {:#04x} weight {} code {}", sym, node.weight, code);
            table.insert(*sym, code);
        }
    };
}

/// Huffman encode the input. Returns the serialized code table and the packed payload.
/// Empty input gives an empty table and an empty payload.
pub fn encode(data: &[u8]) -> (Vec<u8>, Vec<u8>) {
    let freqs = freqs(data);
    let root = match build_tree(&freqs) {
        Some(root) => root,
        None => return (Vec::new(), Vec::new()),
    };
    let table = code_table(&root);
    // The tree is no longer needed once the codes exist.
    drop(root);
    debug!(
        "Huffman table has {} symbols, longest code {} bits",
        distinct(&freqs),
        table.max_len()
    );

    let mut bw = BitWriter::new(data.len() / 2);
    for &byte in data {
        if let Some(code) = table.get(byte) {
            bw.write_bits(code.bits, code.len);
        }
    }
    debug!("Huffman payload is {} bits", bw.bits_written());
    (table.serialize(), bw.flush())
}

/// Decode `original_len` symbols from the payload using the code table in `metadata`.
pub fn decode(metadata: &[u8], payload: &[u8], original_len: usize) -> Result<Vec<u8>> {
    let mut br = BitReader::new(payload);
    // Every symbol costs at least one bit.
    let mut out = Vec::with_capacity(original_len.min(payload.len() * 8));

    if original_len > 0 {
        let table = CodeTable::deserialize(metadata)?;
        if table.is_empty() {
            error!("Huffman container has data but no code table");
            return Err(CmprError::CorruptPayload(
                "missing code table for a non-empty payload".to_string(),
            ));
        }
        let tree = DecodeTree::from_table(&table)?;
        debug!("Decoding {} symbols with {} codes", original_len, table.len());
        while out.len() < original_len {
            out.push(tree.decode_symbol(&mut br)?);
        }
    }

    // Anything beyond the final byte's padding means the header and payload disagree.
    if br.remaining() >= 8 {
        error!("{} bits left over after the last symbol", br.remaining());
        return Err(CmprError::CorruptPayload(format!(
            "{} unused bytes after the last symbol",
            br.remaining() / 8
        )));
    }
    Ok(out)
}
