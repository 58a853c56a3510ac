//! The huffman module implements the Huffman codec: frequency analysis, tree construction,
//! code derivation, and bit packing of the input through the BitWriter.
//!
//! Tree construction is deterministic. Nodes leave the priority queue by weight, and equal
//! weights leave in creation order: leaves are created in ascending byte value order, and each
//! merged node is newer than every node before it. The first node popped becomes the left
//! child. Re-encoding identical input therefore always produces identical output.
//!
//! Only the code table is written to the container (see code_table). The decoder never sees
//! the frequencies or the original tree.
//!
pub mod code_table;
pub mod huffman;
