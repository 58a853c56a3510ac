//! The bitstream module is the bit-level I/O layer shared by the Huffman and LZW codecs.
//!
//! Both codecs emit codes that are not byte aligned. The BitWriter packs groups of bits,
//! most significant bit first, into a growing byte buffer and pads the final byte with zeros
//! when flushed. The BitReader walks a byte slice with a bit cursor and hands the same groups
//! back, failing with `OutOfData` rather than inventing bits past the end of the slice.
//!
//! Everything here is in-memory and single pass. There is no file handle in this layer.
//!
pub mod bitreader;
pub mod bitwriter;
