//! The lzw module implements Lempel-Ziv-Welch dictionary coding.
//!
//! The dictionary is never transmitted. The encoder and the decoder each build their own from
//! the data, and the decoder stays exactly one entry behind the encoder. Code widths are not
//! transmitted either: both sides compute the width of every code from their own dictionary
//! size, starting at 9 bits and growing one bit at a time up to the configured maximum, after
//! which the dictionary is frozen.
//!
pub mod dictionary;
pub mod lzw;
