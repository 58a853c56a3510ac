//! The compression module is the top level of the codec engine.
//!
//! - container: the self-describing envelope (algorithm tag, original length, metadata, payload).
//! - compress: `encode` runs the selected codec and wraps its output in a container.
//! - decompress: `decode` reads the tag and hands the container to the matching codec.
//!
//! Both entry points are pure functions of their input. The file level helpers in each module
//! are the only place the crate touches the file system.
//!
pub mod compress;
pub mod container;
pub mod decompress;
