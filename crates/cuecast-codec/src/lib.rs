//! Audio format detection and decoding: WAV, MP3, and AIFF into a common
//! interleaved PCM [`AudioBuffer`].
//!
//! [`DecoderRegistry`] sniffs magic bytes first, then falls back to
//! filename extension, before dispatching to one of the three decoders
//! under [`decoders`].

mod buffer;
mod decoder;
pub mod decoders;
mod error;
mod registry;

pub use buffer::{AudioBuffer, SampleFormat};
pub use decoder::Decoder;
pub use error::{CodecError, Result};
pub use registry::DecoderRegistry;
