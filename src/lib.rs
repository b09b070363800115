//! # pnmtool
//!
//! PGM/PPM decoder and encoder with a small set of pixel transforms.
//!
//! ## Supported Formats
//!
//! - **P2** / **P5**: ASCII / binary grayscale (PGM)
//! - **P3** / **P6**: ASCII / binary RGB (PPM)
//!
//! Samples are 8-bit. The header's max value is parsed but samples are
//! always read as `0..=255` unless [`DecodeRequest::strict_maxval`] is set.
//! Header comment lines are kept verbatim and written back on encode.
//!
//! ## Transforms
//!
//! [`Operation`] selects one of `brighten`, `negate`, `grayscale`,
//! `contrast`, `smooth` and `sharpen`. Every computed sample is clamped to
//! `0..=255`. `grayscale` and `contrast` leave a single gray channel; the
//! output tag then follows the new channel count, not the input tag.
//!
//! ## Non-Goals
//!
//! - PBM (P1/P4), PAM (P7), PFM and 16-bit samples
//! - Compression, color management, animation
//! - Command-line parsing (callers hand in a validated [`pipeline::Request`])
//!
//! ## Usage
//!
//! ```
//! use pnmtool::{DecodeRequest, EncodeRequest, Operation, Unstoppable};
//!
//! let data = b"P6\n2 1\n255\n\x00\x80\xff\x10\x20\x30";
//! let mut buffer = DecodeRequest::new(data).decode(Unstoppable)?;
//! Operation::Negate.apply(&mut buffer)?;
//!
//! let text = EncodeRequest::ascii().encode(&buffer, Unstoppable)?;
//! assert_eq!(text, b"P3\n2 1\n255\n255 127 0\n239 223 207\n");
//! # Ok::<(), pnmtool::PnmError>(())
//! ```

#![forbid(unsafe_code)]

mod buffer;
mod error;
mod info;
mod limits;
mod pixel;
mod pnm;

mod decode;
mod encode;

pub mod pipeline;
pub mod transform;

// Re-exports
pub use buffer::PixelBuffer;
pub use decode::{DecodeRequest, decode};
pub use encode::{EncodeRequest, encode_ascii, encode_binary};
pub use enough::{Stop, Unstoppable};
pub use error::PnmError;
pub use info::ImageInfo;
pub use limits::Limits;
pub use pipeline::{Pipeline, PipelineError, PipelineOutput, Request, Stage};
pub use pixel::{Encoding, MagicNumber, clamp_sample};
pub use transform::Operation;
