//! Wire-format encoding.
//!
//! The encoder follows a layered structure:
//! - `layout`: wire constants (codes, tags, flags, sentinels)
//! - `writer`: bounded scratch buffer and the finished `Frame`
//! - `encoder`: request-level serialization (no direct buffer indexing)
//! - `error`: explicit, actionable errors
//!
//! Format selection (the effect-type high nibble) and the in-band
//! channel-set option bits are separate functions over the same set;
//! their bit patterns overlap in value but not in meaning.
//!
//! The scratch writer is internal; callers only see finished frames.
//!
//! ```compile_fail
//! use lorwire_core::protocol::writer::FrameWriter;
//!
//! let mut writer = FrameWriter::new();
//! writer.push(0);
//! ```

pub mod encoder;
pub mod error;
pub mod layout;
pub(crate) mod writer;

pub use encoder::encode_frame;
