//! lorwire core library: encoder for the LOR lighting-control wire format.
//!
//! A `Request` ("apply effect E to channel set C on unit U") is built
//! through its setters, the frame encoder turns one request into a
//! delimited byte frame, and the batch writer packs many frames into a
//! caller-provided buffer with an explicit capacity check. Encoding is
//! synchronous, allocation-free per frame and side-effect free; file
//! access is isolated in `source`.
//!
//! Invariants:
//! - Every frame starts and ends with `0x00` and is 5 to 11 bytes long.
//! - Channel sets are aligned to 16-channel windows; out-of-window bits
//!   from relative bitmasks are dropped, never wrapped.
//! - The batch writer never writes past the destination slice.
//!
//! The heartbeat frame (`HEARTBEAT_BYTES`) is a fixed constant for the
//! transport to send every `HEARTBEAT_INTERVAL`; the encoder never emits it.
//!
//! Version française (résumé):
//! Cette crate encode des requêtes LOR (effet, ensemble de canaux, unité)
//! en trames binaires délimitées par `0x00`, puis les regroupe dans un
//! tampon borné fourni par l'appelant. Le battement de cœur est une
//! constante gérée par la couche de transport.
//!
//! # Examples
//! ```
//! use lorwire_core::{Request, map_intensity, write_all};
//!
//! let mut req = Request::new();
//! req.set_unit(1);
//! req.set_single_channel(4);
//! req.set_intensity(map_intensity(0x80));
//!
//! let mut buf = [0u8; 32];
//! let written = write_all(&mut buf, &[req])?;
//! assert_eq!(&buf[..written], &[0x00, 0x01, 0x03, 0x79, 0x00, 0x10, 0x00]);
//! # Ok::<(), lorwire_core::LorError>(())
//! ```

use serde::{Deserialize, Serialize};

mod batch;
mod channel;
mod effect;
mod intensity;
pub mod protocol;
mod request;
mod source;

pub use batch::{encode_all, required_len, write_all};
pub use channel::{ChannelFormat, ChannelSet};
pub use effect::{Effect, EffectArgs, EffectKind};
pub use intensity::{Channel, Decisecond, Intensity, IntensityFn, Unit, map_intensity};
pub use protocol::encoder::encode_frame;
pub use protocol::error::LorError;
pub use protocol::layout::{BROADCAST_UNIT, HEARTBEAT_BYTES, HEARTBEAT_INTERVAL};
pub use protocol::writer::{Frame, to_hex};
pub use request::Request;
pub use source::{SourceConfig, SourceError, load_request_file, parse_requests};

/// Per-frame description of an encoded batch.
///
/// # Examples
/// ```
/// use lorwire_core::{Request, describe_batch};
///
/// let report = describe_batch(&[Request::new()]);
/// assert_eq!(report.total_bytes, 5);
/// assert_eq!(report.frames[0].format, "unit_only");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    /// Frame summaries in request order.
    pub frames: Vec<FrameSummary>,
    /// Sum of all frame lengths.
    pub total_bytes: usize,
}

/// Summary of a single encoded frame.
///
/// # Examples
/// ```
/// use lorwire_core::FrameSummary;
///
/// let summary = FrameSummary {
///     index: 0,
///     unit: 1,
///     effect: "set_off".to_string(),
///     format: "single".to_string(),
///     len: 6,
///     hex: "000102000100".to_string(),
/// };
/// assert_eq!(summary.len, summary.hex.len() / 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSummary {
    /// Position of the request in the batch.
    pub index: usize,
    pub unit: u8,
    /// Effect name (e.g., "fade").
    pub effect: String,
    /// Channel format name (e.g., "bits8_low").
    pub format: String,
    /// Encoded length in bytes.
    pub len: usize,
    /// Lowercase hex of the encoded frame.
    pub hex: String,
}

pub fn describe_batch(requests: &[Request]) -> BatchReport {
    let frames: Vec<FrameSummary> = requests
        .iter()
        .enumerate()
        .map(|(index, req)| {
            let frame = encode_frame(req);
            FrameSummary {
                index,
                unit: req.unit,
                effect: req.effect.kind().name().to_string(),
                format: req.channels.format().name().to_string(),
                len: frame.len(),
                hex: frame.to_hex(),
            }
        })
        .collect();
    let total_bytes = frames.iter().map(|frame| frame.len).sum();
    BatchReport {
        frames,
        total_bytes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_serializes_in_request_order() {
        let mut first = Request::new();
        first.set_unit(1);
        first.set_channel_range(0, 0xAA);
        first.set_effect(EffectKind::Twinkle, None).unwrap();
        let second = Request::new();

        let report = describe_batch(&[first, second]);
        assert_eq!(report.total_bytes, 6 + 5);

        let value = serde_json::to_value(&report).expect("report json");
        let frames = value["frames"].as_array().expect("frames");
        assert_eq!(frames[0]["effect"], "twinkle");
        assert_eq!(frames[0]["format"], "bits8_low");
        assert_eq!(frames[0]["hex"], "00012600aa00");
        assert_eq!(frames[1]["index"], 1);
    }

    #[test]
    fn heartbeat_is_delimited() {
        assert_eq!(HEARTBEAT_BYTES.len(), 5);
        assert_eq!(HEARTBEAT_BYTES[0], 0x00);
        assert_eq!(HEARTBEAT_BYTES[4], 0x00);
        assert_eq!(HEARTBEAT_INTERVAL.as_millis(), 500);
    }
}
