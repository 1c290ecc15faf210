//! Bounded multi-request writing.
//!
//! Frames are encoded into scratch space first and only committed to the
//! destination once the cumulative total is known to fit.

use tracing::{debug, trace};

use crate::protocol::encoder::encode_frame;
use crate::protocol::error::LorError;
use crate::request::Request;

/// Encodes `requests` contiguously into `dst`, returning the bytes written.
///
/// The capacity check compares the running total (bytes already committed
/// plus the next frame) against `dst.len()`, so a batch never overruns the
/// destination even when only a later request pushes it past capacity.
/// On failure `required` reports the size needed to hold every frame up to
/// and including the one that did not fit; frames before it have already
/// been copied and the partial batch should be discarded.
///
/// # Examples
/// ```
/// use lorwire_core::{LorError, Request, required_len, write_all};
///
/// let reqs = [Request::new(), Request::new()];
/// let needed = required_len(&reqs);
///
/// let mut buf = vec![0u8; needed];
/// assert_eq!(write_all(&mut buf, &reqs), Ok(needed));
///
/// let mut short = vec![0u8; needed - 1];
/// assert_eq!(
///     write_all(&mut short, &reqs),
///     Err(LorError::InsufficientCapacity { required: needed, capacity: needed - 1 })
/// );
/// ```
pub fn write_all(dst: &mut [u8], requests: &[Request]) -> Result<usize, LorError> {
    let mut committed = 0usize;
    for (index, request) in requests.iter().enumerate() {
        let frame = encode_frame(request);
        let end = committed + frame.len();
        if end > dst.len() {
            debug!(
                index,
                required = end,
                capacity = dst.len(),
                "destination too small for batch"
            );
            return Err(LorError::InsufficientCapacity {
                required: end,
                capacity: dst.len(),
            });
        }
        dst[committed..end].copy_from_slice(frame.as_bytes());
        trace!(
            index,
            unit = request.unit,
            format = %request.channels.format(),
            len = frame.len(),
            "frame committed"
        );
        committed = end;
    }
    Ok(committed)
}

/// Total encoded size of `requests`.
pub fn required_len(requests: &[Request]) -> usize {
    requests.iter().map(|req| encode_frame(req).len()).sum()
}

/// Encodes `requests` into a freshly sized buffer.
pub fn encode_all(requests: &[Request]) -> Vec<u8> {
    let mut out = Vec::with_capacity(required_len(requests));
    for request in requests {
        out.extend_from_slice(encode_frame(request).as_bytes());
    }
    out
}
