use super::layout;

/// Append-only writer over a fixed frame scratch buffer.
///
/// Every frame fits in `FRAME_SCRATCH_LEN` bytes; only the encoder in this
/// crate writes through it.
pub(crate) struct FrameWriter {
    buf: [u8; layout::FRAME_SCRATCH_LEN],
    len: usize,
}

impl Default for FrameWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameWriter {
    pub(crate) fn new() -> Self {
        Self {
            buf: [0u8; layout::FRAME_SCRATCH_LEN],
            len: 0,
        }
    }

    pub(crate) fn push(&mut self, byte: u8) {
        self.buf[self.len] = byte;
        self.len += 1;
    }

    pub(crate) fn push_nonzero(&mut self, byte: u8) {
        if byte != 0 {
            self.push(byte);
        }
    }

    pub(crate) fn extend(&mut self, bytes: &[u8]) {
        let end = self.len + bytes.len();
        self.buf[self.len..end].copy_from_slice(bytes);
        self.len = end;
    }

    pub(crate) fn finish(self) -> Frame {
        Frame {
            buf: self.buf,
            len: self.len,
        }
    }
}

/// One encoded request, delimited by leading and trailing sentinel bytes.
///
/// # Examples
/// ```
/// use lorwire_core::{Request, encode_frame};
///
/// let mut req = Request::new();
/// req.set_unit(1);
/// req.set_single_channel(0);
/// let frame = encode_frame(&req);
/// assert_eq!(frame.as_bytes(), &[0x00, 0x01, 0x02, 0x00, 0x01, 0x00]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    buf: [u8; layout::FRAME_SCRATCH_LEN],
    len: usize,
}

impl Frame {
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn effect_type(&self) -> u8 {
        self.buf[layout::EFFECT_TYPE_OFFSET]
    }

    pub fn to_hex(&self) -> String {
        to_hex(self.as_bytes())
    }
}

impl AsRef<[u8]> for Frame {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

pub fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::{FrameWriter, to_hex};
    use crate::protocol::encoder::encode_frame;
    use crate::protocol::layout;
    use crate::request::Request;

    #[test]
    fn push_nonzero_skips_zero() {
        let mut writer = FrameWriter::new();
        writer.push_nonzero(0);
        writer.push_nonzero(7);
        let frame = writer.finish();
        assert_eq!(frame.len(), 1);
        assert_eq!(frame.as_bytes(), &[7]);
    }

    #[test]
    fn extend_appends_in_order() {
        let mut writer = FrameWriter::new();
        writer.push(1);
        writer.extend(&[2, 3]);
        let frame = writer.finish();
        assert_eq!(frame.as_bytes(), &[1, 2, 3]);
        assert_eq!(frame.to_hex(), "010203");
    }

    #[test]
    fn hex_is_lowercase() {
        assert_eq!(to_hex(&[0xAB, 0x0F]), "ab0f");
    }

    #[test]
    fn scratch_holds_largest_frame() {
        assert!(layout::MAX_FRAME_LEN <= layout::FRAME_SCRATCH_LEN);

        let mut req = Request::new();
        req.set_unit(layout::BROADCAST_UNIT);
        req.set_channel_range(16, 0x0F0F);
        req.set_fade(240, 1, 0x1234);
        let frame = encode_frame(&req);
        assert_eq!(frame.len(), layout::MAX_FRAME_LEN);
    }
}
