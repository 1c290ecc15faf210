use super::layout;
use super::writer::{Frame, FrameWriter};
use crate::channel::{ChannelFormat, ChannelSet};
use crate::effect::Effect;
use crate::intensity::Decisecond;
use crate::request::Request;

/// Encodes one request as a delimited frame.
///
/// Layout: `[0x00, unit, code | format tag, args.., channel set.., 0x00]`.
pub fn encode_frame(request: &Request) -> Frame {
    let format = ChannelFormat::select(&request.channels);

    let mut writer = FrameWriter::new();
    writer.push(layout::FRAME_DELIMITER);
    writer.push(request.unit);
    writer.push(effect_type(&request.effect, format));
    write_effect_args(&mut writer, &request.effect);
    write_channel_set(&mut writer, &request.channels);
    writer.push(layout::FRAME_DELIMITER);
    writer.finish()
}

pub fn effect_type(effect: &Effect, format: ChannelFormat) -> u8 {
    effect.kind().code() | format.tag()
}

/// Two-byte duration. The low byte is never zero: a zero low byte becomes
/// `0x01` and is flagged on the high byte instead.
///
/// # Examples
/// ```
/// use lorwire_core::protocol::encoder::encode_deciseconds;
///
/// assert_eq!(encode_deciseconds(10), [0x80, 0x0A]);
/// assert_eq!(encode_deciseconds(0x0200), [0x42, 0x01]);
/// ```
pub fn encode_deciseconds(ds: Decisecond) -> [u8; 2] {
    let [high, low] = ds.to_be_bytes();
    let flags = if high == 0 {
        layout::DECISECOND_OPT_HIGH_ZERO
    } else if low == 0 {
        layout::DECISECOND_OPT_LOW_ZERO
    } else {
        0
    };
    let low = if low == 0 {
        layout::DECISECOND_LOW_ZERO_FILL
    } else {
        low
    };
    [high | flags, low]
}

/// In-band option bits for the channel-set offset byte. Only multipart
/// sets carry them; offset-zero sets rely on the format nibble instead.
pub fn channel_set_options(set: &ChannelSet) -> u8 {
    if set.offset() == 0 {
        return 0;
    }
    match (set.low() != 0, set.high() != 0) {
        (true, false) => layout::CHANNEL_SET_OPT_LOW_ONLY,
        (true, true) => 0,
        (false, _) => layout::CHANNEL_SET_OPT_HIGH_ONLY,
    }
}

fn write_effect_args(writer: &mut FrameWriter, effect: &Effect) {
    match *effect {
        Effect::SetIntensity { intensity } => writer.push(intensity),
        Effect::Fade {
            start,
            end,
            duration,
        } => {
            writer.push(start);
            writer.push(end);
            writer.extend(&encode_deciseconds(duration));
        }
        // Pulse carries a single byte on the wire.
        Effect::Pulse { duration } => writer.push((duration & 0xFF) as u8),
        Effect::SetDmxIntensity { output } => writer.push(output),
        Effect::SetLights | Effect::SetOff | Effect::Twinkle | Effect::Shimmer => {}
    }
}

fn write_channel_set(writer: &mut FrameWriter, set: &ChannelSet) {
    writer.push(set.offset() | channel_set_options(set));
    writer.push_nonzero(set.low());
    writer.push_nonzero(set.high());
}

#[cfg(test)]
mod tests {
    use super::{channel_set_options, encode_deciseconds, encode_frame};
    use crate::channel::ChannelSet;
    use crate::effect::{EffectArgs, EffectKind};
    use crate::protocol::layout;
    use crate::request::Request;

    fn request(unit: u8, channels: ChannelSet) -> Request {
        let mut req = Request::new();
        req.set_unit(unit);
        req.channels = channels;
        req
    }

    #[test]
    fn deciseconds_flags() {
        assert_eq!(encode_deciseconds(0), [0x80, 0x01]);
        assert_eq!(encode_deciseconds(0x00FF), [0x80, 0xFF]);
        assert_eq!(encode_deciseconds(0x0100), [0x41, 0x01]);
        assert_eq!(encode_deciseconds(0x1234), [0x12, 0x34]);
        assert_eq!(encode_deciseconds(0xFFFF), [0xFF, 0xFF]);
    }

    #[test]
    fn channel_set_options_only_for_multipart() {
        assert_eq!(channel_set_options(&ChannelSet::new(0, 0x00FF)), 0);
        assert_eq!(channel_set_options(&ChannelSet::new(0, 0xFF00)), 0);
        assert_eq!(
            channel_set_options(&ChannelSet::new(1, 0x00FF)),
            layout::CHANNEL_SET_OPT_LOW_ONLY
        );
        assert_eq!(
            channel_set_options(&ChannelSet::new(1, 0xFF00)),
            layout::CHANNEL_SET_OPT_HIGH_ONLY
        );
        assert_eq!(channel_set_options(&ChannelSet::new(1, 0x0FF0)), 0);
    }

    #[test]
    fn fade_on_single_channel() {
        let mut req = request(1, ChannelSet::single(1));
        req.set_fade(240, 1, 10);
        let frame = encode_frame(&req);
        assert_eq!(
            frame.as_bytes(),
            &[0x00, 0x01, 0x04, 0xF0, 0x01, 0x80, 0x0A, 0x00, 0x02, 0x00]
        );
    }

    #[test]
    fn twinkle_on_low_byte() {
        let mut req = request(2, ChannelSet::range(0, 0xAA));
        req.set_effect(EffectKind::Twinkle, None).unwrap();
        let frame = encode_frame(&req);
        assert_eq!(frame.as_bytes(), &[0x00, 0x02, 0x26, 0x00, 0xAA, 0x00]);
    }

    #[test]
    fn unit_only_off() {
        let req = request(3, ChannelSet::default());
        let frame = encode_frame(&req);
        assert_eq!(frame.as_bytes(), &[0x00, 0x03, 0x42, 0x00, 0x00]);
    }

    #[test]
    fn multipart_high_only() {
        let mut req = request(0xFF, ChannelSet::new(2, 0xFF00));
        req.set_effect(EffectKind::SetLights, None).unwrap();
        let frame = encode_frame(&req);
        assert_eq!(frame.as_bytes(), &[0x00, 0xFF, 0x51, 0x42, 0xFF, 0x00]);
    }

    #[test]
    fn multipart_both_bytes() {
        let mut req = request(4, ChannelSet::new(1, 0x0F0F));
        req.set_intensity(120);
        let frame = encode_frame(&req);
        assert_eq!(
            frame.as_bytes(),
            &[0x00, 0x04, 0x53, 0x78, 0x01, 0x0F, 0x0F, 0x00]
        );
    }

    #[test]
    fn pulse_truncates_duration() {
        let mut req = request(1, ChannelSet::single(0));
        req.set_effect(EffectKind::Pulse, Some(EffectArgs::Pulse { duration: 0x0134 }))
            .unwrap();
        let frame = encode_frame(&req);
        assert_eq!(frame.as_bytes(), &[0x00, 0x01, 0x05, 0x34, 0x00, 0x01, 0x00]);
    }

    #[test]
    fn dmx_intensity_on_bits16() {
        let mut req = request(9, ChannelSet::range(0, 0xFFFF));
        req.set_effect(
            EffectKind::SetDmxIntensity,
            Some(EffectArgs::SetDmxIntensity { output: 0x7F }),
        )
        .unwrap();
        let frame = encode_frame(&req);
        assert_eq!(
            frame.as_bytes(),
            &[0x00, 0x09, 0x18, 0x7F, 0x00, 0xFF, 0xFF, 0x00]
        );
        assert_eq!(frame.effect_type() & layout::FORMAT_TAG_MASK, 0x10);
        assert_eq!(frame.effect_type() & layout::EFFECT_CODE_MASK, 0x08);
    }
}
