use serde::Serialize;

use crate::channel::ChannelSet;
use crate::effect::{Effect, EffectArgs, EffectKind};
use crate::intensity::{Channel, Decisecond, Intensity, Unit};
use crate::protocol::error::LorError;

/// A request to apply one effect to a channel set on a unit.
///
/// Fields may be assigned directly; the setters apply channel alignment and
/// effect argument validation.
///
/// # Examples
/// ```
/// use lorwire_core::{Effect, Request, map_intensity};
///
/// let mut req = Request::new();
/// req.set_unit(1);
/// req.set_single_channel(1);
/// req.set_fade(map_intensity(0xFF), map_intensity(0x00), 10);
/// assert!(matches!(req.effect, Effect::Fade { start: 240, end: 1, duration: 10 }));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Request {
    /// The effect and payload that are encoded on the wire.
    pub effect: Effect,
    /// Payload as last supplied to `set_effect`, retained for effect kinds
    /// that may reuse it. Never encoded: assigning it directly does not
    /// change the frame, set `effect` instead.
    pub args: Option<EffectArgs>,
    pub channels: ChannelSet,
    pub unit: Unit,
}

impl Default for Request {
    fn default() -> Self {
        Self {
            effect: Effect::SetOff,
            args: None,
            channels: ChannelSet::default(),
            unit: 0,
        }
    }
}

impl Request {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_single_channel(&mut self, channel: Channel) {
        self.channels = ChannelSet::single(channel);
    }

    pub fn set_channel_range(&mut self, first: Channel, bitmask: u16) {
        self.channels = ChannelSet::range(first, bitmask);
    }

    pub fn set_unit(&mut self, unit: Unit) {
        self.unit = unit;
    }

    /// Configures the effect and stores `args`.
    ///
    /// On error the request is left unchanged.
    pub fn set_effect(
        &mut self,
        kind: EffectKind,
        args: Option<EffectArgs>,
    ) -> Result<(), LorError> {
        self.effect = Effect::from_parts(kind, args.as_ref())?;
        self.args = args;
        Ok(())
    }

    pub fn set_intensity(&mut self, intensity: Intensity) {
        self.effect = Effect::SetIntensity { intensity };
        self.args = self.effect.args();
    }

    pub fn set_fade(&mut self, start: Intensity, end: Intensity, duration: Decisecond) {
        self.effect = Effect::Fade {
            start,
            end,
            duration,
        };
        self.args = self.effect.args();
    }
}

#[cfg(test)]
mod tests {
    use super::Request;
    use crate::channel::ChannelSet;
    use crate::effect::{Effect, EffectArgs, EffectKind};
    use crate::protocol::encoder::encode_frame;
    use crate::protocol::error::LorError;

    #[test]
    fn failed_set_effect_leaves_request_untouched() {
        let mut req = Request::new();
        req.set_intensity(99);
        let before = req;

        for kind in [
            EffectKind::SetIntensity,
            EffectKind::Fade,
            EffectKind::Pulse,
            EffectKind::SetDmxIntensity,
        ] {
            let err = req.set_effect(kind, None).unwrap_err();
            assert!(matches!(err, LorError::InvalidArgument { .. }));
            assert_eq!(req, before);
        }
    }

    #[test]
    fn set_effect_without_payload_succeeds_for_plain_kinds() {
        let mut req = Request::new();
        for kind in [
            EffectKind::SetLights,
            EffectKind::SetOff,
            EffectKind::Twinkle,
            EffectKind::Shimmer,
        ] {
            req.set_effect(kind, None).unwrap();
            assert_eq!(req.effect.kind(), kind);
            assert_eq!(req.args, None);
        }
    }

    #[test]
    fn unused_payload_is_retained() {
        let mut req = Request::new();
        let args = EffectArgs::Pulse { duration: 4 };
        req.set_effect(EffectKind::Shimmer, Some(args)).unwrap();
        assert_eq!(req.effect, Effect::Shimmer);
        assert_eq!(req.args, Some(args));
    }

    #[test]
    fn args_field_does_not_reach_the_wire() {
        let mut req = Request::new();
        req.set_single_channel(0);
        req.set_intensity(10);
        let before = encode_frame(&req);

        req.args = Some(EffectArgs::SetIntensity { intensity: 200 });
        assert_eq!(encode_frame(&req), before);
    }

    #[test]
    fn convenience_setters_match_set_effect() {
        let mut direct = Request::new();
        direct
            .set_effect(
                EffectKind::Fade,
                Some(EffectArgs::Fade {
                    start: 10,
                    end: 20,
                    duration: 30,
                }),
            )
            .unwrap();
        let mut wrapped = Request::new();
        wrapped.set_fade(10, 20, 30);
        assert_eq!(direct, wrapped);

        let mut direct = Request::new();
        direct
            .set_effect(
                EffectKind::SetIntensity,
                Some(EffectArgs::SetIntensity { intensity: 5 }),
            )
            .unwrap();
        let mut wrapped = Request::new();
        wrapped.set_intensity(5);
        assert_eq!(direct, wrapped);
    }

    #[test]
    fn channel_setters_replace_set() {
        let mut req = Request::new();
        req.set_single_channel(100);
        assert_eq!(req.channels, ChannelSet::new(6, 1 << 4));
        req.set_channel_range(4, 0x000F);
        assert_eq!(req.channels, ChannelSet::new(0, 0x00F0));
    }
}
