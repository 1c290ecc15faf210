//! Effect selectors and their argument payloads.
//!
//! `EffectKind` is the selector a caller configures, `EffectArgs` is the
//! optional payload that travels with it, and `Effect` is the validated
//! pairing the frame encoder dispatches on.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::intensity::{Decisecond, Intensity};
use crate::protocol::error::LorError;
use crate::protocol::layout;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    SetLights,
    SetOff,
    SetIntensity,
    Fade,
    Pulse,
    Twinkle,
    Shimmer,
    SetDmxIntensity,
}

impl EffectKind {
    pub const ALL: [EffectKind; 8] = [
        EffectKind::SetLights,
        EffectKind::SetOff,
        EffectKind::SetIntensity,
        EffectKind::Fade,
        EffectKind::Pulse,
        EffectKind::Twinkle,
        EffectKind::Shimmer,
        EffectKind::SetDmxIntensity,
    ];

    /// Wire code, occupying the low nibble of the effect-type byte.
    pub fn code(self) -> u8 {
        match self {
            EffectKind::SetLights => layout::EFFECT_SET_LIGHTS,
            EffectKind::SetOff => layout::EFFECT_SET_OFF,
            EffectKind::SetIntensity => layout::EFFECT_SET_INTENSITY,
            EffectKind::Fade => layout::EFFECT_FADE,
            EffectKind::Pulse => layout::EFFECT_PULSE,
            EffectKind::Twinkle => layout::EFFECT_TWINKLE,
            EffectKind::Shimmer => layout::EFFECT_SHIMMER,
            EffectKind::SetDmxIntensity => layout::EFFECT_SET_DMX_INTENSITY,
        }
    }

    pub fn requires_args(self) -> bool {
        matches!(
            self,
            EffectKind::SetIntensity
                | EffectKind::Fade
                | EffectKind::Pulse
                | EffectKind::SetDmxIntensity
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            EffectKind::SetLights => "set_lights",
            EffectKind::SetOff => "set_off",
            EffectKind::SetIntensity => "set_intensity",
            EffectKind::Fade => "fade",
            EffectKind::Pulse => "pulse",
            EffectKind::Twinkle => "twinkle",
            EffectKind::Shimmer => "shimmer",
            EffectKind::SetDmxIntensity => "set_dmx_intensity",
        }
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Argument payload stored alongside an effect selector.
///
/// Variants are distinguished by their field names when deserialized, so a
/// request file writes `{"duration": 5}` rather than a tagged object.
/// Unknown fields are rejected so each shape has exactly one reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged, deny_unknown_fields)]
pub enum EffectArgs {
    Fade {
        start: Intensity,
        end: Intensity,
        duration: Decisecond,
    },
    SetIntensity {
        intensity: Intensity,
    },
    Pulse {
        duration: Decisecond,
    },
    SetDmxIntensity {
        output: u8,
    },
}

/// An effect paired with the payload it encodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Effect {
    SetLights,
    SetOff,
    SetIntensity {
        intensity: Intensity,
    },
    Fade {
        start: Intensity,
        end: Intensity,
        duration: Decisecond,
    },
    /// Only the low 8 bits of `duration` reach the wire.
    Pulse {
        duration: Decisecond,
    },
    Twinkle,
    Shimmer,
    SetDmxIntensity {
        output: u8,
    },
}

impl Effect {
    /// Pairs a selector with its payload.
    ///
    /// Payload-bearing kinds reject a missing payload or a payload shaped
    /// for a different kind. Other kinds ignore whatever payload is given.
    pub fn from_parts(kind: EffectKind, args: Option<&EffectArgs>) -> Result<Self, LorError> {
        if kind.requires_args() && args.is_none() {
            return Err(LorError::InvalidArgument {
                effect: kind,
                reason: "missing required arguments",
            });
        }

        let effect = match (kind, args) {
            (EffectKind::SetLights, _) => Effect::SetLights,
            (EffectKind::SetOff, _) => Effect::SetOff,
            (EffectKind::Twinkle, _) => Effect::Twinkle,
            (EffectKind::Shimmer, _) => Effect::Shimmer,
            (EffectKind::SetIntensity, Some(EffectArgs::SetIntensity { intensity })) => {
                Effect::SetIntensity {
                    intensity: *intensity,
                }
            }
            (
                EffectKind::Fade,
                Some(EffectArgs::Fade {
                    start,
                    end,
                    duration,
                }),
            ) => Effect::Fade {
                start: *start,
                end: *end,
                duration: *duration,
            },
            (EffectKind::Pulse, Some(EffectArgs::Pulse { duration })) => Effect::Pulse {
                duration: *duration,
            },
            (EffectKind::SetDmxIntensity, Some(EffectArgs::SetDmxIntensity { output })) => {
                Effect::SetDmxIntensity { output: *output }
            }
            (kind, _) => {
                return Err(LorError::InvalidArgument {
                    effect: kind,
                    reason: "arguments do not match effect",
                });
            }
        };
        Ok(effect)
    }

    pub fn kind(&self) -> EffectKind {
        match self {
            Effect::SetLights => EffectKind::SetLights,
            Effect::SetOff => EffectKind::SetOff,
            Effect::SetIntensity { .. } => EffectKind::SetIntensity,
            Effect::Fade { .. } => EffectKind::Fade,
            Effect::Pulse { .. } => EffectKind::Pulse,
            Effect::Twinkle => EffectKind::Twinkle,
            Effect::Shimmer => EffectKind::Shimmer,
            Effect::SetDmxIntensity { .. } => EffectKind::SetDmxIntensity,
        }
    }

    /// Payload carried by this effect, if any.
    pub fn args(&self) -> Option<EffectArgs> {
        match *self {
            Effect::SetIntensity { intensity } => Some(EffectArgs::SetIntensity { intensity }),
            Effect::Fade {
                start,
                end,
                duration,
            } => Some(EffectArgs::Fade {
                start,
                end,
                duration,
            }),
            Effect::Pulse { duration } => Some(EffectArgs::Pulse { duration }),
            Effect::SetDmxIntensity { output } => Some(EffectArgs::SetDmxIntensity { output }),
            Effect::SetLights | Effect::SetOff | Effect::Twinkle | Effect::Shimmer => None,
        }
    }
}
