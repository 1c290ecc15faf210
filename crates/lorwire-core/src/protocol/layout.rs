use std::time::Duration;

pub const FRAME_DELIMITER: u8 = 0x00;

pub const UNIT_OFFSET: usize = 1;
pub const EFFECT_TYPE_OFFSET: usize = 2;

/// Scratch space reserved for a single encoded frame.
pub const FRAME_SCRATCH_LEN: usize = 16;
pub const MIN_FRAME_LEN: usize = 5;
pub const MAX_FRAME_LEN: usize = 11;

pub const CHANNEL_COUNT: u16 = 1024;
pub const CHANNELS_PER_SET: u16 = 16;
pub const MAX_SET_OFFSET: u8 = 63;

pub const BROADCAST_UNIT: u8 = 0xFF;

pub const EFFECT_SET_LIGHTS: u8 = 0x01;
pub const EFFECT_SET_OFF: u8 = 0x02;
pub const EFFECT_SET_INTENSITY: u8 = 0x03;
pub const EFFECT_FADE: u8 = 0x04;
pub const EFFECT_PULSE: u8 = 0x05;
pub const EFFECT_TWINKLE: u8 = 0x06;
pub const EFFECT_SHIMMER: u8 = 0x07;
pub const EFFECT_SET_DMX_INTENSITY: u8 = 0x08;

pub const EFFECT_CODE_MASK: u8 = 0x0F;
pub const FORMAT_TAG_MASK: u8 = 0xF0;

pub const FORMAT_SINGLE: u8 = 0x00;
pub const FORMAT_BITS16: u8 = 0x10;
pub const FORMAT_BITS8_LOW: u8 = 0x20;
pub const FORMAT_BITS8_HIGH: u8 = 0x30;
pub const FORMAT_UNIT_ONLY: u8 = 0x40;
pub const FORMAT_MULTIPART: u8 = 0x50;

/// In-band channel-set hint: only the low bitmask byte follows.
pub const CHANNEL_SET_OPT_LOW_ONLY: u8 = 0x80;
/// In-band channel-set hint: only the high bitmask byte follows.
pub const CHANNEL_SET_OPT_HIGH_ONLY: u8 = 0x40;

pub const DECISECOND_OPT_HIGH_ZERO: u8 = 0x80;
pub const DECISECOND_OPT_LOW_ZERO: u8 = 0x40;
/// Substituted for a zero low byte so the pair never ends in a delimiter.
pub const DECISECOND_LOW_ZERO_FILL: u8 = 0x01;

pub const INTENSITY_MIN: u8 = 1;
pub const INTENSITY_MAX: u8 = 240;

pub const HEARTBEAT_BYTES: [u8; 5] = [0x00, 0xFF, 0x81, 0x56, 0x00];
pub const HEARTBEAT_INTERVAL: Duration = Duration::from_millis(500);
