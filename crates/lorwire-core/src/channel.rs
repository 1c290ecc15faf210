//! Aligned channel sets and wire-format selection.
//!
//! A channel set names a 16-channel window (`offset`) and a bitmask over
//! it; bit `i` addresses channel `offset * 16 + i`. Relative bitmasks are
//! shifted into the window and bits pushed past bit 15 are dropped.

use std::fmt;

use serde::Serialize;

use crate::intensity::Channel;
use crate::protocol::layout;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct ChannelSet {
    offset: u8,
    bitmask: u16,
}

impl ChannelSet {
    /// Builds a set from an already aligned window. The offset wraps into
    /// `0..=63`.
    pub fn new(offset: u8, bitmask: u16) -> Self {
        Self {
            offset: offset % (layout::MAX_SET_OFFSET + 1),
            bitmask,
        }
    }

    pub fn single(channel: Channel) -> Self {
        let channel = channel % layout::CHANNEL_COUNT;
        Self {
            offset: (channel / layout::CHANNELS_PER_SET) as u8,
            bitmask: 1u16 << (channel % layout::CHANNELS_PER_SET),
        }
    }

    /// Aligns `first` down to its window and shifts `bitmask` to match.
    ///
    /// # Examples
    /// ```
    /// use lorwire_core::ChannelSet;
    ///
    /// let set = ChannelSet::range(8, 0x00FF);
    /// assert_eq!(set.offset(), 0);
    /// assert_eq!(set.bitmask(), 0xFF00);
    /// ```
    pub fn range(first: Channel, bitmask: u16) -> Self {
        let first = first % layout::CHANNEL_COUNT;
        let align = first % layout::CHANNELS_PER_SET;
        Self {
            offset: ((first - align) / layout::CHANNELS_PER_SET) as u8,
            bitmask: ((u32::from(bitmask) << align) & 0xFFFF) as u16,
        }
    }

    pub fn offset(&self) -> u8 {
        self.offset
    }

    pub fn bitmask(&self) -> u16 {
        self.bitmask
    }

    pub fn low(&self) -> u8 {
        (self.bitmask & 0xFF) as u8
    }

    pub fn high(&self) -> u8 {
        (self.bitmask >> 8) as u8
    }

    pub fn is_empty(&self) -> bool {
        self.bitmask == 0
    }

    /// Absolute channel indices addressed by this set, ascending.
    pub fn channels(&self) -> impl Iterator<Item = Channel> + '_ {
        let base = Channel::from(self.offset) * layout::CHANNELS_PER_SET;
        (0..layout::CHANNELS_PER_SET)
            .filter(move |bit| self.bitmask & (1u16 << *bit) != 0)
            .map(move |bit| base + bit)
    }

    pub fn format(&self) -> ChannelFormat {
        ChannelFormat::select(self)
    }
}

/// Channel-set shape, carried in the high nibble of the effect-type byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelFormat {
    Single,
    Bits16,
    Bits8Low,
    Bits8High,
    UnitOnly,
    Multipart,
}

impl ChannelFormat {
    pub fn select(set: &ChannelSet) -> Self {
        if set.offset != 0 {
            return ChannelFormat::Multipart;
        }
        match set.bitmask.count_ones() {
            0 => ChannelFormat::UnitOnly,
            1 => ChannelFormat::Single,
            _ => match (set.low() != 0, set.high() != 0) {
                (true, true) => ChannelFormat::Bits16,
                (true, false) => ChannelFormat::Bits8Low,
                _ => ChannelFormat::Bits8High,
            },
        }
    }

    pub fn tag(self) -> u8 {
        match self {
            ChannelFormat::Single => layout::FORMAT_SINGLE,
            ChannelFormat::Bits16 => layout::FORMAT_BITS16,
            ChannelFormat::Bits8Low => layout::FORMAT_BITS8_LOW,
            ChannelFormat::Bits8High => layout::FORMAT_BITS8_HIGH,
            ChannelFormat::UnitOnly => layout::FORMAT_UNIT_ONLY,
            ChannelFormat::Multipart => layout::FORMAT_MULTIPART,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ChannelFormat::Single => "single",
            ChannelFormat::Bits16 => "bits16",
            ChannelFormat::Bits8Low => "bits8_low",
            ChannelFormat::Bits8High => "bits8_high",
            ChannelFormat::UnitOnly => "unit_only",
            ChannelFormat::Multipart => "multipart",
        }
    }
}

impl fmt::Display for ChannelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
