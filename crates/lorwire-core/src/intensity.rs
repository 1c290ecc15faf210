//! Native intensity scale and the default byte-level mapping.

use crate::protocol::layout;

/// Native protocol intensity, 1 (dimmest) to 240 (brightest).
pub type Intensity = u8;
/// Duration in tenths of a second.
pub type Decisecond = u16;
/// Hardware unit identifier; `BROADCAST_UNIT` addresses every unit.
pub type Unit = u8;
/// Absolute channel index, reduced modulo 1024 by the channel setters.
pub type Channel = u16;

/// Converts a byte-domain level into a native intensity.
///
/// Callers may substitute their own curve wherever an `IntensityFn` is
/// accepted.
pub type IntensityFn = fn(u8) -> Intensity;

/// Default linear mapping from `0..=255` onto `1..=240`, rounded to nearest.
///
/// # Examples
/// ```
/// use lorwire_core::map_intensity;
///
/// assert_eq!(map_intensity(0), 1);
/// assert_eq!(map_intensity(255), 240);
/// ```
pub fn map_intensity(level: u8) -> Intensity {
    let span = u32::from(layout::INTENSITY_MAX - layout::INTENSITY_MIN);
    let scaled = (u32::from(level) * span + 127) / 255;
    layout::INTENSITY_MIN + scaled as u8
}

#[cfg(test)]
mod tests {
    use super::map_intensity;

    #[test]
    fn bounds() {
        assert_eq!(map_intensity(0), 1);
        assert_eq!(map_intensity(255), 240);
    }

    #[test]
    fn midpoint() {
        assert_eq!(map_intensity(128), 121);
    }

    #[test]
    fn monotonic_over_byte_domain() {
        let mut previous = map_intensity(0);
        for level in 1..=u8::MAX {
            let current = map_intensity(level);
            assert!(current >= previous, "{level} regressed");
            assert!((1..=240).contains(&current));
            previous = current;
        }
    }
}
