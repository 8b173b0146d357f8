// ── Percent → device brightness ──
//
// Home Assistant lights take brightness as 0..=255. Requests below the
// floor are raised to it: some drivers treat very low values as "off".

/// Lowest brightness ever sent to a device.
pub const BRIGHTNESS_FLOOR: u8 = 13;

/// Map a percentage to the device brightness range.
///
/// The input is clamped to `0..=100`, scaled by 2.55 with half-up rounding,
/// then clamped to `13..=255`. Total over `i32`.
pub fn to_device_range(percent: i32) -> u8 {
    let clamped = percent.clamp(0, 100);
    // round(p * 2.55) == (p * 255 + 50) / 100 in integer arithmetic.
    let raw = (clamped * 255 + 50) / 100;
    u8::try_from(raw)
        .unwrap_or(u8::MAX)
        .max(BRIGHTNESS_FLOOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints() {
        assert_eq!(to_device_range(0), 13);
        assert_eq!(to_device_range(100), 255);
    }

    #[test]
    fn rounds_half_up() {
        assert_eq!(to_device_range(50), 128);
        assert_eq!(to_device_range(75), 191);
        assert_eq!(to_device_range(1), 13);
        assert_eq!(to_device_range(10), 26);
    }

    #[test]
    fn clamps_out_of_range_input() {
        assert_eq!(to_device_range(-5), to_device_range(0));
        assert_eq!(to_device_range(150), to_device_range(100));
        assert_eq!(to_device_range(i32::MIN), 13);
        assert_eq!(to_device_range(i32::MAX), 255);
    }

    #[test]
    fn monotonic_and_bounded() {
        let mut previous = 0;
        for p in -10..=110 {
            let b = to_device_range(p);
            assert!(b >= BRIGHTNESS_FLOOR);
            assert!(b >= previous, "not monotonic at {p}");
            previous = b;
        }
    }
}
