//! Frequency arithmetic: digit editing, clipping, display, reply parsing
//!
//! The radio carries frequencies as eleven zero-padded decimal digits on the
//! wire. For editing, the first two digits are a fixed head (the FT-991A
//! tops out at 470 MHz, so they never carry user-reachable information) and
//! the remaining nine are the editable tail, indexed 0..=8 from most to
//! least significant.

/// Lowest frequency the FT-991A accepts, in Hz
pub const MIN_HZ: u64 = 3_000_000;

/// Highest frequency the FT-991A accepts, in Hz
pub const MAX_HZ: u64 = 470_000_000;

/// Wire width of a frequency argument, in decimal digits
pub const FREQ_DIGITS: usize = 11;

/// Fixed head digits not reachable by digit editing
pub const HEAD_DIGITS: usize = 2;

/// Editable tail digits, indexed 0..=8
pub const EDITABLE_DIGITS: usize = FREQ_DIGITS - HEAD_DIGITS;

/// Clip a frequency to the device-supported range
pub fn clip(hz: u64) -> u64 {
    hz.clamp(MIN_HZ, MAX_HZ)
}

/// Step one editable digit up or down with modulo-10 wrap
///
/// Exactly one character of the eleven-digit form changes; the wrap at 9
/// and 0 deliberately does not carry into neighboring digits, so stepping
/// the kHz digit past 9 never disturbs the MHz digits. The result is NOT
/// clipped here; callers clip before sending.
///
/// # Panics
///
/// Panics if `digit_index` is outside 0..=8.
pub fn adjust_digit(hz: u64, digit_index: usize, direction: i32) -> u64 {
    assert!(
        digit_index < EDITABLE_DIGITS,
        "digit index out of range: {digit_index}"
    );

    // Eleven digits is the wire width; anything wider never came from the
    // radio, so pin the edit to the lowest eleven.
    let mut digits = format!("{:011}", hz.min(99_999_999_999)).into_bytes();
    let pos = HEAD_DIGITS + digit_index;
    let d = i32::from(digits[pos] - b'0');
    digits[pos] = b'0' + (d + direction).rem_euclid(10) as u8;

    digits
        .iter()
        .fold(0u64, |acc, &b| acc * 10 + u64::from(b - b'0'))
}

/// Pull a frequency out of a (terminator-stripped) `FA` reply
///
/// Tolerant by design: collects every ASCII digit in the reply and reads
/// the trailing eleven, which survives both a clean `FA00007074000` echo
/// and prefix garbage from a slow buffer drain.
pub fn parse_reply(reply: &str) -> Option<u64> {
    let digits: String = reply.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    let tail = if digits.len() > FREQ_DIGITS {
        &digits[digits.len() - FREQ_DIGITS..]
    } else {
        &digits[..]
    };
    tail.parse().ok()
}

/// Render a frequency as the panel-style `MHz.kHz.Hz` triplet
///
/// 7 255 000 Hz formats as `7.255.000`; an unknown frequency renders as
/// `---.---.---`.
pub fn format_display(hz: Option<u64>) -> String {
    match hz {
        Some(hz) => format!(
            "{}.{:03}.{:03}",
            hz / 1_000_000,
            (hz / 1_000) % 1_000,
            hz % 1_000
        ),
        None => "---.---.---".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_adjust_steps_single_digit() {
        // 7.074.000 MHz; tail index 3 is the 10 kHz digit
        let hz = 7_074_000;
        assert_eq!(adjust_digit(hz, 3, 1), 7_084_000);
        assert_eq!(adjust_digit(hz, 3, -1), 7_064_000);
    }

    #[test]
    fn test_adjust_wraps_without_carry() {
        // 9 -> 0 leaves every other digit alone
        assert_eq!(adjust_digit(7_094_000, 3, 1), 7_004_000);
        // 0 -> 9 likewise
        assert_eq!(adjust_digit(7_004_000, 3, -1), 7_094_000);
    }

    #[test]
    fn test_adjust_least_significant() {
        assert_eq!(adjust_digit(7_074_000, 8, 1), 7_074_001);
        assert_eq!(adjust_digit(7_074_000, 8, -1), 7_073_999);
    }

    #[test]
    #[should_panic(expected = "digit index out of range")]
    fn test_adjust_rejects_bad_index() {
        adjust_digit(7_074_000, 9, 1);
    }

    #[test]
    fn test_clip_bounds() {
        assert_eq!(clip(0), MIN_HZ);
        assert_eq!(clip(MIN_HZ), MIN_HZ);
        assert_eq!(clip(146_520_000), 146_520_000);
        assert_eq!(clip(MAX_HZ), MAX_HZ);
        assert_eq!(clip(u64::MAX), MAX_HZ);
    }

    #[test]
    fn test_parse_reply() {
        assert_eq!(parse_reply("FA00007074000"), Some(7_074_000));
        assert_eq!(parse_reply("FA00146520000"), Some(146_520_000));
        assert_eq!(parse_reply("FA"), None);
        assert_eq!(parse_reply(""), None);
        assert_eq!(parse_reply("?"), None);
    }

    #[test]
    fn test_parse_reply_keeps_trailing_eleven() {
        // Stale digits ahead of the real reply must not shift the value
        assert_eq!(parse_reply("00300007074000"), Some(7_074_000));
    }

    #[test]
    fn test_format_display() {
        assert_eq!(format_display(Some(7_255_000)), "7.255.000");
        assert_eq!(format_display(Some(146_520_500)), "146.520.500");
        assert_eq!(format_display(Some(3_000_000)), "3.000.000");
        assert_eq!(format_display(None), "---.---.---");
    }

    proptest! {
        #[test]
        fn prop_adjust_changes_exactly_one_digit(
            hz in MIN_HZ..=MAX_HZ,
            idx in 0usize..EDITABLE_DIGITS,
            dir in prop_oneof![Just(1i32), Just(-1i32)],
        ) {
            let before = format!("{:011}", hz);
            let after = format!("{:011}", adjust_digit(hz, idx, dir));

            let differing = before
                .bytes()
                .zip(after.bytes())
                .enumerate()
                .filter(|(_, (a, b))| a != b)
                .map(|(i, _)| i)
                .collect::<Vec<_>>();

            // A mod-10 step never maps a digit onto itself, so exactly
            // the edited position differs
            prop_assert_eq!(differing, vec![HEAD_DIGITS + idx]);
        }

        #[test]
        fn prop_adjust_wraps_mod_ten(
            hz in MIN_HZ..=MAX_HZ,
            idx in 0usize..EDITABLE_DIGITS,
            dir in prop_oneof![Just(1i32), Just(-1i32)],
        ) {
            let pos = HEAD_DIGITS + idx;
            let before = format!("{:011}", hz).into_bytes()[pos] - b'0';
            let after = format!("{:011}", adjust_digit(hz, idx, dir)).into_bytes()[pos] - b'0';
            prop_assert_eq!(
                i32::from(after),
                (i32::from(before) + dir).rem_euclid(10)
            );
        }

        #[test]
        fn prop_adjust_then_clip_in_range(
            hz in MIN_HZ..=MAX_HZ,
            idx in 0usize..EDITABLE_DIGITS,
            dir in prop_oneof![Just(1i32), Just(-1i32)],
        ) {
            let clipped = clip(adjust_digit(hz, idx, dir));
            prop_assert!((MIN_HZ..=MAX_HZ).contains(&clipped));
        }

        #[test]
        fn prop_adjust_up_down_is_identity(
            hz in MIN_HZ..=MAX_HZ,
            idx in 0usize..EDITABLE_DIGITS,
        ) {
            prop_assert_eq!(adjust_digit(adjust_digit(hz, idx, 1), idx, -1), hz);
        }
    }
}
