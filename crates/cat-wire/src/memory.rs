//! Memory channel helpers: range, wraparound stepping, reply interpretation
//!
//! The FT-991A numbers its regular memories 1..=124. `MC;` reports the
//! current channel (000 while on VFO), `MT` carries the optional tag text,
//! and `MR` dumps the stored contents, which is the only way to tell a
//! programmed channel from an empty one without switching to it.

/// Lowest regular memory channel
pub const CHANNEL_MIN: u32 = 1;

/// Highest regular memory channel
pub const CHANNEL_MAX: u32 = 124;

/// Longest tag text carried through to display
pub const TAG_MAX_LEN: usize = 12;

/// What an `MC` reply says about where the radio is sitting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelReply {
    /// Channel 000: the radio is on VFO
    Vfo,
    /// A memory channel number (not range-checked here)
    Channel(u32),
}

/// Returns true if `channel` is a valid regular memory channel
pub fn in_range(channel: u32) -> bool {
    (CHANNEL_MIN..=CHANNEL_MAX).contains(&channel)
}

/// Step to the neighboring channel, wrapping past either end of the range
pub fn step(channel: u32, direction: i32) -> u32 {
    let next = channel as i64 + i64::from(direction.signum());
    if next > i64::from(CHANNEL_MAX) {
        CHANNEL_MIN
    } else if next < i64::from(CHANNEL_MIN) {
        CHANNEL_MAX
    } else {
        next as u32
    }
}

/// Pull the channel number out of a (terminator-stripped) `MC` reply
pub fn parse_channel_reply(reply: &str) -> Option<ChannelReply> {
    let bytes = reply.as_bytes();
    if !reply.starts_with("MC") || bytes.len() < 5 {
        return None;
    }
    let digits = &bytes[2..5];
    if !digits.iter().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let channel = digits
        .iter()
        .fold(0u32, |acc, &b| acc * 10 + u32::from(b - b'0'));
    if channel == 0 {
        Some(ChannelReply::Vfo)
    } else {
        Some(ChannelReply::Channel(channel))
    }
}

/// Pull the tag text out of a (terminator-stripped) `MT` reply
///
/// The reply body echoes the channel number ahead of the tag; that echo is
/// stripped, the remainder is filtered down to printable ASCII and trimmed,
/// and anything left is truncated to [`TAG_MAX_LEN`]. An empty or `---`
/// placeholder tag reads as no tag at all.
pub fn parse_tag_reply(reply: &str) -> Option<String> {
    let payload = reply.strip_prefix("MT")?;

    let bytes = payload.as_bytes();
    let rest = if bytes.len() >= 3 && bytes[..3].iter().all(|b| b.is_ascii_digit()) {
        &payload[3..]
    } else {
        payload
    };

    let tag: String = rest
        .chars()
        .filter(|c| (' '..='~').contains(c))
        .collect::<String>()
        .trim()
        .chars()
        .take(TAG_MAX_LEN)
        .collect();

    if tag.is_empty() || tag == "---" {
        None
    } else {
        Some(tag)
    }
}

/// Decide from a (terminator-stripped) `MR` reply whether the channel holds
/// anything
///
/// A programmed channel's contents dump carries its frequency as a long
/// digit run; an empty channel reads back all zeros or nothing usable. Any
/// run of six or more digits containing a nonzero digit counts as
/// programmed.
pub fn contents_programmed(reply: &str) -> bool {
    let Some(payload) = reply.strip_prefix("MR") else {
        return false;
    };

    let bytes = payload.as_bytes();
    let rest = if bytes.len() >= 3 && bytes[..3].iter().all(|b| b.is_ascii_digit()) {
        &bytes[3..]
    } else {
        bytes
    };

    let mut run_len = 0usize;
    let mut run_nonzero = false;
    for &b in rest.iter().chain(std::iter::once(&b' ')) {
        if b.is_ascii_digit() {
            run_len += 1;
            if b != b'0' {
                run_nonzero = true;
            }
        } else {
            if run_len >= 6 && run_nonzero {
                return true;
            }
            run_len = 0;
            run_nonzero = false;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_wraps_both_ends() {
        assert_eq!(step(1, 1), 2);
        assert_eq!(step(124, 1), 1);
        assert_eq!(step(1, -1), 124);
        assert_eq!(step(60, -1), 59);
    }

    #[test]
    fn test_in_range() {
        assert!(in_range(1));
        assert!(in_range(124));
        assert!(!in_range(0));
        assert!(!in_range(125));
    }

    #[test]
    fn test_parse_channel_reply() {
        assert_eq!(parse_channel_reply("MC000"), Some(ChannelReply::Vfo));
        assert_eq!(parse_channel_reply("MC059"), Some(ChannelReply::Channel(59)));
        assert_eq!(parse_channel_reply("MC124"), Some(ChannelReply::Channel(124)));
        assert_eq!(parse_channel_reply("MC"), None);
        assert_eq!(parse_channel_reply("MCabc"), None);
        assert_eq!(parse_channel_reply("FA059"), None);
    }

    #[test]
    fn test_parse_tag_reply() {
        assert_eq!(
            parse_tag_reply("MT007POTA CHAT"),
            Some("POTA CHAT".to_string())
        );
        assert_eq!(parse_tag_reply("MT007"), None);
        assert_eq!(parse_tag_reply("MT007---"), None);
        assert_eq!(parse_tag_reply("MT007   "), None);
        assert_eq!(parse_tag_reply("FA007TAG"), None);
    }

    #[test]
    fn test_parse_tag_truncates() {
        let tag = parse_tag_reply("MT001THIS TAG IS FAR TOO LONG").unwrap();
        assert_eq!(tag.chars().count(), TAG_MAX_LEN);
        assert_eq!(tag, "THIS TAG IS ");
    }

    #[test]
    fn test_parse_tag_filters_unprintable() {
        assert_eq!(
            parse_tag_reply("MT002\u{7}CALL\u{1b}IN"),
            Some("CALLIN".to_string())
        );
    }

    #[test]
    fn test_contents_programmed() {
        // Frequency digit run with nonzero content
        assert!(contents_programmed("MR059007074000A00"));
        // All-zero dump is an empty channel
        assert!(!contents_programmed("MR059000000000000"));
        // Short digit runs are field separators, not a frequency
        assert!(!contents_programmed("MR05912345"));
        assert!(!contents_programmed("MR"));
        assert!(!contents_programmed("XX059007074000"));
    }
}
