//! Transmit/receive status parsing
//!
//! The radio offers no single reliable "am I transmitting" answer, so the
//! engine chains three probes: `TX;`, then the composite `IF;` status word,
//! then the power meter. The first two parsers live here; the meter half
//! reuses [`crate::meter`].

/// Interpret a (terminator-stripped) `TX` reply
///
/// The state character is the one right after the mnemonic: `0` means
/// receiving, `1` means transmitting. The radio reports `2` for a
/// CAT-initiated transmission on some firmware; that and anything else
/// reads as unparsable so the caller can fall through to the next probe.
pub fn parse_tx_reply(reply: &str) -> Option<bool> {
    let bytes = reply.as_bytes();
    if !reply.starts_with("TX") || bytes.len() < 3 {
        return None;
    }
    match bytes[2] {
        b'0' => Some(false),
        b'1' => Some(true),
        _ => None,
    }
}

/// Indices into the `IF` payload where the PTT flag has been observed,
/// counting from the character after the `IF` echo
const INFO_TX_INDICES: [usize; 5] = [27, 28, 29, 30, 31];

/// Dig the transmit flag out of a (terminator-stripped) `IF` reply
///
/// Field positions in the composite status word drift across firmware
/// revisions. This collects the `0`/`1` characters at every payload index
/// the flag has been seen at and trusts them only when they all agree;
/// failing that, the last `0`/`1` anywhere in the payload decides. A
/// payload with no binary characters at all yields `None`.
pub fn parse_info_transmit(reply: &str) -> Option<bool> {
    let payload = reply.strip_prefix("IF")?.as_bytes();

    let candidates: Vec<u8> = INFO_TX_INDICES
        .iter()
        .filter_map(|&i| payload.get(i).copied())
        .filter(|b| matches!(b, b'0' | b'1'))
        .collect();
    if !candidates.is_empty() && candidates.iter().all(|&b| b == candidates[0]) {
        return Some(candidates[0] == b'1');
    }

    payload
        .iter()
        .rev()
        .find(|b| matches!(b, b'0' | b'1'))
        .map(|&b| b == b'1')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tx_reply() {
        assert_eq!(parse_tx_reply("TX0"), Some(false));
        assert_eq!(parse_tx_reply("TX1"), Some(true));
        // CAT-initiated TX reports 2; falls through to the next probe
        assert_eq!(parse_tx_reply("TX2"), None);
        assert_eq!(parse_tx_reply("TX"), None);
        assert_eq!(parse_tx_reply("FA1"), None);
        assert_eq!(parse_tx_reply(""), None);
    }

    #[test]
    fn test_info_consensus_decides() {
        // 32-character payload with all five flag positions agreeing
        let rx = format!("IF{:027}{}", 0, "00000");
        assert_eq!(parse_info_transmit(&rx), Some(false));

        let tx = format!("IF{:027}{}", 0, "11111");
        assert_eq!(parse_info_transmit(&tx), Some(true));
    }

    #[test]
    fn test_info_split_vote_falls_back_to_last_bit() {
        // Flag positions disagree; the last binary character in the whole
        // payload wins
        let reply = format!("IF{:027}{}", 0, "10101");
        assert_eq!(parse_info_transmit(&reply), Some(true));

        let reply = format!("IF{:027}{}", 0, "10100");
        assert_eq!(parse_info_transmit(&reply), Some(false));
    }

    #[test]
    fn test_info_short_payload_uses_last_bit() {
        // Too short to reach the flag positions
        assert_eq!(parse_info_transmit("IF0010"), Some(false));
        assert_eq!(parse_info_transmit("IF0011"), Some(true));
    }

    #[test]
    fn test_info_unusable() {
        assert_eq!(parse_info_transmit("IF"), None);
        assert_eq!(parse_info_transmit("IFabc"), None);
        assert_eq!(parse_info_transmit("TX1"), None);
    }
}
