//! # Forgery Attempts
//!
//! An attacker who can read and write the queue but does not hold the group
//! secret tries to produce an envelope the consumer accepts.

#[cfg(test)]
mod tests {
    use crate::fixtures::{COMMAND, NOW, OTHER_SECRET, SECRET};
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
    use bolt_crypto::{Nonce, TAG_LEN};
    use bolt_security::{
        ClockSkewPolicy, Envelope, EnvelopeCodec, EnvelopeError, EnvelopeHeader, InvalidReason,
        ENVELOPE_VERSION,
    };

    const POLICY: ClockSkewPolicy = ClockSkewPolicy::new(30);

    fn bad_mac() -> Result<String, EnvelopeError> {
        Err(EnvelopeError::Invalid(InvalidReason::BadMac))
    }

    fn open(wire: &str) -> Result<String, EnvelopeError> {
        EnvelopeCodec::new().decode_at(SECRET.as_bytes(), wire, POLICY, NOW)
    }

    // =============================================================================
    // ATTACK: REPLACE THE PAYLOAD
    // =============================================================================

    #[test]
    fn test_payload_swap_keeps_old_tag() {
        let wire = EnvelopeCodec::new()
            .encode(SECRET.as_bytes(), COMMAND, NOW)
            .unwrap();
        let mut envelope = Envelope::from_wire(&wire).unwrap();

        let forged = br#"Bolt is a { "noun": "loser!!!1"}"#;
        assert_eq!(forged.len(), envelope.payload.len());
        envelope.payload = forged.to_vec();

        assert_eq!(open(&envelope.to_wire()), bad_mac());
    }

    #[test]
    fn test_tag_under_guessed_secret() {
        let header = EnvelopeHeader {
            version: ENVELOPE_VERSION,
            flags: 0,
            timestamp: NOW,
            nonce: Nonce::generate(),
            payload_len: COMMAND.len() as u32,
        };
        for guess in ["", "secret", "01234567890~!@#$%^&*-_=+ABCab", OTHER_SECRET] {
            let forged = Envelope::seal(guess.as_bytes(), header, COMMAND.as_bytes().to_vec());
            assert_eq!(open(&forged.to_wire()), bad_mac(), "guess {:?}", guess);
        }
    }

    #[test]
    fn test_zeroed_and_truncated_tags() {
        let wire = EnvelopeCodec::new()
            .encode(SECRET.as_bytes(), COMMAND, NOW)
            .unwrap();
        let mut envelope = Envelope::from_wire(&wire).unwrap();

        envelope.mac = [0u8; TAG_LEN];
        assert_eq!(open(&envelope.to_wire()), bad_mac());

        // Dropping tag bytes shifts the frame, so the length check fails first.
        let mut frame = URL_SAFE_NO_PAD.decode(&wire).unwrap();
        frame.truncate(frame.len() - 16);
        let err = open(&URL_SAFE_NO_PAD.encode(frame)).unwrap_err();
        assert!(err.is_invalid());
    }

    // =============================================================================
    // ATTACK: CROSS-GROUP REPLAY
    // =============================================================================

    #[test]
    fn test_envelope_from_other_group_is_rejected() {
        let codec = EnvelopeCodec::new();
        let wire = codec.encode(OTHER_SECRET.as_bytes(), COMMAND, NOW).unwrap();
        assert_eq!(open(&wire), bad_mac());
    }

    // =============================================================================
    // ATTACK: LENGTH-FIELD TAMPERING
    // =============================================================================

    #[test]
    fn test_moving_bytes_between_payload_and_tag() {
        let wire = EnvelopeCodec::new()
            .encode(SECRET.as_bytes(), COMMAND, NOW)
            .unwrap();
        let mut envelope = Envelope::from_wire(&wire).unwrap();

        // Append a byte and bump the declared length: the frame parses, the tag does not verify.
        envelope.payload.push(b'!');
        envelope.header.payload_len += 1;
        assert_eq!(open(&envelope.to_wire()), bad_mac());
    }
}
