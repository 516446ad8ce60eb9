/// Property-based tests for the token codec using proptest
///
/// These tests verify the codec's round-trip and rejection guarantees
/// across arbitrary user ids and secrets, not just hand-picked samples.
use game_lobby::auth::TokenCodec;
use proptest::prelude::*;

// Strategy for plausible operator-configured secrets
fn secret_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 16..64)
}

proptest! {
    #[test]
    fn test_round_trip_any_id(id in any::<i64>(), secret in secret_strategy()) {
        let codec = TokenCodec::new(&secret);
        let token = codec.encode(&id.to_string()).expect("encode should succeed");
        let payload = codec.decode(&token).expect("decode should succeed");
        prop_assert_eq!(payload.parse::<i64>().unwrap(), id);
    }

    #[test]
    fn test_cross_secret_rejection(
        id in any::<i64>(),
        s1 in secret_strategy(),
        s2 in secret_strategy(),
    ) {
        prop_assume!(s1 != s2);
        let token = TokenCodec::new(&s1).encode(&id.to_string()).unwrap();
        prop_assert!(TokenCodec::new(&s2).decode(&token).is_err());
    }

    #[test]
    fn test_single_byte_tamper_rejection(id in any::<i64>(), pos in any::<prop::sample::Index>()) {
        let codec = TokenCodec::new(b"tamper_property_test_secret");
        let token = codec.encode(&id.to_string()).unwrap();

        let i = pos.index(token.len());
        let original = token.as_bytes()[i];
        let replacement = if original == b'A' { b'B' } else { b'A' };
        let mut tampered = token.into_bytes();
        tampered[i] = replacement;

        prop_assert!(codec.decode(&String::from_utf8(tampered).unwrap()).is_err());
    }
}
