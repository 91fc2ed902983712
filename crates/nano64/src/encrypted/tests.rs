use core::cell::Cell;
use std::collections::HashSet;

use proptest::prelude::*;

use super::*;
use crate::{
    Error, ErrorKind, FormatError, LockMonoNano64Generator, Nano64, RandError, RandSource,
    SystemClock, ThreadRandom, TimeSource,
};

const KEY_128: [u8; 16] = [0x11; 16];
const KEY_192: [u8; 24] = [0x22; 24];
const KEY_256: [u8; 32] = [0x33; 32];

struct MockTime {
    millis: u64,
}

impl TimeSource for MockTime {
    fn current_millis(&self) -> u64 {
        self.millis
    }
}

/// Emits `0, 1, 2, ...` across successive calls.
#[derive(Default)]
struct CounterRand {
    next: Cell<u8>,
}

impl RandSource for CounterRand {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), RandError> {
        for byte in dest {
            *byte = self.next.get();
            self.next.set(self.next.get().wrapping_add(1));
        }
        Ok(())
    }
}

struct FixedRand(u8);

impl RandSource for FixedRand {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), RandError> {
        dest.fill(self.0);
        Ok(())
    }
}

struct FailingRand;

impl RandSource for FailingRand {
    fn fill_bytes(&self, _dest: &mut [u8]) -> Result<(), RandError> {
        Err(RandError::new("entropy exhausted"))
    }
}

fn sample_id() -> Nano64 {
    Nano64::encode(1_700_000_000_000, 0xABCDE).unwrap()
}

#[test]
fn round_trips_for_every_key_size() {
    for key in [&KEY_128[..], &KEY_192[..], &KEY_256[..]] {
        let config = EncryptionConfig::new(key).unwrap();
        assert_eq!(config.key_bits(), key.len() * 8);

        for id in [Nano64::NIL, Nano64::MAX, sample_id()] {
            let encrypted = config.encrypt(id).unwrap();
            assert_eq!(encrypted.id(), id);
            assert_eq!(encrypted.payload().len(), ENCRYPTED_LEN);
            assert_eq!(config.decrypt(encrypted.payload()).unwrap(), id);
            assert_eq!(config.decrypt(&encrypted.to_bytes()).unwrap(), id);
            assert_eq!(config.decrypt_hex(&encrypted.to_hex()).unwrap(), id);
        }
    }
}

#[test]
fn hex_form_is_uppercase_and_fixed_width() {
    let config = EncryptionConfig::new(&KEY_256).unwrap();
    let encrypted = config.encrypt(sample_id()).unwrap();
    let hex = encrypted.to_hex();
    assert_eq!(hex.len(), ENCRYPTED_LEN * 2);
    assert!(hex.bytes().all(|b| b.is_ascii_digit() || (b'A'..=b'F').contains(&b)));
    assert_eq!(encrypted.to_string(), hex);
    assert_eq!(
        config.decrypt_hex(&hex.to_ascii_lowercase()).unwrap(),
        sample_id()
    );
}

#[test]
fn payload_starts_with_drawn_nonce() {
    let config =
        EncryptionConfig::with_sources(&KEY_128, MockTime { millis: 0 }, FixedRand(0x5A)).unwrap();
    let encrypted = config.encrypt(sample_id()).unwrap();
    assert_eq!(&encrypted.payload()[..NONCE_LEN], &[0x5A; NONCE_LEN]);
}

#[test]
fn same_nonce_gives_same_payload() {
    let a = EncryptionConfig::with_sources(&KEY_256, MockTime { millis: 0 }, FixedRand(1))
        .unwrap()
        .encrypt(sample_id())
        .unwrap();
    let b = EncryptionConfig::with_sources(&KEY_256, MockTime { millis: 0 }, FixedRand(1))
        .unwrap()
        .encrypt(sample_id())
        .unwrap();
    assert_eq!(a, b);
}

#[test]
fn fresh_nonce_per_encryption() {
    let config = EncryptionConfig::new(&KEY_256).unwrap();
    let id = sample_id();
    let payloads: HashSet<_> = (0..1000)
        .map(|_| config.encrypt(id).unwrap().to_bytes())
        .collect();
    assert_eq!(payloads.len(), 1000);

    let nonces: HashSet<_> = payloads.iter().map(|p| p[..NONCE_LEN].to_vec()).collect();
    assert_eq!(nonces.len(), 1000);
}

#[test]
fn counter_nonces_differ_between_calls() {
    let config =
        EncryptionConfig::with_sources(&KEY_192, MockTime { millis: 0 }, CounterRand::default())
            .unwrap();
    let a = config.encrypt(sample_id()).unwrap();
    let b = config.encrypt(sample_id()).unwrap();
    assert_ne!(a.payload(), b.payload());
    assert_eq!(config.decrypt(a.payload()).unwrap(), sample_id());
    assert_eq!(config.decrypt(b.payload()).unwrap(), sample_id());
}

#[test]
fn wrong_key_fails_authentication() {
    let encrypted = EncryptionConfig::new(&KEY_256)
        .unwrap()
        .encrypt(sample_id())
        .unwrap();
    let other = EncryptionConfig::new(&[0x34; 32]).unwrap();
    assert!(matches!(
        other.decrypt(encrypted.payload()),
        Err(Error::Authentication)
    ));
    let shorter = EncryptionConfig::new(&KEY_128).unwrap();
    assert!(matches!(
        shorter.decrypt(encrypted.payload()),
        Err(Error::Authentication)
    ));
}

#[test]
fn every_bit_flip_is_detected() {
    let config = EncryptionConfig::new(&KEY_128).unwrap();
    let payload = config.encrypt(sample_id()).unwrap().to_bytes();
    for byte in 0..ENCRYPTED_LEN {
        for bit in 0..8 {
            let mut tampered = payload;
            tampered[byte] ^= 1 << bit;
            let err = config.decrypt(&tampered).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Authentication, "byte {byte} bit {bit}");
        }
    }
}

#[test]
fn short_input_is_a_length_error() {
    let config = EncryptionConfig::new(&KEY_256).unwrap();
    for len in [0, 1, NONCE_LEN, MIN_PAYLOAD_LEN - 1] {
        let err = config.decrypt(&vec![0u8; len]).unwrap_err();
        assert!(matches!(
            err,
            Error::Length { expected: ENCRYPTED_LEN, actual } if actual == len
        ));
    }
}

#[test]
fn truncated_or_extended_payload_fails_authentication() {
    let config = EncryptionConfig::new(&KEY_256).unwrap();
    let payload = config.encrypt(sample_id()).unwrap().to_bytes();

    for len in MIN_PAYLOAD_LEN..ENCRYPTED_LEN {
        let err = config.decrypt(&payload[..len]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authentication, "len {len}");
    }

    let mut extended = payload.to_vec();
    extended.push(0);
    assert_eq!(
        config.decrypt(&extended).unwrap_err().kind(),
        ErrorKind::Authentication
    );
}

#[test]
fn bad_key_sizes_are_rejected() {
    for len in [0, 1, 8, 15, 17, 23, 25, 31, 33, 64] {
        let err = EncryptionConfig::new(&vec![0u8; len]).unwrap_err();
        assert!(matches!(err, Error::KeySize { len: l } if l == len));
    }
}

#[test]
fn malformed_hex_is_a_format_error() {
    let config = EncryptionConfig::new(&KEY_256).unwrap();
    let hex = config.encrypt(sample_id()).unwrap().to_hex();

    let mut bad = hex.clone();
    bad.replace_range(4..5, "G");
    assert!(matches!(
        config.decrypt_hex(&bad),
        Err(Error::Format(FormatError::InvalidCharacter { character: 'G', index: 4 }))
    ));

    let mut accented = hex.clone();
    // two ASCII digits swapped for one two-byte character keeps the length even
    accented.replace_range(6..8, "é");
    assert!(matches!(
        config.decrypt_hex(&accented),
        Err(Error::Format(FormatError::InvalidCharacter { character: 'é', index: 6 }))
    ));

    let odd = &hex[..hex.len() - 1];
    assert!(matches!(
        config.decrypt_hex(odd),
        Err(Error::Format(FormatError::InvalidLength { .. }))
    ));

    // Well-formed hex of the wrong size reaches the decrypt checks.
    assert_eq!(
        config.decrypt_hex(&hex[..20]).unwrap_err().kind(),
        ErrorKind::Length
    );
}

#[test]
fn failing_nonce_source_is_propagated() {
    let config =
        EncryptionConfig::with_sources(&KEY_256, MockTime { millis: 0 }, FailingRand).unwrap();
    let err = config.encrypt(sample_id()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Random);
    assert_eq!(
        config.generate_encrypted(42).unwrap_err().kind(),
        ErrorKind::Random
    );
}

#[test]
fn generate_encrypted_uses_timestamp() {
    let config = EncryptionConfig::new(&KEY_256).unwrap();
    let encrypted = config.generate_encrypted(1_234_567).unwrap();
    assert_eq!(encrypted.id().timestamp(), 1_234_567);
    assert_eq!(config.decrypt(encrypted.payload()).unwrap(), encrypted.id());

    let err = config.generate_encrypted(1 << 44).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Range);
}

#[test]
fn generate_encrypted_now_uses_config_clock() {
    let config =
        EncryptionConfig::with_sources(&KEY_128, MockTime { millis: 99 }, ThreadRandom).unwrap();
    let encrypted = config.generate_encrypted_now().unwrap();
    assert_eq!(encrypted.id().timestamp(), 99);
    assert_eq!(config.decrypt(encrypted.payload()).unwrap(), encrypted.id());
}

#[test]
fn generate_encrypted_with_monotonic_generator() {
    let config = EncryptionConfig::new(&KEY_256).unwrap();
    let generator = LockMonoNano64Generator::new(MockTime { millis: 42 }, ThreadRandom);

    let mut prev = None;
    for _ in 0..100 {
        let encrypted = config.generate_encrypted_with(&generator).unwrap();
        let id = config.decrypt(encrypted.payload()).unwrap();
        assert_eq!(id, encrypted.id());
        if let Some(prev) = prev {
            assert!(id > prev);
        }
        prev = Some(id);
    }
}

#[test]
fn debug_hides_key_material() {
    let config = EncryptionConfig::new(&KEY_256).unwrap();
    let debug = format!("{config:?}");
    assert!(debug.contains("Aes256Gcm"));
    assert!(!debug.contains("51"));
    assert!(!debug.contains("0x33"));
}

#[test]
fn config_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<EncryptionConfig<SystemClock, ThreadRandom>>();
    assert_send_sync::<EncryptedNano64>();
}

fn any_key() -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![
        prop::collection::vec(any::<u8>(), 16),
        prop::collection::vec(any::<u8>(), 24),
        prop::collection::vec(any::<u8>(), 32),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn any_id_round_trips_under_any_key(key in any_key(), raw in any::<u64>()) {
        let config = EncryptionConfig::new(&key).unwrap();
        let id = Nano64::from_raw(raw);
        let encrypted = config.encrypt(id).unwrap();
        prop_assert_eq!(encrypted.payload().len(), ENCRYPTED_LEN);
        prop_assert_eq!(config.decrypt(encrypted.payload()).unwrap(), id);
        prop_assert_eq!(config.decrypt_hex(&encrypted.to_hex()).unwrap(), id);
    }

    #[test]
    fn other_keys_fail_authentication(
        key in any_key(),
        other in any_key(),
        raw in any::<u64>(),
    ) {
        prop_assume!(key != other);
        let encrypted = EncryptionConfig::new(&key).unwrap().encrypt(Nano64::from_raw(raw)).unwrap();
        let err = EncryptionConfig::new(&other).unwrap().decrypt(encrypted.payload()).unwrap_err();
        prop_assert!(matches!(err, Error::Authentication));
    }
}
