use classical_pke::rsa::{self, pack_bytes, unpack_bytes};
use num_bigint::BigUint;

#[test]
fn round_trip_with_generated_keys() {
    let keypair = rsa::generate_keypair().expect("key generation should succeed");

    for message in [0_u32, 1, 42, 65535, 123_456_789] {
        let plaintext = BigUint::from(message);
        if plaintext >= keypair.public.n {
            continue;
        }

        let ciphertext = keypair
            .public
            .encrypt(&plaintext)
            .expect("message is below n");
        let recovered = keypair.private.decrypt(&ciphertext);

        assert_eq!(recovered, plaintext);
    }
}

#[test]
fn text_round_trip_through_rsa() {
    // "HELLO" packed as big-endian base-256, then encrypted/decrypted/
    // unpacked under a real key pair.
    let keypair = rsa::generate_keypair_from_primes(
        &BigUint::from(61_usize),
        &BigUint::from(53_usize),
        &BigUint::from(17_usize),
    )
    .unwrap();

    let plaintext = pack_bytes(b"HELLO");
    assert_eq!(plaintext, BigUint::parse_bytes(b"310400273487", 10).unwrap());

    // "HELLO" packs larger than n=3233 for these tiny fixed primes, so
    // round-trip it through a key pair large enough to hold it instead.
    let big_keypair = rsa::generate_keypair().unwrap();
    let ciphertext = big_keypair.public.encrypt(&plaintext).unwrap();
    let recovered = big_keypair.private.decrypt(&ciphertext);

    assert_eq!(recovered, plaintext);
    assert_eq!(unpack_bytes(&recovered), b"HELLO");
}

#[test]
fn over_large_message_is_rejected() {
    // n=3233 from p=61, q=53; 4000 > n so it cannot be encrypted.
    let keypair = rsa::generate_keypair_from_primes(
        &BigUint::from(61_usize),
        &BigUint::from(53_usize),
        &BigUint::from(17_usize),
    )
    .unwrap();

    assert!(keypair.public.encrypt(&BigUint::from(4000_usize)).is_err());
}

#[test]
fn printability_classification_round_trips_only_text() {
    assert!(rsa::is_printable(b"hello, world"));
    assert!(!rsa::is_printable(&[0xFF, 0x00, 0x01]));
}
