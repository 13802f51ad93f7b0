use classical_pke::ec::DEFAULT_CURVE;
use classical_pke::key_exchange::ecdh::{compute_shared, exchange, generate_keypair, public_key_for};
use num_bigint::BigUint;

#[test]
fn known_scalars_on_default_curve() {
    // priv_A=2, priv_B=3 on the default curve; both sides compute
    // 2*(3*G) == 3*(2*G).
    let curve = &*DEFAULT_CURVE;
    let priv_a = BigUint::from(2_usize);
    let priv_b = BigUint::from(3_usize);

    let pub_a = public_key_for(curve, &priv_a);
    let pub_b = public_key_for(curve, &priv_b);

    let shared_a = compute_shared(curve, &priv_a, &pub_b).unwrap();
    let shared_b = compute_shared(curve, &priv_b, &pub_a).unwrap();

    assert_eq!(shared_a, shared_b);
    assert_eq!(shared_a, curve.scalar_mul(&curve.scalar_mul(&curve.g, &priv_b), &priv_a));
}

#[test]
fn full_exchange_cross_checks_both_sides() {
    let curve = &*DEFAULT_CURVE;
    let alice = generate_keypair(curve).unwrap();
    let bob = generate_keypair(curve).unwrap();

    let shared = exchange(curve, &alice.private, &alice.public, &bob.private, &bob.public)
        .expect("freshly generated key pairs should exchange cleanly");

    assert_eq!(shared, compute_shared(curve, &bob.private, &alice.public).unwrap());
}

#[test]
fn commutativity_holds_for_arbitrary_scalars() {
    let curve = &*DEFAULT_CURVE;

    for (a, b) in [(5_usize, 7_usize), (11, 2), (100, 999)] {
        let priv_a = BigUint::from(a);
        let priv_b = BigUint::from(b);

        let pub_a = public_key_for(curve, &priv_a);
        let pub_b = public_key_for(curve, &priv_b);

        let shared = exchange(curve, &priv_a, &pub_a, &priv_b, &pub_b).unwrap();
        assert_eq!(shared, curve.scalar_mul(&pub_b, &priv_a));
        assert_eq!(shared, curve.scalar_mul(&pub_a, &priv_b));
    }
}
