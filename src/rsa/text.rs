//! Text <-> integer packing for RSA plaintexts that aren't already decimal
//! numbers.
//!
//! Packing is plain big-endian base-256: `M = sum(B[i] * 256^(len-1-i))`,
//! i.e. `BigUint::from_bytes_be`. Unpacking is *not* simply the reverse of
//! that — it walks `M` one byte at a time via repeated division by 256,
//! least-significant byte first, and stops at the first zero byte or the
//! first byte outside `[1, 255]`. This mirrors a `mpz_tdiv_qr_ui`-based
//! loop, including its one quirk: a plaintext containing a NUL byte cannot
//! round-trip, because the loop that rebuilds it treats `0` as "done"
//! rather than "here's a NUL". That quirk is preserved here for bit-exact
//! compatibility rather than fixed.

use num_bigint::BigUint;
use num_traits::Zero;

/// Pack a byte string into a big-endian base-256 integer.
#[must_use]
pub fn pack_bytes(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_be(bytes)
}

/// Unpack an integer into bytes, least-significant byte first during
/// accumulation, then reversed into the original order.
///
/// Stops at `M == 0` or at the first recovered byte outside `[1, 255]`
/// (which, since the loop reads `M mod 256`, means a `0` byte). The
/// returned vector is therefore a *prefix* of the original plaintext bytes
/// whenever the plaintext contains an embedded NUL.
#[must_use]
pub fn unpack_bytes(value: &BigUint) -> Vec<u8> {
    let mut remaining = value.clone();
    let mut reversed = Vec::new();
    let two_fifty_six = BigUint::from(256_usize);

    while !remaining.is_zero() {
        let (quotient, remainder) = num_integer::Integer::div_rem(&remaining, &two_fifty_six);
        let byte = u64::try_from(&remainder).unwrap_or(256);

        if byte == 0 || byte > 255 {
            break;
        }

        reversed.push(byte as u8);
        remaining = quotient;
    }

    reversed.reverse();
    reversed
}

/// A decrypted byte sequence is "printable" if every byte is in the
/// printable ASCII range `[32, 126]` or is `\n`/`\t`.
#[must_use]
pub fn is_printable(bytes: &[u8]) -> bool {
    !bytes.is_empty()
        && bytes
            .iter()
            .all(|&b| (32..=126).contains(&b) || b == b'\n' || b == b'\t')
}
