//! Textbook RSA and elliptic-curve Diffie-Hellman, implemented over
//! arbitrary-precision integers.
//!
//! This is **not** a production cryptosystem. There is no padding, no
//! side-channel resistance, and no key serialization format. It exists to
//! show the mathematics a newcomer cannot safely skip: modular inverse,
//! primality testing, Tonelli-Shanks, and affine elliptic-curve arithmetic.
//!
//! The five binaries (`rsa`, `rsa_keygen`, `rsa_encrypt`, `rsa_decrypt`,
//! `ecdh`) are thin argument-parsing shells over the modules here; the
//! interesting code lives in [`rsa`], [`ec`], and [`key_exchange`].

#![deny(clippy::correctness)]
#![warn(clippy::style)]
#![warn(clippy::complexity)]
#![warn(clippy::perf)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)] // Anti-pattern IMHO
#![allow(clippy::unreadable_literal)]
#![allow(clippy::many_single_char_names)] // a, b, m, p, q, e, d are the domain's names

pub mod cli;
pub mod ec;
pub mod key_exchange;
pub mod numeric;
pub mod rsa;
