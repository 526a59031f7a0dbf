// Numeric support for the MNT6-298 field-tower parameters.
//
// - uint320: fixed-width integers backed by crypto-bigint, at the widths
//   this tower needs (U320 residues up to U1792 sextic exponents)
// - modular: square-and-multiply exponentiation with mixed-width exponents
// - primes: Miller-Rabin primality testing
// - random: RNG wrappers over the `rand` crate

pub mod modular;
pub mod primes;
pub mod random;
pub mod uint320;

pub use modular::monty_pow;
pub use primes::is_prime;
pub use uint320::{from_dec_str, truncate, widen, U320Ext, U1792, U320, U640, U960};
