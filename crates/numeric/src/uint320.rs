// Fixed-width unsigned integer types for the MNT6-298 tower.
//
// Backed by `crypto_bigint::Uint`. The 298-bit moduli occupy 5 x u64 limbs
// (little-endian limb order), so field residues live in U320. The wider
// widths carry the multiplicative-group exponents of the extension fields:
// q^3 - 1 is 894 bits (U960), q^6 - 1 is 1788 bits (U1792).

use crypto_bigint::Uint;

/// 320-bit unsigned integer: field residues and prime-field exponents.
pub type U320 = Uint<5>;

/// 640-bit unsigned integer: double-width reduction products.
pub type U640 = Uint<10>;

/// 960-bit unsigned integer: cubic-extension group-order exponents.
pub type U960 = Uint<15>;

/// 1792-bit unsigned integer: sextic-extension group-order exponents.
pub type U1792 = Uint<28>;

/// Convenience methods for U320 that `crypto-bigint` does not provide
/// directly.
pub trait U320Ext {
    /// Position of the most significant set bit (0-indexed).
    /// Returns 0 for zero input.
    fn get_msb(&self) -> u32;

    /// Extract a single bit at the given index.
    fn get_bit(&self, index: u32) -> bool;

    /// Construct from 5 x u64 limbs in little-endian limb order.
    fn from_limbs(limbs: [u64; 5]) -> Self;

    /// Access the raw u64 limbs in little-endian limb order.
    fn limbs(&self) -> [u64; 5];
}

impl U320Ext for U320 {
    fn get_msb(&self) -> u32 {
        let bits = self.bits_vartime();
        if bits == 0 { 0 } else { bits - 1 }
    }

    fn get_bit(&self, index: u32) -> bool {
        self.bit_vartime(index)
    }

    fn from_limbs(limbs: [u64; 5]) -> Self {
        U320::from_words(limbs)
    }

    fn limbs(&self) -> [u64; 5] {
        *self.as_words()
    }
}

/// Parse a base-10 string into a `Uint` of any width.
///
/// Returns `None` on an empty string, a non-digit character, or a value
/// that does not fit the target width.
pub fn from_dec_str<const L: usize>(s: &str) -> Option<Uint<L>> {
    if s.is_empty() {
        return None;
    }
    let ten = Uint::from_u64(10);
    // Largest value that can still be multiplied by 10 without wrapping
    let mul_limit = Uint::<L>::MAX
        .div_rem(&ten.to_nz().expect("ten is nonzero"))
        .0;
    let mut acc = Uint::ZERO;
    for c in s.chars() {
        let d = c.to_digit(10)? as u64;
        if acc > mul_limit {
            return None;
        }
        acc = acc.wrapping_mul(&ten);
        let next = acc.wrapping_add(&Uint::from_u64(d));
        if next < acc {
            return None;
        }
        acc = next;
    }
    Some(acc)
}

/// Zero-extend a `Uint` into a wider width.
pub fn widen<const F: usize, const T: usize>(x: &Uint<F>) -> Uint<T> {
    assert!(T >= F, "widen target must not be narrower than the source");
    let mut words = [0u64; T];
    words[..F].copy_from_slice(x.as_words());
    Uint::from_words(words)
}

/// Drop the high limbs of a `Uint`. The dropped limbs must be zero.
pub fn truncate<const F: usize, const T: usize>(x: &Uint<F>) -> Uint<T> {
    assert!(T <= F, "truncate target must not be wider than the source");
    assert!(
        x.as_words()[T..].iter().all(|&w| w == 0),
        "truncate would discard non-zero limbs"
    );
    let mut words = [0u64; T];
    words.copy_from_slice(&x.as_words()[..T]);
    Uint::from_words(words)
}
