// Montgomery-representation constants for an odd modulus.
//
// R = 2^320: five 64-bit limbs or ten 32-bit limbs cover the same radix, so
// R^2 and R^3 are limb-width independent and derived once. Only `inv`
// depends on the limb width.

use mntrs_numeric::{truncate, widen, U320, U320Ext, U640};

/// Montgomery constants for one odd modulus.
///
/// `inv` is the 64-bit value; the 32-bit variant is `derive_inv(m, 32)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MontgomeryConstants {
    /// R^2 mod m, converts a value into Montgomery form.
    pub r_squared: U320,
    /// R^3 mod m, used by conversion-free batched inversion.
    pub r_cubed: U320,
    /// -(m^-1) mod 2^limb_bits, the reduction multiplier.
    pub inv: u64,
}

/// Derive the Montgomery constants for `modulus` at the given limb width.
///
/// Aborts on an even modulus: Montgomery reduction is undefined there, and
/// an even field modulus means the configuration is corrupt.
pub fn derive(modulus: &U320, limb_bits: u32) -> MontgomeryConstants {
    assert!(
        modulus.get_bit(0),
        "Montgomery form requires an odd modulus"
    );
    let r = montgomery_radix(modulus);
    let r_squared = mul_mod(&r, &r, modulus);
    let r_cubed = mul_mod(&r_squared, &r, modulus);
    MontgomeryConstants {
        r_squared,
        r_cubed,
        inv: derive_inv(modulus, limb_bits),
    }
}

/// -(modulus^-1) mod 2^limb_bits, for limb_bits 32 or 64.
///
/// Newton's iteration on the low limb: x <- x*(2 - m*x) doubles the number
/// of correct low bits per step, so six steps reach 64 bits from the seed
/// x = 1 (exact mod 2 for odd m).
pub fn derive_inv(modulus: &U320, limb_bits: u32) -> u64 {
    assert!(
        limb_bits == 32 || limb_bits == 64,
        "limb width must be 32 or 64"
    );
    let m0 = modulus.limbs()[0];
    assert!(m0 & 1 == 1, "Montgomery form requires an odd modulus");
    let mut inv = 1u64;
    let mut bits = 1u32;
    while bits < limb_bits {
        inv = inv.wrapping_mul(2u64.wrapping_sub(m0.wrapping_mul(inv)));
        bits <<= 1;
    }
    let neg = inv.wrapping_neg();
    if limb_bits == 32 {
        neg & 0xffff_ffff
    } else {
        neg
    }
}

/// 2^320 mod m, by repeated modular doubling of 1.
fn montgomery_radix(modulus: &U320) -> U320 {
    let m: U640 = widen(modulus);
    let mut acc: U640 = widen(&U320::ONE);
    for _ in 0..U320::BITS {
        acc = acc.wrapping_add(&acc);
        if acc >= m {
            acc = acc.wrapping_sub(&m);
        }
    }
    truncate(&acc)
}

/// (a * b) mod m via double-width multiplication and remainder.
fn mul_mod(a: &U320, b: &U320, m: &U320) -> U320 {
    let wa: U640 = widen(a);
    let wb: U640 = widen(b);
    let wm: U640 = widen(m);
    let (_, rem) = wa
        .wrapping_mul(&wb)
        .div_rem(&wm.to_nz().expect("modulus is nonzero"));
    truncate(&rem)
}
