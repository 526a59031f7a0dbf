// Modular exponentiation over Montgomery-form values.
//
// `crypto-bigint`'s built-in `pow` pairs a value with a same-width exponent;
// the tower derivations raise 320-bit residues to 960- and 1792-bit
// exponents, so exponentiation is done here by square-and-multiply over an
// exponent of any width.

use crypto_bigint::modular::MontyForm;
use crypto_bigint::Uint;

/// `base^exp` where the exponent may be any `Uint` width.
///
/// Runs in variable time with respect to the exponent; the exponents in
/// this crate are public curve constants.
pub fn monty_pow<const L: usize, const E: usize>(
    base: &MontyForm<L>,
    exp: &Uint<E>,
) -> MontyForm<L> {
    let mut acc = MontyForm::one(*base.params());
    for i in (0..exp.bits_vartime()).rev() {
        acc = acc * acc;
        if exp.bit_vartime(i) {
            acc = acc * base;
        }
    }
    acc
}
