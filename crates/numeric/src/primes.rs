// Miller-Rabin primality testing over U320.
//
// The field moduli are fixed curve constants, so this gate exists to catch
// corrupted configuration rather than to certify fresh primes: trial
// division by a small-prime table, then Miller-Rabin with the same table as
// witness bases.

use crypto_bigint::modular::{MontyForm, MontyParams};
use crypto_bigint::{Odd, Zero};

use crate::modular::monty_pow;
use crate::uint320::{U320, U320Ext};

/// Small primes used for trial division and as Miller-Rabin witnesses.
const SMALL_PRIMES: [u64; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

/// Miller-Rabin primality test with fixed witness bases.
pub fn is_prime(n: &U320) -> bool {
    if *n < U320::from_u64(2) {
        return false;
    }
    for &p in SMALL_PRIMES.iter() {
        let p320 = U320::from_u64(p);
        if *n == p320 {
            return true;
        }
        let (_, rem) = n.div_rem(&p320.to_nz().expect("small primes are nonzero"));
        if bool::from(rem.is_zero()) {
            return false;
        }
    }

    // n is odd and coprime to the table from here on.
    // Write n - 1 = 2^r * d with d odd.
    let n_minus_1 = n.wrapping_sub(&U320::ONE);
    let mut d = n_minus_1;
    let mut r = 0u32;
    while !d.get_bit(0) {
        d = d.wrapping_shr_vartime(1);
        r += 1;
    }

    let monty = MontyParams::new_vartime(Option::from(Odd::new(*n)).expect("n is odd here"));
    'witness: for &a in SMALL_PRIMES.iter() {
        let mut x = monty_pow(&MontyForm::new(&U320::from_u64(a), monty), &d);
        if x.retrieve() == U320::ONE || x.retrieve() == n_minus_1 {
            continue;
        }
        for _ in 0..r - 1 {
            x = x * x;
            if x.retrieve() == n_minus_1 {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uint320::from_dec_str;

    #[test]
    fn small_primes_are_prime() {
        for n in [2u64, 3, 5, 7, 11, 13, 97, 65_537] {
            assert!(is_prime(&U320::from_u64(n)), "{n} should be prime");
        }
    }

    #[test]
    fn small_composites_are_not() {
        for n in [0u64, 1, 4, 9, 15, 91, 561, 65_536] {
            assert!(!is_prime(&U320::from_u64(n)), "{n} should be composite");
        }
    }

    #[test]
    fn carmichael_numbers_are_rejected() {
        // Fermat pseudoprimes to many bases; Miller-Rabin must still reject
        for n in [561u64, 1105, 1729, 41_041, 825_265] {
            assert!(!is_prime(&U320::from_u64(n)), "{n} should be composite");
        }
    }

    #[test]
    fn curve25519_prime_is_prime() {
        // 2^255 - 19
        let p = from_dec_str::<5>(
            "57896044618658097711785492504343953926634992332820282019728792003956564819949",
        )
        .unwrap();
        assert!(is_prime(&p));
    }

    #[test]
    fn mnt6_moduli_are_prime() {
        let r = from_dec_str::<5>(
            "475922286169261325753349249653048451545124879242694725395555128576210262817955800483758081",
        )
        .unwrap();
        let q = from_dec_str::<5>(
            "475922286169261325753349249653048451545124878552823515553267735739164647307408490559963137",
        )
        .unwrap();
        assert!(is_prime(&r));
        assert!(is_prime(&q));
    }

    #[test]
    fn modulus_minus_one_is_composite() {
        let q = from_dec_str::<5>(
            "475922286169261325753349249653048451545124878552823515553267735739164647307408490559963137",
        )
        .unwrap();
        assert!(!is_prime(&q.wrapping_sub(&U320::ONE)));
    }
}
