// Prime-field parameter records.
//
// One record per prime field in the tower (scalar field Fr, base field Fq):
// the modulus, its Montgomery constants, the 2-adic structure of the
// multiplicative group, and the square-root algorithm inputs. Everything
// except the configured generator and non-residue is derived from the
// modulus, then re-validated before the record escapes the builder.

use crypto_bigint::modular::{MontyForm, MontyParams};
use crypto_bigint::{Odd, Uint, Zero};

use mntrs_numeric::{is_prime, monty_pow, U320, U320Ext};

use crate::montgomery;

/// Number of 64-bit limbs in a field residue.
pub const LIMBS: usize = 5;

/// A prime-field element in runtime Montgomery form. Used by the builders
/// for derivation-time exponentiation; not a production arithmetic type.
pub(crate) type Fp = MontyForm<LIMBS>;

/// Validated parameters of one prime field.
///
/// All residue-valued members are stored in standard (non-Montgomery) form.
#[derive(Clone, Debug)]
pub struct FpParams {
    pub modulus: U320,
    /// R^2 mod modulus, R = 2^320.
    pub r_squared: U320,
    /// R^3 mod modulus.
    pub r_cubed: U320,
    /// -(modulus^-1) mod 2^64.
    pub inv: u64,
    /// Bit length of the modulus.
    pub num_bits: u32,
    /// (modulus - 1) / 2, the Euler-criterion exponent.
    pub euler: U320,
    /// 2-adicity: modulus - 1 = 2^s * t with t odd.
    pub s: u32,
    pub t: U320,
    /// (t - 1) / 2, precomputed for Tonelli-Shanks.
    pub t_minus_1_over_2: U320,
    /// Generator of the full multiplicative group.
    pub multiplicative_generator: U320,
    /// generator^t, a primitive 2^s-th root of unity.
    pub root_of_unity: U320,
    /// A quadratic non-residue (may coincide with the generator).
    pub nqr: U320,
    /// nqr^t, the initial non-residue power for square-root extraction.
    pub nqr_to_t: U320,
    monty: MontyParams<LIMBS>,
}

impl PartialEq for FpParams {
    fn eq(&self, other: &Self) -> bool {
        self.modulus == other.modulus
            && self.r_squared == other.r_squared
            && self.r_cubed == other.r_cubed
            && self.inv == other.inv
            && self.num_bits == other.num_bits
            && self.euler == other.euler
            && self.s == other.s
            && self.t == other.t
            && self.t_minus_1_over_2 == other.t_minus_1_over_2
            && self.multiplicative_generator == other.multiplicative_generator
            && self.root_of_unity == other.root_of_unity
            && self.nqr == other.nqr
            && self.nqr_to_t == other.nqr_to_t
    }
}

impl Eq for FpParams {}

impl FpParams {
    /// Build and validate the parameter record for `modulus`.
    ///
    /// `multiplicative_generator` and `nqr` come from the curve definition;
    /// both are checked against Euler's criterion (`x^((m-1)/2) == -1`),
    /// which for the generator is the sufficient full-order check this
    /// design uses. Any violation aborts: a field with broken parameters
    /// must never be observable.
    pub fn derive(modulus: U320, multiplicative_generator: u64, nqr: u64) -> Self {
        assert!(modulus.get_bit(0), "field modulus must be odd");
        assert!(is_prime(&modulus), "field modulus must be prime");

        let mont = montgomery::derive(&modulus, 64);
        let num_bits = modulus.get_msb() + 1;

        let modulus_minus_1 = modulus.wrapping_sub(&U320::ONE);
        let euler = modulus_minus_1.wrapping_shr_vartime(1);
        let (s, t) = two_adic_decomposition(&modulus_minus_1);
        let t_minus_1_over_2 = t.wrapping_shr_vartime(1);

        let monty =
            MontyParams::new_vartime(Option::from(Odd::new(modulus)).expect("modulus is odd"));
        let generator = MontyForm::new(&U320::from_u64(multiplicative_generator), monty);
        let nqr_elem = MontyForm::new(&U320::from_u64(nqr), monty);

        assert_eq!(
            monty_pow(&generator, &euler).retrieve(),
            modulus_minus_1,
            "multiplicative generator fails g^((m-1)/2) == -1"
        );
        assert_eq!(
            monty_pow(&nqr_elem, &euler).retrieve(),
            modulus_minus_1,
            "configured nqr is a quadratic residue"
        );

        let params = Self {
            modulus,
            r_squared: mont.r_squared,
            r_cubed: mont.r_cubed,
            inv: mont.inv,
            num_bits,
            euler,
            s,
            t,
            t_minus_1_over_2,
            multiplicative_generator: U320::from_u64(multiplicative_generator),
            root_of_unity: monty_pow(&generator, &t).retrieve(),
            nqr: U320::from_u64(nqr),
            nqr_to_t: monty_pow(&nqr_elem, &t).retrieve(),
            monty,
        };
        params.validate();
        params
    }

    /// Lift a standard-form residue into Montgomery form.
    pub(crate) fn elem(&self, value: &U320) -> Fp {
        MontyForm::new(value, self.monty)
    }

    pub(crate) fn elem_u64(&self, value: u64) -> Fp {
        self.elem(&U320::from_u64(value))
    }

    pub(crate) fn monty(&self) -> MontyParams<LIMBS> {
        self.monty
    }

    /// Re-checks every coupling invariant of the record. Violations mean
    /// the derivation itself is corrupt and abort the process.
    fn validate(&self) {
        let modulus_minus_1 = self.modulus.wrapping_sub(&U320::ONE);

        assert!(self.t.get_bit(0), "t must be odd");
        assert_eq!(
            self.t.wrapping_shl_vartime(self.s),
            modulus_minus_1,
            "2^s * t does not reconstruct modulus - 1"
        );
        assert_eq!(
            self.euler.wrapping_add(&self.euler),
            modulus_minus_1,
            "euler is not (modulus - 1) / 2"
        );
        assert_eq!(
            self.t_minus_1_over_2
                .wrapping_add(&self.t_minus_1_over_2)
                .wrapping_add(&U320::ONE),
            self.t,
            "t_minus_1_over_2 is not (t - 1) / 2"
        );

        // Montgomery constants against the independent exponentiation path:
        // R^2 = 2^640 mod m, R^3 = 2^960 mod m
        let two = self.elem_u64(2);
        assert_eq!(
            monty_pow(&two, &U320::from_u64(640)).retrieve(),
            self.r_squared,
            "R^2 disagrees with 2^640 mod m"
        );
        assert_eq!(
            monty_pow(&two, &U320::from_u64(960)).retrieve(),
            self.r_cubed,
            "R^3 disagrees with 2^960 mod m"
        );
        assert_eq!(
            self.inv.wrapping_mul(self.modulus.limbs()[0]),
            u64::MAX,
            "inv * modulus != -1 mod 2^64"
        );

        // root_of_unity must have exact order 2^s
        let mut x = self.elem(&self.root_of_unity);
        for _ in 0..self.s - 1 {
            x = x * x;
        }
        assert_ne!(
            x.retrieve(),
            U320::ONE,
            "root_of_unity order divides 2^(s-1)"
        );
        assert_eq!(
            (x * x).retrieve(),
            U320::ONE,
            "root_of_unity^(2^s) != 1"
        );
    }
}

/// (n / divisor), asserting the division is exact.
pub(crate) fn exact_div(n: &U320, divisor: u64, msg: &str) -> U320 {
    let d = U320::from_u64(divisor);
    let (quot, rem) = n.div_rem(&d.to_nz().expect("divisor is nonzero"));
    assert!(bool::from(rem.is_zero()), "{}", msg);
    quot
}

/// n = 2^s * t with t odd.
pub(crate) fn two_adic_decomposition<const L: usize>(n: &Uint<L>) -> (u32, Uint<L>) {
    assert!(!bool::from(n.is_zero()), "cannot decompose zero");
    let mut s = 0u32;
    let mut t = *n;
    while !t.bit_vartime(0) {
        t = t.wrapping_shr_vartime(1);
        s += 1;
    }
    (s, t)
}
