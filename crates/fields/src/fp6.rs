// Sextic extension parameters: Fq6 = Fq3[W] / (W^2 - V).
//
// A quadratic extension on top of the cubic tower, total degree 6 over the
// base field. Elements are pairs (c0, c1) of cubic-extension triples. The
// internal quadratic non-residue is V itself, so the sextic record shares
// `non_residue` with the cubic record by construction; the builder enforces
// that relation rather than trusting it.

use crypto_bigint::Uint;

use mntrs_numeric::{monty_pow, widen, U1792, U320};

use crate::fp::{exact_div, two_adic_decomposition, Fp, FpParams};
use crate::fp3::{Fp3Elem, Fp3Params};

/// Validated parameters of the sextic extension.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fp6Params {
    /// Shared with the cubic tower: W^2 = V and V^3 = non_residue.
    pub non_residue: U320,
    /// (q^6 - 1) / 2.
    pub euler: U1792,
    /// 2-adicity: q^6 - 1 = 2^s * t with t odd.
    pub s: u32,
    pub t: U1792,
    /// (t - 1) / 2.
    pub t_minus_1_over_2: U1792,
    /// A quadratic non-residue of the extension, as coordinate pairs.
    pub nqr: [[U320; 3]; 2],
    /// nqr^t.
    pub nqr_to_t: [[U320; 3]; 2],
    /// non_residue^(i * (q-1)/6): Frobenius scaling for the c1 component.
    pub frobenius_coeffs_c1: [U320; 6],
}

impl Fp6Params {
    /// Build and validate the sextic-extension record over `fp` and `fp3`.
    ///
    /// `non_residue` must equal the cubic tower's non-residue — the tower
    /// factors as (cubic) x (quadratic), so the sextic field inherits V's
    /// minimal polynomial rather than choosing its own.
    pub fn derive(
        fp: &FpParams,
        fp3: &Fp3Params,
        non_residue: u64,
        nqr: [[u64; 3]; 2],
    ) -> Self {
        let q = fp.modulus;
        let q_minus_1 = q.wrapping_sub(&U320::ONE);

        assert_eq!(
            U320::from_u64(non_residue),
            fp3.non_residue,
            "sextic tower must share the cubic non-residue"
        );
        let sixth = exact_div(&q_minus_1, 6, "sextic towers need 6 | q - 1");
        let nr = fp.elem_u64(non_residue);

        // |Fq6*| = q^6 - 1 = 2^s * t
        let wq: U1792 = widen(&q);
        let q_cubed = wq.wrapping_mul(&wq).wrapping_mul(&wq);
        let group_order = q_cubed.wrapping_mul(&q_cubed).wrapping_sub(&U1792::ONE);
        let euler = group_order.wrapping_shr_vartime(1);
        let (s, t) = two_adic_decomposition(&group_order);
        let t_minus_1_over_2 = t.wrapping_shr_vartime(1);

        let mut frobenius_coeffs_c1 = [U320::ZERO; 6];
        for i in 0..6u64 {
            let e = sixth.wrapping_mul(&U320::from_u64(i));
            frobenius_coeffs_c1[i as usize] = monty_pow(&nr, &e).retrieve();
        }

        let nqr_elem = Fp6Elem::new(
            Fp3Elem::new(
                fp.elem_u64(nqr[0][0]),
                fp.elem_u64(nqr[0][1]),
                fp.elem_u64(nqr[0][2]),
            ),
            Fp3Elem::new(
                fp.elem_u64(nqr[1][0]),
                fp.elem_u64(nqr[1][1]),
                fp.elem_u64(nqr[1][2]),
            ),
        );
        // Euler's criterion in the extension
        let minus_one = [[q_minus_1, U320::ZERO, U320::ZERO], [U320::ZERO; 3]];
        assert_eq!(
            nqr_elem.pow(&euler, &nr).coords(),
            minus_one,
            "configured sextic nqr is a quadratic residue"
        );

        let params = Self {
            non_residue: U320::from_u64(non_residue),
            euler,
            s,
            t,
            t_minus_1_over_2,
            nqr: nqr_elem.coords(),
            nqr_to_t: nqr_elem.pow(&t, &nr).coords(),
            frobenius_coeffs_c1,
        };
        params.validate(fp, fp3);
        params
    }

    fn validate(&self, fp: &FpParams, fp3: &Fp3Params) {
        assert_eq!(
            self.non_residue, fp3.non_residue,
            "sextic and cubic non-residues diverged"
        );
        assert_eq!(
            self.frobenius_coeffs_c1[0],
            U320::ONE,
            "Frobenius c1[0] must be 1"
        );

        // 2^s * t reconstructs q^6 - 1
        let wq: U1792 = widen(&fp.modulus);
        let q_cubed = wq.wrapping_mul(&wq).wrapping_mul(&wq);
        let group_order = q_cubed.wrapping_mul(&q_cubed).wrapping_sub(&U1792::ONE);
        assert!(self.t.bit_vartime(0), "t must be odd");
        assert_eq!(
            self.t.wrapping_shl_vartime(self.s),
            group_order,
            "2^s * t does not reconstruct q^6 - 1"
        );
        assert_eq!(
            self.euler.wrapping_add(&self.euler),
            group_order,
            "euler is not (q^6 - 1) / 2"
        );
        assert_eq!(
            self.t_minus_1_over_2
                .wrapping_add(&self.t_minus_1_over_2)
                .wrapping_add(&U1792::ONE),
            self.t,
            "t_minus_1_over_2 is not (t - 1) / 2"
        );

        // The coefficient table implements x -> x^q on the pair
        // representation: one application must agree with a direct
        // exponentiation, and six applications must restore the element
        let nr = fp.elem(&self.non_residue);
        let sample = Fp6Elem::new(
            Fp3Elem::new(fp.elem_u64(2), fp.elem_u64(3), fp.elem_u64(5)),
            Fp3Elem::new(fp.elem_u64(7), fp.elem_u64(11), fp.elem_u64(13)),
        );
        let direct = sample.pow(&fp.modulus, &nr);
        let mapped = self.frobenius_map(fp, fp3, &sample, 1);
        assert_eq!(
            direct.coords(),
            mapped.coords(),
            "Frobenius table disagrees with x^q"
        );
        let mut roundtrip = sample;
        for _ in 0..6 {
            roundtrip = self.frobenius_map(fp, fp3, &roundtrip, 1);
        }
        assert_eq!(
            roundtrip.coords(),
            sample.coords(),
            "Frobenius map is not 6-periodic"
        );
    }

    /// Apply the `power`-th Frobenius endomorphism to an element.
    pub(crate) fn frobenius_map(
        &self,
        fp: &FpParams,
        fp3: &Fp3Params,
        x: &Fp6Elem,
        power: usize,
    ) -> Fp6Elem {
        let i = power % 6;
        let coeff = fp.elem(&self.frobenius_coeffs_c1[i]);
        Fp6Elem::new(
            fp3.frobenius_map(fp, &x.c0, i),
            fp3.frobenius_map(fp, &x.c1, i).mul_by_fp(&coeff),
        )
    }
}

/// Montgomery-form sextic-extension element; derivation and validation use
/// only.
#[derive(Clone, Copy)]
pub(crate) struct Fp6Elem {
    pub c0: Fp3Elem,
    pub c1: Fp3Elem,
}

impl Fp6Elem {
    pub fn new(c0: Fp3Elem, c1: Fp3Elem) -> Self {
        Self { c0, c1 }
    }

    /// W^2 folded back into Fq3: (x0, x1, x2) -> (nr * x2, x0, x1).
    fn mul_by_v(x: &Fp3Elem, nr: &Fp) -> Fp3Elem {
        Fp3Elem::new(*nr * x.c2, x.c0, x.c1)
    }

    /// Karatsuba multiplication over the quadratic layer.
    pub fn mul(&self, rhs: &Self, nr: &Fp) -> Self {
        let t0 = self.c0.mul(&rhs.c0, nr);
        let t1 = self.c1.mul(&rhs.c1, nr);
        let cross = self
            .c0
            .add(&self.c1)
            .mul(&rhs.c0.add(&rhs.c1), nr);
        Self::new(
            t0.add(&Self::mul_by_v(&t1, nr)),
            cross.sub(&t0.add(&t1)),
        )
    }

    /// Complex squaring: (c0 + c1 W)^2 with W^2 = V.
    pub fn sqr(&self, nr: &Fp) -> Self {
        let t0 = self.c0.add(&self.c1);
        let t1 = Self::mul_by_v(&self.c1, nr).add(&self.c0);
        let t0 = t0.mul(&t1, nr);
        let t1 = self.c0.mul(&self.c1, nr);
        Self::new(
            t0.sub(&t1.add(&Self::mul_by_v(&t1, nr))),
            t1.add(&t1),
        )
    }

    pub fn pow<const E: usize>(&self, exp: &Uint<E>, nr: &Fp) -> Self {
        let monty = *self.c0.c0.params();
        let mut acc = Self::new(Fp3Elem::one(monty), Fp3Elem::zero(monty));
        for i in (0..exp.bits_vartime()).rev() {
            acc = acc.sqr(nr);
            if exp.bit_vartime(i) {
                acc = acc.mul(self, nr);
            }
        }
        acc
    }

    /// Standard-form coordinates.
    pub fn coords(&self) -> [[U320; 3]; 2] {
        [self.c0.coords(), self.c1.coords()]
    }
}
