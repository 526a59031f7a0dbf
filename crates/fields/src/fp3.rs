// Cubic extension parameters: Fq3 = Fq[V] / (V^3 - non_residue).
//
// Elements are coordinate triples (c0, c1, c2) of base-field values. The
// builder derives the 2-adic structure of |Fq3*| = q^3 - 1 and the two
// Frobenius coefficient tables, and carries a minimal Montgomery-form
// element type for the extension exponentiations the derivation needs.

use crypto_bigint::modular::{MontyForm, MontyParams};
use crypto_bigint::Uint;

use mntrs_numeric::{monty_pow, widen, U320, U960};

use crate::fp::{exact_div, two_adic_decomposition, Fp, FpParams, LIMBS};

/// Validated parameters of the cubic extension over the base field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fp3Params {
    /// Base-field element c with no cube root; V^3 = c.
    pub non_residue: U320,
    /// (q^3 - 1) / 2.
    pub euler: U960,
    /// 2-adicity: q^3 - 1 = 2^s * t with t odd.
    pub s: u32,
    pub t: U960,
    /// (t - 1) / 2.
    pub t_minus_1_over_2: U960,
    /// A quadratic non-residue of the extension, as coordinates.
    pub nqr: [U320; 3],
    /// nqr^t.
    pub nqr_to_t: [U320; 3],
    /// non_residue^(i * (q-1)/3): Frobenius scaling for the c1 coordinate.
    pub frobenius_coeffs_c1: [U320; 3],
    /// non_residue^(i * 2(q-1)/3): Frobenius scaling for the c2 coordinate.
    pub frobenius_coeffs_c2: [U320; 3],
}

impl Fp3Params {
    /// Build and validate the cubic-extension record over `fp`.
    ///
    /// `non_residue` must have no cube root in the base field, checked via
    /// c^((q-1)/3) != 1 (3 must divide q-1 for the tower to exist). `nqr`
    /// is the extension's quadratic non-residue from the curve definition.
    pub fn derive(fp: &FpParams, non_residue: u64, nqr: [u64; 3]) -> Self {
        let q = fp.modulus;
        let q_minus_1 = q.wrapping_sub(&U320::ONE);

        // Irreducibility of V^3 - non_residue
        let third = exact_div(&q_minus_1, 3, "cubic towers need 3 | q - 1");
        let nr = fp.elem_u64(non_residue);
        assert_ne!(
            monty_pow(&nr, &third).retrieve(),
            U320::ONE,
            "cubic non_residue has a cube root in the base field"
        );

        // |Fq3*| = q^3 - 1 = 2^s * t
        let wq: U960 = widen(&q);
        let group_order = wq
            .wrapping_mul(&wq)
            .wrapping_mul(&wq)
            .wrapping_sub(&U960::ONE);
        let euler = group_order.wrapping_shr_vartime(1);
        let (s, t) = two_adic_decomposition(&group_order);
        let t_minus_1_over_2 = t.wrapping_shr_vartime(1);

        // Frobenius tables; c2 uses its own exponent so the c2[i] == c1[i]^2
        // relation below cross-checks two derivation paths
        let mut frobenius_coeffs_c1 = [U320::ZERO; 3];
        let mut frobenius_coeffs_c2 = [U320::ZERO; 3];
        for i in 0..3u64 {
            let e1 = third.wrapping_mul(&U320::from_u64(i));
            let e2 = third.wrapping_mul(&U320::from_u64(2 * i));
            frobenius_coeffs_c1[i as usize] = monty_pow(&nr, &e1).retrieve();
            frobenius_coeffs_c2[i as usize] = monty_pow(&nr, &e2).retrieve();
        }

        let nqr_elem = Fp3Elem::new(
            fp.elem_u64(nqr[0]),
            fp.elem_u64(nqr[1]),
            fp.elem_u64(nqr[2]),
        );
        // Euler's criterion in the extension
        let minus_one = Fp3Elem::new(
            fp.elem(&q_minus_1),
            MontyForm::zero(fp.monty()),
            MontyForm::zero(fp.monty()),
        );
        assert_eq!(
            nqr_elem.pow(&euler, &nr).coords(),
            minus_one.coords(),
            "configured extension nqr is a quadratic residue"
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
            frobenius_coeffs_c2,
        };
        params.validate(fp);
        params
    }

    fn validate(&self, fp: &FpParams) {
        assert_eq!(
            self.frobenius_coeffs_c1[0],
            U320::ONE,
            "Frobenius c1[0] must be 1"
        );
        assert_eq!(
            self.frobenius_coeffs_c2[0],
            U320::ONE,
            "Frobenius c2[0] must be 1"
        );
        for i in 0..3 {
            let c1 = fp.elem(&self.frobenius_coeffs_c1[i]);
            assert_eq!(
                (c1 * c1).retrieve(),
                self.frobenius_coeffs_c2[i],
                "Frobenius c2[i] != c1[i]^2"
            );
        }

        // 2^s * t reconstructs q^3 - 1
        let wq: U960 = widen(&fp.modulus);
        let group_order = wq
            .wrapping_mul(&wq)
            .wrapping_mul(&wq)
            .wrapping_sub(&U960::ONE);
        assert!(self.t.bit_vartime(0), "t must be odd");
        assert_eq!(
            self.t.wrapping_shl_vartime(self.s),
            group_order,
            "2^s * t does not reconstruct q^3 - 1"
        );
        assert_eq!(
            self.euler.wrapping_add(&self.euler),
            group_order,
            "euler is not (q^3 - 1) / 2"
        );
        assert_eq!(
            self.t_minus_1_over_2
                .wrapping_add(&self.t_minus_1_over_2)
                .wrapping_add(&U960::ONE),
            self.t,
            "t_minus_1_over_2 is not (t - 1) / 2"
        );

        // The coefficient tables implement x -> x^q: applying the map once
        // must agree with a direct exponentiation, and three applications
        // must restore the element
        let nr = fp.elem(&self.non_residue);
        let sample = Fp3Elem::new(fp.elem_u64(2), fp.elem_u64(3), fp.elem_u64(5));
        let direct = sample.pow(&fp.modulus, &nr);
        let mapped = self.frobenius_map(fp, &sample, 1);
        assert_eq!(
            direct.coords(),
            mapped.coords(),
            "Frobenius tables disagree with x^q"
        );
        let mut roundtrip = sample;
        for _ in 0..3 {
            roundtrip = self.frobenius_map(fp, &roundtrip, 1);
        }
        assert_eq!(
            roundtrip.coords(),
            sample.coords(),
            "Frobenius map is not 3-periodic"
        );
    }

    /// Apply the `power`-th Frobenius endomorphism to an element.
    pub(crate) fn frobenius_map(&self, fp: &FpParams, x: &Fp3Elem, power: usize) -> Fp3Elem {
        let i = power % 3;
        Fp3Elem::new(
            x.c0,
            fp.elem(&self.frobenius_coeffs_c1[i]) * x.c1,
            fp.elem(&self.frobenius_coeffs_c2[i]) * x.c2,
        )
    }
}

/// Montgomery-form cubic-extension element. Derivation and validation use
/// only; the production arithmetic layer lives downstream of this crate.
#[derive(Clone, Copy)]
pub(crate) struct Fp3Elem {
    pub c0: Fp,
    pub c1: Fp,
    pub c2: Fp,
}

impl Fp3Elem {
    pub fn new(c0: Fp, c1: Fp, c2: Fp) -> Self {
        Self { c0, c1, c2 }
    }

    pub fn one(monty: MontyParams<LIMBS>) -> Self {
        Self::new(
            MontyForm::one(monty),
            MontyForm::zero(monty),
            MontyForm::zero(monty),
        )
    }

    pub fn zero(monty: MontyParams<LIMBS>) -> Self {
        Self::new(
            MontyForm::zero(monty),
            MontyForm::zero(monty),
            MontyForm::zero(monty),
        )
    }

    pub fn add(&self, rhs: &Self) -> Self {
        Self::new(self.c0 + rhs.c0, self.c1 + rhs.c1, self.c2 + rhs.c2)
    }

    pub fn sub(&self, rhs: &Self) -> Self {
        Self::new(self.c0 - rhs.c0, self.c1 - rhs.c1, self.c2 - rhs.c2)
    }

    /// Scale every coordinate by a base-field element.
    pub fn mul_by_fp(&self, a: &Fp) -> Self {
        Self::new(*a * self.c0, *a * self.c1, *a * self.c2)
    }

    /// Karatsuba multiplication with V^3 = nr folding (Devegili et al.).
    pub fn mul(&self, rhs: &Self, nr: &Fp) -> Self {
        let t0 = self.c0 * rhs.c0;
        let t1 = self.c1 * rhs.c1;
        let t2 = self.c2 * rhs.c2;

        let t3 = (self.c0 + self.c2) * (rhs.c0 + rhs.c2);
        let t4 = (self.c0 + self.c1) * (rhs.c0 + rhs.c1);
        let t5 = (self.c1 + self.c2) * (rhs.c1 + rhs.c2);

        Self::new(
            t0 + *nr * (t5 - (t1 + t2)),
            t4 - (t0 + t1) + *nr * t2,
            t3 + t1 - (t0 + t2),
        )
    }

    /// Squaring via CH-SQR2 (Devegili et al.).
    pub fn sqr(&self, nr: &Fp) -> Self {
        let s0 = self.c0 * self.c0;
        let mut s1 = self.c0 * self.c1;
        s1 = s1 + s1;
        let u = self.c0 + self.c2 - self.c1;
        let s2 = u * u;
        let mut s3 = self.c1 * self.c2;
        s3 = s3 + s3;
        let s4 = self.c2 * self.c2;
        Self::new(
            *nr * s3 + s0,
            *nr * s4 + s1,
            s1 + s2 + s3 - s0 - s4,
        )
    }

    pub fn pow<const E: usize>(&self, exp: &Uint<E>, nr: &Fp) -> Self {
        let mut acc = Self::one(*self.c0.params());
        for i in (0..exp.bits_vartime()).rev() {
            acc = acc.sqr(nr);
            if exp.bit_vartime(i) {
                acc = acc.mul(self, nr);
            }
        }
        acc
    }

    /// Standard-form coordinates.
    pub fn coords(&self) -> [U320; 3] {
        [self.c0.retrieve(), self.c1.retrieve(), self.c2.retrieve()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mntrs_numeric::from_dec_str;
    use mntrs_numeric::random::DebugRng;

    fn dec(s: &str) -> U320 {
        from_dec_str(s).unwrap()
    }

    fn base_field() -> FpParams {
        FpParams::derive(
            dec("475922286169261325753349249653048451545124878552823515553267735739164647307408490559963137"),
            10,
            5,
        )
    }

    fn tower(fp: &FpParams) -> Fp3Params {
        Fp3Params::derive(fp, 5, [5, 0, 0])
    }

    fn random_elem(fp: &FpParams, rng: &mut DebugRng) -> Fp3Elem {
        let reduce = |x: U320| {
            let (_, r) = x.div_rem(&fp.modulus.to_nz().unwrap());
            r
        };
        Fp3Elem::new(
            fp.elem(&reduce(rng.get_random_u320())),
            fp.elem(&reduce(rng.get_random_u320())),
            fp.elem(&reduce(rng.get_random_u320())),
        )
    }

    #[test]
    fn two_adicity_matches_known_values() {
        let fq = base_field();
        let fq3 = tower(&fq);
        assert_eq!(fq3.s, 34);
        assert_eq!(
            fq3.euler,
            from_dec_str::<15>(concat!(
                "538986801785549517153972451547960361394638915890014786291931363691249156377414236901849350561892952427368337042907472164100906718045409",
                "08400210778934462129625646263095398323485795557551284190224166851571615834194321908328559167529729507439069424158411618728014749106176",
            )).unwrap()
        );
        assert_eq!(
            fq3.t,
            from_dec_str::<15>(concat!(
                "6274632199033507112809136178669989590936327770934612330653836993631547740397674926811006741620285348354004521888069251599964996777072",
                "188956687550402067383940523288107407084140669968625447269322370045302856694231080113482726640944570478452261237446033817102203",
            )).unwrap()
        );
        assert_eq!(
            fq3.t_minus_1_over_2,
            from_dec_str::<15>(concat!(
                "3137316099516753556404568089334994795468163885467306165326918496815773870198837463405503370810142674177002260944034625799982498388536",
                "094478343775201033691970261644053703542070334984312723634661185022651428347115540056741363320472285239226130618723016908551101",
            )).unwrap()
        );
    }

    #[test]
    fn frobenius_tables_match_known_values() {
        let fq = base_field();
        let fq3 = tower(&fq);
        assert_eq!(fq3.frobenius_coeffs_c1[0], U320::ONE);
        assert_eq!(
            fq3.frobenius_coeffs_c1[1],
            dec("471738898967521029133040851318449165997304108729558973770077319830005517129946578866686956")
        );
        assert_eq!(
            fq3.frobenius_coeffs_c1[2],
            dec("4183387201740296620308398334599285547820769823264541783190415909159130177461911693276180")
        );
        assert_eq!(fq3.frobenius_coeffs_c2[0], U320::ONE);
        assert_eq!(
            fq3.frobenius_coeffs_c2[1],
            dec("4183387201740296620308398334599285547820769823264541783190415909159130177461911693276180")
        );
        assert_eq!(
            fq3.frobenius_coeffs_c2[2],
            dec("471738898967521029133040851318449165997304108729558973770077319830005517129946578866686956")
        );
    }

    #[test]
    fn nqr_to_t_matches_known_value() {
        let fq = base_field();
        let fq3 = tower(&fq);
        assert_eq!(
            fq3.nqr_to_t,
            [
                dec("154361449678783505076984156275977937654331103361174469632346230549735979552469642799720052"),
                U320::ZERO,
                U320::ZERO,
            ]
        );
    }

    #[test]
    fn frobenius_roundtrip_on_random_elements() {
        let fq = base_field();
        let fq3 = tower(&fq);
        let mut rng = DebugRng::new(7);
        for _ in 0..10 {
            let x = random_elem(&fq, &mut rng);
            let mut y = x;
            for _ in 0..3 {
                y = fq3.frobenius_map(&fq, &y, 1);
            }
            assert_eq!(y.coords(), x.coords());
        }
    }

    #[test]
    fn frobenius_agrees_with_direct_power() {
        let fq = base_field();
        let fq3 = tower(&fq);
        let nr = fq.elem(&fq3.non_residue);
        let mut rng = DebugRng::new(13);
        let x = random_elem(&fq, &mut rng);
        assert_eq!(
            fq3.frobenius_map(&fq, &x, 1).coords(),
            x.pow(&fq.modulus, &nr).coords()
        );
    }

    #[test]
    fn elem_mul_sqr_consistency() {
        let fq = base_field();
        let nr = fq.elem_u64(5);
        let mut rng = DebugRng::new(21);
        for _ in 0..10 {
            let a = random_elem(&fq, &mut rng);
            assert_eq!(a.mul(&a, &nr).coords(), a.sqr(&nr).coords());
        }
    }

    #[test]
    fn elem_add_mul_distributivity() {
        let fq = base_field();
        let nr = fq.elem_u64(5);
        let mut rng = DebugRng::new(22);
        for _ in 0..10 {
            let a = random_elem(&fq, &mut rng);
            let b = random_elem(&fq, &mut rng);
            let c = random_elem(&fq, &mut rng);
            let lhs = a.add(&b).mul(&c, &nr);
            let rhs = a.mul(&c, &nr).add(&b.mul(&c, &nr));
            assert_eq!(lhs.coords(), rhs.coords());
        }
    }

    #[test]
    #[should_panic(expected = "cube root")]
    fn cube_residue_is_rejected() {
        let fq = base_field();
        // 8 = 2^3 is a cube everywhere
        let _ = Fp3Params::derive(&fq, 8, [5, 0, 0]);
    }
}
