// The MNT6-298 instance.
//
// Pins the curve-definition constants (moduli, generators, non-residues)
// and sequences the one-time construction of the tower: scalar field, base
// field, cubic extension, sextic extension, in that dependency order. The
// derived records are published process-wide through a OnceLock and are
// immutable for the life of the process.

use std::sync::OnceLock;

use mntrs_numeric::{from_dec_str, U320};

use crate::fp::FpParams;
use crate::fp3::Fp3Params;
use crate::fp6::Fp6Params;

/// Scalar field modulus r (298 bits, prime).
pub const MNT6_FR_MODULUS: &str =
    "475922286169261325753349249653048451545124879242694725395555128576210262817955800483758081";

/// Base field modulus q (298 bits, prime).
pub const MNT6_FQ_MODULUS: &str =
    "475922286169261325753349249653048451545124878552823515553267735739164647307408490559963137";

const FR_GENERATOR: u64 = 17;
const FR_NQR: u64 = 17;
const FQ_GENERATOR: u64 = 10;
const FQ_NQR: u64 = 5;

/// Shared by the cubic and sextic towers: the tower factors as 2 x 3, so
/// both extensions sit on V^3 = 5.
const TOWER_NON_RESIDUE: u64 = 5;
const FQ3_NQR: [u64; 3] = [5, 0, 0];
const FQ6_NQR: [[u64; 3]; 2] = [[2, 0, 0], [1, 0, 0]];

/// Both MNT6-298 fields are exactly this wide.
const NUM_BITS: u32 = 298;

/// The complete, validated MNT6-298 field tower.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mnt6Params {
    pub fr: FpParams,
    pub fq: FpParams,
    pub fq3: Fp3Params,
    pub fq6: Fp6Params,
}

static MNT6: OnceLock<Mnt6Params> = OnceLock::new();

impl Mnt6Params {
    /// Derive the full tower in dependency order.
    ///
    /// Pure function of the pinned constants; `init_mnt6_params` caches the
    /// result process-wide. Any invariant violation panics here, before
    /// anything is published.
    pub fn derive() -> Self {
        let fr = FpParams::derive(parse_modulus(MNT6_FR_MODULUS), FR_GENERATOR, FR_NQR);
        let fq = FpParams::derive(parse_modulus(MNT6_FQ_MODULUS), FQ_GENERATOR, FQ_NQR);
        assert_eq!(fr.num_bits, NUM_BITS, "MNT6 scalar field must be 298 bits");
        assert_eq!(fq.num_bits, NUM_BITS, "MNT6 base field must be 298 bits");

        let fq3 = Fp3Params::derive(&fq, TOWER_NON_RESIDUE, FQ3_NQR);
        let fq6 = Fp6Params::derive(&fq, &fq3, TOWER_NON_RESIDUE, FQ6_NQR);

        Self { fr, fq, fq3, fq6 }
    }
}

fn parse_modulus(dec: &str) -> U320 {
    from_dec_str(dec).expect("modulus literal must be a 320-bit decimal integer")
}

/// Build (on first call) and return the process-wide MNT6-298 parameters.
///
/// Concurrent first calls are serialized by the `OnceLock`: exactly one
/// caller constructs, the rest block until the record is published. Later
/// calls are no-ops returning the same record.
pub fn init_mnt6_params() -> &'static Mnt6Params {
    MNT6.get_or_init(Mnt6Params::derive)
}

/// Scalar field (Fr) parameters.
pub fn mnt6_fr() -> &'static FpParams {
    &init_mnt6_params().fr
}

/// Base field (Fq) parameters.
pub fn mnt6_fq() -> &'static FpParams {
    &init_mnt6_params().fq
}

/// Cubic extension (Fq3) parameters.
pub fn mnt6_fq3() -> &'static Fp3Params {
    &init_mnt6_params().fq3
}

/// Sextic extension (Fq6) parameters.
pub fn mnt6_fq6() -> &'static Fp6Params {
    &init_mnt6_params().fq6
}
