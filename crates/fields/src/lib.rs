// MNT6-298 field-tower parameters.
//
// Derives and validates the constants that downstream curve and pairing
// arithmetic consumes: Montgomery constants, 2-adic group decompositions,
// non-residues, roots of unity, and Frobenius coefficient tables. Layout
// follows the dependency order of the tower:
//
// - montgomery: R^2 / R^3 / inv derivation for an odd modulus
// - fp: prime-field parameter records (Fr, Fq)
// - fp3: cubic extension over Fq
// - fp6: sextic extension (quadratic over Fq3)
// - mnt6: the MNT6-298 instance and one-time initialization

pub mod fp;
pub mod fp3;
pub mod fp6;
pub mod mnt6;
pub mod montgomery;

pub use fp::FpParams;
pub use fp3::Fp3Params;
pub use fp6::Fp6Params;
pub use mnt6::{init_mnt6_params, mnt6_fq, mnt6_fq3, mnt6_fq6, mnt6_fr, Mnt6Params};
