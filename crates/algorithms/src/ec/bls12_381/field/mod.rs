//! Base field and extension tower

pub(crate) mod arith;
pub mod fp;
pub mod fp12;
pub mod fp2;
pub mod fp6;

pub use fp::Fp;
pub use fp12::Fp12;
pub use fp2::Fp2;
pub use fp6::Fp6;
