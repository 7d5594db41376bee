//! Hashing to BLS12-381 (RFC 9380)
//!
//! `expand_message` stretches the input, `hash_to_field` reduces it to field
//! elements, the simplified SWU map and an isogeny send those to the curve,
//! and cofactor clearing finishes in the prime-order subgroup.

use alloc::string::String;
use alloc::vec::Vec;

use dpair_params::hash_to_curve::{
    CURVE_ID_G1, CURVE_ID_G2, DEFAULT_APP_TAG, ENC_VAR_NU, ENC_VAR_RO, EXP_TAG_XMD, EXP_TAG_XOF,
    HASH_ID_SHA256, HASH_ID_SHAKE256, ID_SEPARATOR, MAP_ID_SSWU, TAG_SEPARATOR,
};

pub mod expand;
pub mod field;
mod g1;
mod g2;
mod sswu;

pub use expand::{Expander, XmdExpander, XofExpander};
pub use field::{hash_to_field, hash_to_scalar, HashToField};

/// A hash-to-curve suite identifier, e.g. `BLS12381G1_XMD:SHA-256_SSWU_RO_`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Suite {
    /// Curve and group, `BLS12381G1` or `BLS12381G2`
    pub curve_id: &'static str,
    /// `XMD` or `XOF`
    pub expand_tag: &'static str,
    /// Hash name
    pub hash_id: &'static str,
    /// Map name
    pub map_id: &'static str,
    /// `RO` (hash_to_curve) or `NU` (encode_to_curve)
    pub encoding: &'static str,
}

impl Suite {
    /// G1, SHA-256, random oracle
    pub const G1_XMD_SHA256_SSWU_RO: Suite = Suite::new(CURVE_ID_G1, EXP_TAG_XMD, HASH_ID_SHA256, ENC_VAR_RO);
    /// G1, SHA-256, non-uniform
    pub const G1_XMD_SHA256_SSWU_NU: Suite = Suite::new(CURVE_ID_G1, EXP_TAG_XMD, HASH_ID_SHA256, ENC_VAR_NU);
    /// G1, SHAKE256, random oracle
    pub const G1_XOF_SHAKE256_SSWU_RO: Suite =
        Suite::new(CURVE_ID_G1, EXP_TAG_XOF, HASH_ID_SHAKE256, ENC_VAR_RO);
    /// G2, SHA-256, random oracle
    pub const G2_XMD_SHA256_SSWU_RO: Suite = Suite::new(CURVE_ID_G2, EXP_TAG_XMD, HASH_ID_SHA256, ENC_VAR_RO);
    /// G2, SHA-256, non-uniform
    pub const G2_XMD_SHA256_SSWU_NU: Suite = Suite::new(CURVE_ID_G2, EXP_TAG_XMD, HASH_ID_SHA256, ENC_VAR_NU);
    /// G2, SHAKE256, random oracle
    pub const G2_XOF_SHAKE256_SSWU_RO: Suite =
        Suite::new(CURVE_ID_G2, EXP_TAG_XOF, HASH_ID_SHAKE256, ENC_VAR_RO);

    const fn new(
        curve_id: &'static str,
        expand_tag: &'static str,
        hash_id: &'static str,
        encoding: &'static str,
    ) -> Suite {
        Suite {
            curve_id,
            expand_tag,
            hash_id,
            map_id: MAP_ID_SSWU,
            encoding,
        }
    }

    /// `<CURVE-ID>_<EXPAND-TAG>:<HASH-ID>_<MAP-ID>_<ENC-VAR>_`
    pub fn id(&self) -> String {
        let mut id = String::new();
        id.push_str(self.curve_id);
        id.push_str(ID_SEPARATOR);
        id.push_str(self.expand_tag);
        id.push_str(TAG_SEPARATOR);
        id.push_str(self.hash_id);
        id.push_str(ID_SEPARATOR);
        id.push_str(self.map_id);
        id.push_str(ID_SEPARATOR);
        id.push_str(self.encoding);
        id.push_str(ID_SEPARATOR);
        id
    }

    /// Domain separation tag `<app_tag><suite id>`
    pub fn dst(&self, app_tag: &[u8]) -> Vec<u8> {
        let mut dst = app_tag.to_vec();
        dst.extend_from_slice(self.id().as_bytes());
        dst
    }

    /// Domain separation tag under this library's default application tag
    pub fn default_dst(&self) -> Vec<u8> {
        self.dst(DEFAULT_APP_TAG.as_bytes())
    }
}
