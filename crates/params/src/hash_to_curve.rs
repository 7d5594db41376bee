//! Hash-to-curve suite identifiers (RFC 9380, section 8.10)
//!
//! A domain separation tag has the shape
//! `<app-tag><CURVE-ID>_<EXPAND-TAG>:<HASH-ID>_<MAP-ID>_<ENC-VAR>_`.

/// Curve identifier for G1
pub const CURVE_ID_G1: &str = "BLS12381G1";

/// Curve identifier for G2
pub const CURVE_ID_G2: &str = "BLS12381G2";

/// Separator between suite components
pub const ID_SEPARATOR: &str = "_";

/// Separator between the expander tag and the hash name
pub const TAG_SEPARATOR: &str = ":";

/// expand_message_xmd tag
pub const EXP_TAG_XMD: &str = "XMD";

/// expand_message_xof tag
pub const EXP_TAG_XOF: &str = "XOF";

/// SHA-256 hash identifier
pub const HASH_ID_SHA256: &str = "SHA-256";

/// SHAKE256 hash identifier
pub const HASH_ID_SHAKE256: &str = "SHAKE256";

/// Simplified SWU map identifier
pub const MAP_ID_SSWU: &str = "SSWU";

/// Random-oracle encoding variant (hash_to_curve)
pub const ENC_VAR_RO: &str = "RO";

/// Non-uniform encoding variant (encode_to_curve)
pub const ENC_VAR_NU: &str = "NU";

/// Prefix hashed together with an oversized DST
pub const OVERSIZE_DST_SALT: &[u8] = b"H2C-OVERSIZE-DST-";

/// Longest DST accepted verbatim
pub const MAX_DST_LEN: usize = 255;

/// Upper bound on the number of hash blocks produced by expand_message_xmd
pub const MAX_XMD_BLOCKS: usize = 255;

/// Upper bound on expand_message output length in bytes
pub const MAX_EXPAND_LEN: usize = 65535;

/// Target security level k in bits
pub const SECURITY_BITS: usize = 128;

/// L for the base field: ceil((381 + 128) / 8)
pub const FP_UNIFORM_BYTES: usize = 64;

/// L for the scalar field: ceil((255 + 128) / 8)
pub const SCALAR_UNIFORM_BYTES: usize = 48;

/// Application tag used by the convenience hashing entry points
pub const DEFAULT_APP_TAG: &str = "DPAIR-V01-CS01-with-";
