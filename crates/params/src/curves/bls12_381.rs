//! Constants for the BLS12-381 curve
//!
//! E1: y² = x³ + 4 over Fp, E2: y² = x³ + 4(u + 1) over Fp2 = Fp[u]/(u² + 1).

/// Absolute value of the curve parameter x, written in hex as 0xd201000000010000
pub const BLS_X: u64 = 0xd201_0000_0001_0000;

/// The curve parameter x is negative
pub const BLS_X_IS_NEGATIVE: bool = true;

/// Hamming weight of |x|, i.e. the number of addition steps in the Miller loop
pub const BLS_X_HAMMING_WEIGHT: u32 = 6;

/// Base field modulus p (big-endian hex)
pub const FIELD_MODULUS_HEX: &str = "1a0111ea397fe69a4b1ba7b6434bacd764774b84f38512bf6730d2a0f6b0f6241eabfffeb153ffffb9feffffffffaaab";

/// Prime subgroup order r (big-endian hex)
pub const SCALAR_MODULUS_HEX: &str = "73eda753299d7d483339d80809a1d80553bda402fffe5bfeffffffff00000001";

/// Bit length of p
pub const FIELD_MODULUS_BITS: u32 = 381;

/// Bit length of r
pub const SCALAR_MODULUS_BITS: u32 = 255;

/// Two-adicity of r - 1
pub const SCALAR_TWO_ADICITY: u32 = 32;

/// Effective G1 cofactor h_eff = 1 - x used by cofactor clearing
pub const G1_H_EFF: u64 = 0xd201_0000_0001_0001;

/// G1 cofactor (big-endian hex)
pub const G1_COFACTOR_HEX: &str = "396c8c005555e1568c00aaab0000aaab";

/// G2 cofactor (big-endian hex)
pub const G2_COFACTOR_HEX: &str = "5d543a95414e7f1091d50792876a202cd91de4547085abaa68a205b2e5a7ddfa628f1cb4d9e82ef21537e293a6691ae1616ec6e786f0c70cf1c38e31c7238e5";

/// Size of a serialized base field element in bytes
pub const FP_SIZE: usize = 48;

/// Size of a serialized Fp2 element in bytes
pub const FP2_SIZE: usize = 2 * FP_SIZE;

/// Size of a serialized scalar in bytes
pub const SCALAR_SIZE: usize = 32;

/// Compressed G1 point size in bytes
pub const G1_COMPRESSED_SIZE: usize = FP_SIZE;

/// Uncompressed G1 point size in bytes
pub const G1_UNCOMPRESSED_SIZE: usize = 2 * FP_SIZE;

/// Compressed G2 point size in bytes
pub const G2_COMPRESSED_SIZE: usize = FP2_SIZE;

/// Uncompressed G2 point size in bytes
pub const G2_UNCOMPRESSED_SIZE: usize = 2 * FP2_SIZE;

/// Serialized target group element size in bytes (12 base field elements)
pub const GT_SIZE: usize = 12 * FP_SIZE;

/// Wide target group encoding (two concatenated Gt encodings)
pub const GT_WIDE_SIZE: usize = 2 * GT_SIZE;

/// Bytes needed for unbiased sampling of a base field element
pub const FP_WIDE_SIZE: usize = 2 * FP_SIZE;

/// Bytes needed for unbiased sampling of a scalar
pub const SCALAR_WIDE_SIZE: usize = 2 * SCALAR_SIZE;

/// Serialization flag: point is compressed
pub const FLAG_COMPRESSED: u8 = 1 << 7;

/// Serialization flag: point at infinity
pub const FLAG_INFINITY: u8 = 1 << 6;

/// Serialization flag: y is the lexicographically largest square root
pub const FLAG_SORT: u8 = 1 << 5;

/// Mask over the three flag bits of the leading byte
pub const FLAG_MASK: u8 = FLAG_COMPRESSED | FLAG_INFINITY | FLAG_SORT;

/// Window width used by fixed-window scalar multiplication
pub const SCALAR_MUL_WINDOW: usize = 4;

/// Pending pairs kept by the pairing engine before they are folded into
/// the running Miller loop product
pub const ENGINE_FLUSH_THRESHOLD: usize = 16;
