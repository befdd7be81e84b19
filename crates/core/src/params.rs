//! Skein3 Algorithm Parameters
//!
//! Block geometry, key-schedule constants, rotation and permutation tables,
//! and the tweak bit layout shared by the cipher and UBI.

/// Number of 64-bit words in a block
pub const BLOCK_WORDS: usize = 16;

/// Block size in bytes (1024 bits)
pub const BLOCK_BYTES: usize = BLOCK_WORDS * 8;

/// Number of words in a tweak
pub const TWEAK_WORDS: usize = 3;

/// Words in the extended key (key words plus the parity word)
pub const KEY_SCHEDULE_WORDS: usize = BLOCK_WORDS + 1;

/// Constant folded into the key parity word
pub const KEY_PARITY: u64 = 0x1BD1_1BDA_A9FC_1A22;

/// Rounds for the Standard security level
pub const ROUNDS_STANDARD: usize = 72;

/// Rounds for the Enhanced and Quantum security levels
pub const ROUNDS_EXTENDED: usize = 96;

/// MIX + permute rounds between two subkey injections
pub const ROUNDS_PER_GROUP: usize = 4;

/// Rotation constants, indexed by `[round % 8][pair]`
pub const ROTATIONS: [[u32; BLOCK_WORDS / 2]; 8] = [
    [24, 13, 8, 47, 8, 17, 22, 37],
    [38, 19, 10, 55, 49, 18, 23, 52],
    [33, 4, 51, 13, 34, 41, 59, 17],
    [5, 20, 48, 41, 47, 28, 16, 25],
    [41, 9, 37, 31, 12, 47, 44, 30],
    [16, 34, 56, 51, 4, 53, 42, 41],
    [31, 44, 47, 46, 19, 42, 44, 25],
    [9, 48, 35, 52, 23, 31, 37, 20],
];

/// Word permutation applied after every MIX round: `out[i] = in[PERMUTATION[i]]`
pub const PERMUTATION: [usize; BLOCK_WORDS] = [0, 9, 2, 13, 6, 11, 4, 15, 10, 7, 12, 3, 14, 5, 8, 1];

/// FIRST flag in tweak word 1
pub const FLAG_FIRST: u64 = 1 << 62;

/// FINAL flag in tweak word 1
pub const FLAG_FINAL: u64 = 1 << 63;

/// Bit offset of the domain field in tweak word 1
pub const DOMAIN_SHIFT: u32 = 56;

/// Width mask of the domain field (bits 56..=61)
pub const DOMAIN_MASK: u64 = 0x3F;

/// Schema identifier stored in word 0 of the configuration block
pub const SCHEMA_MAGIC: u64 = 0x01_3341_4853;

/// First configuration-block word holding personalization bytes
pub const PERSONALIZATION_WORD: usize = 3;

/// Maximum personalization length in bytes
pub const MAX_PERSONALIZATION: usize = (BLOCK_WORDS - PERSONALIZATION_WORD) * 8;

/// Algorithm version
pub const VERSION: u8 = 3;
