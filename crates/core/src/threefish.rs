//! Threefish3 tweakable block cipher
//!
//! A keyed, tweaked permutation over a 1024-bit block of sixteen 64-bit words.
//! Every four MIX + permute rounds form a round group; a subkey derived from
//! the extended key and tweak is added before each group and once more after
//! the last one.
//!
//! All arithmetic is wrapping 64-bit addition, rotation and XOR, so the cipher
//! never branches on data.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::params::*;

/// A block of sixteen little-endian 64-bit words
pub type Block = [u64; BLOCK_WORDS];

/// Cipher strength, selected from the requested digest size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SecurityLevel {
    /// 256-bit digests
    Standard,
    /// 512-bit digests
    #[default]
    Enhanced,
    /// 1024-bit digests
    Quantum,
}

impl SecurityLevel {
    /// Total number of rounds run by the cipher at this level
    pub const fn rounds(self) -> usize {
        match self {
            SecurityLevel::Standard => ROUNDS_STANDARD,
            SecurityLevel::Enhanced | SecurityLevel::Quantum => ROUNDS_EXTENDED,
        }
    }

    /// Number of subkey injections (one per round group plus the final one)
    pub const fn subkeys(self) -> usize {
        self.rounds() / ROUNDS_PER_GROUP + 1
    }
}

/// Threefish3 instance bound to one key and tweak
///
/// Instances are cheap to build and are created per block by UBI. The key
/// schedule is wiped when the instance is dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Threefish {
    /// Key words followed by the parity word
    key: [u64; KEY_SCHEDULE_WORDS],
    /// Tweak words 0 and 1 followed by their XOR
    tweak: [u64; TWEAK_WORDS],
    #[zeroize(skip)]
    level: SecurityLevel,
}

impl Threefish {
    /// Build the extended key and tweak schedule
    ///
    /// The parity word is the XOR of every key word and [`KEY_PARITY`]; the
    /// third tweak word is replaced by `tweak[0] ^ tweak[1]`.
    pub fn new(key: &Block, tweak: &[u64; TWEAK_WORDS], level: SecurityLevel) -> Self {
        let mut extended = [0u64; KEY_SCHEDULE_WORDS];
        let mut parity = KEY_PARITY;
        for (dst, &word) in extended.iter_mut().zip(key.iter()) {
            *dst = word;
            parity ^= word;
        }
        extended[BLOCK_WORDS] = parity;

        Self {
            key: extended,
            tweak: [tweak[0], tweak[1], tweak[0] ^ tweak[1]],
            level,
        }
    }

    /// Security level this instance runs at
    pub fn level(&self) -> SecurityLevel {
        self.level
    }

    /// Encrypt one block
    pub fn encrypt(&self, plaintext: &Block) -> Block {
        let mut state = *plaintext;
        let groups = self.level.rounds() / ROUNDS_PER_GROUP;

        for group in 0..groups {
            self.add_subkey(&mut state, group);
            for step in 0..ROUNDS_PER_GROUP {
                mix(&mut state, group * ROUNDS_PER_GROUP + step);
                permute(&mut state);
            }
        }
        self.add_subkey(&mut state, groups);

        state
    }

    /// Decrypt one block, inverting [`Threefish::encrypt`]
    pub fn decrypt(&self, ciphertext: &Block) -> Block {
        let mut state = *ciphertext;
        let groups = self.level.rounds() / ROUNDS_PER_GROUP;

        self.sub_subkey(&mut state, groups);
        for group in (0..groups).rev() {
            for step in (0..ROUNDS_PER_GROUP).rev() {
                unpermute(&mut state);
                unmix(&mut state, group * ROUNDS_PER_GROUP + step);
            }
            self.sub_subkey(&mut state, group);
        }

        state
    }

    /// Subkey word `i` for round group `group`
    #[inline(always)]
    fn subkey_word(&self, group: usize, i: usize) -> u64 {
        let mut word = self.key[(group + i) % KEY_SCHEDULE_WORDS];
        if i == 0 {
            word = word.wrapping_add(self.tweak[group % TWEAK_WORDS]);
        }
        if i == BLOCK_WORDS - 2 {
            word = word.wrapping_add(self.tweak[(group + 1) % TWEAK_WORDS]);
        }
        if i == BLOCK_WORDS - 1 {
            word = word.wrapping_add(group as u64);
        }
        word
    }

    #[inline(always)]
    fn add_subkey(&self, state: &mut Block, group: usize) {
        for (i, word) in state.iter_mut().enumerate() {
            *word = word.wrapping_add(self.subkey_word(group, i));
        }
    }

    #[inline(always)]
    fn sub_subkey(&self, state: &mut Block, group: usize) {
        for (i, word) in state.iter_mut().enumerate() {
            *word = word.wrapping_sub(self.subkey_word(group, i));
        }
    }
}

/// One MIX round over all eight word pairs
#[inline(always)]
fn mix(state: &mut Block, round: usize) {
    let rotations = &ROTATIONS[round % 8];
    for (pair, &r) in rotations.iter().enumerate() {
        let x0 = state[2 * pair].wrapping_add(state[2 * pair + 1]);
        let x1 = state[2 * pair + 1].rotate_left(r) ^ x0;
        state[2 * pair] = x0;
        state[2 * pair + 1] = x1;
    }
}

/// Inverse of [`mix`]
#[inline(always)]
fn unmix(state: &mut Block, round: usize) {
    let rotations = &ROTATIONS[round % 8];
    for (pair, &r) in rotations.iter().enumerate() {
        let x0 = state[2 * pair];
        let x1 = (state[2 * pair + 1] ^ x0).rotate_right(r);
        state[2 * pair] = x0.wrapping_sub(x1);
        state[2 * pair + 1] = x1;
    }
}

#[inline(always)]
fn permute(state: &mut Block) {
    let input = *state;
    for (dst, &src) in state.iter_mut().zip(PERMUTATION.iter()) {
        *dst = input[src];
    }
}

#[inline(always)]
fn unpermute(state: &mut Block) {
    let input = *state;
    for (i, &src) in PERMUTATION.iter().enumerate() {
        state[src] = input[i];
    }
}

/// Load up to 128 bytes as little-endian words, zero-padding the tail
pub fn block_from_bytes(bytes: &[u8]) -> Block {
    let mut padded = [0u8; BLOCK_BYTES];
    let len = bytes.len().min(BLOCK_BYTES);
    padded[..len].copy_from_slice(&bytes[..len]);

    let mut block = [0u64; BLOCK_WORDS];
    for (word, chunk) in block.iter_mut().zip(padded.chunks_exact(8)) {
        let mut raw = [0u8; 8];
        raw.copy_from_slice(chunk);
        *word = u64::from_le_bytes(raw);
    }
    padded.zeroize();
    block
}

/// Serialize a block as 128 little-endian bytes
pub fn block_to_bytes(block: &Block) -> [u8; BLOCK_BYTES] {
    let mut out = [0u8; BLOCK_BYTES];
    for (chunk, word) in out.chunks_exact_mut(8).zip(block.iter()) {
        chunk.copy_from_slice(&word.to_le_bytes());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEVELS: [SecurityLevel; 3] = [
        SecurityLevel::Standard,
        SecurityLevel::Enhanced,
        SecurityLevel::Quantum,
    ];

    fn sample_block(seed: u64) -> Block {
        let mut block = [0u64; BLOCK_WORDS];
        let mut x = seed;
        for word in block.iter_mut() {
            x = x.wrapping_mul(0x9E37_79B9_7F4A_7C15).wrapping_add(0x632B_E59B_D9B4_E019);
            *word = x;
        }
        block
    }

    #[test]
    fn test_decrypt_inverts_encrypt() {
        let key = sample_block(1);
        let tweak = [7, 0x4000_0000_0000_0000, 0];
        let plaintext = sample_block(2);

        for level in LEVELS {
            let cipher = Threefish::new(&key, &tweak, level);
            let ciphertext = cipher.encrypt(&plaintext);
            assert_ne!(ciphertext, plaintext);
            assert_eq!(cipher.decrypt(&ciphertext), plaintext, "level {:?}", level);
        }
    }

    #[test]
    fn test_mix_and_permute_are_invertible() {
        let original = sample_block(3);
        for round in 0..8 {
            let mut state = original;
            mix(&mut state, round);
            permute(&mut state);
            unpermute(&mut state);
            unmix(&mut state, round);
            assert_eq!(state, original);
        }
    }

    #[test]
    fn test_tweak_changes_ciphertext() {
        let key = sample_block(4);
        let plaintext = sample_block(5);

        let a = Threefish::new(&key, &[0, 0, 0], SecurityLevel::Standard).encrypt(&plaintext);
        let b = Threefish::new(&key, &[1, 0, 0], SecurityLevel::Standard).encrypt(&plaintext);
        let c = Threefish::new(&key, &[0, 1, 0], SecurityLevel::Standard).encrypt(&plaintext);

        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(b, c);
    }

    #[test]
    fn test_reserved_tweak_word_is_ignored() {
        // The third tweak word is always rebuilt as t0 ^ t1
        let key = sample_block(6);
        let plaintext = sample_block(7);

        let a = Threefish::new(&key, &[3, 5, 0], SecurityLevel::Enhanced).encrypt(&plaintext);
        let b = Threefish::new(&key, &[3, 5, 0xFFFF], SecurityLevel::Enhanced).encrypt(&plaintext);
        assert_eq!(a, b);
    }

    #[test]
    fn test_level_changes_ciphertext() {
        let key = sample_block(8);
        let plaintext = sample_block(9);
        let tweak = [0, 0, 0];

        let standard = Threefish::new(&key, &tweak, SecurityLevel::Standard).encrypt(&plaintext);
        let enhanced = Threefish::new(&key, &tweak, SecurityLevel::Enhanced).encrypt(&plaintext);
        let quantum = Threefish::new(&key, &tweak, SecurityLevel::Quantum).encrypt(&plaintext);

        assert_ne!(standard, enhanced);
        // Enhanced and Quantum share the round count; the level only matters
        // to the optional transforms
        assert_eq!(enhanced, quantum);
    }

    #[test]
    fn test_round_counts() {
        assert_eq!(SecurityLevel::Standard.rounds(), 72);
        assert_eq!(SecurityLevel::Enhanced.rounds(), 96);
        assert_eq!(SecurityLevel::Quantum.rounds(), 96);
        assert_eq!(SecurityLevel::Standard.subkeys(), 19);
    }

    #[test]
    fn test_byte_conversion() {
        let bytes: [u8; 9] = [1, 0, 0, 0, 0, 0, 0, 0, 0xFF];
        let block = block_from_bytes(&bytes);
        assert_eq!(block[0], 1);
        assert_eq!(block[1], 0xFF);
        assert!(block[2..].iter().all(|&w| w == 0));

        let full = block_to_bytes(&block);
        assert_eq!(&full[..9], &bytes);
        assert!(full[9..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_rotation_table_bounds() {
        for row in ROTATIONS.iter() {
            for &r in row.iter() {
                assert!((1..=63).contains(&r));
            }
        }
    }
}
