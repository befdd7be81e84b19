//! UBI (Unique Block Iteration) chaining
//!
//! Turns [`Threefish`] into a compression function over arbitrary-length
//! input. Each block is encrypted under the current chaining value with a
//! tweak carrying the running byte position, FIRST/FINAL flags and a domain
//! tag; the ciphertext XOR the plaintext becomes the next chaining value.
//!
//! Framing: an input of `n` bytes is absorbed as `n / 128` full non-final
//! blocks followed by exactly one final block holding the `n % 128` remaining
//! bytes, which may be empty. An incremental caller that consumes every full
//! block as soon as it has it therefore produces the same chaining value as a
//! one-shot pass.

use core::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::params::*;
use crate::threefish::{Block, SecurityLevel, Threefish, block_from_bytes};

/// Domain tag carried in every tweak
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    /// Configuration block
    Config,
    /// Message bytes
    Message,
    /// MAC key block
    Mac,
    /// Output transform
    Output,
    /// Tree leaf or internal node
    Tree,
}

impl Domain {
    /// One-byte tag value
    pub const fn tag(self) -> u8 {
        match self {
            Domain::Config => 28,
            Domain::Message => 48,
            Domain::Mac => 43,
            Domain::Output => 63,
            Domain::Tree => 64,
        }
    }

    /// Tag as placed in tweak word 1 (six bits at [`DOMAIN_SHIFT`])
    pub const fn field(self) -> u64 {
        ((self.tag() as u64) & DOMAIN_MASK) << DOMAIN_SHIFT
    }
}

/// Per-block tweak: position, flags and domain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tweak([u64; TWEAK_WORDS]);

impl Tweak {
    pub fn new(position: u64, domain: Domain, first: bool, last: bool) -> Self {
        let mut flags = domain.field();
        if first {
            flags |= FLAG_FIRST;
        }
        if last {
            flags |= FLAG_FINAL;
        }
        Tweak([position, flags, 0])
    }

    /// Bytes consumed so far, including this block's useful bytes
    pub fn position(&self) -> u64 {
        self.0[0]
    }

    pub fn is_first(&self) -> bool {
        self.0[1] & FLAG_FIRST != 0
    }

    pub fn is_final(&self) -> bool {
        self.0[1] & FLAG_FINAL != 0
    }

    /// Raw six-bit domain field
    pub fn domain_field(&self) -> u64 {
        (self.0[1] >> DOMAIN_SHIFT) & DOMAIN_MASK
    }

    pub fn words(&self) -> &[u64; TWEAK_WORDS] {
        &self.0
    }
}

/// Framing violations detected by [`Ubi::absorb_block`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UbiError {
    /// More than one block of bytes was handed over at once
    BlockOverflow(usize),
    /// A block shorter than 128 bytes was not marked final
    PartialBlock(usize),
    /// A block was absorbed after the final one
    AlreadyFinal,
}

impl fmt::Display for UbiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UbiError::BlockOverflow(len) => {
                write!(f, "UBI block of {} bytes exceeds {} bytes", len, BLOCK_BYTES)
            }
            UbiError::PartialBlock(len) => {
                write!(f, "non-final UBI block holds {} of {} bytes", len, BLOCK_BYTES)
            }
            UbiError::AlreadyFinal => write!(f, "UBI pass already absorbed its final block"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for UbiError {}

/// One cipher call with Matyas-Meyer-Oseas feed-forward
///
/// Returns `E(key = chain, tweak, block) XOR block`.
#[inline(always)]
pub fn compress(chain: &Block, block: &Block, tweak: &Tweak, level: SecurityLevel) -> Block {
    let cipher = Threefish::new(chain, tweak.words(), level);
    let mut out = cipher.encrypt(block);
    for (o, &b) in out.iter_mut().zip(block.iter()) {
        *o ^= b;
    }
    out
}

/// An in-progress UBI pass
///
/// The chaining value is wiped when the pass is dropped.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Ubi {
    chain: Block,
    position: u64,
    first: bool,
    finished: bool,
    #[zeroize(skip)]
    domain: Domain,
    #[zeroize(skip)]
    level: SecurityLevel,
}

impl Ubi {
    /// Start a pass from chaining value `chain`
    pub fn new(chain: Block, domain: Domain, level: SecurityLevel) -> Self {
        Self {
            chain,
            position: 0,
            first: true,
            finished: false,
            domain,
            level,
        }
    }

    /// Absorb one block of at most 128 bytes
    ///
    /// Non-final blocks must be exactly 128 bytes. The final block may be
    /// shorter or empty; it is zero-padded and only its useful bytes count
    /// towards the position.
    pub fn absorb_block(&mut self, bytes: &[u8], is_last: bool) -> Result<(), UbiError> {
        if self.finished {
            return Err(UbiError::AlreadyFinal);
        }
        if bytes.len() > BLOCK_BYTES {
            return Err(UbiError::BlockOverflow(bytes.len()));
        }
        if !is_last && bytes.len() != BLOCK_BYTES {
            return Err(UbiError::PartialBlock(bytes.len()));
        }

        self.position = self.position.wrapping_add(bytes.len() as u64);
        let tweak = Tweak::new(self.position, self.domain, self.first, is_last);
        let mut block = block_from_bytes(bytes);

        self.chain = compress(&self.chain, &block, &tweak, self.level);
        block.zeroize();

        self.first = false;
        self.finished = is_last;
        Ok(())
    }

    /// Absorb a whole input with the framing described in the module docs
    pub fn absorb_all(&mut self, input: &[u8]) -> Result<(), UbiError> {
        let blocks = input.chunks_exact(BLOCK_BYTES);
        let tail = blocks.remainder();
        for block in blocks {
            self.absorb_block(block, false)?;
        }
        self.absorb_block(tail, true)
    }

    /// Current chaining value
    pub fn chain(&self) -> &Block {
        &self.chain
    }

    /// Useful bytes absorbed so far
    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    /// Consume the pass and return its chaining value
    pub fn into_chain(mut self) -> Block {
        core::mem::take(&mut self.chain)
    }
}

/// Run a complete UBI pass over `input` starting from `chain`
pub fn ubi(chain: &Block, domain: Domain, input: &[u8], level: SecurityLevel) -> Result<Block, UbiError> {
    let mut pass = Ubi::new(*chain, domain, level);
    pass.absorb_all(input)?;
    Ok(pass.into_chain())
}

/// Build the configuration block
///
/// Word 0 holds [`SCHEMA_MAGIC`], word 1 the digest length in bits, word 2 the
/// mode tag, and words 3.. the personalization bytes, zero-padded. Bytes past
/// [`MAX_PERSONALIZATION`] are dropped; callers wanting strictness check
/// the length first.
pub fn config_block(digest_bits: u64, mode_tag: u64, personalization: &[u8]) -> Block {
    let mut block = [0u64; BLOCK_WORDS];
    block[0] = SCHEMA_MAGIC;
    block[1] = digest_bits;
    block[2] = mode_tag;

    let len = personalization.len().min(MAX_PERSONALIZATION);
    for (word, chunk) in block[PERSONALIZATION_WORD..]
        .iter_mut()
        .zip(personalization[..len].chunks(8))
    {
        let mut raw = [0u8; 8];
        raw[..chunk.len()].copy_from_slice(chunk);
        *word = u64::from_le_bytes(raw);
        raw.zeroize();
    }
    block
}

/// CFG pass: one full final block under [`Domain::Config`]
pub fn configure(chain: &Block, config: &Block, level: SecurityLevel) -> Block {
    let tweak = Tweak::new(BLOCK_BYTES as u64, Domain::Config, true, true);
    compress(chain, config, &tweak, level)
}

/// OUT pass: one all-zero block with no useful bytes under [`Domain::Output`]
pub fn output(chain: &Block, level: SecurityLevel) -> Block {
    let tweak = Tweak::new(0, Domain::Output, true, true);
    compress(chain, &[0u64; BLOCK_WORDS], &tweak, level)
}
