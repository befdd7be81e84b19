//! # Skein3 Core Algorithm
//!
//! The cipher and chaining layer underneath the `skein3` hash library.
//!
//! ## Components
//!
//! - **Threefish3**: tweakable block cipher over a 1024-bit block of sixteen
//!   64-bit words (72 rounds at the Standard level, 96 at Enhanced/Quantum)
//! - **UBI**: Unique Block Iteration chaining with per-block tweaks carrying
//!   position, FIRST/FINAL flags and a domain tag
//! - **Transforms**: optional cascade, adaptive and quantum-resistant mixing
//!   layers, off the default digest path
//!
//! ## Digest pipeline
//!
//! ```text
//! G0 = 0
//! G1 = UBI_CFG(G0, config_block)
//! G2 = UBI_MSG(G1, message)
//! G3 = UBI_OUT(G2, zero_block)
//! digest = LE(G3)[..bits / 8]
//! ```
//!
//! ## Example
//!
//! ```rust
//! use skein3_core::{Domain, SecurityLevel, config_block, configure, output, ubi, block_to_bytes};
//!
//! let level = SecurityLevel::Enhanced;
//! let cfg = config_block(512, 0, &[]);
//! let g = configure(&[0u64; 16], &cfg, level);
//! let g = ubi(&g, Domain::Message, b"Hello Skein3!", level).unwrap();
//! let g = output(&g, level);
//! let digest = &block_to_bytes(&g)[..64];
//! assert_eq!(digest.len(), 64);
//! ```
//!
//! ## no_std Support
//!
//! ```toml
//! [dependencies]
//! skein3-core = { version = "0.3", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

mod params;
mod threefish;
pub mod transforms;
mod ubi;

pub use params::*;
pub use threefish::{Block, SecurityLevel, Threefish, block_from_bytes, block_to_bytes};
pub use ubi::{Domain, Tweak, Ubi, UbiError, compress, config_block, configure, output, ubi};
