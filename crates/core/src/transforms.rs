//! Optional block transforms
//!
//! Extra mixing layers addressable by the dispatcher. None of them runs
//! inside UBI and none is on the default digest path; when selected they are
//! applied to a finished chaining value before truncation.
//!
//! - [`cascade`]: three forward/backward mixing passes, each with its own constant
//! - [`adaptive`]: an entropy probe picks extra rounds and an optional
//!   [`quantum_resistant`] post-mix
//! - [`quantum_resistant`]: per-word mixing followed by [`lattice`], run once
//!   (Standard, Enhanced) or three times (Quantum)

use crate::params::BLOCK_WORDS;
use crate::threefish::{Block, SecurityLevel};

const QUANTUM_CONSTANTS: [u64; 3] = [0x9E37_79B9_7F4A_7C15, 0x71D6_7FFF_EDA6_0000, 0xFFF7_EEE0_0000_0000];

const LATTICE_CONSTANTS: [u64; 4] = [
    0xD2B2_8B89_9FCE_F1D9,
    0x8C5E_548A_E35E_3190,
    0xA71F_69D7_F1FB_9D6A,
    0xE4B4_7859_A589_7091,
];

const CASCADE_CONSTANTS: [u64; 4] = [
    0xA5A5_A5A5_A5A5_A5A5,
    0x1234_5678_9ABC_DEF0,
    0xFEDC_BA98_7654_3210,
    0x0F1E_2D3C_4B5A_6978,
];

const AVALANCHE_MULTIPLIER: u64 = 0x2545_F491_4F6C_DD1D;
const ADAPTIVE_SEED: u64 = 0x1234_5678_90AB_CDEF;
const ADAPTIVE_MULTIPLIER: u64 = 0xDEAD_BEEF_CAFE_BABE;
const ADAPTIVE_ALT_MULTIPLIER: u64 = 0xFEDC_BA98_7654_3210;

const N: usize = BLOCK_WORDS;

/// Neighbour-dependent in-place mixing pass
pub fn avalanche_mix(data: &mut Block) {
    for i in 0..N {
        let next = (i + 1) % N;
        let prev = (i + N - 1) % N;

        let mut x = data[i] ^ ((data[prev] << 7) | (data[next] >> 3));
        x = x.wrapping_add(data[(i + 7) % N]);
        x = x.rotate_left(13);

        x ^= x >> 23;
        x = x.wrapping_mul(AVALANCHE_MULTIPLIER);
        x ^= x >> 47;
        data[i] = x;
    }
}

/// Single-word mix used by [`quantum_resistant`]
pub fn quantum_mix(value: u64, iteration: usize) -> u64 {
    let mut v = value ^ QUANTUM_CONSTANTS[iteration % 3];
    v = v.rotate_left(23);
    v = v.wrapping_mul(QUANTUM_CONSTANTS[2]);
    v ^= v >> 41;

    // Affine map on every byte
    let mut out = 0u64;
    for shift in (0..64).step_by(8) {
        let byte = ((v >> shift) & 0xFF) as u8;
        let mapped = byte.wrapping_mul(167).wrapping_add(13);
        out |= u64::from(mapped) << shift;
    }
    out
}

/// Lattice-style neighbour mixing with four fixed multipliers
///
/// The Quantum level adds a third phase with long-range dependencies.
pub fn lattice(data: &mut Block, level: SecurityLevel) {
    let mut temp = [0u64; N];

    for i in 0..N {
        let prev = data[(i + N - 1) % N];
        let next = data[(i + 1) % N];

        let mut x = data[i] ^ prev.rotate_left(17);
        x = x.wrapping_add(next);
        x = x.wrapping_mul(LATTICE_CONSTANTS[i % 4]);
        x = x.rotate_left(31);
        temp[i] = x ^ LATTICE_CONSTANTS[(i + 1) % 4];
    }

    for i in 0..N {
        let j = (i + N / 2) % N;
        let x = (temp[i] ^ temp[j]).rotate_left(23);
        temp[i] = x.wrapping_mul(LATTICE_CONSTANTS[i % 4]);
    }

    if level == SecurityLevel::Quantum {
        for i in 0..N {
            let j1 = (i + N / 3) % N;
            let j2 = (i + 2 * N / 3) % N;

            let mut x = temp[i] ^ temp[j1].rotate_left(13);
            x = x.wrapping_add(temp[j2]);
            x = x.rotate_left(37);
            temp[i] = x.wrapping_mul(LATTICE_CONSTANTS[(i * i) % 4]);
        }
    }

    *data = temp;
}

/// Quantum-resistant post-mix: 1 iteration, or 3 at the Quantum level
pub fn quantum_resistant(data: &mut Block, level: SecurityLevel) {
    let iterations = match level {
        SecurityLevel::Quantum => 3,
        SecurityLevel::Standard | SecurityLevel::Enhanced => 1,
    };

    for iteration in 0..iterations {
        for word in data.iter_mut() {
            *word = quantum_mix(*word, iteration);
        }
        lattice(data, level);
    }
}

/// Three-pass cascade with interleaved forward and backward mixing
pub fn cascade(data: &mut Block) {
    let mut temp = [0u64; N];

    for pass in 0..3 {
        // Forward
        for i in 0..N {
            let mut x = (data[i] ^ CASCADE_CONSTANTS[pass % 4]).rotate_left(13 + pass as u32);
            if i > 0 {
                x = x.wrapping_add(temp[i - 1]);
            }
            if i < N - 1 {
                x ^= data[i + 1];
            }
            temp[i] = x.wrapping_mul(CASCADE_CONSTANTS[(i + pass) % 4]);
        }

        // Backward
        for i in (0..N).rev() {
            let mut x = temp[i].rotate_left(31) ^ CASCADE_CONSTANTS[(N - i + pass) % 4];
            x = x.wrapping_add(temp[(i + N / 2) % N]);
            x ^= temp[(i * i + pass) % N];
            temp[i] = x;
        }

        *data = temp;
        avalanche_mix(data);
    }
}

/// Data-dependent mixing driven by a rotating-XOR entropy probe
///
/// The probe fixes the number of extra rounds (popcount mod 8) and whether
/// [`quantum_resistant`] runs before the closing [`avalanche_mix`].
pub fn adaptive(data: &mut Block, level: SecurityLevel) {
    let mut entropy = 0u64;
    for &word in data.iter() {
        entropy = (entropy ^ word).rotate_left(7);
    }

    let extra_rounds = (entropy.count_ones() % 8) as usize;
    let extra_mixing = (entropy & 0xFF) > 0x7F;
    let adaptive_constant = entropy ^ ADAPTIVE_SEED;

    for word in data.iter_mut() {
        *word = (*word ^ adaptive_constant).rotate_left(17).wrapping_mul(ADAPTIVE_MULTIPLIER);
    }

    for round in 0..extra_rounds {
        for i in 0..N {
            data.swap(i, (i + round * round) % N);
        }

        for word in data.iter_mut() {
            let x = *word;
            *word = if x >> 63 == 1 {
                x.rotate_left(13) ^ adaptive_constant
            } else {
                (!x).rotate_left(31).wrapping_mul(ADAPTIVE_ALT_MULTIPLIER)
            };
        }
    }

    if extra_mixing {
        quantum_resistant(data, level);
    }

    avalanche_mix(data);
}
