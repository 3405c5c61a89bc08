//! Pluggable hash strategies over byte-sequence keys.
//!
//! A strategy maps an arbitrary byte sequence to a non-negative 31-bit
//! integer. The table is generic over the strategy, so the same probing
//! logic runs unchanged on top of either implementation.

/// Mask clearing the sign bit, keeping every hash a non-negative 31-bit value.
pub(crate) const SIGN_MASK: u32 = 0x7fff_ffff;

/// A pure function from a byte-sequence key to a 31-bit hash.
///
/// Implementations must be deterministic and stateless: the same key always
/// maps to the same value, and the value never exceeds `0x7fff_ffff`.
pub trait HashStrategy {
    /// Hashes `key` into the range `[0, 0x7fff_ffff]`.
    fn hash(key: &[u8]) -> u32;
}

/// The classic djb2 multiplicative string hash.
///
/// Accumulates `acc * 33 + byte` modulo 2^32 starting from 5381, then clears
/// the sign bit. The low 31 bits are identical whether the accumulator wraps
/// at 32 bits or grows unbounded, so a wrapping `u32` reproduces the
/// reference recurrence exactly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Djb2;

impl HashStrategy for Djb2 {
    fn hash(key: &[u8]) -> u32 {
        let mut acc: u32 = 5381;
        for &byte in key {
            acc = (acc << 5).wrapping_add(acc).wrapping_add(u32::from(byte));
        }
        acc & SIGN_MASK
    }
}

/// 32-bit `MurmurHash3` (x86 variant, seed 0), sign bit cleared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Murmur3;

/// First block-mixing constant of `MurmurHash3` x86 32-bit.
const C1: u32 = 0xcc9e_2d51;
/// Second block-mixing constant of `MurmurHash3` x86 32-bit.
const C2: u32 = 0x1b87_3593;

impl HashStrategy for Murmur3 {
    #[allow(clippy::cast_possible_truncation)]
    fn hash(key: &[u8]) -> u32 {
        let mut h: u32 = 0;

        let mut blocks = key.chunks_exact(4);
        for block in blocks.by_ref() {
            h ^= scramble(assemble_le(block));
            h = h.rotate_left(13);
            h = h.wrapping_mul(5).wrapping_add(0xe654_6b64);
        }

        // The 1-3 byte tail is scrambled and folded in without the
        // rotate-and-multiply round applied to full blocks.
        let tail = blocks.remainder();
        if !tail.is_empty() {
            h ^= scramble(assemble_le(tail));
        }

        h ^= key.len() as u32;
        avalanche(h) & SIGN_MASK
    }
}

/// Folds up to four bytes into a little-endian 32-bit word.
fn assemble_le(bytes: &[u8]) -> u32 {
    let mut word = 0_u32;
    for &byte in bytes.iter().rev() {
        word = (word << 8) | u32::from(byte);
    }
    word
}

/// The multiply/rotate/multiply scramble applied to each input word.
fn scramble(mut k: u32) -> u32 {
    k = k.wrapping_mul(C1);
    k = k.rotate_left(15);
    k.wrapping_mul(C2)
}

/// Finishing avalanche spreading every input bit across the word.
fn avalanche(mut h: u32) -> u32 {
    h ^= h >> 16;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2_ae35);
    h ^ (h >> 16)
}
