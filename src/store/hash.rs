//! Key routing for the partition store

const DJB2_SEED: u64 = 5381;
const DJB2_MULTIPLIER: u64 = 33;

/// djb2 hash of the key's bytes (`hash = hash * 33 + byte`, seeded with 5381)
///
/// Bytes are added as unsigned values, so non-ASCII bytes count as
/// 0x80..=0xFF.
///
/// Arithmetic wraps at 64 bits so long keys hash deterministically instead of
/// overflowing.
pub fn djb2(key: &str) -> u64 {
    key.bytes().fold(DJB2_SEED, |hash, byte| {
        hash.wrapping_mul(DJB2_MULTIPLIER)
            .wrapping_add(u64::from(byte))
    })
}

/// Partition that owns `key` in a store of `num_partitions` partitions
///
/// This is a pure function of the key: repeated runs with the same key set
/// route identically.
///
/// # Panics
///
/// Panics if `num_partitions` is zero. [`PartitionStore`](super::PartitionStore)
/// rejects a zero partition count when it is built.
pub fn partition_for(key: &str, num_partitions: usize) -> usize {
    debug_assert!(num_partitions > 0, "partition count must be positive");
    (djb2(key) % num_partitions as u64) as usize
}
