//! Randomness for request identifiers

/// Source of random bytes. Quality only needs to make collisions unlikely.
pub trait EntropySource {
    fn fill_bytes(&mut self, dest: &mut [u8]);
}
