//! Sample data generation.
//!
//! Produces data with visibly different compressibility so the tool's
//! statistics are interesting to look at:
//! - Runs of a single byte (compress to ~1 bit/byte)
//! - Text-like data from a small alphabet
//! - Short repeating patterns
//! - Uniformly random bytes (the container ends up larger than the input)

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generate `size_bytes` of sample data from `seed`.
pub fn generate_sample_data(seed: u64, size_bytes: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut data = Vec::with_capacity(size_bytes);

    while data.len() < size_bytes {
        let section = (size_bytes - data.len()).min(4096);

        match rng.gen_range(0..10u8) {
            // 20% single-byte runs
            0..=1 => {
                let byte: u8 = rng.gen();
                data.extend(std::iter::repeat(byte).take(section));
            }

            // 50% text-like, skewed toward the front of the alphabet
            2..=6 => {
                let alphabet = b"etaoin shrdlucmfwypvbgkjqxz.,\n";
                for _ in 0..section {
                    let a = rng.gen_range(0..alphabet.len());
                    let b = rng.gen_range(0..alphabet.len());
                    data.push(alphabet[a.min(b)]);
                }
            }

            // 20% repeating patterns
            7..=8 => {
                let pattern_len = rng.gen_range(4..=32);
                let pattern: Vec<u8> = (0..pattern_len).map(|_| rng.gen()).collect();
                data.extend(pattern.iter().cycle().take(section));
            }

            // 10% incompressible
            _ => data.extend((0..section).map(|_| rng.gen::<u8>())),
        }
    }

    data
}
