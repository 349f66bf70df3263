// --- 可读模式 ---
// 由音节生成器产生可读密码，并可随机大写部分字母。

// --- 导入依赖 ---
use rand::prelude::*;
use rand::CryptoRng;
use rand_chacha::ChaCha20Rng;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::charset::{CharCategory, CharRangeTable};
use crate::options::{GenerationOptions, MAX_LENGTH};

/// Number of random bytes behind each pronounceable seed.
const SEED_BYTES: usize = 10;
/// One uppercase pick per this many output characters.
const UPPER_STRIDE: usize = 8;

/// Produces pronounceable lowercase text, deterministic per seed.
///
/// [`generate_pronounceable`] truncates longer output to `length` and pads
/// shorter output with random letters from [`CharCategory::Lower`].
pub trait PhoneticGenerator {
    /// Should return exactly `length` lowercase characters.
    fn generate(&self, length: usize, seed: &str) -> String;
}

/// Bundled phonetic generator: alternates consonant and vowel clusters.
///
/// The seed is hashed with SHA-256 and the digest seeds a ChaCha20 stream,
/// so the same seed always yields the same word.
#[derive(Debug, Default, Clone, Copy)]
pub struct Phonetic;

const CONSONANTS: &[&str] = &[
    "b", "c", "d", "f", "g", "h", "j", "k", "l", "m", "n", "p", "r", "s", "t", "v", "w", "z",
    "br", "ch", "cr", "dr", "fr", "gr", "kl", "pl", "pr", "sh", "st", "th", "tr",
];
const VOWELS: &[&str] = &["a", "e", "i", "o", "u", "y", "ai", "ea", "ee", "io", "oa", "ou"];

impl PhoneticGenerator for Phonetic {
    fn generate(&self, length: usize, seed: &str) -> String {
        let digest: [u8; 32] = Sha256::digest(seed.as_bytes()).into();
        let mut rng = ChaCha20Rng::from_seed(digest);

        // 簇最长两个字符。
        let mut word = String::with_capacity(length.min(MAX_LENGTH).saturating_add(2));
        let mut consonant = rng.random_bool(0.5);
        while word.len() < length {
            let pool = if consonant { CONSONANTS } else { VOWELS };
            word.push_str(pool[rng.random_range(0..pool.len())]);
            consonant = !consonant;
        }
        // Clusters are ASCII, so byte truncation is char truncation.
        word.truncate(length);
        word
    }
}

/// Fresh hex seed for the phonetic generator.
pub fn random_seed<R: CryptoRng + ?Sized>(rng: &mut R) -> String {
    let mut bytes = [0u8; SEED_BYTES];
    rng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Generates a pronounceable password of exactly `opts.length` characters.
///
/// With the `upper` flag, one random position per eight characters is
/// uppercased. Positions may repeat, so fewer letters can end up uppercase.
pub fn generate_pronounceable<P, R>(opts: &GenerationOptions, phonetic: &P, rng: &mut R) -> String
where
    P: PhoneticGenerator + ?Sized,
    R: CryptoRng + ?Sized,
{
    let length = opts.length;
    if length == 0 {
        return String::new();
    }
    let seed = random_seed(rng);
    let mut word: Vec<char> = phonetic.generate(length, &seed).chars().take(length).collect();
    if word.len() < length {
        // 生成器输出不足时，用随机小写字母补齐。
        let lower = CharRangeTable::standard().set_for(CharCategory::Lower);
        debug!(missing = length - word.len(), "padding short phonetic output");
        while word.len() < length {
            word.push(lower[rng.random_range(0..lower.len())]);
        }
    }

    let mut upper = Vec::new();
    if opts.flags.upper {
        for _ in (0..word.len()).step_by(UPPER_STRIDE) {
            upper.push(rng.random_range(0..length));
        }
    }
    debug!(length, uppercase_picks = upper.len(), "pronounceable password generated");

    word.into_iter()
        .enumerate()
        .map(|(i, ch)| if upper.contains(&i) { ch.to_ascii_uppercase() } else { ch })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phonetic_is_deterministic_per_seed() {
        let a = Phonetic.generate(20, "abcdef");
        let b = Phonetic.generate(20, "abcdef");
        let c = Phonetic.generate(20, "fedcba");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 20);
        assert!(a.chars().all(|c| c.is_ascii_lowercase()));
    }

    #[test]
    fn phonetic_handles_short_lengths() {
        assert_eq!(Phonetic.generate(0, "seed"), "");
        assert_eq!(Phonetic.generate(1, "seed").len(), 1);
    }

    #[test]
    fn seed_is_hex_of_ten_bytes() {
        let mut rng = ChaCha20Rng::seed_from_u64(9);
        let seed = random_seed(&mut rng);
        assert_eq!(seed.len(), 20);
        assert!(seed.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn exact_length_all_alphabetic() {
        let mut rng = ChaCha20Rng::seed_from_u64(21);
        for length in [1, 7, 10, 33] {
            let opts = GenerationOptions::new(length).with(CharCategory::Lower);
            let pass = generate_pronounceable(&opts, &Phonetic, &mut rng);
            assert_eq!(pass.chars().count(), length);
            assert!(pass.chars().all(|c| c.is_ascii_lowercase()));
        }
    }

    #[test]
    fn upper_flag_uppercases_some_letters() {
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let opts = GenerationOptions::new(16).with(CharCategory::Upper);
        let mut saw_upper = false;
        for _ in 0..50 {
            let pass = generate_pronounceable(&opts, &Phonetic, &mut rng);
            assert_eq!(pass.chars().count(), 16);
            let uppers = pass.chars().filter(char::is_ascii_uppercase).count();
            assert!(uppers <= 2, "16 个字符最多 2 个大写: {pass}");
            saw_upper |= uppers > 0;
        }
        assert!(saw_upper);
    }

    struct Fixed;

    impl PhoneticGenerator for Fixed {
        fn generate(&self, length: usize, _seed: &str) -> String {
            "z".repeat(length)
        }
    }

    #[test]
    fn delegates_to_phonetic_generator() {
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        let pass = generate_pronounceable(&GenerationOptions::new(5), &Fixed, &mut rng);
        assert_eq!(pass, "zzzzz");
    }

    struct Short;

    impl PhoneticGenerator for Short {
        fn generate(&self, length: usize, _seed: &str) -> String {
            "ab".repeat(length / 4)
        }
    }

    #[test]
    fn short_phonetic_output_is_padded() {
        let mut rng = ChaCha20Rng::seed_from_u64(4);
        let lower = CharRangeTable::standard().set_for(CharCategory::Lower);
        for _ in 0..20 {
            let pass = generate_pronounceable(&GenerationOptions::new(10), &Short, &mut rng);
            assert_eq!(pass.chars().count(), 10, "{pass}");
            assert!(pass.starts_with("abab"));
            assert!(pass.chars().skip(4).all(|c| lower.contains(&c)), "补齐字符必须是小写字母: {pass}");
        }
    }

    struct Long;

    impl PhoneticGenerator for Long {
        fn generate(&self, length: usize, _seed: &str) -> String {
            "q".repeat(length * 3)
        }
    }

    #[test]
    fn long_phonetic_output_is_truncated() {
        let mut rng = ChaCha20Rng::seed_from_u64(6);
        let pass = generate_pronounceable(&GenerationOptions::new(7), &Long, &mut rng);
        assert_eq!(pass, "qqqqqqq");
    }
}
