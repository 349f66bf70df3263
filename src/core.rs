// --- 导入依赖 ---
use rand::CryptoRng;
use rand::Rng;
// thiserror 库，可以方便地为自定义错误类型派生标准的 Error trait。
use thiserror::Error;
use tracing::debug;

use crate::charset::CharRangeTable;
use crate::coverage::CoveragePool;
use crate::options::{GenerationOptions, MAX_LENGTH};
use crate::pattern::{PatternResolver, Resolved};
use crate::pronounceable::{Phonetic, PhoneticGenerator, generate_pronounceable};

// --- 1. 错误类型 ---

/// Reasons a generation request yields no password.
///
/// The infallible entry points ([`generate`], [`generate_from_json`]) turn
/// every variant into an empty string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("length is missing, not a whole number, negative, or above the maximum")]
    InvalidLength,
    #[error("no character category or include set is enabled")]
    NoEligibleCategories,
    #[error("failed to parse options: {0}")]
    OptionsParse(String),
    #[error("unknown preset '{0}'")]
    UnknownPreset(String),
}

// --- 2. 核心密码生成函数 ---

/// Generates a password with the thread-local CSPRNG and the bundled phonetic generator.
///
/// Never fails: anything that would be an error yields `""`.
pub fn generate(opts: &GenerationOptions) -> String {
    generate_with(opts, &Phonetic, &mut rand::rng())
}

/// Like [`generate`], with caller-supplied randomness and phonetic generator.
pub fn generate_with<P, R>(opts: &GenerationOptions, phonetic: &P, rng: &mut R) -> String
where
    P: PhoneticGenerator + ?Sized,
    R: CryptoRng + ?Sized,
{
    try_generate_with(opts, phonetic, rng).unwrap_or_else(|e| {
        debug!(error = %e, "generation degraded to empty password");
        String::new()
    })
}

/// Parses `json` as an option record and generates; malformed input yields `""`.
pub fn generate_from_json(json: &str) -> String {
    match GenerationOptions::from_json(json) {
        Ok(opts) => generate(&opts),
        Err(e) => {
            debug!(error = %e, "rejected option record");
            String::new()
        }
    }
}

/// Fallible form of [`generate`].
pub fn try_generate(opts: &GenerationOptions) -> Result<String, Error> {
    try_generate_with(opts, &Phonetic, &mut rand::rng())
}

/// Fallible form of [`generate_with`].
pub fn try_generate_with<P, R>(
    opts: &GenerationOptions,
    phonetic: &P,
    rng: &mut R,
) -> Result<String, Error>
where
    P: PhoneticGenerator + ?Sized,
    R: CryptoRng + ?Sized,
{
    if opts.length > MAX_LENGTH {
        return Err(Error::InvalidLength);
    }
    if opts.is_pronounceable() {
        return Ok(generate_pronounceable(opts, phonetic, rng));
    }
    assemble(opts, CharRangeTable::standard(), rng)
}

/// Character sets eligible for wildcard positions: enabled categories in
/// canonical order, then the include set.
pub fn eligible_sets(opts: &GenerationOptions, table: &CharRangeTable) -> Vec<Vec<char>> {
    let mut sets: Vec<Vec<char>> = opts
        .flags
        .iter()
        .map(|category| table.set_for(category).to_vec())
        .collect();
    if let Some(include) = opts.include_set() {
        sets.push(include.chars().collect());
    }
    sets
}

/// Walks the pattern across `opts.length` positions and assembles the password.
///
/// Wildcard positions consume the coverage pool in order; category and
/// include positions pick uniformly from their set; anything else is copied.
pub fn assemble<R: CryptoRng + ?Sized>(
    opts: &GenerationOptions,
    table: &CharRangeTable,
    rng: &mut R,
) -> Result<String, Error> {
    // --- (阶段 A) 输入验证 ---
    if opts.length > MAX_LENGTH {
        return Err(Error::InvalidLength);
    }
    let sets = eligible_sets(opts, table);
    if sets.is_empty() {
        return Err(Error::NoEligibleCategories);
    }
    if opts.length == 0 {
        return Ok(String::new());
    }

    // --- (阶段 B) 解析模式并生成覆盖池 ---
    let resolver = PatternResolver::new(opts.mask(), opts.include_set(), table);
    let wildcard_count = resolver.wildcard_count(opts.length);
    let set_refs: Vec<&[char]> = sets.iter().map(Vec::as_slice).collect();
    let mut pool = CoveragePool::sample(&set_refs, wildcard_count, rng)?;

    // --- (阶段 C) 按模式逐位组合 ---
    let password = (0..opts.length)
        .map(|i| match resolver.resolve_at(i) {
            Resolved::Wildcard => pool.next().ok_or(Error::NoEligibleCategories),
            Resolved::Charset(chars) => Ok(chars[rng.random_range(0..chars.len())]),
            Resolved::Literal(ch) => Ok(ch),
        })
        .collect::<Result<String, Error>>()?;
    // 每个通配位置恰好消耗一个覆盖池字符。
    debug_assert_eq!(pool.remaining(), 0);

    debug!(
        length = opts.length,
        wildcard_count,
        sets = sets.len(),
        "password assembled"
    );
    Ok(password)
}
