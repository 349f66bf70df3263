// --- 模式掩码 ---
// 将掩码字符解析为标记，并按位置解析出可用字符集。

// --- 导入依赖 ---
use crate::charset::{CharCategory, CharRangeTable};

/// Mask character that selects the coverage pool.
pub const WILDCARD: char = 'X';
/// Mask character that selects the include set.
pub const INCLUDE: char = 'I';

/// One mask character, classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternToken {
    /// `X`: filled from the coverage pool.
    Wildcard,
    /// Drawn from a fixed category.
    Category(CharCategory),
    /// `I`: drawn from the caller's include set.
    Include,
    /// Emitted unchanged.
    Literal(char),
}

impl PatternToken {
    pub fn from_mask_char(ch: char) -> Self {
        match ch {
            WILDCARD => PatternToken::Wildcard,
            INCLUDE => PatternToken::Include,
            'A' => PatternToken::Category(CharCategory::Upper),
            'a' => PatternToken::Category(CharCategory::Lower),
            '1' => PatternToken::Category(CharCategory::Digits),
            '*' => PatternToken::Category(CharCategory::Special),
            '[' => PatternToken::Category(CharCategory::Brackets),
            'Ä' => PatternToken::Category(CharCategory::High),
            '0' => PatternToken::Category(CharCategory::Ambiguous),
            other => PatternToken::Literal(other),
        }
    }
}

/// What a position produces once its token is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved<'a> {
    Wildcard,
    Charset(&'a [char]),
    Literal(char),
}

/// A mask parsed once and resolved against the category table and include set.
#[derive(Debug)]
pub struct PatternResolver<'a> {
    table: &'a CharRangeTable,
    include: Vec<char>,
    tokens: Vec<PatternToken>,
}

impl<'a> PatternResolver<'a> {
    /// An empty `mask` behaves like `"X"`.
    pub fn new(mask: &str, include: Option<&str>, table: &'a CharRangeTable) -> Self {
        let mut tokens: Vec<PatternToken> = mask.chars().map(PatternToken::from_mask_char).collect();
        if tokens.is_empty() {
            tokens.push(PatternToken::Wildcard);
        }
        Self {
            table,
            include: include.map(|s| s.chars().collect()).unwrap_or_default(),
            tokens,
        }
    }

    /// Token governing output position `index`; the mask repeats cyclically.
    pub fn token_at(&self, index: usize) -> PatternToken {
        self.tokens[index % self.tokens.len()]
    }

    /// Number of wildcard positions in an output of `length` characters.
    pub fn wildcard_count(&self, length: usize) -> usize {
        let per_cycle = self.tokens.iter().filter(|t| **t == PatternToken::Wildcard).count();
        // 完整周期数加上最后一个不完整周期。
        let (cycles, rest) = (length / self.tokens.len(), length % self.tokens.len());
        let tail = self.tokens[..rest]
            .iter()
            .filter(|t| **t == PatternToken::Wildcard)
            .count();
        cycles * per_cycle + tail
    }

    /// Resolves a token to the characters it may produce.
    ///
    /// `Include` with no include set falls back to the literal `I`.
    pub fn resolve(&self, token: PatternToken) -> Resolved<'_> {
        match token {
            PatternToken::Wildcard => Resolved::Wildcard,
            PatternToken::Category(category) => Resolved::Charset(self.table.set_for(category)),
            PatternToken::Include if self.include.is_empty() => Resolved::Literal(INCLUDE),
            PatternToken::Include => Resolved::Charset(&self.include),
            PatternToken::Literal(ch) => Resolved::Literal(ch),
        }
    }

    /// Shorthand for `resolve(token_at(index))`.
    pub fn resolve_at(&self, index: usize) -> Resolved<'_> {
        self.resolve(self.token_at(index))
    }
}
