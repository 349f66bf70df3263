// --- 字符类别 ---
// 字符类别及其成员字符表，进程内只构建一次。

// --- 导入依赖 ---
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

/// A named group of characters that generation can draw from.
///
/// The declaration order is the canonical order used everywhere a list of
/// categories is walked (eligible set selection, derive, JSON output).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CharCategory {
    Upper,
    Lower,
    Digits,
    Special,
    Brackets,
    High,
    Ambiguous,
}

impl CharCategory {
    /// Every category, in canonical order.
    pub const ALL: [CharCategory; 7] = [
        CharCategory::Upper,
        CharCategory::Lower,
        CharCategory::Digits,
        CharCategory::Special,
        CharCategory::Brackets,
        CharCategory::High,
        CharCategory::Ambiguous,
    ];

    /// The name used in option records and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            CharCategory::Upper => "upper",
            CharCategory::Lower => "lower",
            CharCategory::Digits => "digits",
            CharCategory::Special => "special",
            CharCategory::Brackets => "brackets",
            CharCategory::High => "high",
            CharCategory::Ambiguous => "ambiguous",
        }
    }

    // `upper`, `lower` and `digits` leave out O, 0, o, I and l; those live in `ambiguous`.
    fn members(self) -> &'static str {
        match self {
            CharCategory::Upper => "ABCDEFGHJKLMNPQRSTUVWXYZ",
            CharCategory::Lower => "abcdefghijkmnpqrstuvwxyz",
            CharCategory::Digits => "123456789",
            CharCategory::Special => "!@#$%^&*_+-=,./?;:`\"~'\\",
            CharCategory::Brackets => "(){}[]<>",
            CharCategory::High => concat!(
                "¡¢£¤¥¦§©ª«¬®¯°±²³´µ¶¹º»¼½¾¿",
                "ÀÁÂÃÄÅÆÇÈÉÊËÌÍÎÏÐÑÒÓÔÕÖ×ØÙÚÛÜÝÞß",
                "àáâãäåæçèéêëìíîïðñòóôõö÷øùúûüýþ"
            ),
            CharCategory::Ambiguous => "O0oIl",
        }
    }
}

impl std::fmt::Display for CharCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

static STANDARD: LazyLock<CharRangeTable> = LazyLock::new(CharRangeTable::new);

/// Immutable lookup from [`CharCategory`] to its character set.
///
/// Built once per process; callers share it by reference through
/// [`CharRangeTable::standard`].
#[derive(Debug)]
pub struct CharRangeTable {
    ranges: Vec<(CharCategory, Vec<char>)>,
}

impl CharRangeTable {
    fn new() -> Self {
        let ranges = CharCategory::ALL
            .iter()
            .map(|&category| (category, category.members().chars().collect()))
            .collect();
        Self { ranges }
    }

    /// The shared table.
    pub fn standard() -> &'static CharRangeTable {
        &STANDARD
    }

    /// Member characters of `category`. Never empty.
    pub fn set_for(&self, category: CharCategory) -> &[char] {
        // `ranges` is laid out in `CharCategory::ALL` order.
        &self.ranges[category as usize].1
    }

    /// Whether `ch` belongs to `category`.
    pub fn contains(&self, category: CharCategory, ch: char) -> bool {
        self.set_for(category).contains(&ch)
    }

    /// Every category with its members, in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (CharCategory, &[char])> {
        self.ranges.iter().map(|(category, chars)| (*category, chars.as_slice()))
    }
}
