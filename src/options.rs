// --- 生成选项 ---
// 驱动密码生成的选项记录，也是反向推导的输出结构。

// --- 导入依赖 ---
use serde::{Deserialize, Serialize};

use crate::charset::CharCategory;
use crate::core::Error;

/// Reserved value of [`GenerationOptions::name`] that selects pronounceable mode.
pub const PRONOUNCEABLE: &str = "Pronounceable";

/// Longest password a single call will produce. Longer requests are
/// rejected with [`Error::InvalidLength`].
pub const MAX_LENGTH: usize = 4096;

/// Which default categories are eligible. Serialized as one boolean per category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryFlags {
    #[serde(default, skip_serializing_if = "is_false")]
    pub upper: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub lower: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub digits: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub special: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub brackets: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub high: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub ambiguous: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl CategoryFlags {
    fn slot(&mut self, category: CharCategory) -> &mut bool {
        match category {
            CharCategory::Upper => &mut self.upper,
            CharCategory::Lower => &mut self.lower,
            CharCategory::Digits => &mut self.digits,
            CharCategory::Special => &mut self.special,
            CharCategory::Brackets => &mut self.brackets,
            CharCategory::High => &mut self.high,
            CharCategory::Ambiguous => &mut self.ambiguous,
        }
    }

    pub fn contains(&self, category: CharCategory) -> bool {
        match category {
            CharCategory::Upper => self.upper,
            CharCategory::Lower => self.lower,
            CharCategory::Digits => self.digits,
            CharCategory::Special => self.special,
            CharCategory::Brackets => self.brackets,
            CharCategory::High => self.high,
            CharCategory::Ambiguous => self.ambiguous,
        }
    }

    pub fn insert(&mut self, category: CharCategory) {
        *self.slot(category) = true;
    }

    pub fn remove(&mut self, category: CharCategory) {
        *self.slot(category) = false;
    }

    /// Set categories, in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = CharCategory> + '_ {
        CharCategory::ALL.into_iter().filter(|c| self.contains(*c))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

impl FromIterator<CharCategory> for CategoryFlags {
    fn from_iter<T: IntoIterator<Item = CharCategory>>(iter: T) -> Self {
        let mut flags = CategoryFlags::default();
        for category in iter {
            flags.insert(category);
        }
        flags
    }
}

/// Constraints for a single generation call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationOptions {
    pub length: usize,
    /// Preset name; [`PRONOUNCEABLE`] switches to pronounceable mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Pattern mask, applied cyclically. Absent means `"X"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Extra literal characters, also used by the `I` mask character.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<String>,
    #[serde(flatten)]
    pub flags: CategoryFlags,
}

/// Wire shape accepted by [`GenerationOptions::from_json`]; `length` is
/// validated by hand so a bad length maps to [`Error::InvalidLength`].
#[derive(Deserialize)]
struct RawOptions {
    #[serde(default)]
    length: Option<serde_json::Value>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    pattern: Option<String>,
    #[serde(default)]
    include: Option<String>,
    #[serde(flatten)]
    flags: CategoryFlags,
}

impl GenerationOptions {
    pub fn new(length: usize) -> Self {
        Self {
            length,
            ..Default::default()
        }
    }

    pub fn with(mut self, category: CharCategory) -> Self {
        self.flags.insert(category);
        self
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn with_include(mut self, include: impl Into<String>) -> Self {
        self.include = Some(include.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn is_pronounceable(&self) -> bool {
        self.name.as_deref() == Some(PRONOUNCEABLE)
    }

    /// The include set, or `None` when absent or empty.
    pub fn include_set(&self) -> Option<&str> {
        self.include.as_deref().filter(|s| !s.is_empty())
    }

    /// The effective mask; an absent or empty pattern means `"X"`.
    pub fn mask(&self) -> &str {
        self.pattern.as_deref().filter(|p| !p.is_empty()).unwrap_or("X")
    }

    /// Parses an option record from JSON.
    ///
    /// A missing, non-integer, negative or over-[`MAX_LENGTH`] `length` is
    /// reported as [`Error::InvalidLength`]; any other shape problem as
    /// [`Error::OptionsParse`].
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let raw: RawOptions =
            serde_json::from_str(json).map_err(|e| Error::OptionsParse(e.to_string()))?;
        let length = raw
            .length
            .as_ref()
            .and_then(serde_json::Value::as_u64)
            .and_then(|n| usize::try_from(n).ok())
            // 超出上限的长度与负数同样视为无效。
            .filter(|n| *n <= MAX_LENGTH)
            .ok_or(Error::InvalidLength)?;
        Ok(Self {
            length,
            name: raw.name,
            pattern: raw.pattern,
            include: raw.include,
            flags: raw.flags,
        })
    }
}
