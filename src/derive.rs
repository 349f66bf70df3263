// --- 反向推导 ---
// 逐字符读取已有密码，推导出对应的生成选项。

// --- 导入依赖 ---
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::charset::CharRangeTable;
use crate::options::GenerationOptions;

/// Read access to a password one character at a time.
pub trait CharacterSource {
    fn for_each_char(&self, f: &mut dyn FnMut(char));
}

impl CharacterSource for str {
    fn for_each_char(&self, f: &mut dyn FnMut(char)) {
        self.chars().for_each(f);
    }
}

impl CharacterSource for String {
    fn for_each_char(&self, f: &mut dyn FnMut(char)) {
        self.as_str().for_each_char(f);
    }
}

impl CharacterSource for SecretString {
    fn for_each_char(&self, f: &mut dyn FnMut(char)) {
        // Borrowed in place, never copied out.
        self.expose_secret().for_each_char(f);
    }
}

/// Derives `{length, category flags}` from `password`. `None` yields length 0.
///
/// No pattern, name or include set is inferred.
pub fn derive_options<S: CharacterSource + ?Sized>(password: Option<&S>) -> GenerationOptions {
    derive_with_table(password, CharRangeTable::standard())
}

pub fn derive_with_table<S: CharacterSource + ?Sized>(
    password: Option<&S>,
    table: &CharRangeTable,
) -> GenerationOptions {
    let mut opts = GenerationOptions::default();
    let Some(password) = password else {
        return opts;
    };
    password.for_each_char(&mut |ch| {
        opts.length += 1;
        // 字符集若有重叠，一个字符可以同时标记多个类别。
        for (category, chars) in table.iter() {
            if chars.contains(&ch) {
                opts.flags.insert(category);
            }
        }
    });
    debug!(
        length = opts.length,
        categories = opts.flags.iter().count(),
        "options derived from password"
    );
    opts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charset::CharCategory;
    use crate::options::CategoryFlags;

    #[test]
    fn derives_mixed_password() {
        let opts = derive_options(Some("Ab1!"));
        assert_eq!(opts.length, 4);
        let expected: CategoryFlags = [
            CharCategory::Upper,
            CharCategory::Lower,
            CharCategory::Digits,
            CharCategory::Special,
        ]
        .into_iter()
        .collect();
        assert_eq!(opts.flags, expected);
        assert!(opts.pattern.is_none() && opts.include.is_none() && opts.name.is_none());
    }

    #[test]
    fn absent_password_is_empty() {
        let opts = derive_options::<str>(None);
        assert_eq!(opts, GenerationOptions::default());
        assert!(opts.flags.is_empty());
    }

    #[test]
    fn counts_chars_not_bytes() {
        let opts = derive_options(Some("Ä(0"));
        assert_eq!(opts.length, 3);
        assert_eq!(
            opts.flags.iter().collect::<Vec<_>>(),
            vec![CharCategory::Brackets, CharCategory::High, CharCategory::Ambiguous]
        );
    }

    #[test]
    fn unknown_characters_only_add_length() {
        let opts = derive_options(Some(&String::from("  \u{1F600}")));
        assert_eq!(opts.length, 3);
        assert!(opts.flags.is_empty());
    }

    #[test]
    fn reads_secret_strings() {
        let secret = SecretString::from(String::from("zz99"));
        let opts = derive_options(Some(&secret));
        assert_eq!(opts.length, 4);
        assert!(opts.flags.lower && opts.flags.digits);
        assert!(!opts.flags.upper);
    }
}
