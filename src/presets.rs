// --- 内置预设 ---

// --- 导入依赖 ---
use serde::Serialize;

use crate::charset::CharCategory::{self, *};
use crate::core::Error;
use crate::options::{GenerationOptions, PRONOUNCEABLE};

/// A named, ready-made option record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preset {
    pub name: &'static str,
    pub options: GenerationOptions,
}

fn preset(name: &'static str, length: usize, categories: &[CharCategory]) -> Preset {
    let options = categories
        .iter()
        .fold(GenerationOptions::new(length), |opts, c| opts.with(*c));
    Preset { name, options }
}

/// All built-in presets, `Default` first.
pub fn builtin() -> Vec<Preset> {
    const HEX_UPPER: &str = "0123456789ABCDEF";
    const HEX_LOWER: &str = "0123456789abcdef";

    let mut pronounceable = preset(PRONOUNCEABLE, 10, &[Upper, Lower]);
    pronounceable.options = pronounceable.options.with_name(PRONOUNCEABLE);

    let mut mac = preset("Mac", 17, &[]);
    mac.options = mac.options.with_include(HEX_UPPER).with_pattern("XX-");

    let mut hash128 = preset("Hash128", 32, &[]);
    hash128.options = hash128.options.with_include(HEX_LOWER);
    let mut hash256 = preset("Hash256", 64, &[]);
    hash256.options = hash256.options.with_include(HEX_LOWER);

    vec![
        preset("Default", 16, &[Upper, Lower, Digits]),
        pronounceable,
        preset("Med", 16, &[Upper, Lower, Digits, Special, Brackets, Ambiguous]),
        preset("Long", 32, &[Upper, Lower, Digits]),
        preset("Pin4", 4, &[Digits]),
        mac,
        hash128,
        hash256,
    ]
}

/// Looks up a built-in preset by name, ignoring ASCII case.
pub fn find(name: &str) -> Result<GenerationOptions, Error> {
    builtin()
        .into_iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
        .map(|p| p.options)
        .ok_or_else(|| Error::UnknownPreset(name.to_string()))
}
