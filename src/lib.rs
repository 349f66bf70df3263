/// 字符类别与字符表。
pub mod charset;
/// 核心实现：错误类型与密码组装。
pub mod core;
pub mod coverage;
pub mod derive;
pub mod options;
pub mod pattern;
pub mod presets;
pub mod pronounceable;

/// 将关键公共项重新导出到库的顶层命名空间，
/// 外部使用者可以直接调用 `maskpass::generate`，而不是 `maskpass::core::generate`。
pub use crate::charset::{CharCategory, CharRangeTable};
pub use crate::core::{
    Error, generate, generate_from_json, generate_with, try_generate, try_generate_with,
};
pub use crate::derive::{CharacterSource, derive_options};
pub use crate::options::{CategoryFlags, GenerationOptions, MAX_LENGTH, PRONOUNCEABLE};
pub use crate::pronounceable::{Phonetic, PhoneticGenerator};
