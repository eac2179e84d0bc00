//! Lookup Context - Value Objects

use super::LookupError;

/// 规范化查询文本：去除首尾空白并转为小写
///
/// 幂等：`normalize(&normalize(s)) == normalize(s)`
pub fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// 查询键 - (单词, 语言代码)
///
/// 不变量:
/// - word 与 lang 均已规范化（trim + lowercase）
/// - word 与 lang 均非空
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LookupKey {
    word: String,
    lang: String,
}

impl LookupKey {
    pub fn new(word: &str, lang: &str) -> Result<Self, LookupError> {
        let word = normalize(word);
        let lang = normalize(lang);
        if word.is_empty() {
            return Err(LookupError::EmptyWord);
        }
        if lang.is_empty() {
            return Err(LookupError::EmptyLanguage);
        }
        Ok(Self { word, lang })
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn lang(&self) -> &str {
        &self.lang
    }
}

impl std::fmt::Display for LookupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]", self.word, self.lang)
    }
}
