//! 路径分量转义
//!
//! 把单词转换成可安全用作单个文件名的字符串。转义可逆：
//! 非法字符按 UTF-8 字节编码为 `%XX`，`%` 本身也被转义，
//! 因此不同单词不会落到同一个目录。

/// 需要转义的字符
#[inline]
fn needs_escape(ch: char, position: usize) -> bool {
    matches!(ch, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '%')
        || ch.is_control()
        || (position == 0 && ch == '.')
}

/// 转义为安全的文件名分量
pub(crate) fn escape_path_component(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for (position, ch) in s.chars().enumerate() {
        if needs_escape(ch, position) {
            let mut buf = [0u8; 4];
            for byte in ch.encode_utf8(&mut buf).bytes() {
                out.push_str(&format!("%{:02X}", byte));
            }
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 还原 `escape_path_component` 的结果
    ///
    /// 输入不是合法的转义串时返回 None
    fn unescape_path_component(s: &str) -> Option<String> {
        let mut bytes = Vec::with_capacity(s.len());
        let raw = s.as_bytes();
        let mut i = 0;
        while i < raw.len() {
            if raw[i] == b'%' {
                let hex = s.get(i + 1..i + 3)?;
                bytes.push(u8::from_str_radix(hex, 16).ok()?);
                i += 3;
            } else {
                bytes.push(raw[i]);
                i += 1;
            }
        }
        String::from_utf8(bytes).ok()
    }

    #[test]
    fn test_plain_words_unchanged() {
        assert_eq!(escape_path_component("ich"), "ich");
        assert_eq!(escape_path_component("guten tag"), "guten tag");
        assert_eq!(escape_path_component("äpfel"), "äpfel");
    }

    #[test]
    fn test_illegal_characters_escaped() {
        assert_eq!(escape_path_component("a/b"), "a%2Fb");
        assert_eq!(escape_path_component("50%"), "50%25");
        assert_eq!(escape_path_component(".."), "%2E.");
        assert_eq!(escape_path_component("what?"), "what%3F");
        assert!(!escape_path_component("a\\b:c*d").contains(['\\', ':', '*']));
    }

    #[test]
    fn test_escape_is_reversible() {
        for s in ["ich", "a/b", "50%", "..", ".hidden", "x<y>z|w", "tab\there", "c'est", "%2F"] {
            let escaped = escape_path_component(s);
            assert_eq!(unescape_path_component(&escaped).as_deref(), Some(s));
        }
    }

    #[test]
    fn test_unescape_rejects_truncated_sequence() {
        assert_eq!(unescape_path_component("abc%2"), None);
        assert_eq!(unescape_path_component("abc%zz"), None);
    }
}
