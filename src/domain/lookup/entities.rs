//! Lookup Context - Entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 单条发音录音
///
/// 缓存身份为 (LookupKey, index)，不使用远程 URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PronunciationItem {
    /// 在提供方排序中的序号（从 0 开始）
    pub index: u32,
    /// 远程音频引用（URL）
    pub remote_audio_ref: String,
    /// 评分（仅用于展示）
    #[serde(default)]
    pub rating: i32,
    #[serde(default)]
    pub votes: i32,
    #[serde(default)]
    pub positive_votes: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sex: Option<String>,
}

impl PronunciationItem {
    pub fn new(index: u32, remote_audio_ref: impl Into<String>) -> Self {
        Self {
            index,
            remote_audio_ref: remote_audio_ref.into(),
            rating: 0,
            votes: 0,
            positive_votes: 0,
            username: None,
            country: None,
            sex: None,
        }
    }

    /// 展示用的一行摘要
    pub fn summary(&self) -> String {
        let who = self.username.as_deref().unwrap_or("unknown");
        match &self.country {
            Some(country) => format!(
                "#{} by {} ({}), rating {}, {} votes",
                self.index + 1,
                who,
                country,
                self.rating,
                self.votes
            ),
            None => format!(
                "#{} by {}, rating {}, {} votes",
                self.index + 1,
                who,
                self.rating,
                self.votes
            ),
        }
    }
}

/// 查询结果 - 按提供方顺序（评分降序）排列
///
/// 空结果是合法且可缓存的结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupResult {
    pub items: Vec<PronunciationItem>,
    #[serde(default = "Utc::now")]
    pub fetched_at: DateTime<Utc>,
}

impl LookupResult {
    pub fn new(items: Vec<PronunciationItem>) -> Self {
        Self {
            items,
            fetched_at: Utc::now(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

impl PartialEq for LookupResult {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl Eq for LookupResult {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_ignores_fetch_time() {
        let items = vec![PronunciationItem::new(0, "http://a"), PronunciationItem::new(1, "http://b")];
        let a = LookupResult::new(items.clone());
        let mut b = LookupResult::new(items);
        b.fetched_at = b.fetched_at - chrono::Duration::days(3);
        assert_eq!(a, b);
    }

    #[test]
    fn test_summary_is_one_based() {
        let mut item = PronunciationItem::new(2, "http://x");
        item.username = Some("anna".to_string());
        item.country = Some("Germany".to_string());
        item.rating = 4;
        assert_eq!(item.summary(), "#3 by anna (Germany), rating 4, 0 votes");
    }

    #[test]
    fn test_deserialize_tolerates_missing_display_fields() {
        let json = r#"{"items":[{"index":0,"remote_audio_ref":"http://a"}]}"#;
        let result: LookupResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result.items[0].rating, 0);
    }
}
