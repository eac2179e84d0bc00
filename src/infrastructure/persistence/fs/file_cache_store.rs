//! File Cache Store - 基于目录树的元数据/音频缓存
//!
//! 目录布局:
//! ```text
//! {root}/{lang}/{word}/.resp.json
//! {root}/{lang}/{word}/{word}-01.mp3
//! {root}/{lang}/{word}/{word}-02.mp3
//! ```
//! word 与 lang 均经过 `escape_path_component` 转义。

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use super::path_escape::escape_path_component;
use crate::application::ports::{CacheError, CacheStorePort};
use crate::domain::lookup::{LookupKey, LookupResult};

/// 元数据文件名
const METADATA_FILE_NAME: &str = ".resp.json";

/// 音频文件扩展名
const AUDIO_EXTENSION: &str = "mp3";

/// 文件系统缓存
pub struct FileCacheStore {
    /// 缓存根目录
    root: PathBuf,
}

impl FileCacheStore {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// 某个查询键的缓存目录
    pub fn entry_dir(&self, key: &LookupKey) -> PathBuf {
        self.root
            .join(escape_path_component(key.lang()))
            .join(escape_path_component(key.word()))
    }
}

#[async_trait]
impl CacheStorePort for FileCacheStore {
    fn metadata_path(&self, key: &LookupKey) -> PathBuf {
        self.entry_dir(key).join(METADATA_FILE_NAME)
    }

    fn audio_path(&self, key: &LookupKey, index: u32) -> PathBuf {
        let word = escape_path_component(key.word());
        self.entry_dir(key).join(format!(
            "{}-{:02}.{}",
            word,
            u64::from(index) + 1,
            AUDIO_EXTENSION
        ))
    }

    async fn read_metadata(&self, key: &LookupKey) -> Option<LookupResult> {
        let path = self.metadata_path(key);

        let data = match fs::read(&path).await {
            Ok(data) => data,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "Metadata cache miss");
                return None;
            }
        };

        match serde_json::from_slice::<LookupResult>(&data) {
            Ok(result) => {
                tracing::debug!(
                    path = %path.display(),
                    items = result.len(),
                    "Metadata cache hit"
                );
                Some(result)
            }
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "Corrupt metadata cache, ignoring");
                None
            }
        }
    }

    async fn write_metadata(
        &self,
        key: &LookupKey,
        result: &LookupResult,
    ) -> Result<(), CacheError> {
        let data = serde_json::to_vec_pretty(result)
            .map_err(|e| CacheError::SerializationError(e.to_string()))?;
        let path = self.metadata_path(key);
        write_atomic(&path, &data).await?;

        tracing::debug!(path = %path.display(), items = result.len(), "Metadata cached");
        Ok(())
    }

    async fn audio_exists(&self, path: &Path) -> bool {
        fs::try_exists(path).await.unwrap_or(false)
    }

    async fn write_audio(&self, path: &Path, data: &[u8]) -> Result<(), CacheError> {
        write_atomic(path, data).await?;
        tracing::debug!(path = %path.display(), size_bytes = data.len(), "Audio cached");
        Ok(())
    }
}

/// 原子写入
///
/// 先写入同目录下的唯一临时文件，完整落盘后再 rename 到目标路径。
/// 任何一步失败都会删除临时文件，目标路径上不会出现残缺文件。
async fn write_atomic(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent).await?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let temp_path = parent.join(format!(".{}.{}.tmp", file_name, Uuid::new_v4().simple()));

    let result = write_then_rename(&temp_path, path, data).await;
    if result.is_err() {
        let _ = fs::remove_file(&temp_path).await;
    }
    result
}

async fn write_then_rename(temp_path: &Path, path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(temp_path).await?;
    file.write_all(data).await?;
    file.sync_all().await?;
    drop(file);
    fs::rename(temp_path, path).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::lookup::PronunciationItem;
    use tempfile::tempdir;

    fn key(word: &str) -> LookupKey {
        LookupKey::new(word, "de").unwrap()
    }

    fn sample_result(n: u32) -> LookupResult {
        LookupResult::new(
            (0..n)
                .map(|i| {
                    let mut item = PronunciationItem::new(i, format!("https://audio/{}.mp3", i));
                    item.rating = (n - i) as i32;
                    item.username = Some(format!("user{}", i));
                    item
                })
                .collect(),
        )
    }

    #[test]
    fn test_paths_are_normalized_and_deterministic() {
        let store = FileCacheStore::new("/cache");
        assert_eq!(store.metadata_path(&key("Wort")), store.metadata_path(&key("wort")));
        assert_eq!(
            store.metadata_path(&key("wort")),
            PathBuf::from("/cache/de/wort/.resp.json")
        );
        assert_eq!(
            store.audio_path(&key("Ich"), 0),
            PathBuf::from("/cache/de/ich/ich-01.mp3")
        );
        assert_eq!(
            store.audio_path(&key("ich"), 11),
            PathBuf::from("/cache/de/ich/ich-12.mp3")
        );
    }

    #[test]
    fn test_word_cannot_escape_root() {
        let store = FileCacheStore::new("/cache");
        let path = store.metadata_path(&key("../../etc/passwd"));
        assert_eq!(path.parent().unwrap().parent().unwrap(), Path::new("/cache/de"));
    }

    #[tokio::test]
    async fn test_metadata_round_trip() {
        let dir = tempdir().unwrap();
        let store = FileCacheStore::new(dir.path());
        let result = sample_result(4);

        store.write_metadata(&key("ich"), &result).await.unwrap();
        let read = store.read_metadata(&key("ICH")).await.unwrap();

        assert_eq!(read, result);
        assert_eq!(read.items[3].username.as_deref(), Some("user3"));
    }

    #[tokio::test]
    async fn test_empty_result_is_cacheable() {
        let dir = tempdir().unwrap();
        let store = FileCacheStore::new(dir.path());

        store.write_metadata(&key("xyzzy"), &LookupResult::empty()).await.unwrap();
        let read = store.read_metadata(&key("xyzzy")).await;
        assert_eq!(read, Some(LookupResult::empty()));
    }

    #[tokio::test]
    async fn test_missing_and_corrupt_metadata_are_misses() {
        let dir = tempdir().unwrap();
        let store = FileCacheStore::new(dir.path());
        assert!(store.read_metadata(&key("ich")).await.is_none());

        let path = store.metadata_path(&key("ich"));
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, b"{not json").unwrap();
        assert!(store.read_metadata(&key("ich")).await.is_none());
    }

    #[tokio::test]
    async fn test_metadata_overwrite_last_writer_wins() {
        let dir = tempdir().unwrap();
        let store = FileCacheStore::new(dir.path());

        store.write_metadata(&key("ich"), &sample_result(3)).await.unwrap();
        store.write_metadata(&key("ich"), &sample_result(1)).await.unwrap();

        assert_eq!(store.read_metadata(&key("ich")).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_write_audio_and_exists() {
        let dir = tempdir().unwrap();
        let store = FileCacheStore::new(dir.path());
        let path = store.audio_path(&key("ich"), 0);

        assert!(!store.audio_exists(&path).await);
        store.write_audio(&path, b"ID3 fake mp3").await.unwrap();
        assert!(store.audio_exists(&path).await);
        assert_eq!(std::fs::read(&path).unwrap(), b"ID3 fake mp3");
    }

    #[tokio::test]
    async fn test_failed_directory_creation_leaves_no_file() {
        let dir = tempdir().unwrap();
        let store = FileCacheStore::new(dir.path());
        // 用普通文件占住语言目录的位置
        std::fs::write(dir.path().join("de"), b"").unwrap();

        let path = store.audio_path(&key("ich"), 0);
        assert!(store.write_audio(&path, b"data").await.is_err());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_failed_rename_removes_temp_file() {
        let dir = tempdir().unwrap();
        let store = FileCacheStore::new(dir.path());
        let path = store.audio_path(&key("ich"), 0);
        // 目标位置是一个非空目录，rename 必然失败
        std::fs::create_dir_all(path.join("occupied")).unwrap();

        assert!(store.write_audio(&path, b"data").await.is_err());
        assert!(path.is_dir());

        let leftovers: Vec<_> = std::fs::read_dir(path.parent().unwrap())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }
}
