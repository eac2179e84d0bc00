//! Metadata Fetcher - 缓存优先的元数据获取
//!
//! 命中缓存直接返回；未命中（或强制刷新）时调用一次远程提供方，
//! 成功后尽力写回缓存，写入失败不影响本次结果。

use std::sync::Arc;
use std::time::Instant;

use crate::application::ports::{CacheStorePort, FetchError, PronunciationProviderPort};
use crate::domain::lookup::{LookupKey, LookupResult};

pub struct MetadataFetcher {
    cache: Arc<dyn CacheStorePort>,
    provider: Arc<dyn PronunciationProviderPort>,
    /// 记录远程请求耗时
    log_timing: bool,
}

impl MetadataFetcher {
    pub fn new(
        cache: Arc<dyn CacheStorePort>,
        provider: Arc<dyn PronunciationProviderPort>,
    ) -> Self {
        Self {
            cache,
            provider,
            log_timing: false,
        }
    }

    pub fn with_timing(mut self, log_timing: bool) -> Self {
        self.log_timing = log_timing;
        self
    }

    pub async fn fetch(
        &self,
        key: &LookupKey,
        force_refresh: bool,
    ) -> Result<LookupResult, FetchError> {
        if !force_refresh {
            if let Some(result) = self.cache.read_metadata(key).await {
                return Ok(result);
            }
        }

        let started = Instant::now();
        let result = self.provider.fetch(key).await?;
        if self.log_timing {
            tracing::info!(
                word = %key.word(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Provider request finished"
            );
        }

        if let Err(e) = self.cache.write_metadata(key, &result).await {
            tracing::warn!(
                word = %key.word(),
                lang = %key.lang(),
                error = %e,
                "Could not save pronunciation list to cache"
            );
        }

        Ok(result)
    }
}
