//! Forvo Adapter - 发音元数据与音频下载

mod http_forvo_client;

pub use http_forvo_client::{HttpForvoClient, HttpForvoClientConfig};
