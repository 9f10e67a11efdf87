//! 수신 파일 싱크 구현.

use async_trait::async_trait;
use plantscan_core::error::CoreError;
use plantscan_core::models::ingest::IngestedFile;
use plantscan_core::ports::ingest_sink::IngestSink;
use tracing::debug;

/// 폐기 싱크 — 수신 확인 후 바이트를 버린다.
///
/// 저장/처리 협력자가 붙는 확장 지점. 이 코어는 영속화하지 않는다.
pub struct DiscardSink;

#[async_trait]
impl IngestSink for DiscardSink {
    async fn store(&self, file: &IngestedFile) -> Result<(), CoreError> {
        debug!(
            "수신 파일 폐기: {} ({} bytes)",
            file.original_name, file.size_bytes
        );
        Ok(())
    }
}
