//! 수신 파일 싱크 포트.
//!
//! 서버 측 저장/처리 협력자. 이 코어의 기본 구현은 수신 확인 후
//! 바이트를 폐기한다 (`plantscan-web`의 `DiscardSink`).

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::ingest::IngestedFile;

/// 수신 파일 싱크 — 검증된 업로드 바이트의 인계 지점
#[async_trait]
pub trait IngestSink: Send + Sync {
    /// 검증된 수신 파일을 인계한다.
    async fn store(&self, file: &IngestedFile) -> Result<(), CoreError>;
}
