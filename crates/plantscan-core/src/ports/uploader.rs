//! 이미지 업로더 포트.
//!
//! 구현: `plantscan-network` crate (reqwest multipart)

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::image::CapturedImage;
use crate::models::upload::UploadResult;

/// 이미지 업로더 — 캡처된 이미지 1장을 백엔드에 전송
#[async_trait]
pub trait ImageUploader: Send + Sync {
    /// 단일 업로드 시도.
    ///
    /// 호출당 정확히 1회 시도 — 암묵적 재시도 없음 (at-most-once).
    /// 재시도가 필요하면 호출자가 명시적으로 다시 호출한다.
    /// 빈 이미지는 네트워크 호출 없이 `NothingToUpload`로 실패한다.
    async fn upload(&self, image: &CapturedImage) -> Result<UploadResult, CoreError>;
}
