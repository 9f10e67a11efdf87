//! 파일 수신 엔드포인트.
//!
//! POST /upload-file — multipart/form-data에서 `file` 필드 1개를 받아
//! 메모리에 버퍼링한 뒤 싱크에 인계하고 수신 확인을 응답한다.
//! 버퍼는 요청 스코프 — 응답과 함께 해제된다.

use axum::extract::multipart::{Multipart, MultipartRejection};
use axum::extract::State;
use axum::Json;
use plantscan_core::models::ingest::IngestedFile;
use plantscan_core::models::upload::UploadAck;
use tracing::info;

use crate::error::ApiError;
use crate::AppState;

/// 업로드 필드 이름 (클라이언트와 공유되는 와이어 계약)
const FILE_FIELD: &str = "file";

/// 파일 이름이 없을 때의 대체 이름
const FALLBACK_NAME: &str = "upload.bin";

/// 파일 업로드 수신
///
/// POST /upload-file
pub async fn upload_file(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadAck>, ApiError> {
    // multipart가 아닌 본문은 malformed로 취급한다
    let mut multipart =
        multipart.map_err(|e| ApiError::InternalFailure(format!("멀티파트 본문 아님: {e}")))?;

    let mut received: Option<IngestedFile> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                return Err(ApiError::InternalFailure(format!(
                    "멀티파트 파싱 실패: {e}"
                )))
            }
        };

        if field.name() != Some(FILE_FIELD) {
            // 단일 필드 계약 — 다른 필드는 무시
            continue;
        }

        let original_name = field.file_name().unwrap_or(FALLBACK_NAME).to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::InternalFailure(format!("본문 버퍼링 실패: {e}")))?;

        if bytes.len() > state.max_upload_bytes {
            return Err(ApiError::PayloadTooLarge);
        }

        received = Some(IngestedFile::new(bytes.to_vec(), original_name));
        break;
    }

    let Some(file) = received else {
        return Err(ApiError::PayloadMissing);
    };
    if file.size_bytes == 0 {
        return Err(ApiError::PayloadMissing);
    }

    info!("파일 수신: {} ({} bytes)", file.original_name, file.size_bytes);

    state.sink.store(&file).await?;

    Ok(Json(UploadAck {
        message: "File received".to_string(),
        filename: file.original_name.clone(),
    }))
}
