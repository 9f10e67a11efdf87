//! 로컬 파일 로더.
//!
//! 선택된 파일의 바이트를 그대로 읽어 `CapturedImage`로 감싼다.
//! 이 단계에서는 디코딩하지 않으므로 해상도는 0으로 남는다.

use std::path::Path;

use plantscan_core::error::CoreError;
use plantscan_core::models::image::CapturedImage;
use tracing::info;

/// 로컬 파일 로더 — 카메라를 우회하는 대체 입력 경로
pub struct LocalFileLoader;

impl LocalFileLoader {
    /// 새 로더 생성
    pub fn new() -> Self {
        Self
    }

    /// 선택된 파일을 메모리로 읽어 이미지로 감싼다.
    ///
    /// `None`(선택 안 함) 또는 빈 파일은 `EmptyInput`,
    /// I/O 실패는 `ReadFailure`.
    pub async fn load(&self, path: Option<&Path>) -> Result<CapturedImage, CoreError> {
        let path = path.ok_or_else(|| CoreError::EmptyInput("선택된 파일 없음".to_string()))?;

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| CoreError::ReadFailure(format!("{}: {e}", path.display())))?;

        if bytes.is_empty() {
            return Err(CoreError::EmptyInput(format!(
                "빈 파일: {}",
                path.display()
            )));
        }

        info!("파일 로드: {} ({} bytes)", path.display(), bytes.len());
        Ok(CapturedImage::from_file(bytes))
    }
}

impl Default for LocalFileLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plantscan_core::models::image::ImageOrigin;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("leaf.png");
        std::fs::write(&path, b"png-bytes-here").unwrap();

        let image = LocalFileLoader::new().load(Some(&path)).await.unwrap();
        assert_eq!(image.png_data(), b"png-bytes-here");
        assert_eq!(image.origin(), ImageOrigin::FileUpload);
        // 디코딩 없이 통과시키므로 해상도는 0
        assert_eq!(image.resolution(), (0, 0));
    }

    #[tokio::test]
    async fn no_selection_is_empty_input() {
        let err = LocalFileLoader::new().load(None).await.unwrap_err();
        assert!(matches!(err, CoreError::EmptyInput(_)));
    }

    #[tokio::test]
    async fn empty_file_is_empty_input() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.png");
        std::fs::write(&path, b"").unwrap();

        let err = LocalFileLoader::new().load(Some(&path)).await.unwrap_err();
        assert!(matches!(err, CoreError::EmptyInput(_)));
    }

    #[tokio::test]
    async fn missing_file_is_read_failure() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no-such-file.png");

        let err = LocalFileLoader::new().load(Some(&path)).await.unwrap_err();
        assert!(matches!(err, CoreError::ReadFailure(_)));
    }
}
