//! 캡처된 이미지 모델.
//!
//! 라이브 스트림 또는 로컬 파일에서 생성된 단일 이미지.
//! 생성 후 불변이며, 업로드 시도 동안 UploadClient가 빌려 쓴다.

use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 이미지 출처
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageOrigin {
    /// 라이브 카메라 스트림에서 캡처
    Camera,
    /// 로컬 파일에서 로드
    FileUpload,
}

/// 캡처된 이미지 — PNG 인코딩된 바이트 + 출처 메타데이터
///
/// 생성 후 불변. `Captured` 상태의 컨트롤러가 단독 소유하며,
/// 업로드 재시도를 위해 업로드 실패 후에도 보존된다.
#[derive(Debug, Clone)]
pub struct CapturedImage {
    /// 캡처 식별자 (로그 상관관계용)
    id: Uuid,
    /// 인코딩된 이미지 바이트 (카메라 출처는 항상 PNG, 파일 출처는 원본 그대로)
    png_data: Vec<u8>,
    /// 원본 해상도 너비 (파일 출처는 디코딩하지 않으므로 0)
    source_width: u32,
    /// 원본 해상도 높이 (파일 출처는 0)
    source_height: u32,
    /// 출처
    origin: ImageOrigin,
    /// 생성 시각
    captured_at: DateTime<Utc>,
}

impl CapturedImage {
    /// 카메라 프레임에서 캡처된 이미지 생성
    pub fn from_camera(png_data: Vec<u8>, source_width: u32, source_height: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            png_data,
            source_width,
            source_height,
            origin: ImageOrigin::Camera,
            captured_at: Utc::now(),
        }
    }

    /// 로컬 파일 바이트에서 이미지 생성.
    ///
    /// 이 단계에서는 디코딩하지 않으므로 해상도는 0으로 남는다.
    pub fn from_file(bytes: Vec<u8>) -> Self {
        Self {
            id: Uuid::new_v4(),
            png_data: bytes,
            source_width: 0,
            source_height: 0,
            origin: ImageOrigin::FileUpload,
            captured_at: Utc::now(),
        }
    }

    /// 캡처 식별자
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// 인코딩된 이미지 바이트
    pub fn png_data(&self) -> &[u8] {
        &self.png_data
    }

    /// 원본 해상도 (width, height)
    pub fn resolution(&self) -> (u32, u32) {
        (self.source_width, self.source_height)
    }

    /// 이미지 출처
    pub fn origin(&self) -> ImageOrigin {
        self.origin
    }

    /// 생성 시각
    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }

    /// 바이트 길이
    pub fn len(&self) -> usize {
        self.png_data.len()
    }

    /// 바이트가 비어 있는지
    pub fn is_empty(&self) -> bool {
        self.png_data.is_empty()
    }

    /// 미리보기용 data URL (`data:image/png;base64,...`)
    pub fn to_data_url(&self) -> String {
        format!("data:image/png;base64,{}", B64.encode(&self.png_data))
    }
}
