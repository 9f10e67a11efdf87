//! 애플리케이션 설정 구조체.
//!
//! 서버 URL, 카메라 워밍업 한도, 업로드 필드/파일명, 수신 서버 포트 등
//! 런타임 설정을 정의한다. `config_manager`를 통해 파일에서 로드.

use serde::{Deserialize, Serialize};

use crate::ports::camera::CameraFacing;

/// 최상위 애플리케이션 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// 백엔드 서버 연결 설정
    pub server: ServerConfig,
    /// 카메라 설정
    #[serde(default)]
    pub camera: CameraConfig,
    /// 업로드 설정
    #[serde(default)]
    pub upload: UploadConfig,
    /// 수신 서버 설정
    #[serde(default)]
    pub web: WebConfig,
}

impl AppConfig {
    /// 기본 설정 생성
    pub fn default_config() -> Self {
        Self {
            server: ServerConfig::default(),
            camera: CameraConfig::default(),
            upload: UploadConfig::default(),
            web: WebConfig::default(),
        }
    }
}

/// 백엔드 서버 연결 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// 업로드 대상 서버 베이스 URL
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// 요청 타임아웃 (초)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// 카메라 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraConfig {
    /// 요청할 카메라 방향 (피사체 촬영은 후면)
    #[serde(default)]
    pub facing: CameraFacing,
    /// 스트림 준비(워밍업) 대기 한도 (밀리초). 초과 시 Error 상태로 전이.
    #[serde(default = "default_warmup_timeout_ms")]
    pub warmup_timeout_ms: u64,
    /// 준비 신호 폴링 간격 (밀리초)
    #[serde(default = "default_ready_poll_ms")]
    pub ready_poll_ms: u64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            facing: CameraFacing::default(),
            warmup_timeout_ms: default_warmup_timeout_ms(),
            ready_poll_ms: default_ready_poll_ms(),
        }
    }
}

/// 업로드 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// 멀티파트 필드 이름 (서버와 공유되는 와이어 계약)
    #[serde(default = "default_field_name")]
    pub field_name: String,
    /// 업로드 파일 이름
    #[serde(default = "default_upload_filename")]
    pub filename: String,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            field_name: default_field_name(),
            filename: default_upload_filename(),
        }
    }
}

/// 수신 서버 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    /// 리스닝 포트
    #[serde(default = "default_web_port")]
    pub port: u16,
    /// 외부 접속 허용 여부 (false면 127.0.0.1만)
    #[serde(default)]
    pub allow_external: bool,
    /// CORS 허용 클라이언트 오리진 (credentials 포함)
    #[serde(default = "default_client_origin")]
    pub client_origin: String,
    /// 업로드 크기 상한 (바이트). 초과 시 413 거부.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            port: default_web_port(),
            allow_external: false,
            client_origin: default_client_origin(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_warmup_timeout_ms() -> u64 {
    5_000
}

fn default_ready_poll_ms() -> u64 {
    50
}

fn default_field_name() -> String {
    "file".to_string()
}

fn default_upload_filename() -> String {
    "plant-leaf.png".to_string()
}

fn default_web_port() -> u16 {
    5_000
}

fn default_client_origin() -> String {
    "http://localhost:5173".to_string()
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}
