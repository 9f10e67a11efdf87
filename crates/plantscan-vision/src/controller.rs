//! 캡처 컨트롤러 — 캡처 파이프라인 상태 머신.
//!
//! 카메라 수명주기, 프레임 캡처, 파일 로드를 조정하고
//! "현재 캡처된 이미지" 1장을 앱의 나머지 부분에 노출한다.
//!
//! ```text
//! Idle --open--> Opening --스트림 준비--> Streaming
//! Opening --권한/장치 에러--> Error
//! Streaming --capture--> Captured
//! Streaming --close--> Idle
//! Captured --close--> Idle
//! Idle/Streaming --load_file 성공--> Captured
//! 모든 상태 --load_file 실패--> Error (복구 가능)
//! Error --open/load_file--> Opening/Captured
//! ```
//!
//! 상태 변화는 `watch` 채널로 브로드캐스트된다 — 암묵적 콜백 대신
//! 명시적 구독 인터페이스.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use plantscan_core::config::CameraConfig;
use plantscan_core::error::CoreError;
use plantscan_core::models::capture::CaptureState;
use plantscan_core::models::image::CapturedImage;
use plantscan_core::ports::camera::{CameraDevice, StreamConstraints};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::capturer::FrameCapturer;
use crate::loader::LocalFileLoader;
use crate::session::CameraSession;

/// 캡처 컨트롤러
///
/// 컨트롤러 인스턴스당 카메라 세션과 진행 중인 작업은 각각 최대 1개.
/// 작업이 진행 중일 때 새 `open()`이 들어오면 이전 스트림을 닫고
/// 교체한다 (cancel-and-replace — 마지막 사용자 행동만 유효).
pub struct CaptureController {
    session: CameraSession,
    capturer: FrameCapturer,
    loader: LocalFileLoader,
    state: CaptureState,
    image: Option<CapturedImage>,
    state_tx: watch::Sender<CaptureState>,
    warmup_timeout: Duration,
    ready_poll: Duration,
}

impl CaptureController {
    /// 주입된 장치 캐퍼빌리티와 카메라 설정으로 컨트롤러 생성
    pub fn new(device: Arc<dyn CameraDevice>, config: &CameraConfig) -> Self {
        let (state_tx, _) = watch::channel(CaptureState::Idle);
        Self {
            session: CameraSession::new(
                device,
                StreamConstraints {
                    facing: config.facing,
                },
            ),
            capturer: FrameCapturer::new(),
            loader: LocalFileLoader::new(),
            state: CaptureState::Idle,
            image: None,
            state_tx,
            warmup_timeout: Duration::from_millis(config.warmup_timeout_ms),
            ready_poll: Duration::from_millis(config.ready_poll_ms.max(1)),
        }
    }

    /// 현재 상태
    pub fn state(&self) -> &CaptureState {
        &self.state
    }

    /// 현재 캡처 이미지 (`Captured` 상태에서만 `Some`)
    pub fn image(&self) -> Option<&CapturedImage> {
        self.image.as_ref()
    }

    /// 업로드용 이미지 참조 — 없으면 `NothingToUpload`.
    ///
    /// 업로드 실패 후에도 이미지는 보존되어 재캡처 없이 재시도할 수 있다.
    pub fn image_for_upload(&self) -> Result<&CapturedImage, CoreError> {
        self.image.as_ref().ok_or(CoreError::NothingToUpload)
    }

    /// 상태 변경 구독
    pub fn subscribe(&self) -> watch::Receiver<CaptureState> {
        self.state_tx.subscribe()
    }

    /// 카메라 세션이 활성인지
    pub fn is_camera_active(&self) -> bool {
        self.session.is_active()
    }

    fn set_state(&mut self, next: CaptureState) {
        debug!("상태 전이: {} → {}", self.state, next);
        self.state = next.clone();
        let _ = self.state_tx.send(next);
    }

    /// 카메라 열기: Opening을 거쳐 Streaming으로 전이한다.
    ///
    /// 이전 캡처 이미지는 폐기되고, 열려 있던 스트림은 교체된다.
    /// 권한/장치 에러와 워밍업 타임아웃은 Error 상태로 회복된다.
    pub async fn open(&mut self) -> Result<(), CoreError> {
        self.image = None;
        self.set_state(CaptureState::Opening);

        if let Err(e) = self.session.open().await {
            warn!("카메라 열기 실패: {e}");
            self.session.close();
            self.set_state(CaptureState::Error(e.user_message()));
            return Err(e);
        }

        match self.await_stream_ready().await {
            Ok((width, height)) => {
                info!("스트림 준비 완료: {width}x{height}");
                self.set_state(CaptureState::Streaming);
                Ok(())
            }
            Err(e) => {
                warn!("스트림 준비 실패: {e}");
                self.session.close();
                self.set_state(CaptureState::Error(e.user_message()));
                Err(e)
            }
        }
    }

    /// 준비 신호 대기 — 워밍업 한도를 넘으면 실패
    async fn await_stream_ready(&self) -> Result<(u32, u32), CoreError> {
        let deadline = tokio::time::Instant::now() + self.warmup_timeout;
        loop {
            if let Some(dims) = self.session.stream().and_then(|s| s.ready_dimensions()) {
                return Ok(dims);
            }
            if tokio::time::Instant::now() >= deadline {
                return Err(CoreError::DeviceUnavailable(format!(
                    "스트림 준비 타임아웃 ({}ms)",
                    self.warmup_timeout.as_millis()
                )));
            }
            tokio::time::sleep(self.ready_poll).await;
        }
    }

    /// 현재 프레임 캡처: Streaming → Captured.
    ///
    /// Captured 진입 시 항상 카메라를 닫는다 — 캡처 이미지를 검토하는
    /// 동안 장치 핸들을 붙잡지 않는다.
    /// 스트림이 아직 준비되지 않았으면 `NoActiveFrame`으로 실패하며
    /// 상태는 바뀌지 않는다 — 호출자가 그대로 재시도할 수 있다.
    pub fn capture(&mut self) -> Result<(), CoreError> {
        if self.state != CaptureState::Streaming {
            return Err(CoreError::Internal(format!(
                "Streaming 상태가 아님: {}",
                self.state
            )));
        }

        let stream = self.session.stream().ok_or(CoreError::NoActiveFrame)?;
        let image = match self.capturer.capture(stream) {
            Ok(image) => image,
            Err(CoreError::NoActiveFrame) => return Err(CoreError::NoActiveFrame),
            Err(e) => {
                warn!("프레임 캡처 실패: {e}");
                self.session.close();
                self.image = None;
                self.set_state(CaptureState::Error(e.user_message()));
                return Err(e);
            }
        };

        self.session.close();
        self.image = Some(image);
        self.set_state(CaptureState::Captured);
        Ok(())
    }

    /// 로컬 파일 로드: 성공 시 Opening/Streaming을 우회해 Captured로 전이.
    pub async fn load_file(&mut self, path: Option<&Path>) -> Result<(), CoreError> {
        match self.loader.load(path).await {
            Ok(image) => {
                // Captured 진입 시 카메라 닫기
                self.session.close();
                self.image = Some(image);
                self.set_state(CaptureState::Captured);
                Ok(())
            }
            Err(e) => {
                warn!("파일 로드 실패: {e}");
                self.session.close();
                self.image = None;
                self.set_state(CaptureState::Error(e.user_message()));
                Err(e)
            }
        }
    }

    /// 닫기/리셋: 카메라를 닫고 Idle로 복귀한다. 캡처 이미지는 폐기.
    pub fn close(&mut self) {
        self.session.close();
        self.image = None;
        if self.state != CaptureState::Idle {
            self.set_state(CaptureState::Idle);
        }
    }
}
