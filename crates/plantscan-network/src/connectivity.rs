//! 연결 확인 프로브.
//!
//! `/test` 엔드포인트로 클라이언트-서버 연결을 확인하고,
//! 연속 실패 기준으로 온라인/오프라인 상태를 추적한다.
//! 상태 변화는 watch 채널로 브로드캐스트된다.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use plantscan_core::error::CoreError;
use plantscan_core::models::upload::TestMessage;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// 연결 확인 경로
const TEST_PATH: &str = "/test";

/// 기본 오프라인 전환 임계값 (연속 실패 횟수)
const DEFAULT_OFFLINE_THRESHOLD: u64 = 3;

/// 연결 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    /// 연결됨
    Connected,
    /// 연결 끊김
    Disconnected,
}

impl std::fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionStatus::Connected => write!(f, "Connected"),
            ConnectionStatus::Disconnected => write!(f, "Disconnected"),
        }
    }
}

/// 연결 확인 프로브
///
/// 서버의 `/test` 엔드포인트에 메시지를 보내고 에코 응답을 확인한다.
pub struct ConnectivityProbe {
    client: reqwest::Client,
    base_url: String,
    /// 연속 실패 횟수
    failure_count: AtomicU64,
    /// 오프라인 전환 임계값
    offline_threshold: u64,
    /// 상태 변경 브로드캐스트
    status_tx: watch::Sender<ConnectionStatus>,
    status_rx: watch::Receiver<ConnectionStatus>,
}

impl ConnectivityProbe {
    /// 새 프로브 생성
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CoreError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CoreError::Network(format!("HTTP 클라이언트 빌드 실패: {e}")))?;

        let (status_tx, status_rx) = watch::channel(ConnectionStatus::Connected);
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            failure_count: AtomicU64::new(0),
            offline_threshold: DEFAULT_OFFLINE_THRESHOLD,
            status_tx,
            status_rx,
        })
    }

    /// 오프라인 전환 임계값 설정
    pub fn with_offline_threshold(mut self, threshold: u64) -> Self {
        self.offline_threshold = threshold.max(1);
        self
    }

    /// 현재 연결 상태
    pub fn status(&self) -> ConnectionStatus {
        *self.status_rx.borrow()
    }

    /// 연속 실패 횟수
    pub fn failure_count(&self) -> u64 {
        self.failure_count.load(Ordering::Relaxed)
    }

    /// 상태 변경 수신기 생성
    pub fn subscribe(&self) -> watch::Receiver<ConnectionStatus> {
        self.status_rx.clone()
    }

    /// 연결 확인 실행 — 서버의 에코 메시지를 반환한다.
    pub async fn probe(&self, message: &str) -> Result<String, CoreError> {
        let body = TestMessage {
            message: message.to_string(),
        };

        let resp = self
            .client
            .post(format!("{}{}", self.base_url, TEST_PATH))
            .json(&body)
            .send()
            .await;

        match resp {
            Ok(resp) if resp.status().is_success() => {
                let echo: TestMessage = resp
                    .json()
                    .await
                    .map_err(|e| CoreError::Internal(format!("에코 응답 파싱 실패: {e}")))?;
                self.record_success();
                debug!("연결 확인 성공: {}", echo.message);
                Ok(echo.message)
            }
            Ok(resp) => {
                let status = resp.status().as_u16();
                self.record_failure();
                Err(CoreError::ServerRejected {
                    status,
                    message: resp.text().await.unwrap_or_default(),
                })
            }
            Err(e) => {
                self.record_failure();
                Err(CoreError::Network(format!("연결 확인 실패: {e}")))
            }
        }
    }

    /// 연결 성공 기록 — 실패 카운터 리셋, 온라인 전환
    fn record_success(&self) {
        let had_failures = self.failure_count.swap(0, Ordering::Relaxed) > 0;
        if had_failures || self.status() == ConnectionStatus::Disconnected {
            info!("서버 연결 확인됨 - 온라인");
        }
        let _ = self.status_tx.send(ConnectionStatus::Connected);
    }

    /// 연결 실패 기록 — 임계값 도달 시 오프라인 전환
    fn record_failure(&self) {
        let count = self.failure_count.fetch_add(1, Ordering::Relaxed) + 1;
        debug!("연결 실패 기록 (연속 {}회)", count);

        if count >= self.offline_threshold {
            warn!("연속 {}회 실패 - 오프라인 전환", count);
            let _ = self.status_tx.send(ConnectionStatus::Disconnected);
        }
    }
}
