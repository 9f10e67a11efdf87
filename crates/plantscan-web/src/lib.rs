//! # plantscan-web
//!
//! 업로드 수신 서버.
//! Axum 기반 — multipart 업로드 수신(`/upload-file`)과 연결 확인(`/test`).
//!
//! 요청은 각각 독립적·무상태로 처리되며, 업로드 버퍼는 요청 스코프로
//! 응답 전송과 함께 해제된다.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod sink;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method};
use axum::Router;
use plantscan_core::config::WebConfig;
use plantscan_core::ports::ingest_sink::IngestSink;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::sink::DiscardSink;

/// 포트 바인드 최대 시도 횟수
const MAX_PORT_ATTEMPTS: u16 = 10;

/// 바디 제한 여유분 — 멀티파트 경계/헤더 오버헤드
const BODY_LIMIT_SLACK: usize = 64 * 1024;

/// 웹 서버 애플리케이션 상태
#[derive(Clone)]
pub struct AppState {
    /// 수신 파일 싱크 (기본: 확인 후 폐기)
    pub sink: Arc<dyn IngestSink>,
    /// 업로드 크기 상한 (바이트)
    pub max_upload_bytes: usize,
}

/// 업로드 수신 서버
pub struct WebServer {
    config: WebConfig,
    state: AppState,
}

impl WebServer {
    /// 새 웹 서버 생성 (기본 싱크: 폐기)
    pub fn new(config: WebConfig) -> Self {
        let state = AppState {
            sink: Arc::new(DiscardSink),
            max_upload_bytes: config.max_upload_bytes,
        };
        Self { config, state }
    }

    /// 수신 파일 싱크 교체 — 저장/처리 협력자 플러그인 지점
    pub fn with_sink(mut self, sink: Arc<dyn IngestSink>) -> Self {
        self.state.sink = sink;
        self
    }

    /// 라우터 구성 — `run()`과 테스트가 공유한다
    pub fn router(&self) -> Router {
        // CORS: 설정된 클라이언트 오리진만, credentials 포함
        let cors = match self.config.client_origin.parse::<HeaderValue>() {
            Ok(origin) => CorsLayer::new()
                .allow_origin(origin)
                .allow_methods([Method::POST])
                .allow_headers([header::CONTENT_TYPE])
                .allow_credentials(true),
            Err(e) => {
                warn!(
                    "CORS 오리진 파싱 실패 ({}): {e} — 모든 오리진 허용 (credentials 제외)",
                    self.config.client_origin
                );
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any)
            }
        };

        routes::routes()
            .layer(cors)
            .layer(TraceLayer::new_for_http())
            .layer(DefaultBodyLimit::max(
                self.config.max_upload_bytes.saturating_add(BODY_LIMIT_SLACK),
            ))
            .with_state(self.state.clone())
    }

    /// 서버 실행
    ///
    /// 기본 포트에서 시작하여, 포트가 이미 사용 중이면 다음 포트를 시도한다.
    /// 최대 10개 포트를 시도한 후 실패하면 에러를 반환한다.
    ///
    /// # Arguments
    /// * `shutdown_rx` - 종료 신호 수신 채널
    pub async fn run(self, mut shutdown_rx: watch::Receiver<bool>) -> Result<(), std::io::Error> {
        let host = if self.config.allow_external {
            "0.0.0.0"
        } else {
            "127.0.0.1"
        };

        let app = self.router();

        // 포트 바인드 시도 (최대 MAX_PORT_ATTEMPTS번)
        let base_port = self.config.port;
        let mut last_error = None;

        for attempt in 0..MAX_PORT_ATTEMPTS {
            let port = base_port.saturating_add(attempt);

            // 포트 오버플로우 체크
            if port < base_port && attempt > 0 {
                break;
            }

            let addr: SocketAddr = match format!("{}:{}", host, port).parse() {
                Ok(a) => a,
                Err(e) => {
                    error!("잘못된 주소 {}:{} — {}", host, port, e);
                    continue;
                }
            };

            match TcpListener::bind(addr).await {
                Ok(listener) => {
                    if attempt > 0 {
                        warn!("포트 {} 사용 불가, 대체 포트 {} 사용", base_port, port);
                    }
                    info!("업로드 수신 서버 시작: http://{}", addr);

                    // Graceful shutdown과 함께 서버 실행
                    axum::serve(listener, app)
                        .with_graceful_shutdown(async move {
                            loop {
                                if *shutdown_rx.borrow() {
                                    info!("서버 종료 신호 수신");
                                    break;
                                }
                                if shutdown_rx.changed().await.is_err() {
                                    break;
                                }
                            }
                        })
                        .await?;

                    info!("업로드 수신 서버 종료");
                    return Ok(());
                }
                Err(e) => {
                    // AddrInUse 에러인 경우 다음 포트 시도
                    if e.kind() == std::io::ErrorKind::AddrInUse {
                        warn!("포트 {} 이미 사용 중, 다음 포트 시도...", port);
                        last_error = Some(e);
                        continue;
                    }
                    return Err(e);
                }
            }
        }

        // 모든 시도 실패
        Err(last_error.unwrap_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::AddrInUse,
                format!(
                    "포트 {}-{} 모두 사용 불가",
                    base_port,
                    base_port.saturating_add(MAX_PORT_ATTEMPTS - 1)
                ),
            )
        }))
    }

    /// 서버 URL 반환
    pub fn url(&self) -> String {
        format!("http://localhost:{}", self.config.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn default_config() {
        let config = WebConfig::default();
        assert_eq!(config.port, 5000);
        assert!(!config.allow_external);
        assert_eq!(config.client_origin, "http://localhost:5173");
    }

    #[test]
    fn web_server_url() {
        let server = WebServer::new(WebConfig::default());
        assert_eq!(server.url(), "http://localhost:5000");
    }

    #[test]
    #[allow(clippy::assertions_on_constants)]
    fn max_port_attempts_is_reasonable() {
        // 최소 1번, 최대 100번 사이
        assert!(MAX_PORT_ATTEMPTS >= 1);
        assert!(MAX_PORT_ATTEMPTS <= 100);
    }

    #[tokio::test]
    async fn graceful_shutdown_on_signal() {
        let config = WebConfig {
            port: 0, // 임시 포트
            ..WebConfig::default()
        };
        let server = WebServer::new(config);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let handle = tokio::spawn(async move { server.run(shutdown_rx).await });

        // 서버가 기동할 시간을 준 뒤 종료 신호
        tokio::time::sleep(Duration::from_millis(50)).await;
        shutdown_tx.send(true).unwrap();

        let result = tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("종료 신호 후 서버가 멈추지 않음")
            .unwrap();
        assert!(result.is_ok());
    }
}
