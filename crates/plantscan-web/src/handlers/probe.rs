//! 연결 확인 엔드포인트.
//!
//! POST /test — 클라이언트가 보낸 메시지를 로그로 남기고
//! 고정 확인 메시지를 응답한다.

use axum::Json;
use plantscan_core::models::upload::TestMessage;
use tracing::info;

/// 연결 확인 응답 메시지
const CONNECTED_MESSAGE: &str = "Client and Server connected successfully!";

/// 연결 확인
///
/// POST /test
pub async fn test_connection(Json(body): Json<TestMessage>) -> Json<TestMessage> {
    info!("연결 확인 수신: {}", body.message);
    Json(TestMessage {
        message: CONNECTED_MESSAGE.to_string(),
    })
}
