//! API 라우트 정의.
//!
//! 경로는 클라이언트와 합의된 와이어 계약 — 루트에 직접 노출된다.

use axum::routing::post;
use axum::Router;

use crate::handlers;
use crate::AppState;

/// 라우트 생성
pub fn routes() -> Router<AppState> {
    Router::new()
        // 파일 업로드 수신
        .route("/upload-file", post(handlers::upload::upload_file))
        // 연결 확인
        .route("/test", post(handlers::probe::test_connection))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::DiscardSink;
    use std::sync::Arc;

    #[test]
    fn routes_compile() {
        let state = AppState {
            sink: Arc::new(DiscardSink),
            max_upload_bytes: 1024,
        };
        let _app: Router<()> = routes().with_state(state);
    }
}
