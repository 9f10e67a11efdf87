//! 서버 수신 파일 모델.

/// 수신된 업로드 파일 (요청 스코프, 응답 후 폐기)
///
/// 본문 수신이 완료된 시점에 생성되어 싱크에 전달되고,
/// 핸들러 반환과 함께 버려진다. 이 코어는 영속화하지 않는다.
#[derive(Debug, Clone)]
pub struct IngestedFile {
    /// 파일 원본 바이트 (메모리 버퍼링)
    pub raw_bytes: Vec<u8>,
    /// 클라이언트가 보낸 원본 파일 이름
    pub original_name: String,
    /// 바이트 크기
    pub size_bytes: usize,
}

impl IngestedFile {
    /// 수신 바이트와 원본 이름으로 생성
    pub fn new(raw_bytes: Vec<u8>, original_name: String) -> Self {
        let size_bytes = raw_bytes.len();
        Self {
            raw_bytes,
            original_name,
            size_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_matches_bytes() {
        let file = IngestedFile::new(vec![0u8; 128], "leaf.png".to_string());
        assert_eq!(file.size_bytes, 128);
        assert_eq!(file.original_name, "leaf.png");
    }
}
