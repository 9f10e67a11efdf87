//! plantscan CLI.
//!
//! 캡처-업로드 파이프라인의 진입점.
//! 수신 서버 실행, 로컬 파일 업로드, 테스트 패턴 카메라 캡처 데모,
//! 서버 연결 확인을 제공한다.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::sync::watch;
use tracing::info;
use tracing_subscriber::EnvFilter;

use plantscan_core::config::{AppConfig, WebConfig};
use plantscan_core::config_manager::ConfigManager;
use plantscan_core::ports::uploader::ImageUploader;
use plantscan_network::connectivity::ConnectivityProbe;
use plantscan_network::upload_client::HttpUploadClient;
use plantscan_vision::controller::CaptureController;
use plantscan_vision::loader::LocalFileLoader;
use plantscan_vision::stub::TestPatternCamera;
use plantscan_web::WebServer;

#[derive(Parser)]
#[command(name = "plantscan", about = "식물 잎 캡처-업로드 파이프라인", version)]
struct Cli {
    /// 설정 파일 경로 (기본: 플랫폼 설정 디렉토리)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 업로드 수신 서버 실행
    Serve {
        /// 리스닝 포트 (설정값 대신 사용)
        #[arg(long)]
        port: Option<u16>,
    },
    /// 로컬 이미지 파일 업로드
    Upload {
        /// 업로드할 파일 경로
        file: PathBuf,
        /// 서버 베이스 URL (설정값 대신 사용)
        #[arg(long)]
        server: Option<String>,
    },
    /// 테스트 패턴 카메라로 캡처 데모 실행
    Capture {
        /// 캡처 결과 PNG 저장 경로
        #[arg(long, default_value = "capture.png")]
        output: PathBuf,
        /// 캡처 후 서버로 업로드
        #[arg(long)]
        upload: bool,
        /// 서버 베이스 URL (설정값 대신 사용)
        #[arg(long)]
        server: Option<String>,
    },
    /// 서버 연결 확인
    Probe {
        /// 서버 베이스 URL (설정값 대신 사용)
        #[arg(long)]
        server: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let manager = match &cli.config {
        Some(path) => ConfigManager::with_path(path.clone())?,
        None => ConfigManager::new()?,
    };
    let mut config = manager.get();

    match cli.command {
        Commands::Serve { port } => {
            if let Some(port) = port {
                config.web.port = port;
            }
            run_serve(config.web).await
        }
        Commands::Upload { file, server } => {
            if let Some(server) = server {
                config.server.base_url = server;
            }
            run_upload(&config, &file).await
        }
        Commands::Capture {
            output,
            upload,
            server,
        } => {
            if let Some(server) = server {
                config.server.base_url = server;
            }
            run_capture(&config, &output, upload).await
        }
        Commands::Probe { server } => {
            if let Some(server) = server {
                config.server.base_url = server;
            }
            run_probe(&config).await
        }
    }
}

/// 수신 서버 실행 — Ctrl-C에서 graceful shutdown
async fn run_serve(web: WebConfig) -> anyhow::Result<()> {
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("종료 신호 수신 (Ctrl-C)");
            let _ = shutdown_tx.send(true);
        }
    });

    WebServer::new(web)
        .run(shutdown_rx)
        .await
        .context("수신 서버 실행 실패")?;
    Ok(())
}

/// 로컬 파일 업로드
async fn run_upload(config: &AppConfig, file: &PathBuf) -> anyhow::Result<()> {
    let loader = LocalFileLoader::new();
    let image = loader.load(Some(file)).await?;

    let client = HttpUploadClient::from_config(&config.server, &config.upload)?;
    let result = client.upload(&image).await?;

    println!(
        "업로드 성공: {} — {}",
        result.uploaded_filename.as_deref().unwrap_or("?"),
        result.server_message
    );
    Ok(())
}

/// 테스트 패턴 카메라로 캡처 데모
async fn run_capture(config: &AppConfig, output: &PathBuf, upload: bool) -> anyhow::Result<()> {
    let device = TestPatternCamera::new(640, 480).with_warmup(Duration::from_millis(100));
    let mut controller = CaptureController::new(Arc::new(device), &config.camera);

    controller.open().await?;
    info!("스트리밍 시작 — 프레임 캡처");
    controller.capture()?;

    let image = controller.image_for_upload()?;
    let (width, height) = image.resolution();
    std::fs::write(output, image.png_data())
        .with_context(|| format!("캡처 저장 실패: {}", output.display()))?;
    println!("캡처 완료: {width}x{height} → {}", output.display());

    if upload {
        let client = HttpUploadClient::from_config(&config.server, &config.upload)?;
        let result = client.upload(image).await?;
        println!(
            "업로드 성공: {} — {}",
            result.uploaded_filename.as_deref().unwrap_or("?"),
            result.server_message
        );
    }

    controller.close();
    Ok(())
}

/// 서버 연결 확인
async fn run_probe(config: &AppConfig) -> anyhow::Result<()> {
    let probe = ConnectivityProbe::new(
        &config.server.base_url,
        Duration::from_secs(config.server.timeout_secs),
    )?;
    let echo = probe.probe("connectivity check").await?;
    println!("서버 응답: {echo}");
    Ok(())
}
