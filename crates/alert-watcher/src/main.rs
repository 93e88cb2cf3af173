//! Candle pattern watcher CLI.

use alert_data::YahooProvider;
use alert_notification::{TelegramConfig, TelegramSender};
use alert_watcher::{health, AlertWatcher, WatcherConfig};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "alert-watcher")]
#[command(about = "Candlestick pattern alert watcher", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// 데몬 모드: 캔들 마감마다 패턴을 평가하고 알림 전송
    Run,

    /// 단발 실행: 한 틱만 평가하고 종료 (동작 확인용)
    CheckOnce,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // 로깅 초기화
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("alert_watcher={}", cli.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Candle Alert Watcher 시작");

    // 설정 로드
    let config = WatcherConfig::from_env()?;
    tracing::debug!(
        symbol = %config.symbol,
        timeframe = %config.timeframe,
        lookback_days = config.lookback_days,
        "설정 로드 완료"
    );

    // 공급자/전송기 구성
    let provider = YahooProvider::new(config.fetch_timeout())?;
    let sender = match TelegramSender::from_env() {
        Some(sender) => sender,
        None => {
            tracing::warn!("텔레그램 설정 없음, 알림 비활성화 상태로 실행");
            TelegramSender::new(TelegramConfig::disabled())
        }
    };

    // 헬스 체크 서버 (선택적)
    if config.health_port != 0 {
        let port = config.health_port;
        tokio::spawn(async move {
            if let Err(e) = health::serve(port).await {
                tracing::error!(error = %e, "헬스 체크 서버 종료");
            }
        });
    }

    let mut watcher = AlertWatcher::new(config, Box::new(provider), Box::new(sender));

    match cli.command {
        Commands::Run => {
            watcher.run().await;
        }
        Commands::CheckOnce => {
            let outcome = watcher.tick().await?;
            tracing::info!(?outcome, "단발 평가 완료");
        }
    }

    Ok(())
}
