// src/main.rs

use axum::{Router, routing::post, serve};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter, Registry};
use tracing_subscriber::layer::SubscriberExt;
use tracing_appender::rolling;

mod api;
mod bidding;
mod config;
mod error;
mod logging;
mod model;
mod openrtb;
mod replay;

use config::ConfigManager;
use logging::runtime_logger::RuntimeLogger;
use model::adapters::FileCatalogAdapter;

#[derive(Clone)]
pub struct AppState {
    pub runtime_logger: Arc<RuntimeLogger>,
    pub config: Arc<ConfigManager>,
}

#[derive(Parser, Debug)]
#[command(author = "whiteCcinn", version = "1.0", about = "An OpenRTB-style campaign bidder")]
struct CliArgs {
    #[arg(short, long, default_value_t = 8080)]
    port: u16,
    #[arg(long, default_value = "logs")]
    log_dir: String,
    /// 广告活动目录（JSON 数组）
    #[arg(long, default_value = "static/campaigns.json")]
    campaigns: String,
    /// 额外的国家代码别名（JSON 对象），合并到内置表之上
    #[arg(long)]
    country_aliases: Option<String>,
    /// 定时重新加载广告活动目录的间隔（秒）
    #[arg(long)]
    reload_interval_secs: Option<u64>,
    /// 运行日志保留时长（小时）
    #[arg(long, default_value_t = 72)]
    log_retention_hours: u64,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 离线回放请求文件，逐个打印出价结果
    Replay {
        files: Vec<PathBuf>,
        /// 额外对每个文件重复评估 N 次并统计平均耗时
        #[arg(long, default_value_t = 0)]
        iterations: usize,
    },
}

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();

    // 初始化全局 tracing 日志
    let log_file = rolling::hourly(&args.log_dir, "bidder_log.json");
    let (non_blocking, _guard) = tracing_appender::non_blocking(log_file);
    let subscriber = Registry::default()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().json().with_writer(non_blocking));
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Unable to set global tracing subscriber: {}", e);
    }

    // 加载广告活动目录与国家别名表
    let adapter = Arc::new(FileCatalogAdapter::new(&args.campaigns, args.country_aliases.as_deref()));
    let config = match ConfigManager::from_adapter(adapter.as_ref()) {
        Ok(config) => Arc::new(config),
        Err(e) => {
            error!(error = %e, "failed to load campaign catalog");
            eprintln!("Failed to load campaigns: {}", e);
            std::process::exit(1);
        }
    };
    info!(
        campaigns = config.campaigns().len(),
        country_aliases = config.country_aliases().len(),
        "campaign catalog loaded"
    );

    if let Some(Command::Replay { files, iterations }) = &args.command {
        let summary = replay::replay_requests(files, &config);
        if *iterations > 0 {
            replay::measure_requests(files, &config, *iterations);
        }
        if summary.failed > 0 {
            std::process::exit(1);
        }
        return;
    }

    // 初始化运行日志记录器（记录收到的请求、发出的响应、不出价原因等）
    let runtime_logger = RuntimeLogger::new(&args.log_dir, "runtime", 1000, 100, 1000, args.log_retention_hours);
    runtime_logger
        .log("INFO", &format!("Loaded {} campaigns from {}", config.campaigns().len(), args.campaigns))
        .await;

    if let Some(secs) = args.reload_interval_secs.filter(|s| *s > 0) {
        let config = config.clone();
        let adapter = adapter.clone();
        let runtime_logger = runtime_logger.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(tokio::time::Duration::from_secs(secs));
            interval.tick().await;
            loop {
                interval.tick().await;
                match config.reload(adapter.as_ref()) {
                    Ok(count) => info!(campaigns = count, "campaign catalog reloaded"),
                    Err(e) => {
                        warn!(error = %e, "catalog reload failed, keeping previous snapshot");
                        runtime_logger.log("ERROR", &format!("Catalog reload failed: {}", e)).await;
                    }
                }
            }
        });
    }

    let state = Arc::new(AppState {
        runtime_logger: runtime_logger.clone(),
        config: config.clone(),
    });

    let app = Router::new()
        .route("/openrtb", post(api::handlers::handle_openrtb_request))
        .with_state(state);
    let addr = format!("0.0.0.0:{}", args.port);
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(error = %e, addr = %addr, "failed to bind");
            eprintln!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };
    info!("Bidder server starting on port {}", args.port);
    runtime_logger.log("INFO", &format!("Bidder running at http://{}", addr)).await;

    let shutdown = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "failed to listen for ctrl-c");
        }
    };
    if let Err(e) = serve(listener, app).with_graceful_shutdown(shutdown).await {
        error!(error = %e, "server error");
    }

    runtime_logger.log("INFO", "Bidder server shut down.").await;
    runtime_logger.flush().await;
}
