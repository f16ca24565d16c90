// src/logging/runtime_logger.rs

use std::collections::HashMap;
use std::io::Write;
use std::sync::Arc;
use std::time::{Duration as StdDuration, SystemTime};
use chrono::Utc;
use serde_json::json;
use tokio::sync::mpsc::{self, Sender, Receiver};
use tokio::sync::oneshot;
use tokio::task;
use tokio::time::{self, Duration};
use tracing_appender::rolling;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::fmt::MakeWriter;

/// 分文件存储的日志级别，未知级别归入 INFO
const LEVELS: [&str; 5] = ["TRACE", "DEBUG", "INFO", "WARN", "ERROR"];

/// 单条日志消息
pub struct LogEntry {
    pub level: &'static str,
    pub content: String,
}

enum LogCommand {
    Entry(LogEntry),
    Flush(oneshot::Sender<()>),
}

/// 运行日志管理器（RuntimeLogger）
/// 记录收到的请求、发出的响应、不出价原因等调试信息，
/// 按日志级别分流到不同的按小时滚动的 JSON 文件中。
pub struct RuntimeLogger {
    sender: Sender<LogCommand>,
}

fn normalize_level(level: &str) -> &'static str {
    LEVELS
        .iter()
        .copied()
        .find(|l| l.eq_ignore_ascii_case(level))
        .unwrap_or("INFO")
}

impl RuntimeLogger {
    /// 创建一个新的 RuntimeLogger
    ///
    /// - `log_dir`: 日志文件存放目录
    /// - `file_prefix`: 文件前缀，例如 "runtime"（最终文件名形如 runtime_info.json.2025-01-01-08）
    /// - `buffer_size`: mpsc 通道缓冲区大小
    /// - `batch_size`: 单个级别缓冲达到该条数时立即写盘
    /// - `flush_interval`: 定时刷新日志的时间间隔（毫秒）
    /// - `retention_hours`: 超过该时长未修改的本记录器日志文件会被清理，0 表示不清理
    pub fn new(
        log_dir: &str,
        file_prefix: &str,
        buffer_size: usize,
        batch_size: usize,
        flush_interval: u64,
        retention_hours: u64,
    ) -> Arc<Self> {
        if let Err(e) = std::fs::create_dir_all(log_dir) {
            eprintln!("Failed to create log directory {}: {}", log_dir, e);
        }
        let (sender, receiver) = mpsc::channel(buffer_size);
        let mut log_files = HashMap::new();
        for level in LEVELS {
            let file_name = format!("{}_{}.json", file_prefix, level.to_lowercase());
            log_files.insert(level, Arc::new(rolling::hourly(log_dir, &file_name)));
        }
        tokio::spawn(Self::background_log_writer(log_files, receiver, batch_size.max(1), flush_interval.max(1)));

        if retention_hours > 0 {
            let log_dir = log_dir.to_string();
            let file_prefix = file_prefix.to_string();
            tokio::spawn(async move {
                let cleanup_interval = Duration::from_secs(3600);
                loop {
                    Self::cleanup_old_logs(&log_dir, &file_prefix, retention_hours).await;
                    time::sleep(cleanup_interval).await;
                }
            });
        }
        Arc::new(Self { sender })
    }

    /// 记录运行日志
    pub async fn log(&self, level: &str, message: &str) {
        let level = normalize_level(level);
        let content = json!({
            "timestamp": Utc::now().to_rfc3339(),
            "level": level,
            "message": message
        })
        .to_string();

        if let Err(e) = self.sender.send(LogCommand::Entry(LogEntry { level, content })).await {
            eprintln!("Failed to send runtime log message: {}", e);
        }
    }

    /// 把已缓冲的日志全部写盘后返回
    pub async fn flush(&self) {
        let (ack, done) = oneshot::channel();
        if self.sender.send(LogCommand::Flush(ack)).await.is_ok() {
            let _ = done.await;
        }
    }

    async fn background_log_writer(
        log_files: HashMap<&'static str, Arc<RollingFileAppender>>,
        mut receiver: Receiver<LogCommand>,
        batch_size: usize,
        flush_interval: u64,
    ) {
        let mut buffers: HashMap<&'static str, Vec<String>> = HashMap::new();
        let mut interval = time::interval(Duration::from_millis(flush_interval));
        loop {
            tokio::select! {
                command = receiver.recv() => match command {
                    Some(LogCommand::Entry(entry)) => {
                        let buffer = buffers.entry(entry.level).or_default();
                        buffer.push(entry.content);
                        if buffer.len() >= batch_size {
                            Self::flush_level(&log_files, entry.level, buffer).await;
                        }
                    }
                    Some(LogCommand::Flush(ack)) => {
                        Self::flush_all(&log_files, &mut buffers).await;
                        let _ = ack.send(());
                    }
                    None => {
                        Self::flush_all(&log_files, &mut buffers).await;
                        break;
                    }
                },
                _ = interval.tick() => {
                    Self::flush_all(&log_files, &mut buffers).await;
                }
            }
        }
    }

    async fn flush_all(
        log_files: &HashMap<&'static str, Arc<RollingFileAppender>>,
        buffers: &mut HashMap<&'static str, Vec<String>>,
    ) {
        for (level, buffer) in buffers.iter_mut() {
            Self::flush_level(log_files, level, buffer).await;
        }
    }

    async fn flush_level(
        log_files: &HashMap<&'static str, Arc<RollingFileAppender>>,
        level: &str,
        buffer: &mut Vec<String>,
    ) {
        if buffer.is_empty() {
            return;
        }
        if let Some(appender) = log_files.get(level) {
            Self::write_logs_to_disk(appender.clone(), std::mem::take(buffer)).await;
        }
    }

    async fn write_logs_to_disk(file: Arc<RollingFileAppender>, lines: Vec<String>) {
        let content = lines.join("\n") + "\n";
        let result = task::spawn_blocking(move || {
            let mut writer = file.make_writer();
            writer.write_all(content.as_bytes())
        })
        .await;
        match result {
            Ok(Ok(())) => {}
            Ok(Err(e)) => eprintln!("Failed to write runtime logs: {}", e),
            Err(e) => eprintln!("Runtime log writer task failed: {}", e),
        }
    }

    /// 只清理 `{file_prefix}_<level>.json*` 形式的文件，目录里的其他文件不动
    async fn cleanup_old_logs(log_dir: &str, file_prefix: &str, retention_hours: u64) {
        let owned_prefixes: Vec<String> = LEVELS
            .iter()
            .map(|level| format!("{}_{}.json", file_prefix, level.to_lowercase()))
            .collect();
        let retention = StdDuration::from_secs(retention_hours * 3600);
        let now = SystemTime::now();
        let mut dir = match tokio::fs::read_dir(log_dir).await {
            Ok(dir) => dir,
            Err(e) => {
                eprintln!("Failed to read log directory {}: {}", log_dir, e);
                return;
            }
        };
        while let Ok(Some(entry)) = dir.next_entry().await {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if !owned_prefixes.iter().any(|p| name.starts_with(p.as_str())) {
                continue;
            }
            let expired = match entry.metadata().await.and_then(|m| m.modified()) {
                Ok(modified) => now.duration_since(modified).unwrap_or_default() > retention,
                Err(_) => false,
            };
            if expired {
                let path = entry.path();
                if let Err(e) = tokio::fs::remove_file(&path).await {
                    eprintln!("Failed to delete old log file {:?}: {}", path, e);
                }
            }
        }
    }
}
