// src/replay.rs

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::warn;

use crate::bidding::engine::process_raw_bid_request;
use crate::config::ConfigManager;
use crate::error::BidError;
use crate::model::context::BidOutcome;

/// 回放结果汇总
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReplaySummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
}

fn replay_file(path: &Path, config: &ConfigManager) -> Result<BidOutcome, BidError> {
    let mut body = fs::read(path).map_err(|source| BidError::Io {
        path: path.display().to_string(),
        source,
    })?;
    process_raw_bid_request(&mut body, &config.campaigns(), &config.country_aliases())
}

/// 逐个回放请求文件并打印结果；出价记为通过，不出价或解析失败记为失败
pub fn replay_requests(files: &[PathBuf], config: &ConfigManager) -> ReplaySummary {
    let mut summary = ReplaySummary { total: files.len(), ..Default::default() };

    for path in files {
        println!("\nRunning test: {}", path.display());
        println!("{}", "-".repeat(40));
        match replay_file(path, config) {
            Ok(BidOutcome::Responded { response, .. }) => {
                println!("✅ Bid generated");
                println!("{}", serde_json::to_string_pretty(&response).unwrap_or_default());
                summary.passed += 1;
            }
            Ok(BidOutcome::Rejected { reasons }) => {
                println!("❌ No bid. Errors:");
                for reason in &reasons {
                    println!("{}", reason);
                }
                summary.failed += 1;
            }
            Err(e) => {
                println!("🚫 Error: {}", e);
                summary.failed += 1;
            }
        }
    }

    println!("\n=== Test Results Summary ===");
    println!("Total Tests: {}", summary.total);
    println!("Passed: {}", summary.passed);
    println!("Failed: {}", summary.failed);
    summary
}

/// 每个请求文件重复评估 `iterations` 次，返回单次平均耗时（毫秒）
pub fn measure_requests(files: &[PathBuf], config: &ConfigManager, iterations: usize) -> Option<f64> {
    let bodies: Vec<Vec<u8>> = files
        .iter()
        .filter_map(|path| match fs::read(path) {
            Ok(body) => Some(body),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping unreadable request file");
                None
            }
        })
        .collect();
    let campaigns = config.campaigns();
    let aliases = config.country_aliases();

    let start = Instant::now();
    let mut count = 0usize;
    for body in &bodies {
        for _ in 0..iterations {
            let mut buf = body.clone();
            let _ = process_raw_bid_request(&mut buf, &campaigns, &aliases);
            count += 1;
        }
    }
    if count == 0 {
        return None;
    }
    let elapsed = start.elapsed();
    println!("\n=== Performance Test ===");
    println!("Total Iterations: {}", count);
    println!("Total Time: {:.2} seconds", elapsed.as_secs_f64());
    let avg_ms = elapsed.as_secs_f64() * 1000.0 / count as f64;
    println!("Average Time per Request: {:.2} ms", avg_ms);
    Some(avg_ms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bidding::fixtures::{sample_campaign, sample_request_json};
    use crate::model::country::CountryAliases;
    use serde_json::json;

    fn write_requests(requests: &[serde_json::Value]) -> Vec<PathBuf> {
        let dir = std::env::temp_dir().join(format!("rtb-replay-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        requests
            .iter()
            .enumerate()
            .map(|(i, req)| {
                let path = dir.join(format!("test-request-{}.json", i + 1));
                fs::write(&path, serde_json::to_vec(req).unwrap()).unwrap();
                path
            })
            .collect()
    }

    #[test]
    fn summary_counts_bids_and_failures() {
        let mut no_os = sample_request_json();
        no_os["device"] = json!({});
        let mut files = write_requests(&[sample_request_json(), no_os]);
        files.push(PathBuf::from("/nonexistent/test-request-3.json"));

        let config = ConfigManager::new(vec![sample_campaign()], CountryAliases::default());
        let summary = replay_requests(&files, &config);
        assert_eq!(summary, ReplaySummary { total: 3, passed: 1, failed: 2 });
    }

    #[test]
    fn measure_reports_average_time() {
        let files = write_requests(&[sample_request_json()]);
        let config = ConfigManager::new(vec![sample_campaign()], CountryAliases::default());
        let avg = measure_requests(&files, &config, 5).unwrap();
        assert!(avg >= 0.0);
        assert_eq!(measure_requests(&[], &config, 5), None);
    }
}
