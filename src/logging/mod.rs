pub mod bid_log;
pub mod runtime_logger;
