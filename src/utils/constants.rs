use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://15.207.111.49:8080";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BACKEND_TIMEOUT_SECS: u64 = 300;

pub const BASE_URL_ENV: &str = "IMAGE_PROCESSOR_BASE_URL";
pub const PORT_ENV: &str = "PORT";
pub const BACKEND_TIMEOUT_ENV: &str = "BACKEND_TIMEOUT_SECS";
pub const ALLOWED_ORIGINS_ENV: &str = "ALLOWED_ORIGINS";

// backend wire format
pub const PROCESS_ENDPOINT: &str = "process";
pub const UPLOAD_FIELD_NAME: &str = "file";

// simulated progress, cosmetic only
pub const PROGRESS_STEP: u8 = 10;
pub const PROGRESS_CAP: u8 = 90;
pub const PROGRESS_COMPLETE: u8 = 100;
pub const PROGRESS_TICK: Duration = Duration::from_millis(500);
pub const SETTLE_DELAY: Duration = Duration::from_millis(500);

pub const SERVER_REQUEST_BODY_LIMIT: usize = 64 * 1024 * 1024; // 64MB
pub const SERVER_REQUEST_TIMEOUT: Duration = Duration::from_secs(600);
