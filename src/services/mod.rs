pub mod auth_guard;
pub mod hashing;
pub mod jwt;
pub mod metrics;
pub mod rate_limit;
pub mod security;
pub mod storage;
