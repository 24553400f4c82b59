pub mod admin;
pub mod auth;
pub mod counsellor;
pub mod session;
pub mod user;
pub mod verification;
