pub mod job;
pub mod user;
