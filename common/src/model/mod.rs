pub mod attachment;
pub mod config;
pub mod record;
pub mod upload;
