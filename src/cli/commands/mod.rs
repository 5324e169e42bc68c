pub mod config;
pub mod init;
pub mod replay;
pub mod session;
