pub mod channel;
pub mod file;
