pub mod file;
pub mod provider;
