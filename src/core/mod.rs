//! Core functionality: file records, storage, language detection and highlighting

pub mod config;
pub mod highlight;
pub mod language;
pub mod record;
pub mod storage;
pub mod store;
pub mod transfer;
