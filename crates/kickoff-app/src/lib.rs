// Library root: configuration, SQLite storage and edition orchestration,
// exposed so the binary and integration tests share one API.

pub mod config;
pub mod db;
pub mod edition;
