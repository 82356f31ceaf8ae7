pub mod cli;
pub mod commits;
pub mod coordinator;
pub mod error;
pub mod export;
pub mod filter;
pub mod ingest;
pub mod model;
pub mod render;
pub mod report;
pub mod scale;
pub mod summary;
pub mod tui;
pub mod util;
