pub mod board;
pub mod cli;
pub mod db;
pub mod demo;
pub mod error;
pub mod models;
pub mod output;
pub mod session;
pub mod store;
pub mod telemetry;
pub mod view;

pub use board::Board;
pub use error::{BoardError, ErrorCode};
