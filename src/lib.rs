pub mod commands;
pub mod config;
pub mod error;
pub mod logic;
pub mod model;
pub mod parser;
pub mod storage;
pub mod sync;
pub mod task;

pub use commands::{Command, CommandResult, Payload};
pub use config::Config;
pub use error::OpusError;
pub use logic::LogicManager;
pub use model::ModelManager;
