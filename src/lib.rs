pub mod app;
pub mod backend;
pub mod config;
pub mod error;
pub mod state;
pub mod storage;
pub mod store;

pub use app::App;
pub use config::Config;
pub use error::AppError;
