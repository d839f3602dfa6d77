pub mod config;
pub mod error;
pub mod fare;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod utils;

pub use config::Config;
pub use error::{AppError, AppResult};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
}
