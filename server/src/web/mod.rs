pub mod handlers;
pub mod middleware;
pub mod server;

pub use server::{create_router, start_web_server};

use std::sync::Arc;

use crate::config::Config;
use crate::store::DataStore;

// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<DataStore>,
}

impl AppState {
    pub fn new(config: Arc<Config>, store: Arc<DataStore>) -> Self {
        Self { config, store }
    }
}
