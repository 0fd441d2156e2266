//! Browser connection and the Chrome-backed UI backend

pub mod backend;
pub mod config;
pub mod session;

pub use backend::ChromeBackend;
pub use config::ConnectionOptions;
pub use session::BrowserSession;
