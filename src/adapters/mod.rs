// Adapters layer: concrete implementations of the domain ports.

pub mod http;
pub mod smtp;
pub mod state;

pub use http::HttpPageFetcher;
pub use smtp::SmtpSender;
pub use state::FileStateStore;
