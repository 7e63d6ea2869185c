pub mod chrome;
pub mod config;
pub mod controller;
pub mod events;
pub mod extract;
pub mod pagination;
pub mod scroll;
pub mod session;

#[cfg(test)]
pub mod testing;

pub use config::CrawlConfig;
pub use controller::Crawler;
