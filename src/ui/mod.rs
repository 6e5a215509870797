// Mon Feb 16 2026 - Alex

pub mod banner;
pub mod cli;

pub use banner::{Banner, BannerStyle};
pub use cli::{Args, Command, CommandHandler};
