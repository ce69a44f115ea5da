pub mod cli;
pub mod collection;
pub mod config;
pub mod tui;
pub mod utils;

pub use collection::{ListenerId, RejectReason, TagCollection, TagEvent, TagEventKind, TagOptions};
pub use config::Config;
pub use utils::Profile;
