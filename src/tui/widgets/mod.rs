pub mod chips;
pub mod color;
pub mod event_log;
pub mod input;
pub mod status_bar;
