pub mod clipboard;
pub mod listing;
pub mod paths;
