pub mod help;
pub mod list;
pub mod status_bar;
