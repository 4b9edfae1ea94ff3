pub mod entry;
pub mod menu;
