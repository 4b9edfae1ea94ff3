pub mod console;
pub mod messages;
