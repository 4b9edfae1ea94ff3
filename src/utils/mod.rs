pub mod colors;
pub mod path;
