pub mod menu;
pub mod presenter;
pub mod search;
pub mod validator;
