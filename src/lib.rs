pub mod catalogue;
pub mod category;
pub mod config;
pub mod global;
pub mod http;
pub mod upstream;
pub mod view;
