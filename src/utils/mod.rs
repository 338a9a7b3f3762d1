pub mod clipboard;
pub mod http;
pub mod parsing;
