pub mod console;
pub mod markdown;
pub mod tabs;
pub mod terminal;
