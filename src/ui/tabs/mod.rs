pub mod copywriter;
pub mod guardian;
pub mod studio;
