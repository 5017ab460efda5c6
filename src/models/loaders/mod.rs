pub mod json_loader;
pub mod toml_loader;

pub use json_loader::load_question_pool;
pub use toml_loader::load_exam_config;
