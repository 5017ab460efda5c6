pub mod difficulty;
pub mod exam_config;
pub mod loaders;
pub mod mode;
pub mod question;

pub use difficulty::{classify, DifficultyBand};
pub use exam_config::{CountMode, DifficultyMode, ExamConfig, ExamQuota};
pub use loaders::{load_exam_config, load_question_pool};
pub use mode::mode_priority;
pub use question::{ContentSource, Question, SubQuestion};
