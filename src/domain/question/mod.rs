//! Question domain - the ordered cases a regression run asks the agent

mod entity;

pub use entity::QuestionCase;
