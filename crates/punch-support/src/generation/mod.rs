//! Prompt assembly and reply post-processing

pub mod chunking;
pub mod prompt;

pub use chunking::split_reply;
pub use prompt::PromptBuilder;
