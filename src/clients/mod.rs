pub mod llm_client;

pub use llm_client::{CompletionProvider, CompletionRequest, LlmClient, PromptMessage, Role};
