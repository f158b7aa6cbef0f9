pub mod chat;
pub mod quiz;
pub mod session;
pub mod summary;

pub use chat::{ChatReply, ChatRequest, SummaryRequest, SummaryResponse};
pub use quiz::{QuizQuestion, QuizRequest, QuizResponse};
pub use session::{QuizSync, SessionState};
pub use summary::{SummaryScratch, SyllabusOutcome};
