pub mod diagram;
pub mod prompts;
pub mod quiz_parser;
pub mod summary_store;
pub mod tutor_service;

pub use quiz_parser::parse_quiz_response;
pub use summary_store::SummaryStore;
pub use tutor_service::TutorService;
