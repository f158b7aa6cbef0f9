pub mod syllabus_flow;

pub use syllabus_flow::SyllabusFlow;
