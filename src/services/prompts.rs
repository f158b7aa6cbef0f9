//! 各场景的提示词与 token 预算

pub const TOPIC_SYSTEM: &str =
    "Extract the main topic or course name from this syllabus. Return only the topic/course name.";
pub const TOPIC_MAX_TOKENS: u32 = 50;

pub const SYLLABUS_SUMMARY_SYSTEM: &str = "You are a friendly and supportive tutor helping a student understand their syllabus. \
Give a warm, concise summary of only the core topics and skills the course covers. \
After the summary, ask 'Which topic would you like to tackle first?'";
pub const SYLLABUS_SUMMARY_MAX_TOKENS: u32 = 250;

pub const DIAGRAM_SYSTEM: &str = "Generate a Mermaid.js diagram. Use this format:\n\
1. First give a brief explanation\n\
2. Then give the diagram code between '```mermaid' tags\n\
Pick the diagram type that fits:\n\
- flowchart for processes\n\
- graph for relationships\n\
- sequenceDiagram for sequences\n\
Keep diagrams clear and focused.";
pub const DIAGRAM_MAX_TOKENS: u32 = 500;

pub const TUTOR_SYSTEM: &str = "You are an experienced mathematics tutor. Format your answers with these rules:\n\
1. Use double dollar signs for display equations: $$\\text{equation}$$\n\
2. Use single dollar signs for inline math: $x + y$\n\
3. Wrap words inside math in \\text: $\\text{maximize}$\n\
4. Use **bold** for key terms\n\
5. Keep answers focused and complete\n\
6. Use bullet points for lists\n\
7. Make sure every mathematical expression is complete";
pub const TUTOR_MAX_TOKENS: u32 = 500;

pub const QUIZ_SYSTEM: &str = "Create a multiple-choice question based on the recent conversation. \
Format: the first line is the question, followed by options prefixed with A) through E), \
and end with 'CORRECT:' followed by the letter of the correct answer.";
pub const QUIZ_MAX_TOKENS: u32 = 200;
/// 出题时参考的最近对话条数
pub const QUIZ_CONTEXT_MESSAGES: usize = 3;

pub const CONVERSATION_SUMMARY_SYSTEM: &str = "You are a skilled tutor writing a concise summary. Format your answer as:\n\
• **Key Concepts Discussed:**\n\
  - Use bullet points\n\
  - Write mathematics in LaTeX ($...$ inline, $$...$$ for display)\n\n\
• **Main Takeaways:**\n\
  - Summarize the key learning points\n\
  - Keep it clear and focused";
pub const CONVERSATION_SUMMARY_MAX_TOKENS: u32 = 500;
/// 总结时参考的最近对话条数
pub const SUMMARY_CONTEXT_MESSAGES: usize = 10;

/// 对话和出题使用的采样温度
pub const CREATIVE_TEMPERATURE: f32 = 0.7;

pub fn topic_user(syllabus: &str) -> String {
    format!("What is the main topic or course name from this syllabus:\n\n{syllabus}")
}

pub fn syllabus_summary_user(syllabus: &str) -> String {
    format!(
        "Read the following syllabus and briefly summarize just the main topics and skills the student will learn. \
Keep it short, friendly, and focused on what the course teaches. Syllabus content: {syllabus}"
    )
}

pub fn quiz_user(context: &str) -> String {
    format!(
        "Based on this context:\n{context}\n\nCreate a challenging multiple-choice question that tests understanding of the concepts discussed."
    )
}

pub fn conversation_summary_user(topic: &str, conversation: &str) -> String {
    format!("Create a summary of this conversation about {topic}. Here's the conversation:\n\n{conversation}")
}
