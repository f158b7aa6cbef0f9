//! 测验题解析 - 业务能力层
//!
//! LLM 返回的题目格式：
//!
//! ```text
//! What is 2+2?
//! A) 3
//! B) 4
//! C) 5
//! CORRECT: B
//! ```

use crate::error::QuizParseError;
use crate::models::QuizQuestion;

/// 合法的选项字母
const OPTION_LETTERS: &str = "ABCDE";
/// 正确答案行前缀（不区分大小写）
const CORRECT_PREFIX: &str = "CORRECT:";

/// 从 LLM 文本中解析出测验题
///
/// # 规则
/// - 第一个非空行是题干
/// - 之后首字母（不区分大小写）为 A-E 且包含 `)` 的行是选项，去掉 `)` 及之前的前缀
/// - 以 `CORRECT:` 开头的行给出答案字母，映射为选项下标
///
/// # 返回
/// 找不到答案行、字母超出范围时返回 `QuizParseError`
pub fn parse_quiz_response(raw: &str) -> Result<QuizQuestion, QuizParseError> {
    let lines: Vec<&str> = raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let (question, rest) = lines.split_first().ok_or(QuizParseError::EmptyResponse)?;

    let options: Vec<String> = rest
        .iter()
        .filter_map(|line| parse_option(line))
        .collect();

    let letter = find_correct_letter(&lines)?;
    let index = letter_index(letter).filter(|&i| i < options.len()).ok_or(
        QuizParseError::AnswerOutOfRange {
            letter,
            option_count: options.len(),
        },
    )?;

    Ok(QuizQuestion {
        question: (*question).to_string(),
        correct_answer: options[index].clone(),
        options,
    })
}

/// 解析单个选项行，不是选项时返回 `None`
fn parse_option(line: &str) -> Option<String> {
    let first = line.chars().next()?.to_ascii_uppercase();
    if !OPTION_LETTERS.contains(first) {
        return None;
    }
    let (_, option) = line.split_once(')')?;
    Some(option.trim().to_string())
}

/// 找到第一条 `CORRECT:` 行并取出答案字母
fn find_correct_letter(lines: &[&str]) -> Result<char, QuizParseError> {
    let correct_line = lines
        .iter()
        .find(|line| starts_with_ignore_case(line, CORRECT_PREFIX))
        .ok_or(QuizParseError::MissingCorrectLine)?;

    let (_, after_colon) = correct_line
        .split_once(':')
        .ok_or(QuizParseError::MissingCorrectLine)?;

    after_colon
        .trim()
        .chars()
        .next()
        .ok_or(QuizParseError::MissingCorrectLetter)
}

/// 字母转下标：A → 0, B → 1 ...
fn letter_index(letter: char) -> Option<usize> {
    let upper = letter.to_ascii_uppercase();
    if upper.is_ascii_uppercase() {
        Some((upper as u8 - b'A') as usize)
    } else {
        None
    }
}

fn starts_with_ignore_case(line: &str, prefix: &str) -> bool {
    line.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}
