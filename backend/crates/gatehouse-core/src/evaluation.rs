//! Multiple-choice evaluation.
//!
//! Each question has exactly one correct choice. The score is the
//! percentage of submitted answers that match the key exactly, floored to an
//! integer, so `score >= 70` holds exactly when at least 70% of the answers
//! are correct. No partial credit and no weighting.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use gatehouse_commons::EvaluationConstants;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EvaluationError {
    #[error("Question bank is empty")]
    EmptyBank,

    #[error("Duplicate question id '{0}'")]
    DuplicateId(String),

    #[error("Question '{0}' has an answer that is not one of its choices")]
    AnswerNotInChoices(String),

    #[error("Question '{0}' needs at least two choices")]
    TooFewChoices(String),

    #[error("Failed to load question bank: {0}")]
    Load(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Form field name for this question's answer
    pub id: String,
    pub prompt: String,
    pub choices: Vec<String>,
    pub answer: String,
}

/// Result of scoring one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub correct: usize,
    pub total: usize,
    /// 0 to 100
    pub percent: u8,
}

#[derive(Debug, Deserialize)]
struct BankFile {
    questions: Vec<Question>,
}

/// Fixed, validated set of questions.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>) -> Result<Self, EvaluationError> {
        if questions.is_empty() {
            return Err(EvaluationError::EmptyBank);
        }

        let mut seen = HashSet::new();
        for q in &questions {
            if !seen.insert(q.id.as_str()) {
                return Err(EvaluationError::DuplicateId(q.id.clone()));
            }
            if q.choices.len() < 2 {
                return Err(EvaluationError::TooFewChoices(q.id.clone()));
            }
            if !q.choices.contains(&q.answer) {
                return Err(EvaluationError::AnswerNotInChoices(q.id.clone()));
            }
        }

        Ok(Self { questions })
    }

    /// Load a bank from a TOML file of `[[questions]]` tables.
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, EvaluationError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            EvaluationError::Load(format!("{}: {}", path.as_ref().display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, EvaluationError> {
        let file: BankFile =
            toml::from_str(content).map_err(|e| EvaluationError::Load(e.to_string()))?;
        Self::new(file.questions)
    }

    /// The questions shipped with the server.
    pub fn builtin() -> Self {
        Self {
            questions: builtin_questions(),
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Score answers keyed by question id.
    ///
    /// Missing answers count as wrong; keys that are not question ids are
    /// ignored.
    pub fn score(&self, answers: &HashMap<String, String>) -> Score {
        let correct = self
            .questions
            .iter()
            .filter(|q| answers.get(&q.id) == Some(&q.answer))
            .count();
        let total = self.questions.len();

        Score {
            correct,
            total,
            percent: percentage(correct, total),
        }
    }
}

/// `correct / total * 100`, floored. An empty total scores 0.
pub fn percentage(correct: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let correct = correct.min(total);
    ((correct * EvaluationConstants::MAX_SCORE as usize) / total) as u8
}

/// Whether `score` clears `pass_mark` (inclusive).
pub fn passes(score: u8, pass_mark: u8) -> bool {
    score >= pass_mark
}

fn q(id: &str, prompt: &str, choices: &[&str], answer: &str) -> Question {
    Question {
        id: id.to_string(),
        prompt: prompt.to_string(),
        choices: choices.iter().map(|c| c.to_string()).collect(),
        answer: answer.to_string(),
    }
}

fn builtin_questions() -> Vec<Question> {
    vec![
        q(
            "q1",
            "Which HTTP status code means \"Not Found\"?",
            &["200", "301", "404", "500"],
            "404",
        ),
        q(
            "q2",
            "What does HTML stand for?",
            &[
                "HyperText Markup Language",
                "High Transfer Machine Language",
                "Hyperlink and Text Management Language",
            ],
            "HyperText Markup Language",
        ),
        q(
            "q3",
            "Which of these is a strong password practice?",
            &[
                "Reusing one password everywhere",
                "Using a long, unique passphrase",
                "Writing it on a sticky note",
            ],
            "Using a long, unique passphrase",
        ),
        q(
            "q4",
            "What does HTTPS add on top of HTTP?",
            &["Compression", "Encryption via TLS", "Caching", "Faster DNS"],
            "Encryption via TLS",
        ),
        q(
            "q5",
            "How many bits are in a byte?",
            &["4", "8", "16", "32"],
            "8",
        ),
        q(
            "q6",
            "Which protocol resolves domain names to IP addresses?",
            &["DNS", "FTP", "SMTP", "SSH"],
            "DNS",
        ),
        q(
            "q7",
            "What should you do with an unexpected email asking for your password?",
            &["Reply with it", "Report it as phishing", "Forward it to friends"],
            "Report it as phishing",
        ),
        q(
            "q8",
            "Which of these is a version control system?",
            &["Git", "Nginx", "Redis", "Docker"],
            "Git",
        ),
        q(
            "q9",
            "What is the default port for HTTP?",
            &["21", "22", "80", "443"],
            "80",
        ),
        q(
            "q10",
            "What does a backup protect you against?",
            &["Data loss", "Slow internet", "Spam email"],
            "Data loss",
        ),
    ]
}
