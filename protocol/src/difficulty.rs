//! AI 难度标签
//!
//! 只作为提示词的一部分转发给顾问，不影响规则判定。

use serde::{Deserialize, Serialize};

/// 默认难度
pub const DEFAULT_DIFFICULTY: &str = "Grandmaster";

/// AI 难度（任意文本）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Difficulty(String);

impl Difficulty {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::new(DEFAULT_DIFFICULTY)
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Difficulty {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}
