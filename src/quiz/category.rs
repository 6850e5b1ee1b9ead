use std::fmt;

use serde::{Deserialize, Serialize};

/// The six topics offered on the quiz selection screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    #[default]
    General,
    Computers,
    Math,
    Geography,
    History,
    Sports,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::General,
        Category::Computers,
        Category::Math,
        Category::Geography,
        Category::History,
        Category::Sports,
    ];

    /// Category id understood by the Open Trivia DB.
    pub fn provider_id(self) -> u32 {
        match self {
            Category::General => 9,
            Category::Computers => 18,
            Category::Math => 19,
            Category::Sports => 21,
            Category::Geography => 22,
            Category::History => 23,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::General => "General",
            Category::Computers => "Computers",
            Category::Math => "Math",
            Category::Geography => "Geography",
            Category::History => "History",
            Category::Sports => "Sports",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Category::General => "🧠",
            Category::Computers => "💻",
            Category::Math => "🔢",
            Category::Geography => "🌍",
            Category::History => "📜",
            Category::Sports => "⚽",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
