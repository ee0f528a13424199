//! System-prompt personas.
//!
//! A persona is the fixed system turn that seeds a transcript. The client
//! picks one with the `mode` flag on an initialization request.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supportive conversational persona ("まんまるAI").
pub const NORMAL_PROMPT: &str = "あなたの名前はまんまるAIです。
親切で丁寧、否定しない話し方をします。";

/// Complaint-listening training persona with a scored evaluation at the end.
pub const TRAINING_PROMPT: &str = "あなたは愚痴トレーニングAIです。

ルール:
- 最初に日常的な愚痴を1つ話す
- ユーザーは聞き手
- 会話は3往復
- 最後に評価を行う

評価項目（各10点）:
1. 共感
2. 否定しない姿勢
3. 言葉の丁寧さ

合計点と短い講評を必ず出す";

/// Preset system prompt selected by the client's `mode` flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Persona {
    #[default]
    Normal,
    Training,
}

impl Persona {
    /// Resolve a persona from the raw `mode` flag.
    ///
    /// Only `"training"` (trimmed, case-insensitive) selects [`Persona::Training`].
    /// Absent, empty, or unrecognized values fall back to [`Persona::Normal`].
    pub fn from_mode(mode: Option<&str>) -> Self {
        match mode.map(|m| m.trim().to_lowercase()) {
            Some(m) if m == "training" => Persona::Training,
            _ => Persona::Normal,
        }
    }

    /// The system prompt text for this persona.
    pub fn prompt(&self) -> &'static str {
        match self {
            Persona::Normal => NORMAL_PROMPT,
            Persona::Training => TRAINING_PROMPT,
        }
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Persona::Normal => write!(f, "normal"),
            Persona::Training => write!(f, "training"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_training_mode_selects_training() {
        assert_eq!(Persona::from_mode(Some("training")), Persona::Training);
        assert_eq!(Persona::from_mode(Some(" Training ")), Persona::Training);
    }

    #[test]
    fn test_unrecognized_mode_falls_back_to_normal() {
        for mode in [None, Some(""), Some("normal"), Some("anything-else"), Some("train")] {
            assert_eq!(Persona::from_mode(mode), Persona::Normal, "mode {mode:?}");
        }
    }

    #[test]
    fn test_prompts_are_distinct() {
        assert_eq!(Persona::Normal.prompt(), NORMAL_PROMPT);
        assert_eq!(Persona::Training.prompt(), TRAINING_PROMPT);
        assert_ne!(NORMAL_PROMPT, TRAINING_PROMPT);
        assert!(TRAINING_PROMPT.contains("合計点"));
    }

    #[test]
    fn test_display_matches_mode_flag() {
        assert_eq!(Persona::Normal.to_string(), "normal");
        assert_eq!(Persona::Training.to_string(), "training");
    }
}
