//! Core data model types for verbdrill.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One conjugation entry.
///
/// Records are never edited in place once stored; the collection replaces
/// them instead. Field names serialize in camelCase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerbRecord {
    /// Opaque unique identifier. Blank means "not yet assigned".
    #[serde(default)]
    pub id: String,
    /// Base form (infinitive).
    pub base: String,
    /// Past simple.
    pub past: String,
    /// Past participle.
    pub participle: String,
    /// Translation of the base form.
    pub meaning: String,
    /// Example sentence in English.
    pub example: String,
    /// Informational only. Never checked against `base`/`past`.
    pub is_irregular: bool,
}

impl VerbRecord {
    /// Case-folded base form, the key the collection deduplicates on.
    pub fn key(&self) -> String {
        self.base.to_lowercase()
    }

    /// `true` when base, past and participle all carry text.
    pub fn has_forms(&self) -> bool {
        !self.base.trim().is_empty()
            && !self.past.trim().is_empty()
            && !self.participle.trim().is_empty()
    }
}

/// Which part of the collection a quiz draws from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizMode {
    #[default]
    Mix,
    Irregular,
    Regular,
}

impl QuizMode {
    /// Whether a record belongs to this mode's pool.
    pub fn admits(&self, verb: &VerbRecord) -> bool {
        match self {
            QuizMode::Mix => true,
            QuizMode::Irregular => verb.is_irregular,
            QuizMode::Regular => !verb.is_irregular,
        }
    }
}

impl fmt::Display for QuizMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizMode::Mix => write!(f, "mix"),
            QuizMode::Irregular => write!(f, "irregular"),
            QuizMode::Regular => write!(f, "regular"),
        }
    }
}

impl FromStr for QuizMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mix" | "mixed" | "all" => Ok(QuizMode::Mix),
            "irregular" => Ok(QuizMode::Irregular),
            "regular" => Ok(QuizMode::Regular),
            other => Err(format!("unknown quiz mode: {other}")),
        }
    }
}

fn seed(
    id: &str,
    base: &str,
    past: &str,
    participle: &str,
    meaning: &str,
    example: &str,
    is_irregular: bool,
) -> VerbRecord {
    VerbRecord {
        id: id.to_string(),
        base: base.to_string(),
        past: past.to_string(),
        participle: participle.to_string(),
        meaning: meaning.to_string(),
        example: example.to_string(),
        is_irregular,
    }
}

/// The built-in starter collection used when nothing valid is persisted.
pub fn seed_verbs() -> Vec<VerbRecord> {
    vec![
        seed("seed-01", "go", "went", "gone", "가다", "I went to the market yesterday.", true),
        seed("seed-02", "eat", "ate", "eaten", "먹다", "Have you eaten breakfast?", true),
        seed("seed-03", "see", "saw", "seen", "보다", "I have never seen snow.", true),
        seed("seed-04", "take", "took", "taken", "가져가다", "She took the last train home.", true),
        seed("seed-05", "write", "wrote", "written", "쓰다", "He has written three novels.", true),
        seed("seed-06", "begin", "began", "begun", "시작하다", "The concert has already begun.", true),
        seed("seed-07", "buy", "bought", "bought", "사다", "We bought a new car last week.", true),
        seed("seed-08", "speak", "spoke", "spoken", "말하다", "They spoke about the project.", true),
        seed("seed-09", "play", "played", "played", "놀다, 연주하다", "The children played in the park.", false),
        seed("seed-10", "study", "studied", "studied", "공부하다", "I have studied English for years.", false),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn quiz_mode_display_and_parse() {
        assert_eq!(QuizMode::Irregular.to_string(), "irregular");
        assert_eq!("Regular".parse::<QuizMode>().unwrap(), QuizMode::Regular);
        assert_eq!("mixed".parse::<QuizMode>().unwrap(), QuizMode::Mix);
        assert!("hard".parse::<QuizMode>().is_err());
    }

    #[test]
    fn seed_set_is_ten_unique_verbs() {
        let seeds = seed_verbs();
        assert_eq!(seeds.len(), 10);
        let keys: HashSet<String> = seeds.iter().map(VerbRecord::key).collect();
        assert_eq!(keys.len(), 10);
        assert!(seeds.iter().all(VerbRecord::has_forms));
        assert!(seeds.iter().any(|v| !v.is_irregular));
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let json = serde_json::to_value(&seed_verbs()[0]).unwrap();
        assert_eq!(json["isIrregular"], serde_json::Value::Bool(true));
        assert_eq!(json["participle"], "gone");
    }

    #[test]
    fn missing_id_deserializes_as_blank() {
        let verb: VerbRecord = serde_json::from_str(
            r#"{"base":"run","past":"ran","participle":"run","meaning":"달리다","example":"I ran.","isIrregular":true}"#,
        )
        .unwrap();
        assert!(verb.id.is_empty());
        assert_eq!(verb.key(), "run");
    }

    #[test]
    fn mode_admits() {
        let seeds = seed_verbs();
        let irregular = seeds.iter().filter(|v| QuizMode::Irregular.admits(v)).count();
        let regular = seeds.iter().filter(|v| QuizMode::Regular.admits(v)).count();
        assert_eq!(irregular + regular, seeds.len());
        assert_eq!(regular, 2);
    }
}
