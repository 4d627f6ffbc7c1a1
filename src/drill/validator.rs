//! Answer checking
//!
//! An answer is judged at two levels: the bare syllable first, then the
//! tone. A wrong syllable short-circuits the tone check.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pronunciation::{tone_of_marked, truncated_syllable, Pronunciation, Tone};

/// Tone numbers a user may enter
const TONE_INPUT_RANGE: std::ops::RangeInclusive<u8> = 1..=4;

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Invalid tone number '{0}'")]
pub struct InvalidToneInput(pub String);

/// How the expected bare syllable is derived from the canonical reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SyllableRule {
    /// Remove the tone mark from whichever vowel carries it (`hǎo` -> `hao`)
    #[default]
    StripDiacritic,
    /// Drop the last character of the marked reading (`hǎo` -> `hǎ`).
    /// Matches the bare syllable only when the mark sits on the final letter.
    TruncateLast,
}

/// Result of checking one answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerOutcome {
    Correct,
    WrongTone { expected_tone: Tone, canonical: String },
    WrongSyllable { canonical: String },
}

impl AnswerOutcome {
    /// Only a fully correct answer counts as a success
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Correct)
    }

    /// Feedback line shown to the user
    pub fn message(&self) -> String {
        match self {
            Self::Correct => "Correct!".to_string(),
            Self::WrongTone {
                expected_tone,
                canonical,
            } => format!(
                "Incorrect tone. The correct tone is {}. The correct pinyin is {}.",
                expected_tone, canonical
            ),
            Self::WrongSyllable { canonical } => {
                format!("Incorrect. The correct pinyin is: {}", canonical)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AnswerValidator {
    rule: SyllableRule,
}

impl AnswerValidator {
    pub fn new(rule: SyllableRule) -> Self {
        Self { rule }
    }

    /// Check a syllable/tone pair against a canonical reading.
    ///
    /// `canonical` may be tone-marked or numbered; feedback always shows the
    /// tone-marked form. Syllables are compared exactly, case included.
    pub fn validate(&self, user_syllable: &str, user_tone: u8, canonical: &str) -> AnswerOutcome {
        let (marked, expected_syllable, expected_tone) = self.expected(canonical);

        if user_syllable != expected_syllable {
            return AnswerOutcome::WrongSyllable { canonical: marked };
        }

        if user_tone != expected_tone.number() {
            return AnswerOutcome::WrongTone {
                expected_tone,
                canonical: marked,
            };
        }

        AnswerOutcome::Correct
    }

    fn expected(&self, canonical: &str) -> (String, String, Tone) {
        let parsed = Pronunciation::parse(canonical);
        let marked = parsed
            .as_ref()
            .map(Pronunciation::marked)
            .unwrap_or_else(|_| canonical.to_string());

        match (self.rule, parsed) {
            (SyllableRule::StripDiacritic, Ok(p)) => (marked, p.syllable, p.tone),
            _ => {
                let syllable = truncated_syllable(&marked);
                let tone = tone_of_marked(&marked);
                (marked, syllable, tone)
            }
        }
    }
}

/// Parse the tone line. Only plain digits in 1-4 are accepted.
pub fn parse_tone_input(raw: &str) -> Result<u8, InvalidToneInput> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(InvalidToneInput(trimmed.to_string()));
    }

    trimmed
        .parse::<u8>()
        .ok()
        .filter(|n| TONE_INPUT_RANGE.contains(n))
        .ok_or_else(|| InvalidToneInput(trimmed.to_string()))
}
