//! Interactive quiz loop
//!
//! One trial walks the states
//! `SelectingCharacter -> AwaitingSyllable -> AwaitingTone -> Scoring -> Feedback`
//! and starts over. Typing `exit` at the syllable prompt (or closing input)
//! stops the session. An invalid tone abandons the trial without recording it.
//!
//! Input and output are generic so the loop can be driven by a terminal or
//! by scripted input in tests.

use std::io::{self, BufRead, Write};

use chrono::NaiveDateTime;
use rand::Rng;
use serde::Serialize;
use thiserror::Error;

use super::models::now_local;
use super::selection::SelectionPolicy;
use super::storage::{PerformanceStore, StorageError};
use super::validator::{parse_tone_input, AnswerOutcome, AnswerValidator};
use crate::lexicon::{CharacterRecord, ScriptVariant};

/// Typed at the syllable prompt to end the session (any case)
pub const STOP_SENTINEL: &str = "exit";

const SYLLABLE_PROMPT: &str = "Enter the pinyin (without tone), or type 'exit' to stop: ";
const TONE_PROMPT: &str = "Enter the tone number (1-4): ";
const INVALID_TONE: &str = "Invalid tone number. Please enter a number between 1 and 4.";

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("No characters to quiz")]
    EmptyLexicon,
}

pub type Result<T> = std::result::Result<T, SessionError>;

/// Where the quiz loop currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizState {
    SelectingCharacter,
    AwaitingSyllable,
    AwaitingTone,
    Scoring,
    Feedback,
    Stopped,
}

/// Totals for one session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    /// Trials scored and recorded
    pub trials: u32,
    pub correct: u32,
    /// Trials abandoned because of an invalid tone
    pub rejected: u32,
}

pub struct QuizSession<'a, R, W, G> {
    records: &'a [CharacterRecord],
    store: &'a mut PerformanceStore,
    validator: AnswerValidator,
    policy: SelectionPolicy,
    clock: fn() -> NaiveDateTime,
    input: R,
    output: W,
    rng: G,
}

impl<'a, R: BufRead, W: Write, G: Rng> QuizSession<'a, R, W, G> {
    pub fn new(
        records: &'a [CharacterRecord],
        store: &'a mut PerformanceStore,
        input: R,
        output: W,
        rng: G,
    ) -> Self {
        Self {
            records,
            store,
            validator: AnswerValidator::default(),
            policy: SelectionPolicy::default(),
            clock: now_local,
            input,
            output,
            rng,
        }
    }

    pub fn with_validator(mut self, validator: AnswerValidator) -> Self {
        self.validator = validator;
        self
    }

    pub fn with_policy(mut self, policy: SelectionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }

    /// Run trials until the user stops
    pub fn run(&mut self) -> Result<SessionSummary> {
        if self.records.is_empty() {
            return Err(SessionError::EmptyLexicon);
        }

        let records = self.records;
        let mut summary = SessionSummary::default();
        let mut state = QuizState::SelectingCharacter;
        let mut current: Option<&'a CharacterRecord> = None;
        let mut syllable = String::new();
        let mut tone = 0u8;
        let mut outcome = AnswerOutcome::Correct;

        loop {
            state = match state {
                QuizState::SelectingCharacter => {
                    let record = self
                        .policy
                        .pick(records, &*self.store, &mut self.rng)
                        .ok_or(SessionError::EmptyLexicon)?;
                    writeln!(self.output, "Character: {}", record.character)?;
                    current = Some(record);
                    QuizState::AwaitingSyllable
                }
                QuizState::AwaitingSyllable => match self.read_line(SYLLABLE_PROMPT)? {
                    Some(line) if !line.eq_ignore_ascii_case(STOP_SENTINEL) => {
                        syllable = line;
                        QuizState::AwaitingTone
                    }
                    _ => QuizState::Stopped,
                },
                QuizState::AwaitingTone => match self.read_line(TONE_PROMPT)? {
                    None => QuizState::Stopped,
                    Some(line) => match parse_tone_input(&line) {
                        Ok(n) => {
                            tone = n;
                            QuizState::Scoring
                        }
                        Err(e) => {
                            log::debug!("{}", e);
                            writeln!(self.output, "{}", INVALID_TONE)?;
                            writeln!(self.output)?;
                            summary.rejected += 1;
                            QuizState::SelectingCharacter
                        }
                    },
                },
                QuizState::Scoring => {
                    let Some(record) = current else {
                        return Err(SessionError::EmptyLexicon);
                    };
                    outcome = self.validator.validate(&syllable, tone, &record.pronunciation);
                    let success = outcome.is_success();
                    self.store
                        .record_at(&record.character, success, (self.clock)())?;

                    summary.trials += 1;
                    if success {
                        summary.correct += 1;
                    }
                    QuizState::Feedback
                }
                QuizState::Feedback => {
                    writeln!(self.output, "{}", outcome.message())?;
                    if let Some(record) = current {
                        writeln!(self.output, "Definition: {}", record.definition)?;
                    }
                    writeln!(self.output)?;
                    QuizState::SelectingCharacter
                }
                QuizState::Stopped => break,
            };
        }

        log::info!(
            "Session ended: {} trials, {} correct, {} rejected",
            summary.trials,
            summary.correct,
            summary.rejected
        );
        Ok(summary)
    }

    /// Prompt and read one trimmed line. `None` at end of input.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(buf.trim().to_string()))
    }
}

/// Ask which character set to drill. `None` means the user chose to exit
/// (or input ended). Unrecognised choices re-prompt.
pub fn prompt_script_menu<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> io::Result<Option<ScriptVariant>> {
    loop {
        writeln!(output, "Choose a character set:")?;
        writeln!(output, "1. {}", ScriptVariant::Simplified)?;
        writeln!(output, "2. {}", ScriptVariant::Traditional)?;
        writeln!(output, "3. Exit program")?;
        write!(output, "Enter your choice: ")?;
        output.flush()?;

        let mut buf = String::new();
        if input.read_line(&mut buf)? == 0 {
            return Ok(None);
        }

        match buf.trim() {
            "1" => return Ok(Some(ScriptVariant::Simplified)),
            "2" => return Ok(Some(ScriptVariant::Traditional)),
            "3" => {
                writeln!(output, "Exiting program. Goodbye!")?;
                return Ok(None);
            }
            _ => writeln!(output, "Invalid choice. Please try again.")?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drill::algorithm::interval_for;
    use crate::drill::models::ReviewInterval;
    use crate::drill::storage::DEFAULT_STORE_FILE;
    use crate::drill::validator::SyllableRule;
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn fixed_clock() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 18)
            .unwrap()
            .and_hms_opt(21, 0, 0)
            .unwrap()
    }

    fn ren() -> Vec<CharacterRecord> {
        vec![CharacterRecord::new("人", "rén", "person")]
    }

    fn run_script(
        records: &[CharacterRecord],
        store: &mut PerformanceStore,
        script: &str,
    ) -> (SessionSummary, String) {
        let mut output = Vec::new();
        let summary = QuizSession::new(
            records,
            store,
            Cursor::new(script.to_string()),
            &mut output,
            StdRng::seed_from_u64(3),
        )
        .with_clock(fixed_clock)
        .run()
        .unwrap();
        (summary, String::from_utf8(output).unwrap())
    }

    fn open_store(temp: &TempDir) -> PerformanceStore {
        PerformanceStore::open(temp.path().join(DEFAULT_STORE_FILE)).unwrap()
    }

    #[test]
    fn test_one_correct_trial_from_empty_store() {
        let temp = TempDir::new().unwrap();
        let mut store = open_store(&temp);
        let records = ren();

        let (summary, output) = run_script(&records, &mut store, "ren\n2\nexit\n");

        assert_eq!(summary, SessionSummary { trials: 1, correct: 1, rejected: 0 });
        assert!(output.contains("Character: 人"));
        assert!(output.contains("Correct!"));
        assert!(output.contains("Definition: person"));

        let reopened = open_store(&temp);
        let entry = reopened.get("人").unwrap();
        assert_eq!((entry.correct, entry.incorrect), (1, 0));
        assert_eq!(entry.last_repeated, fixed_clock());
        assert_eq!(interval_for(entry), ReviewInterval::OneDay);
    }

    #[test]
    fn test_interval_switches_after_fourth_correct() {
        let temp = TempDir::new().unwrap();
        let mut store = open_store(&temp);
        let records = ren();

        for expected in [1, 1, 1, 7] {
            run_script(&records, &mut store, "ren\n2\nexit\n");
            assert_eq!(interval_for(store.get("人").unwrap()).days(), expected);
        }
    }

    #[test]
    fn test_invalid_tone_does_not_record() {
        let temp = TempDir::new().unwrap();
        let mut store = open_store(&temp);
        let records = ren();

        let (summary, output) = run_script(&records, &mut store, "ren\n0\nren\n5\nren\nx\nexit\n");

        assert_eq!(summary, SessionSummary { trials: 0, correct: 0, rejected: 3 });
        assert_eq!(output.matches(INVALID_TONE).count(), 3);
        assert!(store.get("人").is_none());
    }

    #[test]
    fn test_wrong_answers_recorded_as_failures() {
        let temp = TempDir::new().unwrap();
        let mut store = open_store(&temp);
        let records = ren();

        let (summary, output) = run_script(&records, &mut store, "ren\n3\nrem\n2\nEXIT\n");

        assert_eq!(summary.trials, 2);
        assert_eq!(summary.correct, 0);
        assert!(output.contains("Incorrect tone. The correct tone is 2. The correct pinyin is rén."));
        assert!(output.contains("Incorrect. The correct pinyin is: rén"));
        assert_eq!(store.get("人").unwrap().incorrect, 2);
    }

    #[test]
    fn test_end_of_input_stops() {
        let temp = TempDir::new().unwrap();
        let mut store = open_store(&temp);
        let records = ren();

        let (summary, _) = run_script(&records, &mut store, "ren\n");
        assert_eq!(summary, SessionSummary::default());
        assert!(store.is_empty());
    }

    #[test]
    fn test_truncate_rule_session() {
        let temp = TempDir::new().unwrap();
        let mut store = open_store(&temp);
        let records = vec![CharacterRecord::new("妈", "mā", "mother")];
        let mut output = Vec::new();

        let summary = QuizSession::new(
            &records,
            &mut store,
            Cursor::new("m\n1\nexit\n"),
            &mut output,
            StdRng::seed_from_u64(0),
        )
        .with_validator(AnswerValidator::new(SyllableRule::TruncateLast))
        .run()
        .unwrap();

        assert_eq!(summary.correct, 1);
    }

    #[test]
    fn test_empty_lexicon_is_rejected() {
        let temp = TempDir::new().unwrap();
        let mut store = open_store(&temp);
        let mut output = Vec::new();

        let result = QuizSession::new(
            &[],
            &mut store,
            Cursor::new("ren\n2\n"),
            &mut output,
            StdRng::seed_from_u64(0),
        )
        .run();

        assert!(matches!(result, Err(SessionError::EmptyLexicon)));
        assert!(output.is_empty());
    }

    #[test]
    fn test_script_menu() {
        let mut output = Vec::new();
        let choice = prompt_script_menu(&mut Cursor::new("9\n2\n"), &mut output).unwrap();
        assert_eq!(choice, Some(ScriptVariant::Traditional));
        assert!(String::from_utf8(output).unwrap().contains("Invalid choice. Please try again."));

        let mut output = Vec::new();
        assert_eq!(prompt_script_menu(&mut Cursor::new("3\n"), &mut output).unwrap(), None);
        assert_eq!(prompt_script_menu(&mut Cursor::new(""), &mut Vec::new()).unwrap(), None);
    }
}
