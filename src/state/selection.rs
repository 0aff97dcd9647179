//! Question selection: which catalog questions a session shows
//!
//! A single [`SelectionMode`] setting covers the survey variants: the whole
//! list, one root question that reveals its follow-ups once answered, or a
//! random fixed-size subset. Random draws go through [`RandomSource`] so the
//! outcome can be pinned in tests.

use crate::catalog::{Catalog, Locale, Question};
use crate::error::ConfigError;
use crate::state::FormState;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the visible question set is derived from a locale's list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum SelectionMode {
    /// Every question, in catalog order
    #[default]
    Full,
    /// The root question, plus its follow-ups once it has an answer
    #[serde(rename = "parent-followup")]
    ParentFollowUp,
    /// `size` questions drawn without replacement.
    ///
    /// Meant for presentation variety only; no statistical guarantees.
    RandomSample { size: usize },
}

impl SelectionMode {
    /// Whether editing `question` changes which questions are visible
    pub fn is_trigger(&self, question: &Question) -> bool {
        matches!(self, Self::ParentFollowUp) && !question.is_follow_up()
    }
}

impl FromStr for SelectionMode {
    type Err = ConfigError;

    /// Accepts `full`, `parent-followup`, `random-sample:<n>` and
    /// `random-sample(<n>)`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().to_ascii_lowercase();
        let invalid = || ConfigError::InvalidSelectionMode(s.to_string());

        match value.as_str() {
            "full" => return Ok(Self::Full),
            "parent-followup" | "parent-follow-up" => return Ok(Self::ParentFollowUp),
            _ => {}
        }

        let size = value
            .strip_prefix("random-sample")
            .and_then(|rest| {
                rest.strip_prefix(':').or_else(|| {
                    rest.strip_prefix('(')
                        .and_then(|inner| inner.strip_suffix(')'))
                })
            })
            .ok_or_else(invalid)?
            .trim()
            .parse::<usize>()
            .map_err(|_| invalid())?;

        if size == 0 {
            return Err(invalid());
        }
        Ok(Self::RandomSample { size })
    }
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full => f.write_str("full"),
            Self::ParentFollowUp => f.write_str("parent-followup"),
            Self::RandomSample { size } => write!(f, "random-sample:{size}"),
        }
    }
}

/// Source of uniform random indices
pub trait RandomSource {
    /// An index in `0..upper`. `upper` is never zero.
    fn next_index(&mut self, upper: usize) -> usize;
}

/// [`RandomSource`] backed by a `rand` generator
#[derive(Debug)]
pub struct RngSource<R>(R);

impl RngSource<StdRng> {
    /// Generator seeded from the operating system
    pub fn from_entropy() -> Self {
        Self(StdRng::from_entropy())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_index(&mut self, upper: usize) -> usize {
        self.0.gen_range(0..upper)
    }
}

/// Derive the visible questions for `locale`.
///
/// Falls back to `fallback` when `locale` has no questions. Returns the locale
/// whose questions were used together with the selection.
pub fn select(
    locale: Locale,
    fallback: Locale,
    catalog: &Catalog,
    mode: SelectionMode,
    answers: &FormState,
    rng: &mut dyn RandomSource,
) -> Result<(Locale, Vec<Question>), ConfigError> {
    let (used, questions) = catalog.questions_for(locale, fallback)?;

    let visible = match mode {
        SelectionMode::Full => questions.to_vec(),
        SelectionMode::ParentFollowUp => root_with_follow_ups(questions, answers),
        SelectionMode::RandomSample { size } => sample(questions, size, rng),
    };
    Ok((used, visible))
}

fn root_with_follow_ups(questions: &[Question], answers: &FormState) -> Vec<Question> {
    let Some(root) = questions.iter().find(|q| !q.is_follow_up()) else {
        tracing::warn!("No root question without a parent; nothing to show");
        return Vec::new();
    };

    let mut visible = vec![root.clone()];
    if !answers.answer(&root.field_name).trim().is_empty() {
        visible.extend(
            questions
                .iter()
                .filter(|q| q.is_follow_up_of(&root.field_name))
                .cloned(),
        );
    }
    visible
}

/// Partial Fisher-Yates over the question indices
fn sample(questions: &[Question], size: usize, rng: &mut dyn RandomSource) -> Vec<Question> {
    let len = questions.len();
    if size >= len {
        return questions.to_vec();
    }

    let mut indices: Vec<usize> = (0..len).collect();
    for i in 0..size {
        let j = i + rng.next_index(len - i);
        indices.swap(i, j);
    }
    indices[..size]
        .iter()
        .map(|&i| questions[i].clone())
        .collect()
}

/// Runs [`select`] with a fixed mode and keeps the form state in step
pub struct QuestionSelector {
    mode: SelectionMode,
    fallback: Locale,
    rng: Box<dyn RandomSource + Send>,
}

impl QuestionSelector {
    pub fn new(mode: SelectionMode, fallback: Locale) -> Self {
        Self::with_random_source(mode, fallback, RngSource::from_entropy())
    }

    pub fn with_random_source(
        mode: SelectionMode,
        fallback: Locale,
        rng: impl RandomSource + Send + 'static,
    ) -> Self {
        Self {
            mode,
            fallback,
            rng: Box::new(rng),
        }
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Select for `locale`, then initialise newly visible fields to empty
    /// and drop answers to fields that are no longer visible.
    pub fn apply(
        &mut self,
        locale: Locale,
        catalog: &Catalog,
        answers: &mut FormState,
    ) -> Result<(Locale, Vec<Question>), ConfigError> {
        let (used, visible) = select(
            locale,
            self.fallback,
            catalog,
            self.mode,
            answers,
            self.rng.as_mut(),
        )?;
        answers.sync_visible(&visible);
        tracing::debug!(
            "Selected {} question(s) for `{used}` in {} mode",
            visible.len(),
            self.mode
        );
        Ok((used, visible))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::{BTreeMap, HashSet};

    /// Replays a fixed list of draws, each reduced modulo the requested bound
    pub(crate) struct FixedSequence {
        values: Vec<usize>,
        pos: usize,
    }

    impl FixedSequence {
        pub(crate) fn new(values: &[usize]) -> Self {
            Self {
                values: values.to_vec(),
                pos: 0,
            }
        }
    }

    impl RandomSource for FixedSequence {
        fn next_index(&mut self, upper: usize) -> usize {
            let value = self.values.get(self.pos).copied().unwrap_or(0);
            self.pos += 1;
            value % upper
        }
    }

    fn names(questions: &[Question]) -> Vec<&str> {
        questions.iter().map(|q| q.field_name.as_str()).collect()
    }

    fn ten_question_catalog() -> Catalog {
        let questions = (0..10)
            .map(|i| Question::text(i, &format!("q{i}"), &format!("Question {i}?")))
            .collect();
        Catalog::new(BTreeMap::from([(Locale::En, questions)])).unwrap()
    }

    mod full {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_full_returns_catalog_in_order_for_every_locale() {
            let catalog = Catalog::embedded().unwrap();
            for locale in catalog.locales() {
                let (used, visible) = select(
                    locale,
                    Locale::En,
                    &catalog,
                    SelectionMode::Full,
                    &FormState::new(),
                    &mut FixedSequence::new(&[]),
                )
                .unwrap();
                assert_eq!(used, locale);
                assert_eq!(visible.as_slice(), catalog.get(locale).unwrap());
                let unique: HashSet<_> = names(&visible).into_iter().collect();
                assert_eq!(unique.len(), visible.len());
            }
        }

        #[test]
        fn test_missing_locale_uses_fallback() {
            let catalog = ten_question_catalog();
            let (used, visible) = select(
                Locale::Es,
                Locale::En,
                &catalog,
                SelectionMode::Full,
                &FormState::new(),
                &mut FixedSequence::new(&[]),
            )
            .unwrap();
            assert_eq!(used, Locale::En);
            assert_eq!(visible.len(), 10);
        }

        #[test]
        fn test_missing_locale_and_fallback_is_config_error() {
            let catalog = ten_question_catalog();
            let result = select(
                Locale::Es,
                Locale::Es,
                &catalog,
                SelectionMode::Full,
                &FormState::new(),
                &mut FixedSequence::new(&[]),
            );
            assert!(matches!(result, Err(ConfigError::MissingCatalog { .. })));
        }
    }

    mod parent_follow_up {
        use super::*;
        use pretty_assertions::assert_eq;

        fn follow_up_catalog() -> Catalog {
            let questions = vec![
                Question::select(1, "reported_symptoms", "Symptom?", &["Fever", "Cough"]),
                Question::text(2, "age", "Age?").with_parent("reported_symptoms"),
                Question::text(3, "unrelated", "Other?").with_parent("something_else"),
                Question::select(4, "country", "Country?", &["US", "ES"])
                    .with_parent("reported_symptoms"),
            ];
            Catalog::new(BTreeMap::from([(Locale::En, questions)])).unwrap()
        }

        fn run(answers: &FormState) -> Vec<Question> {
            select(
                Locale::En,
                Locale::En,
                &follow_up_catalog(),
                SelectionMode::ParentFollowUp,
                answers,
                &mut FixedSequence::new(&[]),
            )
            .unwrap()
            .1
        }

        #[test]
        fn test_blank_parent_shows_only_root() {
            let answers = FormState::from_pairs([("reported_symptoms", "")]);
            assert_eq!(names(&run(&answers)), vec!["reported_symptoms"]);
        }

        #[test]
        fn test_whitespace_parent_counts_as_blank() {
            let answers = FormState::from_pairs([("reported_symptoms", "   ")]);
            assert_eq!(names(&run(&answers)), vec!["reported_symptoms"]);
        }

        #[test]
        fn test_answered_parent_reveals_its_follow_ups_in_order() {
            let answers = FormState::from_pairs([("reported_symptoms", "Fever")]);
            assert_eq!(
                names(&run(&answers)),
                vec!["reported_symptoms", "age", "country"]
            );
        }

        #[test]
        fn test_no_root_question_yields_empty_set() {
            let questions = vec![Question::text(1, "age", "Age?").with_parent("missing")];
            let catalog = Catalog::new(BTreeMap::from([(Locale::En, questions)])).unwrap();
            let (_, visible) = select(
                Locale::En,
                Locale::En,
                &catalog,
                SelectionMode::ParentFollowUp,
                &FormState::new(),
                &mut FixedSequence::new(&[]),
            )
            .unwrap();
            assert!(visible.is_empty());
        }

        #[test]
        fn test_only_root_is_a_trigger() {
            let catalog = follow_up_catalog();
            let questions = catalog.get(Locale::En).unwrap();
            assert!(SelectionMode::ParentFollowUp.is_trigger(&questions[0]));
            assert!(!SelectionMode::ParentFollowUp.is_trigger(&questions[1]));
            assert!(!SelectionMode::Full.is_trigger(&questions[0]));
        }
    }

    mod random_sample {
        use super::*;
        use pretty_assertions::assert_eq;

        fn run(size: usize, rng: &mut dyn RandomSource) -> Vec<Question> {
            select(
                Locale::En,
                Locale::En,
                &ten_question_catalog(),
                SelectionMode::RandomSample { size },
                &FormState::new(),
                rng,
            )
            .unwrap()
            .1
        }

        #[test]
        fn test_fixed_sequence_gives_exact_draw() {
            // indices: swap(0,3) swap(1,1) swap(2,9)
            let visible = run(3, &mut FixedSequence::new(&[3, 0, 7]));
            assert_eq!(names(&visible), vec!["q3", "q1", "q9"]);
        }

        #[test]
        fn test_sample_is_distinct_and_from_catalog() {
            let catalog = ten_question_catalog();
            let all: HashSet<_> = catalog
                .get(Locale::En)
                .unwrap()
                .iter()
                .map(|q| q.field_name.clone())
                .collect();
            for _ in 0..50 {
                let visible = run(5, &mut RngSource::from_entropy());
                assert_eq!(visible.len(), 5);
                let drawn: HashSet<_> = visible.iter().map(|q| q.field_name.clone()).collect();
                assert_eq!(drawn.len(), 5);
                assert!(drawn.is_subset(&all));
            }
        }

        #[test]
        fn test_sample_larger_than_catalog_returns_full_list() {
            let catalog = ten_question_catalog();
            for size in [10, 11, 100] {
                let visible = run(size, &mut FixedSequence::new(&[5, 5, 5]));
                assert_eq!(visible.as_slice(), catalog.get(Locale::En).unwrap());
            }
        }

        #[test]
        fn test_seeded_rng_is_reproducible() {
            let a = run(4, &mut RngSource(StdRng::seed_from_u64(42)));
            let b = run(4, &mut RngSource(StdRng::seed_from_u64(42)));
            assert_eq!(a, b);
        }
    }

    mod selector {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_apply_syncs_form_state() {
            let catalog = ten_question_catalog();
            let mut selector = QuestionSelector::with_random_source(
                SelectionMode::RandomSample { size: 2 },
                Locale::En,
                FixedSequence::new(&[0, 0]),
            );
            let mut answers = FormState::from_pairs([("q5", "stale")]);
            let (_, visible) = selector.apply(Locale::En, &catalog, &mut answers).unwrap();

            assert_eq!(names(&visible), vec!["q0", "q1"]);
            assert_eq!(answers, FormState::from_pairs([("q0", ""), ("q1", "")]));
        }
    }

    mod mode_parsing {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_parse_named_modes() {
            assert_eq!("full".parse::<SelectionMode>().unwrap(), SelectionMode::Full);
            assert_eq!(
                "Parent-FollowUp".parse::<SelectionMode>().unwrap(),
                SelectionMode::ParentFollowUp
            );
        }

        #[test]
        fn test_parse_random_sample_forms() {
            let expected = SelectionMode::RandomSample { size: 5 };
            assert_eq!("random-sample:5".parse::<SelectionMode>().unwrap(), expected);
            assert_eq!("random-sample(5)".parse::<SelectionMode>().unwrap(), expected);
        }

        #[test]
        fn test_parse_rejects_garbage() {
            for input in ["", "random", "random-sample", "random-sample:x", "random-sample:0"] {
                assert!(input.parse::<SelectionMode>().is_err(), "{input}");
            }
        }

        #[test]
        fn test_display_round_trips_through_parse() {
            let mode = SelectionMode::RandomSample { size: 3 };
            assert_eq!(mode.to_string().parse::<SelectionMode>().unwrap(), mode);
        }

        #[test]
        fn test_serde_config_shape() {
            let mode: SelectionMode =
                serde_json::from_str(r#"{"mode": "random-sample", "size": 4}"#).unwrap();
            assert_eq!(mode, SelectionMode::RandomSample { size: 4 });
            let mode: SelectionMode = serde_json::from_str(r#"{"mode": "parent-followup"}"#).unwrap();
            assert_eq!(mode, SelectionMode::ParentFollowUp);
        }
    }
}
