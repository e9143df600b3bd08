//! Session state owners and key-value persistence.
//!
//! All derived results (trait scores, consistency, warnings) are recomputed
//! on demand from the answer and behavioral logs; nothing derived is ever
//! persisted as ground truth. Loading a malformed or missing document
//! recovers defaults with a warning instead of failing the caller.

use crate::assessment::behavioral::BehavioralLog;
use crate::assessment::catalog::{
    self, AgeBand, IntelligenceDimension, InterestDimension, QuestionSet, TraitTag,
};
use crate::assessment::crossval::{self, ConsistencyReport, OverallAssessment};
use crate::assessment::norms::{
    assess_data_quality, DataQuality, NormDomain, NormTable, QualitySignals,
};
use crate::assessment::scoring::quality::{
    paired_consistency, social_desirability_bias, BiasReport, PairedConsistency,
};
use crate::assessment::scoring::{self, AnswerRecord, LikertOutOfRange, TraitScore};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Mutex;

pub const PROFILE_KEY: &str = "growthlens_profile";
pub const ANSWERS_KEY: &str = "growthlens_answers";
pub const BEHAVIORAL_KEY: &str = "growthlens_behavioral";
pub const NARRATIVE_KEY: &str = "growthlens_narrative";
pub const CONSENT_KEY: &str = "growthlens_consent";
pub const HISTORY_KEY: &str = "growthlens_history";

/// Most recent completed sessions kept in the history document.
const HISTORY_LIMIT: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Female,
    Male,
    Other,
}

impl Gender {
    pub const fn label(self) -> &'static str {
        match self {
            Gender::Female => "female",
            Gender::Male => "male",
            Gender::Other => "other",
        }
    }
}

/// Respondent profile captured before the questionnaire starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub age: u8,
    pub gender: Gender,
    pub created_at: DateTime<Utc>,
}

impl Profile {
    pub fn new(name: impl Into<String>, age: u8, gender: Gender) -> Self {
        Self {
            name: name.into(),
            age,
            gender,
            created_at: Utc::now(),
        }
    }

    pub fn age_band(&self) -> Option<AgeBand> {
        AgeBand::from_age(self.age)
    }
}

/// Append-only questionnaire answer log.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnswerLog {
    records: Vec<AnswerRecord>,
    #[serde(default)]
    started_at: Option<DateTime<Utc>>,
}

impl AnswerLog {
    pub fn record(
        &mut self,
        item_id: impl Into<String>,
        set: QuestionSet,
        value: u8,
    ) -> Result<(), LikertOutOfRange> {
        if self.started_at.is_none() {
            self.started_at = Some(Utc::now());
        }
        self.records.push(AnswerRecord::new(item_id, set, value)?);
        Ok(())
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn records(&self) -> &[AnswerRecord] {
        &self.records
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Latest raw value per item id within one set.
    pub fn value_map(&self, set: QuestionSet) -> HashMap<&str, u8> {
        self.records
            .iter()
            .filter(|record| record.set == set)
            .map(|record| (record.item_id.as_str(), record.value.get()))
            .collect()
    }

    /// Distinct items answered in one set.
    pub fn answered_count(&self, set: QuestionSet) -> usize {
        self.records
            .iter()
            .filter(|record| record.set == set)
            .map(|record| record.item_id.as_str())
            .collect::<HashSet<_>>()
            .len()
    }
}

/// Explicit opt-ins gathered before any data leaves the session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentFlags {
    #[serde(default)]
    pub disclaimer_accepted: bool,
    #[serde(default)]
    pub norm_collection: bool,
}

/// One completed session, kept for the per-child history view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub child_name: String,
    pub age: u8,
    pub taken_at: DateTime<Utc>,
    pub intelligence_average: u8,
    pub interest_average: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct History {
    records: Vec<HistoryRecord>,
}

impl History {
    /// Append, evicting the oldest entries beyond the cap.
    pub fn push(&mut self, record: HistoryRecord) {
        self.records.push(record);
        if self.records.len() > HISTORY_LIMIT {
            let excess = self.records.len() - HISTORY_LIMIT;
            self.records.drain(..excess);
        }
    }

    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    pub fn for_child<'a>(&'a self, name: &str) -> Vec<&'a HistoryRecord> {
        self.records
            .iter()
            .filter(|record| record.child_name == name)
            .collect()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not serialize document for key {key}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("store backend failed for key {key}: {reason}")]
    Backend { key: String, reason: String },
}

/// Opaque JSON key-value persistence boundary.
pub trait StateStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn save(&self, key: &str, json: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// In-memory store for tests and the demo binary.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl StateStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries().get(key).cloned())
    }

    fn save(&self, key: &str, json: &str) -> Result<(), StoreError> {
        self.entries().insert(key.to_string(), json.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries().remove(key);
        Ok(())
    }
}

/// Decode one stored document, falling back to defaults on any failure.
fn load_or_default<T: DeserializeOwned + Default>(store: &dyn StateStore, key: &str) -> T {
    match store.load(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(key, error = %err, "malformed stored document, using defaults");
                T::default()
            }
        },
        Ok(None) => T::default(),
        Err(err) => {
            tracing::warn!(key, error = %err, "store read failed, using defaults");
            T::default()
        }
    }
}

fn save_document<T: Serialize>(
    store: &dyn StateStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let json = serde_json::to_string(value).map_err(|source| StoreError::Serialize {
        key: key.to_string(),
        source,
    })?;
    store.save(key, &json)
}

/// The whole assessment session: profile, logs, consent, history, and the
/// norm table, with the derived query surface on top.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub profile: Option<Profile>,
    pub answers: AnswerLog,
    pub behavioral: BehavioralLog,
    pub consent: ConsentFlags,
    pub history: History,
    /// Seeded in-process; not part of the persisted session documents.
    #[serde(skip)]
    norms: NormTable,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Age band for norm lookups. Without a bandable profile the middle
    /// band is the standardization fallback.
    pub fn band(&self) -> AgeBand {
        self.profile
            .as_ref()
            .and_then(Profile::age_band)
            .unwrap_or(AgeBand::Middle)
    }

    pub fn norms(&self) -> &NormTable {
        &self.norms
    }

    pub fn norms_mut(&mut self) -> &mut NormTable {
        &mut self.norms
    }

    /// Standardized intelligence scores for every dimension with at least
    /// one matched answer.
    pub fn trait_scores(&self) -> BTreeMap<IntelligenceDimension, TraitScore> {
        let norm = self.norms.get(NormDomain::Intelligence, self.band());
        IntelligenceDimension::ALL
            .iter()
            .filter_map(|&dim| {
                let tag = TraitTag::Intelligence(dim);
                let raw = scoring::raw_trait_score(self.answers.records(), tag);
                (raw.answered > 0)
                    .then(|| (dim, scoring::score_trait(self.answers.records(), tag, &norm)))
            })
            .collect()
    }

    /// Standardized interest scores, same contract as [`trait_scores`].
    ///
    /// [`trait_scores`]: SessionState::trait_scores
    pub fn interest_scores(&self) -> BTreeMap<InterestDimension, TraitScore> {
        let norm = self.norms.get(NormDomain::Interest, self.band());
        InterestDimension::ALL
            .iter()
            .filter_map(|&dim| {
                let tag = TraitTag::Interest(dim);
                let raw = scoring::raw_trait_score(self.answers.records(), tag);
                (raw.answered > 0)
                    .then(|| (dim, scoring::score_trait(self.answers.records(), tag, &norm)))
            })
            .collect()
    }

    fn standard_map(&self) -> BTreeMap<IntelligenceDimension, u8> {
        self.trait_scores()
            .into_iter()
            .map(|(dim, score)| (dim, score.standard))
            .collect()
    }

    pub fn consistency_report(&self) -> ConsistencyReport {
        crossval::consistency_report(&self.standard_map(), &self.behavioral.task_scores())
    }

    pub fn integrated_assessment(&self) -> OverallAssessment {
        crossval::integrated_assessment(&self.standard_map(), &self.behavioral.task_scores())
    }

    /// Latest raw value per social-desirability probe item.
    fn probe_values(&self) -> Vec<u8> {
        let mut latest: HashMap<&str, u8> = HashMap::new();
        for record in self.answers.records() {
            if catalog::find(record.set, &record.item_id).is_some_and(|item| item.probe) {
                latest.insert(record.item_id.as_str(), record.value.get());
            }
        }
        let mut values = Vec::new();
        for set in [QuestionSet::Intelligence, QuestionSet::Interest] {
            for id in catalog::probe_ids(set) {
                if let Some(&value) = latest.get(id) {
                    values.push(value);
                }
            }
        }
        values
    }

    pub fn social_desirability(&self) -> BiasReport {
        social_desirability_bias(&self.probe_values())
    }

    pub fn paired_consistency(&self, set: QuestionSet) -> PairedConsistency {
        let answers = self.answers.value_map(set);
        paired_consistency(&answers, catalog::consistency_pairs(set))
    }

    /// All advisory warnings for the session: per-trait scoring warnings,
    /// the social-desirability grade, and failed paired-consistency checks.
    /// Deduplicated, order preserved.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        for score in self.trait_scores().values() {
            warnings.extend(score.warnings.iter().cloned());
        }
        for score in self.interest_scores().values() {
            warnings.extend(score.warnings.iter().cloned());
        }

        let bias = self.social_desirability();
        if bias.has_bias {
            warnings.push(format!(
                "social desirability bias is {} (mean probe score {:.2})",
                bias.level.label(),
                bias.average
            ));
        }

        for set in [QuestionSet::Intelligence, QuestionSet::Interest] {
            let paired = self.paired_consistency(set);
            if !paired.consistent {
                warnings.push(format!(
                    "{} answers failed the paired consistency check ({:.0}% of pairs agree)",
                    set.label(),
                    paired.ratio * 100.0
                ));
            }
        }

        let mut seen = HashSet::new();
        warnings.retain(|warning| seen.insert(warning.clone()));
        warnings
    }

    /// Distinct items answered out of the items applicable to the band.
    pub fn progress(&self, set: QuestionSet) -> (usize, usize) {
        let total = catalog::items_for_band(set, self.band()).len();
        (self.answers.answered_count(set), total)
    }

    /// Grade the session for the norm-collection pool.
    pub fn data_quality(&self) -> DataQuality {
        let intelligence = self.trait_scores();
        let interests = self.interest_scores();
        let trait_percents = intelligence
            .values()
            .chain(interests.values())
            .map(|score| score.raw_percent)
            .collect();
        let elapsed_seconds = self
            .answers
            .started_at()
            .map(|started| (Utc::now() - started).num_seconds() as f64);
        assess_data_quality(&QualitySignals {
            trait_percents,
            avg_search_seconds: self.behavioral.avg_search_seconds(),
            divergent_answer_count: self.behavioral.divergent_answer_count(),
            elapsed_seconds,
        })
    }

    /// Record the current session into the history, if a profile exists.
    pub fn archive(&mut self) {
        let Some(profile) = self.profile.clone() else {
            return;
        };
        fn average<K>(scores: &BTreeMap<K, TraitScore>) -> u8 {
            if scores.is_empty() {
                0
            } else {
                let sum: u32 = scores.values().map(|s| u32::from(s.standard)).sum();
                (f64::from(sum) / scores.len() as f64).round() as u8
            }
        }
        let intelligence_average = average(&self.trait_scores());
        let interest_average = average(&self.interest_scores());
        self.history.push(HistoryRecord {
            child_name: profile.name,
            age: profile.age,
            taken_at: Utc::now(),
            intelligence_average,
            interest_average,
        });
    }

    pub fn reset_answers(&mut self) {
        self.answers.reset();
    }

    pub fn reset_behavioral(&mut self) {
        self.behavioral.reset();
    }

    /// Clear everything except the history.
    pub fn reset(&mut self) {
        self.profile = None;
        self.answers.reset();
        self.behavioral.reset();
        self.consent = ConsentFlags::default();
    }

    /// Persist each component under its own namespaced key.
    pub fn save(&self, store: &dyn StateStore) -> Result<(), StoreError> {
        save_document(store, PROFILE_KEY, &self.profile)?;
        save_document(store, ANSWERS_KEY, &self.answers)?;
        save_document(store, BEHAVIORAL_KEY, &self.behavioral)?;
        save_document(store, CONSENT_KEY, &self.consent)?;
        save_document(store, HISTORY_KEY, &self.history)?;
        Ok(())
    }

    /// Rebuild a session from the store. Malformed documents fall back to
    /// defaults component by component.
    pub fn load(store: &dyn StateStore) -> Self {
        Self {
            profile: load_or_default(store, PROFILE_KEY),
            answers: load_or_default(store, ANSWERS_KEY),
            behavioral: load_or_default(store, BEHAVIORAL_KEY),
            consent: load_or_default(store, CONSENT_KEY),
            history: load_or_default(store, HISTORY_KEY),
            norms: NormTable::seeded(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer_all(session: &mut SessionState, set: QuestionSet, value: u8) {
        let items: Vec<_> = catalog::items(set).iter().collect();
        for item in items {
            session
                .answers
                .record(item.id, set, value)
                .expect("valid likert value");
        }
    }

    #[test]
    fn band_falls_back_to_middle_without_profile() {
        let session = SessionState::new();
        assert_eq!(session.band(), AgeBand::Middle);

        let mut session = SessionState::new();
        session.profile = Some(Profile::new("out of range", 42, Gender::Other));
        assert_eq!(session.band(), AgeBand::Middle);

        session.profile = Some(Profile::new("in range", 8, Gender::Female));
        assert_eq!(session.band(), AgeBand::Young);
    }

    #[test]
    fn out_of_range_answer_is_rejected_at_append() {
        let mut session = SessionState::new();
        assert!(session
            .answers
            .record("ling-01", QuestionSet::Intelligence, 9)
            .is_err());
        assert!(session.answers.records().is_empty());
    }

    #[test]
    fn trait_scores_cover_only_answered_dimensions() {
        let mut session = SessionState::new();
        session
            .answers
            .record("ling-01", QuestionSet::Intelligence, 4)
            .expect("valid");
        let scores = session.trait_scores();
        assert_eq!(scores.len(), 1);
        assert!(scores.contains_key(&IntelligenceDimension::Linguistic));
    }

    #[test]
    fn warnings_include_session_level_bias() {
        let mut session = SessionState::new();
        for id in ["sds-01", "sds-02", "sds-03", "sds-04"] {
            session
                .answers
                .record(id, QuestionSet::Interest, 5)
                .expect("valid");
        }
        let warnings = session.warnings();
        assert!(warnings
            .iter()
            .any(|warning| warning.contains("social desirability")));
    }

    #[test]
    fn full_answer_sheet_passes_paired_checks() {
        let mut session = SessionState::new();
        answer_all(&mut session, QuestionSet::Intelligence, 4);
        let paired = session.paired_consistency(QuestionSet::Intelligence);
        assert!(paired.consistent);
    }

    #[test]
    fn progress_counts_distinct_items() {
        let mut session = SessionState::new();
        session
            .answers
            .record("ling-01", QuestionSet::Intelligence, 3)
            .expect("valid");
        session
            .answers
            .record("ling-01", QuestionSet::Intelligence, 4)
            .expect("valid");
        let (answered, total) = session.progress(QuestionSet::Intelligence);
        assert_eq!(answered, 1);
        assert!(total > 0);
    }

    #[test]
    fn history_caps_at_twenty_records() {
        let mut history = History::default();
        for i in 0..25 {
            history.push(HistoryRecord {
                child_name: format!("child-{i}"),
                age: 10,
                taken_at: Utc::now(),
                intelligence_average: 50,
                interest_average: 50,
            });
        }
        assert_eq!(history.records().len(), 20);
        // Oldest entries were evicted.
        assert_eq!(history.records()[0].child_name, "child-5");
    }

    #[test]
    fn save_and_load_round_trip() {
        let store = MemoryStore::new();
        let mut session = SessionState::new();
        session.profile = Some(Profile::new("Mira", 11, Gender::Female));
        session.consent.disclaimer_accepted = true;
        session
            .answers
            .record("ling-01", QuestionSet::Intelligence, 4)
            .expect("valid");
        session.save(&store).expect("save succeeds");

        let loaded = SessionState::load(&store);
        assert_eq!(loaded.profile, session.profile);
        assert_eq!(loaded.answers, session.answers);
        assert!(loaded.consent.disclaimer_accepted);
    }

    #[test]
    fn malformed_document_recovers_defaults() {
        let store = MemoryStore::new();
        store
            .save(ANSWERS_KEY, "{not valid json")
            .expect("save succeeds");
        store
            .save(PROFILE_KEY, "null")
            .expect("save succeeds");
        let loaded = SessionState::load(&store);
        assert!(loaded.answers.records().is_empty());
        assert!(loaded.profile.is_none());
    }

    #[test]
    fn reset_preserves_history() {
        let mut session = SessionState::new();
        session.profile = Some(Profile::new("Teo", 9, Gender::Male));
        session
            .answers
            .record("ling-01", QuestionSet::Intelligence, 5)
            .expect("valid");
        session.archive();
        session.reset();
        assert!(session.profile.is_none());
        assert!(session.answers.records().is_empty());
        assert_eq!(session.history.records().len(), 1);
    }
}
