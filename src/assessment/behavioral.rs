//! Behavioral task results.
//!
//! Rounds append incrementally as the respondent plays; the 0-100 score a
//! task reports is always the derived aggregate over its rounds.

use serde::{Deserialize, Serialize};

/// Rounds required per task before the battery counts as complete.
const VISUAL_SEARCH_ROUNDS: usize = 3;
const MEMORY_ROUNDS: usize = 3;
const LOGIC_ROUNDS: usize = 3;
const CREATIVE_ROUNDS: usize = 2;

/// Behavioral task categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskCategory {
    Attention,
    Memory,
    Logic,
    Creativity,
}

impl TaskCategory {
    pub const ALL: [Self; 4] = [Self::Attention, Self::Memory, Self::Logic, Self::Creativity];

    pub const fn label(self) -> &'static str {
        match self {
            TaskCategory::Attention => "attention",
            TaskCategory::Memory => "memory",
            TaskCategory::Logic => "logic",
            TaskCategory::Creativity => "creativity",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            TaskCategory::Attention => "Attention",
            TaskCategory::Memory => "Memory",
            TaskCategory::Logic => "Logical Reasoning",
            TaskCategory::Creativity => "Creativity",
        }
    }

    pub const fn task_name(self) -> &'static str {
        match self {
            TaskCategory::Attention => "timed visual search",
            TaskCategory::Memory => "picture recall",
            TaskCategory::Logic => "pattern inference",
            TaskCategory::Creativity => "divergent production",
        }
    }
}

/// One timed visual-search round.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisualSearchRound {
    pub seconds: f64,
    pub errors: u32,
}

/// One recall round, as percent of targets recovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryRound {
    pub accuracy: u8,
}

/// One pattern-inference round.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogicRound {
    pub correct: bool,
    pub seconds: f64,
}

/// One divergent-production round, with the prompt kept for the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreativeRound {
    pub prompt: String,
    #[serde(default)]
    pub prompt_category: String,
    #[serde(default)]
    pub reference_answers: Vec<String>,
    pub answers: Vec<String>,
}

/// Append-only log of behavioral rounds, one vector per task category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BehavioralLog {
    #[serde(default)]
    visual_search: Vec<VisualSearchRound>,
    #[serde(default)]
    memory: Vec<MemoryRound>,
    #[serde(default)]
    logic: Vec<LogicRound>,
    #[serde(default)]
    creative: Vec<CreativeRound>,
}

impl BehavioralLog {
    pub fn record_visual_search(&mut self, round: VisualSearchRound) {
        self.visual_search.push(round);
    }

    pub fn record_memory(&mut self, round: MemoryRound) {
        self.memory.push(round);
    }

    pub fn record_logic(&mut self, round: LogicRound) {
        self.logic.push(round);
    }

    pub fn record_creative(&mut self, round: CreativeRound) {
        self.creative.push(round);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn visual_search_rounds(&self) -> &[VisualSearchRound] {
        &self.visual_search
    }

    pub fn memory_rounds(&self) -> &[MemoryRound] {
        &self.memory
    }

    pub fn logic_rounds(&self) -> &[LogicRound] {
        &self.logic
    }

    pub fn creative_rounds(&self) -> &[CreativeRound] {
        &self.creative
    }

    /// Mean visual-search time, when any rounds were played.
    pub fn avg_search_seconds(&self) -> Option<f64> {
        if self.visual_search.is_empty() {
            return None;
        }
        let total: f64 = self.visual_search.iter().map(|round| round.seconds).sum();
        Some(total / self.visual_search.len() as f64)
    }

    /// Time-normalized attention score: 100 at five seconds or faster,
    /// linearly down to 0 at sixty seconds.
    pub fn attention_score(&self) -> u8 {
        match self.avg_search_seconds() {
            None => 0,
            Some(avg) => {
                let score = 100.0 - (avg - 5.0) * (100.0 / 55.0);
                score.round().clamp(0.0, 100.0) as u8
            }
        }
    }

    /// Mean recall accuracy.
    pub fn memory_score(&self) -> u8 {
        if self.memory.is_empty() {
            return 0;
        }
        let total: u32 = self.memory.iter().map(|round| u32::from(round.accuracy)).sum();
        (f64::from(total) / self.memory.len() as f64).round() as u8
    }

    /// Pass-rate over the inference rounds.
    pub fn logic_score(&self) -> u8 {
        if self.logic.is_empty() {
            return 0;
        }
        let correct = self.logic.iter().filter(|round| round.correct).count();
        ((correct as f64 / self.logic.len() as f64) * 100.0).round() as u8
    }

    /// Quantity plus diversity of produced answers, each component capped
    /// at 50. Diversity counts distinct leading characters, a deliberately
    /// crude category proxy.
    pub fn creativity_score(&self) -> u8 {
        if self.creative.is_empty() {
            return 0;
        }
        let mut total_answers = 0usize;
        let mut initials = std::collections::HashSet::new();
        for round in &self.creative {
            total_answers += round.answers.len();
            for answer in &round.answers {
                if let Some(first) = answer.chars().next() {
                    initials.insert(first);
                }
            }
        }
        let quantity = (total_answers * 5).min(50) as u8;
        let diversity = (initials.len() * 10).min(50) as u8;
        quantity + diversity
    }

    pub fn task_score(&self, category: TaskCategory) -> u8 {
        match category {
            TaskCategory::Attention => self.attention_score(),
            TaskCategory::Memory => self.memory_score(),
            TaskCategory::Logic => self.logic_score(),
            TaskCategory::Creativity => self.creativity_score(),
        }
    }

    pub fn task_scores(&self) -> TaskScores {
        TaskScores {
            attention: self.attention_score(),
            memory: self.memory_score(),
            logic: self.logic_score(),
            creativity: self.creativity_score(),
        }
    }

    /// Whether every task has its minimum number of rounds.
    pub fn all_completed(&self) -> bool {
        self.visual_search.len() >= VISUAL_SEARCH_ROUNDS
            && self.memory.len() >= MEMORY_ROUNDS
            && self.logic.len() >= LOGIC_ROUNDS
            && self.creative.len() >= CREATIVE_ROUNDS
    }

    /// Total divergent-production answers, used by the data-quality grade.
    pub fn divergent_answer_count(&self) -> usize {
        self.creative.iter().map(|round| round.answers.len()).sum()
    }
}

/// Snapshot of the four aggregate task scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskScores {
    pub attention: u8,
    pub memory: u8,
    pub logic: u8,
    pub creativity: u8,
}

impl TaskScores {
    pub fn get(&self, category: TaskCategory) -> u8 {
        match category {
            TaskCategory::Attention => self.attention,
            TaskCategory::Memory => self.memory,
            TaskCategory::Logic => self.logic,
            TaskCategory::Creativity => self.creativity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn search(seconds: f64) -> VisualSearchRound {
        VisualSearchRound { seconds, errors: 0 }
    }

    fn creative(answers: &[&str]) -> CreativeRound {
        CreativeRound {
            prompt: "a paperclip".to_string(),
            prompt_category: "everyday object".to_string(),
            reference_answers: vec!["bookmark".to_string()],
            answers: answers.iter().map(|a| a.to_string()).collect(),
        }
    }

    #[test]
    fn empty_log_scores_zero_everywhere() {
        let log = BehavioralLog::default();
        for category in TaskCategory::ALL {
            assert_eq!(log.task_score(category), 0);
        }
        assert!(!log.all_completed());
    }

    #[test]
    fn attention_score_is_time_normalized() {
        let mut log = BehavioralLog::default();
        log.record_visual_search(search(5.0));
        assert_eq!(log.attention_score(), 100);

        log.reset();
        log.record_visual_search(search(60.0));
        assert_eq!(log.attention_score(), 0);

        log.reset();
        // Mean 32.5s -> 100 - 27.5 * (100/55) = 50.
        log.record_visual_search(search(30.0));
        log.record_visual_search(search(35.0));
        assert_eq!(log.attention_score(), 50);
    }

    #[test]
    fn attention_score_clamps_fast_and_slow_extremes() {
        let mut log = BehavioralLog::default();
        log.record_visual_search(search(2.0));
        assert_eq!(log.attention_score(), 100);

        log.reset();
        log.record_visual_search(search(200.0));
        assert_eq!(log.attention_score(), 0);
    }

    #[test]
    fn memory_score_is_mean_accuracy() {
        let mut log = BehavioralLog::default();
        log.record_memory(MemoryRound { accuracy: 80 });
        log.record_memory(MemoryRound { accuracy: 60 });
        log.record_memory(MemoryRound { accuracy: 70 });
        assert_eq!(log.memory_score(), 70);
    }

    #[test]
    fn logic_score_is_pass_rate() {
        let mut log = BehavioralLog::default();
        log.record_logic(LogicRound {
            correct: true,
            seconds: 8.0,
        });
        log.record_logic(LogicRound {
            correct: true,
            seconds: 12.0,
        });
        log.record_logic(LogicRound {
            correct: false,
            seconds: 30.0,
        });
        assert_eq!(log.logic_score(), 67);
    }

    #[test]
    fn creativity_rewards_quantity_and_diversity() {
        let mut log = BehavioralLog::default();
        log.record_creative(creative(&["anchor", "bridge", "crane"]));
        log.record_creative(creative(&["door", "engine"]));
        // 5 answers -> 25 quantity; 5 distinct initials -> 50 diversity.
        assert_eq!(log.creativity_score(), 75);
    }

    #[test]
    fn creativity_components_cap_at_fifty_each() {
        let mut log = BehavioralLog::default();
        let many: Vec<String> = (0..30).map(|i| format!("{i}-idea")).collect();
        log.record_creative(CreativeRound {
            prompt: "a brick".to_string(),
            prompt_category: "everyday object".to_string(),
            reference_answers: Vec::new(),
            answers: many,
        });
        assert!(log.creativity_score() <= 100);
    }

    #[test]
    fn completion_requires_all_minimums() {
        let mut log = BehavioralLog::default();
        for _ in 0..3 {
            log.record_visual_search(search(20.0));
            log.record_memory(MemoryRound { accuracy: 70 });
            log.record_logic(LogicRound {
                correct: true,
                seconds: 10.0,
            });
        }
        assert!(!log.all_completed());
        log.record_creative(creative(&["a"]));
        log.record_creative(creative(&["b"]));
        assert!(log.all_completed());
    }

    #[test]
    fn legacy_payload_without_new_fields_deserializes() {
        let raw = r#"{
            "visual_search": [{"seconds": 22.0, "errors": 1}],
            "memory": [{"accuracy": 60}],
            "logic": [],
            "creative": [{"prompt": "a spoon", "answers": ["dig"]}]
        }"#;
        let log: BehavioralLog = serde_json::from_str(raw).expect("legacy payload loads");
        assert_eq!(log.creative_rounds()[0].reference_answers.len(), 0);
        assert_eq!(log.visual_search_rounds().len(), 1);
    }
}
