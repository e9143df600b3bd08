//! Static question bank.
//!
//! Items are defined once at process start and never mutated. Every item
//! carries an explicit trait tag; nothing downstream parses identifiers to
//! recover a category.

mod items;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Age segment a respondent falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgeBand {
    /// 7-9 years.
    Young,
    /// 10-12 years.
    Middle,
    /// 13-15 years.
    Teen,
}

impl AgeBand {
    pub fn from_age(age: u8) -> Option<Self> {
        match age {
            7..=9 => Some(Self::Young),
            10..=12 => Some(Self::Middle),
            13..=15 => Some(Self::Teen),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            AgeBand::Young => "young",
            AgeBand::Middle => "middle",
            AgeBand::Teen => "teen",
        }
    }

    pub const fn describe(self) -> &'static str {
        match self {
            AgeBand::Young => "7-9 years",
            AgeBand::Middle => "10-12 years",
            AgeBand::Teen => "13-15 years",
        }
    }
}

/// Which question set an item (or answer) belongs to. Identifiers are only
/// unique within a set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionSet {
    Intelligence,
    Interest,
}

impl QuestionSet {
    pub const fn label(self) -> &'static str {
        match self {
            QuestionSet::Intelligence => "intelligence",
            QuestionSet::Interest => "interest",
        }
    }
}

/// Whether a higher Likert value means more of the trait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Forward,
    Reverse,
}

/// The eight Gardner intelligence categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntelligenceDimension {
    Linguistic,
    Logical,
    Spatial,
    Musical,
    Bodily,
    Interpersonal,
    Intrapersonal,
    Naturalistic,
}

impl IntelligenceDimension {
    pub const ALL: [Self; 8] = [
        Self::Linguistic,
        Self::Logical,
        Self::Spatial,
        Self::Musical,
        Self::Bodily,
        Self::Interpersonal,
        Self::Intrapersonal,
        Self::Naturalistic,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Linguistic => "linguistic",
            Self::Logical => "logical",
            Self::Spatial => "spatial",
            Self::Musical => "musical",
            Self::Bodily => "bodily",
            Self::Interpersonal => "interpersonal",
            Self::Intrapersonal => "intrapersonal",
            Self::Naturalistic => "naturalistic",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Linguistic => "Linguistic",
            Self::Logical => "Logical-Mathematical",
            Self::Spatial => "Spatial",
            Self::Musical => "Musical",
            Self::Bodily => "Bodily-Kinesthetic",
            Self::Interpersonal => "Interpersonal",
            Self::Intrapersonal => "Intrapersonal",
            Self::Naturalistic => "Naturalistic",
        }
    }
}

/// The six Holland RIASEC interest categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterestDimension {
    Realistic,
    Investigative,
    Artistic,
    Social,
    Enterprising,
    Conventional,
}

impl InterestDimension {
    pub const ALL: [Self; 6] = [
        Self::Realistic,
        Self::Investigative,
        Self::Artistic,
        Self::Social,
        Self::Enterprising,
        Self::Conventional,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Realistic => "realistic",
            Self::Investigative => "investigative",
            Self::Artistic => "artistic",
            Self::Social => "social",
            Self::Enterprising => "enterprising",
            Self::Conventional => "conventional",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Realistic => "Realistic",
            Self::Investigative => "Investigative",
            Self::Artistic => "Artistic",
            Self::Social => "Social",
            Self::Enterprising => "Enterprising",
            Self::Conventional => "Conventional",
        }
    }

    /// Holland code letter.
    pub const fn code(self) -> char {
        match self {
            Self::Realistic => 'R',
            Self::Investigative => 'I',
            Self::Artistic => 'A',
            Self::Social => 'S',
            Self::Enterprising => 'E',
            Self::Conventional => 'C',
        }
    }
}

/// Trait category an item measures, discriminated by question set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraitTag {
    Intelligence(IntelligenceDimension),
    Interest(InterestDimension),
}

impl TraitTag {
    pub const fn set(self) -> QuestionSet {
        match self {
            TraitTag::Intelligence(_) => QuestionSet::Intelligence,
            TraitTag::Interest(_) => QuestionSet::Interest,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            TraitTag::Intelligence(dim) => dim.name(),
            TraitTag::Interest(dim) => dim.name(),
        }
    }
}

/// Which respondents an item applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applicability {
    Any,
    Band(AgeBand),
}

impl Applicability {
    pub fn applies_to(self, band: AgeBand) -> bool {
        match self {
            Applicability::Any => true,
            Applicability::Band(b) => b == band,
        }
    }
}

/// A single scored assessment question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item {
    pub id: &'static str,
    pub tag: TraitTag,
    pub text: &'static str,
    pub applicability: Applicability,
    pub direction: Direction,
    /// "Too good to be true" probe used by the social-desirability check.
    pub probe: bool,
}

pub fn intelligence_items() -> &'static [Item] {
    items::INTELLIGENCE_ITEMS
}

pub fn interest_items() -> &'static [Item] {
    items::INTEREST_ITEMS
}

pub fn items(set: QuestionSet) -> &'static [Item] {
    match set {
        QuestionSet::Intelligence => items::INTELLIGENCE_ITEMS,
        QuestionSet::Interest => items::INTEREST_ITEMS,
    }
}

/// Item pairs expected to elicit similar responses, per set.
pub fn consistency_pairs(set: QuestionSet) -> &'static [(&'static str, &'static str)] {
    match set {
        QuestionSet::Intelligence => items::INTELLIGENCE_CONSISTENCY_PAIRS,
        QuestionSet::Interest => items::INTEREST_CONSISTENCY_PAIRS,
    }
}

pub fn find(set: QuestionSet, id: &str) -> Option<&'static Item> {
    items(set).iter().find(|item| item.id == id)
}

pub fn items_for_band(set: QuestionSet, band: AgeBand) -> Vec<&'static Item> {
    items(set)
        .iter()
        .filter(|item| item.applicability.applies_to(band))
        .collect()
}

/// Presentation-order shuffle (Fisher-Yates over a copy). Scoring is
/// order-independent and never calls this.
pub fn shuffled_items<R: Rng>(set: QuestionSet, band: AgeBand, rng: &mut R) -> Vec<&'static Item> {
    let mut selected = items_for_band(set, band);
    for i in (1..selected.len()).rev() {
        let j = rng.gen_range(0..=i);
        selected.swap(i, j);
    }
    selected
}

/// Identifiers of the social-desirability probe items.
pub fn probe_ids(set: QuestionSet) -> Vec<&'static str> {
    items(set)
        .iter()
        .filter(|item| item.probe)
        .map(|item| item.id)
        .collect()
}
