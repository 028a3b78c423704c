//! Grouping keys: stored columns and derived categorical features

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::manifest::Manifest;
use super::passenger::{derive_age_group, derive_deck, label_survived};
use crate::error::AnalysisError;

/// What to partition the manifest by
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKey {
    Sex,
    PassengerClass,
    /// Derived from the first character of the cabin
    Deck,
    /// Derived child / male / female category
    AgeGroup,
    Embarked,
    /// `Died` / `Survived`
    Survived,
    /// Any other column, grouped by its text rendering
    Column(String),
}

impl GroupKey {
    /// Per-row group labels. `None` marks a row that belongs to no group
    /// (e.g. a passenger with no recorded port).
    pub fn labels(&self, manifest: &Manifest) -> Result<Vec<Option<String>>, AnalysisError> {
        let labels = match self {
            GroupKey::Sex => manifest
                .sexes()?
                .into_iter()
                .map(|s| Some(s.to_string()))
                .collect(),
            GroupKey::PassengerClass => manifest
                .classes()?
                .into_iter()
                .map(|c| Some(c.to_string()))
                .collect(),
            GroupKey::Deck => manifest
                .cabins()?
                .iter()
                .map(|cabin| Some(derive_deck(cabin.as_deref()).to_string()))
                .collect(),
            GroupKey::AgeGroup => {
                let ages = manifest.ages()?;
                let sexes = manifest.sexes()?;
                ages.into_iter()
                    .zip(sexes)
                    .map(|(age, sex)| Some(derive_age_group(age, sex).to_string()))
                    .collect()
            }
            GroupKey::Embarked => manifest
                .ports()?
                .into_iter()
                .map(|p| p.map(|p| p.code().to_string()))
                .collect(),
            GroupKey::Survived => manifest
                .survived()?
                .into_iter()
                .map(|s| Some(label_survived(s).to_string()))
                .collect(),
            GroupKey::Column(name) => super::columns::text_values(manifest.frame(), name)?,
        };
        Ok(labels)
    }

    /// Column or feature name used in report headings
    pub fn name(&self, manifest: &Manifest) -> String {
        let columns = manifest.columns();
        match self {
            GroupKey::Sex => columns.sex.clone(),
            GroupKey::PassengerClass => columns.passenger_class.clone(),
            GroupKey::Deck => "Deck".to_string(),
            GroupKey::AgeGroup => "AgeGroup".to_string(),
            GroupKey::Embarked => columns.embarked.clone(),
            GroupKey::Survived => columns.survived.clone(),
            GroupKey::Column(name) => name.clone(),
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::Sex => write!(f, "sex"),
            GroupKey::PassengerClass => write!(f, "passenger_class"),
            GroupKey::Deck => write!(f, "deck"),
            GroupKey::AgeGroup => write!(f, "age_group"),
            GroupKey::Embarked => write!(f, "embarked"),
            GroupKey::Survived => write!(f, "survived"),
            GroupKey::Column(name) => write!(f, "column:{}", name),
        }
    }
}

impl FromStr for GroupKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sex" => Ok(GroupKey::Sex),
            "passenger_class" | "class" | "pclass" => Ok(GroupKey::PassengerClass),
            "deck" => Ok(GroupKey::Deck),
            "age_group" => Ok(GroupKey::AgeGroup),
            "embarked" | "port" => Ok(GroupKey::Embarked),
            "survived" => Ok(GroupKey::Survived),
            _ => match s.strip_prefix("column:") {
                Some(name) if !name.is_empty() => Ok(GroupKey::Column(name.to_string())),
                _ => Err(format!(
                    "Unknown group key: '{}'. Use sex, passenger_class, deck, age_group, embarked, survived or column:<name>.",
                    s
                )),
            },
        }
    }
}

/// Partition row-aligned values by group label, skipping unlabelled rows
/// and rows whose value is missing.
pub fn partition_values(
    labels: Vec<Option<String>>,
    values: &[Option<f64>],
) -> BTreeMap<String, Vec<f64>> {
    let mut groups: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for (label, value) in labels.into_iter().zip(values) {
        if let (Some(label), Some(value)) = (label, value) {
            groups.entry(label).or_default().push(*value);
        }
    }
    groups
}
