//! Passenger attributes and the categorical features derived from them

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Ages strictly below this count as children
pub const CHILD_AGE_THRESHOLD: f64 = 14.0;

/// Label used for passengers without a recorded cabin
pub const UNKNOWN_DECK: &str = "unknown";

/// Label for `survived == false` in charts and crosstabs
pub const DIED_LABEL: &str = "Died";

/// Label for `survived == true` in charts and crosstabs
pub const SURVIVED_LABEL: &str = "Survived";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" => Ok(Sex::Male),
            "female" => Ok(Sex::Female),
            _ => Err(format!("Unknown sex: '{}'. Use 'male' or 'female'.", s)),
        }
    }
}

/// Ticket class, 1 being the upper class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PassengerClass {
    First,
    Second,
    Third,
}

impl PassengerClass {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(PassengerClass::First),
            2 => Some(PassengerClass::Second),
            3 => Some(PassengerClass::Third),
            _ => None,
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            PassengerClass::First => 1,
            PassengerClass::Second => 2,
            PassengerClass::Third => 3,
        }
    }
}

impl fmt::Display for PassengerClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Port of embarkation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Port {
    Southampton,
    Cherbourg,
    Queenstown,
}

impl Port {
    /// Ports in the order the ship called at them
    pub const BOARDING_ORDER: [Port; 3] = [Port::Southampton, Port::Cherbourg, Port::Queenstown];

    pub fn code(&self) -> &'static str {
        match self {
            Port::Southampton => "S",
            Port::Cherbourg => "C",
            Port::Queenstown => "Q",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Port::Southampton => "Southampton",
            Port::Cherbourg => "Cherbourg",
            Port::Queenstown => "Queenstown",
        }
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Port {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "S" => Ok(Port::Southampton),
            "C" => Ok(Port::Cherbourg),
            "Q" => Ok(Port::Queenstown),
            _ => Err(format!("Unknown port code: '{}'. Use 'S', 'C' or 'Q'.", s)),
        }
    }
}

/// Cabin deck, recomputed from the cabin code every time it is needed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Deck {
    Letter(char),
    Unknown,
}

impl fmt::Display for Deck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Deck::Letter(c) => write!(f, "{}", c),
            Deck::Unknown => f.write_str(UNKNOWN_DECK),
        }
    }
}

/// Men / women / children category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AgeGroup {
    Child,
    Adult(Sex),
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgeGroup::Child => f.write_str("child"),
            AgeGroup::Adult(sex) => write!(f, "{}", sex),
        }
    }
}

/// Derive the deck from a cabin code such as `"C123"`.
///
/// The deck is the first character of the cabin, uppercased. Missing or
/// blank cabins map to [`Deck::Unknown`]; absence is expected, not an error.
pub fn derive_deck(cabin: Option<&str>) -> Deck {
    cabin
        .map(str::trim)
        .and_then(|c| c.chars().next())
        .map(|c| Deck::Letter(c.to_ascii_uppercase()))
        .unwrap_or(Deck::Unknown)
}

/// Derive the men/women/children category.
///
/// A passenger is a child only when the age is known and strictly below
/// [`CHILD_AGE_THRESHOLD`]. Passengers with unknown age fall into the adult
/// bucket of their sex.
pub fn derive_age_group(age: Option<f64>, sex: Sex) -> AgeGroup {
    match age {
        Some(age) if age < CHILD_AGE_THRESHOLD => AgeGroup::Child,
        _ => AgeGroup::Adult(sex),
    }
}

pub fn label_survived(survived: bool) -> &'static str {
    if survived {
        SURVIVED_LABEL
    } else {
        DIED_LABEL
    }
}
