//! Passenger columns and the categorical domains derived from them.

use std::fmt;

use serde::Serialize;

use super::model::Value;

// Source column names.
pub const PASSENGER_ID: &str = "PassengerId";
pub const CLASS: &str = "Pclass";
pub const SEX: &str = "Sex";
pub const AGE: &str = "Age";
pub const SIBLINGS_SPOUSES: &str = "SibSp";
pub const PARENTS_CHILDREN: &str = "Parch";
pub const FARE: &str = "Fare";
pub const SURVIVED: &str = "Survived";
pub const NAME: &str = "Name";

// Derived column names.
pub const AGE_GROUP: &str = "age_group";
pub const FAMILY_SIZE: &str = "family_size";
pub const SURNAME: &str = "surname";

// ---------------------------------------------------------------------------
// Class
// ---------------------------------------------------------------------------

/// Ticket class, ordered first to third.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Class {
    #[serde(rename = "1")]
    First,
    #[serde(rename = "2")]
    Second,
    #[serde(rename = "3")]
    Third,
}

impl Class {
    pub const ALL: [Class; 3] = [Class::First, Class::Second, Class::Third];

    pub fn from_number(n: i64) -> Option<Self> {
        match n {
            1 => Some(Class::First),
            2 => Some(Class::Second),
            3 => Some(Class::Third),
            _ => None,
        }
    }

    pub fn from_value(value: &Value) -> Option<Self> {
        value.as_i64().and_then(Self::from_number)
    }

    pub fn number(self) -> u8 {
        match self {
            Class::First => 1,
            Class::Second => 2,
            Class::Third => 3,
        }
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

// ---------------------------------------------------------------------------
// Sex
// ---------------------------------------------------------------------------

/// Passenger sex; `female` sorts before `male` as the source labels do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Female,
    Male,
}

impl Sex {
    pub const ALL: [Sex; 2] = [Sex::Female, Sex::Male];

    pub fn from_value(value: &Value) -> Option<Self> {
        match value.as_str()?.trim().to_ascii_lowercase().as_str() {
            "female" => Some(Sex::Female),
            "male" => Some(Sex::Male),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Sex::Female => "female",
            Sex::Male => "male",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// AgeBracket
// ---------------------------------------------------------------------------

/// Age category with right-closed edges: (0,12], (12,19], (19,59], (59,∞).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum AgeBracket {
    Child,
    Teen,
    Adult,
    Senior,
}

impl AgeBracket {
    pub const ALL: [AgeBracket; 4] = [
        AgeBracket::Child,
        AgeBracket::Teen,
        AgeBracket::Adult,
        AgeBracket::Senior,
    ];

    /// Bracket for an age, or `None` when the age lies outside (0, ∞).
    pub fn from_age(age: f64) -> Option<Self> {
        if age.is_nan() || age <= 0.0 {
            None
        } else if age <= 12.0 {
            Some(AgeBracket::Child)
        } else if age <= 19.0 {
            Some(AgeBracket::Teen)
        } else if age <= 59.0 {
            Some(AgeBracket::Adult)
        } else {
            Some(AgeBracket::Senior)
        }
    }

    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Self::ALL.into_iter().find(|b| b.label() == s),
            other => other.as_f64().and_then(Self::from_age),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AgeBracket::Child => "Child",
            AgeBracket::Teen => "Teen",
            AgeBracket::Adult => "Adult",
            AgeBracket::Senior => "Senior",
        }
    }

    /// Position in category order, used as the bar x coordinate.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for AgeBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Row-level derivations
// ---------------------------------------------------------------------------

/// Siblings/spouses plus parents/children plus the passenger, or `None` when
/// the sum does not fit in an `i64`.
pub fn family_size(siblings_spouses: i64, parents_children: i64) -> Option<i64> {
    siblings_spouses.checked_add(parents_children)?.checked_add(1)
}

/// Text before the first comma of a "Last, First" name, trimmed. Names
/// without a comma or with an empty surname give `None`.
pub fn surname(name: &str) -> Option<&str> {
    let (last, _) = name.split_once(',')?;
    let last = last.trim();
    (!last.is_empty()).then_some(last)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bracket_edges_are_right_closed() {
        assert_eq!(AgeBracket::from_age(0.42), Some(AgeBracket::Child));
        assert_eq!(AgeBracket::from_age(12.0), Some(AgeBracket::Child));
        assert_eq!(AgeBracket::from_age(12.5), Some(AgeBracket::Teen));
        assert_eq!(AgeBracket::from_age(19.0), Some(AgeBracket::Teen));
        assert_eq!(AgeBracket::from_age(59.0), Some(AgeBracket::Adult));
        assert_eq!(AgeBracket::from_age(59.5), Some(AgeBracket::Senior));
        assert_eq!(AgeBracket::from_age(80.0), Some(AgeBracket::Senior));
    }

    #[test]
    fn bracket_undefined_outside_domain() {
        assert_eq!(AgeBracket::from_age(0.0), None);
        assert_eq!(AgeBracket::from_age(f64::NAN), None);
        assert_eq!(AgeBracket::from_value(&Value::Null), None);
    }

    #[test]
    fn bracket_order_is_category_order() {
        let mut shuffled = vec![
            AgeBracket::Senior,
            AgeBracket::Child,
            AgeBracket::Adult,
            AgeBracket::Teen,
        ];
        shuffled.sort();
        assert_eq!(shuffled, AgeBracket::ALL);
    }

    #[test]
    fn family_size_counts_self() {
        assert_eq!(family_size(1, 2), Some(4));
        assert_eq!(family_size(0, 0), Some(1));
    }

    #[test]
    fn family_size_overflow_is_none() {
        assert_eq!(family_size(i64::MAX, 0), None);
        assert_eq!(family_size(i64::MAX - 1, 1), None);
        assert_eq!(family_size(i64::MAX - 1, 0), Some(i64::MAX));
    }

    #[test]
    fn surname_before_first_comma() {
        assert_eq!(surname("Johnson, Leon"), Some("Johnson"));
        assert_eq!(surname("Smith, Mrs. John (Doe, Jane)"), Some("Smith"));
        assert_eq!(surname("Nobody"), None);
        assert_eq!(surname(" , Anon"), None);
    }

    #[test]
    fn coercion_of_categories() {
        assert_eq!(Class::from_value(&Value::Integer(2)), Some(Class::Second));
        assert_eq!(Class::from_value(&Value::Float(3.0)), Some(Class::Third));
        assert_eq!(Class::from_value(&Value::Integer(4)), None);
        assert_eq!(Sex::from_value(&Value::String("Female".into())), Some(Sex::Female));
        assert_eq!(Sex::from_value(&Value::Null), None);
    }
}
