use std::{
    collections::HashMap,
    fmt::{Display, Formatter, Result as FmtResult},
};

/// Type alias for the reference vocabulary: each known (name, value) pair and its formal description
pub type AttributeDescriptions = HashMap<AttributePair, String>;

/// A course attribute such as `QNS:FYS`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AttributePair {
    pub name: String,
    pub value: String,
}

impl AttributePair {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl Display for AttributePair {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}:{}", self.name, self.value)
    }
}

/// The two denormalized attribute strings stored on every course
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeSummary {
    pub attributes: String,
    pub descriptions: String,
}

impl AttributeSummary {
    pub const NO_ATTRIBUTES: &'static str = "None";
    pub const NO_DESCRIPTIONS: &'static str = "No course attributes";

    /// Joins a course's attribute pairs and their descriptions with `"; "`
    ///
    /// # Arguments
    /// * `pairs` - The pairs recorded for the course, if any
    /// * `descriptions` - The reference vocabulary the pairs were validated against
    pub fn summarize(pairs: Option<&[AttributePair]>, descriptions: &AttributeDescriptions) -> Self {
        match pairs {
            Some(pairs) if !pairs.is_empty() => Self {
                attributes: pairs
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; "),
                descriptions: pairs
                    .iter()
                    .map(|pair| descriptions.get(pair).map(String::as_str).unwrap_or_default())
                    .collect::<Vec<_>>()
                    .join("; "),
            },
            _ => Self {
                attributes: Self::NO_ATTRIBUTES.to_string(),
                descriptions: Self::NO_DESCRIPTIONS.to_string(),
            },
        }
    }
}
