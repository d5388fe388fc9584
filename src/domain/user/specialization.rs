//! Worker trades.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::complaint::Category;
use crate::domain::foundation::ValidationError;

/// Trade a worker is hired for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Specialization {
    Electrician,
    Plumber,
    Cleaner,
    Carpenter,
}

impl Specialization {
    pub fn as_str(&self) -> &'static str {
        match self {
            Specialization::Electrician => "electrician",
            Specialization::Plumber => "plumber",
            Specialization::Cleaner => "cleaner",
            Specialization::Carpenter => "carpenter",
        }
    }

    /// Trade that normally handles `category`. `Other` has no dedicated trade.
    pub fn for_category(category: Category) -> Option<Self> {
        match category {
            Category::Electrical => Some(Specialization::Electrician),
            Category::Plumbing => Some(Specialization::Plumber),
            Category::Cleaning => Some(Specialization::Cleaner),
            Category::Carpentry => Some(Specialization::Carpenter),
            Category::Other => None,
        }
    }
}

impl fmt::Display for Specialization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Specialization {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "electrician" => Ok(Specialization::Electrician),
            "plumber" => Ok(Specialization::Plumber),
            "cleaner" => Ok(Specialization::Cleaner),
            "carpenter" => Ok(Specialization::Carpenter),
            other => Err(ValidationError::invalid_format(
                "specialization",
                format!("unknown specialization '{}'", other),
            )),
        }
    }
}
