//! Value objects describing what a complaint is about.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Maximum length of a complaint description.
pub const MAX_DESCRIPTION_LENGTH: usize = 2000;

/// Maximum length of a floor or room label.
pub const MAX_LOCATION_LENGTH: usize = 64;

// ════════════════════════════════════════════════════════════════════════════════
// ComplaintType
// ════════════════════════════════════════════════════════════════════════════════

/// Where the fault is: shared space or a resident's own room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplaintType {
    CommonArea,
    PersonalRoom,
}

impl ComplaintType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplaintType::CommonArea => "common_area",
            ComplaintType::PersonalRoom => "personal_room",
        }
    }
}

impl fmt::Display for ComplaintType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComplaintType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "common_area" => Ok(ComplaintType::CommonArea),
            "personal_room" => Ok(ComplaintType::PersonalRoom),
            other => Err(ValidationError::invalid_format(
                "complaint_type",
                format!("unknown complaint type '{}'", other),
            )),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Category & Subcategory
// ════════════════════════════════════════════════════════════════════════════════

/// Trade category of the fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Electrical,
    Plumbing,
    Cleaning,
    Carpentry,
    Other,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Electrical,
        Category::Plumbing,
        Category::Cleaning,
        Category::Carpentry,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Electrical => "Electrical",
            Category::Plumbing => "Plumbing",
            Category::Cleaning => "Cleaning",
            Category::Carpentry => "Carpentry",
            Category::Other => "Other",
        }
    }

    /// Subcategories a resident may choose for this category.
    pub fn subcategories(&self) -> &'static [&'static str] {
        match self {
            Category::Electrical => &[
                "Fan not working",
                "Light not working",
                "AC not working",
                "Switch/Socket issue",
                "Power outage",
                "Wiring problem",
            ],
            Category::Plumbing => &[
                "Leaking tap",
                "Clogged drain",
                "Toilet not flushing",
                "No water supply",
                "Broken pipe",
                "Water heater issue",
            ],
            Category::Cleaning => &[
                "Garbage not collected",
                "Dirty common area",
                "Pest control needed",
                "Washroom uncleaned",
                "Floor needs mopping",
            ],
            Category::Carpentry => &[
                "Broken door",
                "Window not closing",
                "Broken furniture",
                "Loose hinges",
                "Cabinet repair needed",
            ],
            Category::Other => &[
                "General maintenance",
                "Security issue",
                "Noise complaint",
                "Other",
            ],
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| {
                ValidationError::invalid_format("category", format!("unknown category '{}'", s))
            })
    }
}

/// A subcategory checked against its category's catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Subcategory(String);

impl Subcategory {
    pub fn new(category: Category, value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::empty_field("subcategory"));
        }
        if !category.subcategories().contains(&value.as_str()) {
            return Err(ValidationError::invalid_format(
                "subcategory",
                format!("'{}' is not a {} subcategory", value, category),
            ));
        }
        Ok(Self(value))
    }

    /// Rebuilds a stored value without catalog checks.
    pub fn from_trusted(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Subcategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Priority & Outcome
// ════════════════════════════════════════════════════════════════════════════════

/// Urgency assigned at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
            Priority::Urgent => "Urgent",
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Low
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low" => Ok(Priority::Low),
            "Medium" => Ok(Priority::Medium),
            "High" => Ok(Priority::High),
            "Urgent" => Ok(Priority::Urgent),
            other => Err(ValidationError::invalid_format(
                "priority",
                format!("unknown priority '{}'", other),
            )),
        }
    }
}

/// Worker's verdict when submitting a task for review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkOutcome {
    Resolved,
    #[serde(rename = "Cannot be Resolved")]
    CannotBeResolved,
}

impl WorkOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkOutcome::Resolved => "Resolved",
            WorkOutcome::CannotBeResolved => "Cannot be Resolved",
        }
    }
}

impl fmt::Display for WorkOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkOutcome {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Resolved" => Ok(WorkOutcome::Resolved),
            "Cannot be Resolved" => Ok(WorkOutcome::CannotBeResolved),
            other => Err(ValidationError::invalid_format(
                "outcome",
                format!("unknown outcome '{}'", other),
            )),
        }
    }
}

/// Trims a required free-text field, rejecting blank input.
pub fn required_text(field: &str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    Ok(trimmed.to_string())
}

/// Trims a required field and caps its length in characters.
pub fn bounded_text(field: &str, value: &str, max: usize) -> Result<String, ValidationError> {
    let trimmed = required_text(field, value)?;
    let actual = trimmed.chars().count();
    if actual > max {
        return Err(ValidationError::too_long(field, max, actual));
    }
    Ok(trimmed)
}

/// Normalizes an optional free-text field; blank becomes `None`.
pub fn optional_text(
    field: &str,
    value: Option<String>,
    max: usize,
) -> Result<Option<String>, ValidationError> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if v.is_empty() => Ok(None),
        Some(v) if v.chars().count() > max => {
            Err(ValidationError::too_long(field, max, v.chars().count()))
        }
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subcategory_must_belong_to_category() {
        assert!(Subcategory::new(Category::Plumbing, "No water supply").is_ok());
        assert!(Subcategory::new(Category::Electrical, "No water supply").is_err());
    }

    #[test]
    fn subcategory_rejects_blank() {
        assert_eq!(
            Subcategory::new(Category::Other, "  ").unwrap_err(),
            ValidationError::empty_field("subcategory")
        );
    }

    #[test]
    fn every_category_has_a_catalog() {
        for category in Category::ALL {
            assert!(!category.subcategories().is_empty());
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
    }

    #[test]
    fn outcome_uses_display_strings_on_the_wire() {
        let json = serde_json::to_string(&WorkOutcome::CannotBeResolved).unwrap();
        assert_eq!(json, "\"Cannot be Resolved\"");
        assert_eq!(
            "Cannot be Resolved".parse::<WorkOutcome>().unwrap(),
            WorkOutcome::CannotBeResolved
        );
    }

    #[test]
    fn complaint_type_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&ComplaintType::PersonalRoom).unwrap(),
            "\"personal_room\""
        );
        assert!("penthouse".parse::<ComplaintType>().is_err());
    }

    #[test]
    fn priority_defaults_low_and_orders_by_urgency() {
        assert_eq!(Priority::default(), Priority::Low);
        assert!(Priority::Urgent > Priority::High);
    }

    #[test]
    fn required_text_trims_and_rejects_blank() {
        assert_eq!(required_text("resolution", "  fixed  ").unwrap(), "fixed");
        assert!(required_text("resolution", "\t").is_err());
    }

    #[test]
    fn bounded_text_counts_characters_after_trimming() {
        assert_eq!(bounded_text("floor", "  12  ", 2).unwrap(), "12");
        assert_eq!(bounded_text("floor", "éé", 2).unwrap(), "éé");
        assert!(bounded_text("floor", "123", 2).is_err());
        assert!(bounded_text("floor", " ", 2).is_err());
    }

    #[test]
    fn optional_text_enforces_max_length() {
        assert_eq!(optional_text("description", Some("  ".into()), 5).unwrap(), None);
        assert!(optional_text("description", Some("abcdef".into()), 5).is_err());
        assert_eq!(
            optional_text("description", Some("abc".into()), 5).unwrap(),
            Some("abc".to_string())
        );
    }
}
