use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::HashMap;
use uuid::Uuid;

/// Fixed set of scheme categories. Writes carrying anything else are
/// rejected with a field-level validation error.
pub const CATEGORIES: &[&str] = &[
    "Subsidy",
    "Loan",
    "Insurance",
    "Training",
    "Equipment",
    "Irrigation",
    "Organic Farming",
    "Market Support",
    "Land Development",
    "Weather Protection",
    "Other",
];

/// Fixed set of states a scheme may target. "All India" is the default.
pub const STATES: &[&str] = &[
    "All India",
    "Andhra Pradesh",
    "Arunachal Pradesh",
    "Assam",
    "Bihar",
    "Chhattisgarh",
    "Goa",
    "Gujarat",
    "Haryana",
    "Himachal Pradesh",
    "Jharkhand",
    "Karnataka",
    "Kerala",
    "Madhya Pradesh",
    "Maharashtra",
    "Manipur",
    "Meghalaya",
    "Mizoram",
    "Nagaland",
    "Odisha",
    "Punjab",
    "Rajasthan",
    "Sikkim",
    "Tamil Nadu",
    "Telangana",
    "Tripura",
    "Uttar Pradesh",
    "Uttarakhand",
    "West Bengal",
    "Delhi",
    "Other",
];

pub const DEFAULT_STATE: &str = "All India";

pub fn is_valid_category(value: &str) -> bool {
    CATEGORIES.contains(&value)
}

pub fn is_valid_state(value: &str) -> bool {
    STATES.contains(&value)
}

/// A government assistance program as persisted in the `schemes` table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Scheme {
    pub id: Uuid,
    pub name: String,
    pub short_description: String,
    pub description: String,
    pub official_link: String,
    pub category: String,
    pub ministry: String,
    pub eligibility: String,
    pub benefits: String,
    pub application_process: Option<String>,
    pub documents: Vec<String>,
    pub launch_date: Option<NaiveDate>,
    pub state: String,
    pub is_active: bool,
    pub view_count: i64,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// List-view projection: the public listing omits the long-form fields
/// (description, applicationProcess, documents).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SchemeSummary {
    pub id: Uuid,
    pub name: String,
    pub short_description: String,
    pub official_link: String,
    pub category: String,
    pub ministry: String,
    pub eligibility: String,
    pub benefits: String,
    pub launch_date: Option<NaiveDate>,
    pub state: String,
    pub is_active: bool,
    pub view_count: i64,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Columns backing [`SchemeSummary`], shared by the list queries.
pub const SUMMARY_COLUMNS: &str = "id, name, short_description, official_link, category, \
     ministry, eligibility, benefits, launch_date, state, is_active, view_count, image_url, \
     created_at, updated_at";

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MostViewedScheme {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub view_count: i64,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RecentScheme {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CategoryCount {
    pub name: String,
    pub count: i64,
}

/// Typed input for scheme create and update. Update runs the same full
/// validation as create.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemeInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub official_link: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub ministry: String,
    #[serde(default)]
    pub eligibility: String,
    #[serde(default)]
    pub benefits: String,
    pub application_process: Option<String>,
    #[serde(default)]
    pub documents: Vec<String>,
    pub launch_date: Option<NaiveDate>,
    pub state: Option<String>,
    pub is_active: Option<bool>,
    pub image_url: Option<String>,
}

#[derive(Debug)]
pub struct SchemeValidationErrors(HashMap<String, String>);

impl SchemeValidationErrors {
    pub fn into_fields(self) -> HashMap<String, String> {
        self.0
    }

    pub fn fields(&self) -> &HashMap<String, String> {
        &self.0
    }
}

impl SchemeInput {
    /// Validate every required field, the length limits, and the category
    /// and state enumerations. All failures are collected so the caller
    /// sees the full picture in one response.
    pub fn validate(&self) -> Result<(), SchemeValidationErrors> {
        let mut errors = HashMap::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.insert("name".into(), "Scheme name is required".into());
        } else if name.chars().count() > 200 {
            errors.insert("name".into(), "Scheme name cannot exceed 200 characters".into());
        }

        let short = self.short_description.trim();
        if short.is_empty() {
            errors.insert(
                "shortDescription".into(),
                "Short description is required".into(),
            );
        } else if short.chars().count() > 300 {
            errors.insert(
                "shortDescription".into(),
                "Short description cannot exceed 300 characters".into(),
            );
        }

        if self.description.trim().is_empty() {
            errors.insert("description".into(), "Description is required".into());
        }

        let link = self.official_link.trim();
        if link.is_empty() {
            errors.insert("officialLink".into(), "Official link is required".into());
        } else if url::Url::parse(link).is_err() {
            errors.insert("officialLink".into(), "Official link must be a valid URL".into());
        }

        let category = self.category.trim();
        if category.is_empty() {
            errors.insert("category".into(), "Category is required".into());
        } else if !is_valid_category(category) {
            errors.insert(
                "category".into(),
                format!("'{}' is not a valid category", category),
            );
        }

        if self.ministry.trim().is_empty() {
            errors.insert("ministry".into(), "Ministry name is required".into());
        }

        if self.eligibility.trim().is_empty() {
            errors.insert("eligibility".into(), "Eligibility criteria is required".into());
        }

        if self.benefits.trim().is_empty() {
            errors.insert("benefits".into(), "Benefits description is required".into());
        }

        if let Some(state) = &self.state {
            if !is_valid_state(state.trim()) {
                errors.insert("state".into(), format!("'{}' is not a valid state", state));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemeValidationErrors(errors))
        }
    }

    pub fn state_or_default(&self) -> &str {
        self.state
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_STATE)
    }
}
