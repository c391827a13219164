//! Inferred user preferences and the rule for folding new findings in.
//!
//! A [`Profile`] only grows: scalar fields are replaced by non-empty new
//! values and never cleared, set fields are unioned.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::OutputSchema;

/// Accumulated preferences for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: Option<String>,
    pub budget_tier: Option<String>,
    pub style_keywords: BTreeSet<String>,
    pub clothing_types_liked: BTreeSet<String>,
    pub colors: BTreeSet<String>,
}

/// What one extraction found. Absent, null or empty means "nothing new".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialProfile {
    pub name: Option<String>,
    pub budget_tier: Option<String>,
    pub style_keywords: Option<Vec<String>>,
    pub clothing_types_liked: Option<Vec<String>>,
    pub colors: Option<Vec<String>>,
}

impl PartialProfile {
    /// True when merging this update would change nothing on an empty profile.
    pub fn is_empty(&self) -> bool {
        non_blank(self.name.as_deref()).is_none()
            && non_blank(self.budget_tier.as_deref()).is_none()
            && [&self.style_keywords, &self.clothing_types_liked, &self.colors]
                .iter()
                .all(|list| list.iter().flatten().all(|s| s.trim().is_empty()))
    }

    /// JSON schema the extraction capability must conform to.
    pub fn output_schema() -> OutputSchema {
        let string_list = |description: &str| {
            serde_json::json!({
                "type": "array",
                "items": { "type": "string" },
                "description": description,
            })
        };

        OutputSchema {
            name: "UserProfile".into(),
            description: "Fashion preferences stated or clearly implied by the user".into(),
            schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "name": {
                        "type": ["string", "null"],
                        "description": "User's name"
                    },
                    "budget_tier": {
                        "type": ["string", "null"],
                        "description": "Budget tier: low, medium, high"
                    },
                    "style_keywords": string_list("Style keywords"),
                    "clothing_types_liked": string_list("Clothing types liked"),
                    "colors": string_list("Preferred colors"),
                },
                "required": []
            }),
        }
    }
}

/// Fold an extraction result into the current profile.
///
/// Pure and total: scalars take the extracted value only when it is
/// non-blank, sets take the union. Values are trimmed and blank list
/// entries are dropped.
pub fn merge(current: &Profile, update: &PartialProfile) -> Profile {
    let mut merged = current.clone();

    if let Some(name) = non_blank(update.name.as_deref()) {
        merged.name = Some(name.to_string());
    }
    if let Some(tier) = non_blank(update.budget_tier.as_deref()) {
        merged.budget_tier = Some(tier.to_string());
    }

    union_into(&mut merged.style_keywords, update.style_keywords.as_deref());
    union_into(
        &mut merged.clothing_types_liked,
        update.clothing_types_liked.as_deref(),
    );
    union_into(&mut merged.colors, update.colors.as_deref());

    merged
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

fn union_into(set: &mut BTreeSet<String>, values: Option<&[String]>) {
    for value in values.unwrap_or_default() {
        if let Some(v) = non_blank(Some(value)) {
            set.insert(v.to_string());
        }
    }
}

impl Profile {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.budget_tier.is_none()
            && self.style_keywords.is_empty()
            && self.clothing_types_liked.is_empty()
            && self.colors.is_empty()
    }

    /// Render as `- key: value` lines, skipping unset fields.
    pub fn to_bullets(&self) -> String {
        let join = |set: &BTreeSet<String>| set.iter().cloned().collect::<Vec<_>>().join(", ");

        let fields = [
            ("name", self.name.clone().unwrap_or_default()),
            ("budget_tier", self.budget_tier.clone().unwrap_or_default()),
            ("style_keywords", join(&self.style_keywords)),
            ("clothing_types_liked", join(&self.clothing_types_liked)),
            ("colors", join(&self.colors)),
        ];

        fields
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(key, value)| format!("- {key}: {value}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
