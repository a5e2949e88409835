use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::models::lenient;

/// Skill category name → ordered skill names. Category order is display order.
pub type Skills = IndexMap<String, Vec<String>>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    #[serde(deserialize_with = "lenient::text")]
    pub email: String,
    #[serde(deserialize_with = "lenient::text")]
    pub phone: String,
    #[serde(deserialize_with = "lenient::text")]
    pub linkedin: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Basics {
    #[serde(deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(deserialize_with = "lenient::text")]
    pub tagline: String,
    #[serde(deserialize_with = "lenient::text")]
    pub location: String,
    #[serde(deserialize_with = "lenient::flag")]
    pub open_to_relocation: bool,
    #[serde(deserialize_with = "lenient::text_list")]
    pub preferred_locations: Vec<String>,
    #[serde(deserialize_with = "lenient::whole_number")]
    pub experience_years: u32,
    #[serde(deserialize_with = "lenient::text")]
    pub availability: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub contact: Contact,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Duration {
    #[serde(deserialize_with = "lenient::text")]
    pub from: String,
    #[serde(deserialize_with = "lenient::text")]
    pub to: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExperienceRole {
    #[serde(deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub duration: Duration,
    #[serde(deserialize_with = "lenient::text")]
    pub duration_text: String,
    #[serde(deserialize_with = "lenient::text_list")]
    pub responsibilities: Vec<String>,
    #[serde(deserialize_with = "lenient::optional_text_list", skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Experience {
    #[serde(deserialize_with = "lenient::text")]
    pub company: String,
    #[serde(deserialize_with = "lenient::or_default", skip_serializing_if = "Option::is_none")]
    pub company_logo: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub employment_type: String,
    #[serde(deserialize_with = "lenient::text")]
    pub total_duration: String,
    #[serde(deserialize_with = "lenient::text")]
    pub location: String,
    #[serde(deserialize_with = "lenient::or_default", skip_serializing_if = "Option::is_none")]
    pub work_mode: Option<String>,
    #[serde(deserialize_with = "lenient::items")]
    pub roles: Vec<ExperienceRole>,
    #[serde(deserialize_with = "lenient::optional_text_list", skip_serializing_if = "Option::is_none")]
    pub key_platforms: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Education {
    #[serde(deserialize_with = "lenient::text")]
    pub degree: String,
    #[serde(deserialize_with = "lenient::text")]
    pub institution: String,
    #[serde(deserialize_with = "lenient::whole_number")]
    pub year: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Preferences {
    #[serde(deserialize_with = "lenient::text_list")]
    pub roles_interested_in: Vec<String>,
    #[serde(deserialize_with = "lenient::text_list")]
    pub work_type: Vec<String>,
    #[serde(deserialize_with = "lenient::text_list")]
    pub industries: Vec<String>,
}

/// Per-section label overrides carried inside a document. Any entry left
/// unset falls back to the locale's UI chrome.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionLabels {
    #[serde(deserialize_with = "lenient::or_default", skip_serializing_if = "Option::is_none")]
    pub hero: Option<IndexMap<String, String>>,
    #[serde(deserialize_with = "lenient::or_default", skip_serializing_if = "Option::is_none")]
    pub experience: Option<IndexMap<String, String>>,
    #[serde(deserialize_with = "lenient::or_default", skip_serializing_if = "Option::is_none")]
    pub skills: Option<IndexMap<String, String>>,
    #[serde(deserialize_with = "lenient::or_default", skip_serializing_if = "Option::is_none")]
    pub achievements: Option<IndexMap<String, String>>,
}

/// One portfolio's content. Missing or ill-typed fields fall back to their
/// empty default one by one, so any JSON object deserializes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PortfolioDocument {
    #[serde(deserialize_with = "lenient::or_default", skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub basics: Basics,
    #[serde(deserialize_with = "lenient::or_default", skip_serializing_if = "Option::is_none")]
    pub labels: Option<SectionLabels>,
    #[serde(deserialize_with = "lenient::text")]
    pub summary: String,
    #[serde(deserialize_with = "lenient::skill_map")]
    pub skills: Skills,
    #[serde(deserialize_with = "lenient::items")]
    pub experience: Vec<Experience>,
    #[serde(deserialize_with = "lenient::text_list")]
    pub achievements: Vec<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub education: Education,
    #[serde(deserialize_with = "lenient::or_default")]
    pub preferences: Preferences,
}

impl PortfolioDocument {
    /// Normalizes an arbitrary JSON object into the document shape,
    /// filling every missing field with its empty default.
    pub fn normalize(value: serde_json::Value) -> Result<serde_json::Value, serde_json::Error> {
        let doc: PortfolioDocument = serde_json::from_value(value)?;
        serde_json::to_value(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_partial_document_fills_defaults() {
        let doc: PortfolioDocument = serde_json::from_value(json!({
            "basics": { "name": "Sam Lee" },
            "skills": { "languages": ["Rust"] }
        }))
        .unwrap();
        assert_eq!(doc.basics.name, "Sam Lee");
        assert_eq!(doc.basics.title, "");
        assert!(doc.experience.is_empty());
        assert_eq!(doc.education.year, 0);
        assert_eq!(doc.skills["languages"], vec!["Rust".to_string()]);
    }

    #[test]
    fn test_skill_categories_keep_their_order() {
        let doc: PortfolioDocument = serde_json::from_value(json!({
            "skills": { "zeta": [], "alpha": [], "mid": [] }
        }))
        .unwrap();
        let keys: Vec<_> = doc.skills.keys().cloned().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_ill_typed_fields_fall_back_one_by_one() {
        let doc: PortfolioDocument = serde_json::from_value(json!({
            "basics": {
                "name": "Sam Lee",
                "experienceYears": 7.5,
                "openToRelocation": "yes",
                "preferredLocations": ["Berlin", 3, null, { "city": "Oslo" }],
                "contact": "sam@example.com"
            },
            "education": { "degree": "BSc", "year": "2018" },
            "experience": [
                { "company": "Acme", "roles": [{ "title": 12, "responsibilities": "lots" }] },
                "not a company"
            ],
            "skills": { "languages": ["Rust", true], "broken": "Go" },
            "achievements": null,
            "labels": { "hero": ["x"] }
        }))
        .unwrap();

        assert_eq!(doc.basics.name, "Sam Lee");
        assert_eq!(doc.basics.experience_years, 7);
        assert!(!doc.basics.open_to_relocation);
        assert_eq!(doc.basics.preferred_locations, vec!["Berlin", "3"]);
        assert_eq!(doc.basics.contact, Contact::default());
        assert_eq!(doc.education.year, 2018);
        assert_eq!(doc.education.degree, "BSc");
        assert_eq!(doc.experience.len(), 2);
        assert_eq!(doc.experience[0].roles[0].title, "12");
        assert!(doc.experience[0].roles[0].responsibilities.is_empty());
        assert_eq!(doc.experience[1], Experience::default());
        assert_eq!(doc.skills["languages"], vec!["Rust", "true"]);
        assert!(doc.skills["broken"].is_empty());
        assert!(doc.achievements.is_empty());
        assert_eq!(doc.labels.unwrap().hero, None);
    }

    #[test]
    fn test_negative_and_non_numeric_years_become_zero() {
        let doc: PortfolioDocument = serde_json::from_value(json!({
            "basics": { "experienceYears": -3 },
            "education": { "year": "soon" }
        }))
        .unwrap();
        assert_eq!(doc.basics.experience_years, 0);
        assert_eq!(doc.education.year, 0);
    }

    #[test]
    fn test_normalize_uses_camel_case_keys() {
        let value = PortfolioDocument::normalize(json!({ "basics": { "experienceYears": 4 } })).unwrap();
        assert_eq!(value["basics"]["experienceYears"], 4);
        assert_eq!(value["preferences"]["rolesInterestedIn"], json!([]));
        assert!(value.get("labels").is_none());
    }
}
