//! Presentation layer: turns a document snapshot into a page view model.
//!
//! Stateless: the same snapshot, labels and mode always give the same view.
//! In edit mode every editable value carries the path the client sends back
//! to `PATCH /api/v1/portfolio/fields`; outside edit mode paths are omitted.

use chrono::Datelike;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::models::labels::NavLabels;
use crate::models::portfolio::{Experience, ExperienceRole};
use crate::models::{PortfolioDocument, UiLabels};

/// A rendered value, editable at `path` when present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field<T> {
    pub value: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView {
    pub edit_mode: bool,
    pub nav: NavLabels,
    pub hero: HeroView,
    pub experience: ExperienceView,
    pub skills: SkillsView,
    pub achievements: AchievementsView,
    pub footer: FooterView,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroView {
    pub availability_label: Field<String>,
    pub availability: Field<String>,
    pub name: Field<String>,
    pub title: Field<String>,
    pub tagline: Field<String>,
    pub summary: Field<String>,
    pub location: Field<String>,
    pub years_exp_label: Field<String>,
    pub experience_years: Field<u32>,
    pub open_to_label: String,
    pub preferred_locations: Field<Vec<String>>,
    pub contact_me_label: Field<String>,
    pub email: String,
    pub linkedin_label: String,
    pub linkedin: String,
    pub download: DownloadLink,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadLink {
    pub label: Field<String>,
    pub href: &'static str,
    pub file_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceView {
    pub title: Field<String>,
    pub summary: Field<String>,
    pub current_role_label: Field<String>,
    pub key_projects_label: String,
    pub companies: Vec<CompanyView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyView {
    pub company: Field<String>,
    pub location: Field<String>,
    pub employment_type: Field<String>,
    pub total_duration: Field<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_platforms: Option<Field<Vec<String>>>,
    pub roles: Vec<RoleView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleView {
    pub title: Field<String>,
    pub from: Field<String>,
    pub to: Field<String>,
    pub duration_text: Field<String>,
    pub responsibilities: Vec<Field<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<Field<Vec<String>>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillsView {
    pub title: Field<String>,
    pub summary: Field<String>,
    pub categories: Vec<SkillCategoryView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillCategoryView {
    pub name: String,
    pub skills: Field<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementsView {
    pub title: Field<String>,
    pub items: Vec<Field<String>>,
    pub education_title: Field<String>,
    pub degree: Field<String>,
    pub institution: Field<String>,
    pub graduated_label: String,
    pub year: Field<u32>,
    pub interests_title: Field<String>,
    pub industries: Field<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterView {
    pub name: String,
    pub title: String,
    pub copyright: String,
    pub built_with: String,
}

/// Download name of the static résumé: `Jordan Avery` → `Jordan_Avery_Resume.pdf`.
/// Only the first space is replaced.
pub fn download_file_name(person_name: &str) -> String {
    format!("{}_Resume.pdf", person_name.replacen(' ', "_", 1))
}

/// Hands out fields, attaching paths only in edit mode.
struct Editor {
    edit_mode: bool,
}

impl Editor {
    fn field<T>(&self, value: T, path: impl Into<String>) -> Field<T> {
        Field {
            value,
            path: self.edit_mode.then(|| path.into()),
        }
    }

    fn text(&self, value: &str, path: impl Into<String>) -> Field<String> {
        self.field(value.to_string(), path)
    }
}

pub fn build_page(snapshot: &Value, labels: &UiLabels, edit_mode: bool) -> PageView {
    // Ill-typed fields already fall back one by one; only a document that
    // is not an object at all renders empty.
    let doc: PortfolioDocument = serde_json::from_value(snapshot.clone()).unwrap_or_else(|e| {
        warn!("Document does not match the portfolio shape, rendering empty page: {e}");
        PortfolioDocument::default()
    });
    let ed = Editor { edit_mode };
    let basics = &doc.basics;

    let hero = HeroView {
        availability_label: ed.text(&labels.hero.availability, "labels.hero.availability"),
        availability: ed.text(&basics.availability, "basics.availability"),
        name: ed.text(&basics.name, "basics.name"),
        title: ed.text(&basics.title, "basics.title"),
        tagline: ed.text(&basics.tagline, "basics.tagline"),
        summary: ed.text(&doc.summary, "summary"),
        location: ed.text(&basics.location, "basics.location"),
        years_exp_label: ed.text(&labels.hero.years_exp, "labels.hero.yearsExp"),
        experience_years: ed.field(basics.experience_years, "basics.experienceYears"),
        open_to_label: labels.hero.open_to.clone(),
        preferred_locations: ed.field(basics.preferred_locations.clone(), "basics.preferredLocations"),
        contact_me_label: ed.text(&labels.hero.contact_me, "labels.hero.contactMe"),
        email: basics.contact.email.clone(),
        linkedin_label: labels.hero.linkedin.clone(),
        linkedin: basics.contact.linkedin.clone(),
        download: DownloadLink {
            label: ed.text(&labels.hero.download_cv, "labels.hero.downloadCV"),
            href: "/api/v1/resume/download",
            file_name: download_file_name(&basics.name),
        },
    };

    let experience = ExperienceView {
        title: ed.text(&labels.experience.title, "labels.experience.title"),
        summary: ed.field(
            labels
                .experience
                .summary
                .replacen("{years}", &basics.experience_years.to_string(), 1),
            "labels.experience.summary",
        ),
        current_role_label: ed.text(&labels.experience.current_role, "labels.experience.currentRole"),
        key_projects_label: labels.experience.key_projects.clone(),
        companies: doc
            .experience
            .iter()
            .enumerate()
            .map(|(i, company)| company_view(&ed, i, company))
            .collect(),
    };

    let skills = SkillsView {
        title: ed.text(&labels.skills.title, "labels.skills.title"),
        summary: ed.text(&labels.skills.summary, "labels.skills.summary"),
        categories: doc
            .skills
            .iter()
            .map(|(name, skills)| SkillCategoryView {
                name: name.clone(),
                skills: ed.field(skills.clone(), format!("skills.{name}")),
            })
            .collect(),
    };

    let achievements = AchievementsView {
        title: ed.text(&labels.achievements.title, "labels.achievements.title"),
        items: doc
            .achievements
            .iter()
            .enumerate()
            .map(|(i, item)| ed.text(item, format!("achievements.{i}")))
            .collect(),
        education_title: ed.text(&labels.achievements.education, "labels.achievements.education"),
        degree: ed.text(&doc.education.degree, "education.degree"),
        institution: ed.text(&doc.education.institution, "education.institution"),
        graduated_label: labels.achievements.graduated.clone(),
        year: ed.field(doc.education.year, "education.year"),
        interests_title: ed.text(&labels.achievements.interests, "labels.achievements.interests"),
        industries: ed.field(doc.preferences.industries.clone(), "preferences.industries"),
    };

    let footer = FooterView {
        name: basics.name.clone(),
        title: basics.title.clone(),
        copyright: format!(
            "© {} {}. {}",
            chrono::Utc::now().year(),
            basics.name,
            labels.footer.rights
        ),
        built_with: labels.footer.built_with.clone(),
    };

    PageView {
        edit_mode,
        nav: labels.nav.clone(),
        hero,
        experience,
        skills,
        achievements,
        footer,
    }
}

fn company_view(ed: &Editor, index: usize, company: &Experience) -> CompanyView {
    let base = format!("experience.{index}");
    CompanyView {
        company: ed.text(&company.company, format!("{base}.company")),
        location: ed.text(&company.location, format!("{base}.location")),
        employment_type: ed.text(&company.employment_type, format!("{base}.employmentType")),
        total_duration: ed.text(&company.total_duration, format!("{base}.totalDuration")),
        work_mode: company.work_mode.clone(),
        key_platforms: company
            .key_platforms
            .as_ref()
            .map(|platforms| ed.field(platforms.clone(), format!("{base}.keyPlatforms"))),
        roles: company
            .roles
            .iter()
            .enumerate()
            .map(|(j, role)| role_view(ed, &format!("{base}.roles.{j}"), role))
            .collect(),
    }
}

fn role_view(ed: &Editor, base: &str, role: &ExperienceRole) -> RoleView {
    RoleView {
        title: ed.text(&role.title, format!("{base}.title")),
        from: ed.text(&role.duration.from, format!("{base}.duration.from")),
        to: ed.text(&role.duration.to, format!("{base}.duration.to")),
        duration_text: ed.text(&role.duration_text, format!("{base}.durationText")),
        responsibilities: role
            .responsibilities
            .iter()
            .enumerate()
            .map(|(k, item)| ed.text(item, format!("{base}.responsibilities.{k}")))
            .collect(),
        skills: role
            .skills
            .as_ref()
            .map(|skills| ed.field(skills.clone(), format!("{base}.skills"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Locale;
    use crate::store::demo::demo_document;
    use serde_json::json;

    fn english() -> UiLabels {
        UiLabels::for_locale(Locale::En)
    }

    #[test]
    fn test_download_file_name_replaces_first_space_only() {
        assert_eq!(download_file_name("Jordan Avery"), "Jordan_Avery_Resume.pdf");
        assert_eq!(download_file_name("Mary Ann Lee"), "Mary_Ann Lee_Resume.pdf");
        assert_eq!(download_file_name("Prince"), "Prince_Resume.pdf");
    }

    #[test]
    fn test_view_mode_has_no_paths() {
        let page = build_page(demo_document(Locale::En), &english(), false);
        assert!(!page.edit_mode);
        assert_eq!(page.hero.name.value, "Jordan Avery");
        assert_eq!(page.hero.name.path, None);

        let json = serde_json::to_value(&page).unwrap();
        assert!(!json.to_string().contains("\"path\""));
    }

    #[test]
    fn test_edit_mode_paths_address_the_document() {
        let doc = demo_document(Locale::En);
        let page = build_page(doc, &english(), true);

        let role = &page.experience.companies[0].roles[1];
        assert_eq!(role.title.path.as_deref(), Some("experience.0.roles.1.title"));
        assert_eq!(role.title.value, doc["experience"][0]["roles"][1]["title"]);
        assert_eq!(
            role.responsibilities[1].path.as_deref(),
            Some("experience.0.roles.1.responsibilities.1")
        );
        assert_eq!(page.achievements.items[2].path.as_deref(), Some("achievements.2"));
        assert_eq!(page.hero.experience_years.path.as_deref(), Some("basics.experienceYears"));
    }

    #[test]
    fn test_skill_categories_keep_document_order() {
        let page = build_page(demo_document(Locale::En), &english(), true);
        let names: Vec<_> = page.skills.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["frontend", "styling", "backend", "cloudDevOps", "testing", "tools"]);
        assert_eq!(page.skills.categories[0].skills.path.as_deref(), Some("skills.frontend"));
    }

    #[test]
    fn test_years_placeholder_is_substituted() {
        let mut labels = english();
        labels.experience.summary = "Over {years} years of work".to_string();
        let doc = json!({ "basics": { "experienceYears": 12 } });
        let page = build_page(&doc, &labels, false);
        assert_eq!(page.experience.summary.value, "Over 12 years of work");
    }

    #[test]
    fn test_ill_typed_field_blanks_only_itself() {
        let mut doc = demo_document(Locale::En).clone();
        doc["basics"]["experienceYears"] = json!("lots");
        doc["education"]["year"] = json!(-1);
        let page = build_page(&doc, &english(), false);
        assert_eq!(page.hero.name.value, "Jordan Avery");
        assert_eq!(page.hero.experience_years.value, 0);
        assert_eq!(page.achievements.year.value, 0);
        assert!(!page.experience.companies.is_empty());
    }

    #[test]
    fn test_non_object_document_renders_empty() {
        let page = build_page(&json!(["not", "a", "portfolio"]), &english(), false);
        assert_eq!(page.hero.name.value, "");
        assert!(page.experience.companies.is_empty());
    }
}
