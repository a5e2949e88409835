use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::models::locale::Locale;
use crate::models::portfolio::SectionLabels;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavLabels {
    pub home: String,
    pub experience: String,
    pub skills: String,
    pub achievements: String,
    pub hire_me: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroLabels {
    pub availability: String,
    pub contact_me: String,
    #[serde(rename = "downloadCV")]
    pub download_cv: String,
    pub linkedin: String,
    pub years_exp: String,
    pub open_to: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceLabels {
    pub title: String,
    /// May contain a `{years}` placeholder.
    pub summary: String,
    pub current_role: String,
    pub current_location: String,
    pub key_projects: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillsLabels {
    pub title: String,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementsLabels {
    pub title: String,
    pub education: String,
    pub graduated: String,
    pub interests: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterLabels {
    pub rights: String,
    pub built_with: String,
}

/// Locale-dependent UI chrome. Switching locale always changes these,
/// even while an override document is active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiLabels {
    pub nav: NavLabels,
    pub hero: HeroLabels,
    pub experience: ExperienceLabels,
    pub skills: SkillsLabels,
    pub achievements: AchievementsLabels,
    pub footer: FooterLabels,
}

impl UiLabels {
    pub fn for_locale(locale: Locale) -> Self {
        match locale {
            Locale::En => english(),
            Locale::De => german(),
            Locale::Jp => japanese(),
        }
    }

    /// Applies a document's section label overrides. Empty strings do not
    /// override, so a blank template leaves the chrome untouched.
    pub fn with_overrides(mut self, overrides: Option<&SectionLabels>) -> Self {
        let Some(overrides) = overrides else {
            return self;
        };

        if let Some(hero) = &overrides.hero {
            let h = &mut self.hero;
            pick(hero, "availability", &mut h.availability);
            pick(hero, "contactMe", &mut h.contact_me);
            pick(hero, "downloadCV", &mut h.download_cv);
            pick(hero, "linkedin", &mut h.linkedin);
            pick(hero, "yearsExp", &mut h.years_exp);
            pick(hero, "openTo", &mut h.open_to);
        }
        if let Some(exp) = &overrides.experience {
            let e = &mut self.experience;
            pick(exp, "title", &mut e.title);
            pick(exp, "summary", &mut e.summary);
            pick(exp, "currentRole", &mut e.current_role);
            pick(exp, "keyProjects", &mut e.key_projects);
        }
        if let Some(skills) = &overrides.skills {
            pick(skills, "title", &mut self.skills.title);
            pick(skills, "summary", &mut self.skills.summary);
        }
        if let Some(ach) = &overrides.achievements {
            let a = &mut self.achievements;
            pick(ach, "title", &mut a.title);
            pick(ach, "education", &mut a.education);
            pick(ach, "interests", &mut a.interests);
        }
        self
    }
}

fn pick(source: &IndexMap<String, String>, key: &str, target: &mut String) {
    if let Some(v) = source.get(key).filter(|v| !v.is_empty()) {
        target.clone_from(v);
    }
}

fn s(v: &str) -> String {
    v.to_string()
}

fn english() -> UiLabels {
    UiLabels {
        nav: NavLabels {
            home: s("Home"),
            experience: s("Experience"),
            skills: s("Skills"),
            achievements: s("Achievements"),
            hire_me: s("Hire Me"),
        },
        hero: HeroLabels {
            availability: s(" for opportunities"),
            contact_me: s("Contact Me"),
            download_cv: s("Download CV"),
            linkedin: s("LinkedIn"),
            years_exp: s("Years Experience"),
            open_to: s("Open to"),
        },
        experience: ExperienceLabels {
            title: s("Professional Journey"),
            summary: s("Over {years} years of crafting scalable web applications and leading frontend teams to success."),
            current_role: s("Current Role"),
            current_location: s("Current Location"),
            key_projects: s("Impacted Platforms"),
        },
        skills: SkillsLabels {
            title: s("Technical Expertise"),
            summary: s("A comprehensive toolset sharpened by years of building high-performance web applications."),
        },
        achievements: AchievementsLabels {
            title: s("Key Achievements"),
            education: s("Education"),
            graduated: s("Graduated"),
            interests: s("Interests"),
        },
        footer: FooterLabels {
            rights: s("All rights reserved."),
            built_with: s("Built with Rust, Axum & Gemini API"),
        },
    }
}

fn german() -> UiLabels {
    UiLabels {
        nav: NavLabels {
            home: s("Startseite"),
            experience: s("Erfahrung"),
            skills: s("Fähigkeiten"),
            achievements: s("Erfolge"),
            hire_me: s("Mich Einstellen"),
        },
        hero: HeroLabels {
            availability: s("für Angebote"),
            contact_me: s("Kontaktieren"),
            download_cv: s("Lebenslauf (CV)"),
            linkedin: s("LinkedIn"),
            years_exp: s("Jahre Erfahrung"),
            open_to: s("Offen für"),
        },
        experience: ExperienceLabels {
            title: s("Beruflicher Werdegang"),
            summary: s("Über {years} Jahre Erfahrung in der Erstellung skalierbarer Webanwendungen und der erfolgreichen Leitung von Frontend-Teams."),
            current_role: s("Aktuelle Position"),
            current_location: s("Aktueller Standort"),
            key_projects: s("Wichtige Plattformen"),
        },
        skills: SkillsLabels {
            title: s("Technische Fachkenntnisse"),
            summary: s("Ein umfassendes Toolset, geschärft durch jahrelange Entwicklung leistungsstarker Webanwendungen."),
        },
        achievements: AchievementsLabels {
            title: s("Wichtige Erfolge"),
            education: s("Ausbildung"),
            graduated: s("Abschluss"),
            interests: s("Interessen"),
        },
        footer: FooterLabels {
            rights: s("Alle Rechte vorbehalten."),
            built_with: s("Erstellt mit Rust, Axum & Gemini API"),
        },
    }
}

fn japanese() -> UiLabels {
    UiLabels {
        nav: NavLabels {
            home: s("ホーム"),
            experience: s("経歴"),
            skills: s("スキル"),
            achievements: s("実績"),
            hire_me: s("採用について"),
        },
        hero: HeroLabels {
            availability: s("求職中"),
            contact_me: s("お問い合わせ"),
            download_cv: s("履歴書ダウンロード"),
            linkedin: s("LinkedIn"),
            years_exp: s("年の経験"),
            open_to: s("希望勤務地"),
        },
        experience: ExperienceLabels {
            title: s("職務経歴"),
            summary: s("{years}年以上にわたり、スケーラブルなWebアプリケーションを作成し、フロントエンドチームを成功に導いてきました。"),
            current_role: s("現在の役職"),
            current_location: s("現在の所在地"),
            key_projects: s("主要なプラットフォーム"),
        },
        skills: SkillsLabels {
            title: s("専門スキル"),
            summary: s("高性能Webアプリケーション開発で培われた包括的なツールセット。"),
        },
        achievements: AchievementsLabels {
            title: s("主な実績"),
            education: s("学歴"),
            graduated: s("卒業"),
            interests: s("興味・関心"),
        },
        footer: FooterLabels {
            rights: s("All rights reserved."),
            built_with: s("Rust, Axum & Gemini API で構築"),
        },
    }
}
