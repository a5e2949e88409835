//! Built-in demo documents and the blank schema template, compiled into the binary.

use std::sync::OnceLock;

use serde_json::Value;

use crate::models::Locale;

const DEMO_EN: &str = include_str!("../../data/portfolio_en.json");
const DEMO_DE: &str = include_str!("../../data/portfolio_de.json");
const DEMO_JP: &str = include_str!("../../data/portfolio_jp.json");
const TEMPLATE: &str = include_str!("../../data/portfolio_template.json");

struct Builtins {
    en: Value,
    de: Value,
    jp: Value,
    template: Value,
}

fn builtins() -> &'static Builtins {
    static BUILTINS: OnceLock<Builtins> = OnceLock::new();
    BUILTINS.get_or_init(|| Builtins {
        en: serde_json::from_str(DEMO_EN).expect("embedded English demo document is valid JSON"),
        de: serde_json::from_str(DEMO_DE).expect("embedded German demo document is valid JSON"),
        jp: serde_json::from_str(DEMO_JP).expect("embedded Japanese demo document is valid JSON"),
        template: serde_json::from_str(TEMPLATE).expect("embedded schema template is valid JSON"),
    })
}

/// Read-only demo content for a locale.
pub fn demo_document(locale: Locale) -> &'static Value {
    let b = builtins();
    match locale {
        Locale::En => &b.en,
        Locale::De => &b.de,
        Locale::Jp => &b.jp,
    }
}

/// Blank document with every section present and empty.
pub fn schema_template() -> &'static Value {
    &builtins().template
}
