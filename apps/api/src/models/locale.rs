use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Locales with a built-in demo document and UI chrome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    De,
    Jp,
}

impl Locale {
    pub const ALL: [Locale; 3] = [Locale::En, Locale::De, Locale::Jp];

    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::De => "de",
            Locale::Jp => "jp",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "de" => Ok(Locale::De),
            "jp" | "ja" => Ok(Locale::Jp),
            other => Err(format!("unsupported locale '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_parses_case_insensitively() {
        assert_eq!("DE".parse::<Locale>().unwrap(), Locale::De);
        assert_eq!("ja".parse::<Locale>().unwrap(), Locale::Jp);
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn test_locale_serde_is_lowercase() {
        assert_eq!(serde_json::to_string(&Locale::Jp).unwrap(), "\"jp\"");
        let l: Locale = serde_json::from_str("\"de\"").unwrap();
        assert_eq!(l, Locale::De);
    }
}
