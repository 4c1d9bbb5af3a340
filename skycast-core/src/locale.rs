use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::{convert::TryFrom, fmt};

/// Display language for descriptions, day labels and alert texts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Pt,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Pt => "pt",
        }
    }

    pub const fn all() -> &'static [Locale] {
        &[Locale::En, Locale::Pt]
    }

    /// Resolve a locale from a language tag such as `pt-BR` or `en_US.UTF-8`.
    ///
    /// Only the primary subtag is considered; anything that is not Portuguese
    /// is English.
    pub fn from_language_tag(tag: &str) -> Self {
        let primary = tag
            .split(['-', '_', '.'])
            .next()
            .unwrap_or_default()
            .to_lowercase();

        if primary == "pt" { Locale::Pt } else { Locale::En }
    }

    /// Locale of the current process, taken from `LANG`.
    pub fn from_env() -> Self {
        std::env::var("LANG")
            .map(|lang| Self::from_language_tag(&lang))
            .unwrap_or_default()
    }

    /// Abbreviated, title-cased weekday name.
    pub fn weekday_short(&self, day: Weekday) -> &'static str {
        match self {
            Locale::En => match day {
                Weekday::Mon => "Mon",
                Weekday::Tue => "Tue",
                Weekday::Wed => "Wed",
                Weekday::Thu => "Thu",
                Weekday::Fri => "Fri",
                Weekday::Sat => "Sat",
                Weekday::Sun => "Sun",
            },
            Locale::Pt => match day {
                Weekday::Mon => "Seg",
                Weekday::Tue => "Ter",
                Weekday::Wed => "Qua",
                Weekday::Thu => "Qui",
                Weekday::Fri => "Sex",
                Weekday::Sat => "Sáb",
                Weekday::Sun => "Dom",
            },
        }
    }

    /// Name shown for a device-located position when no place name is known.
    pub fn my_location(&self) -> &'static str {
        match self {
            Locale::En => "My Location",
            Locale::Pt => "Minha Localização",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Locale {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "pt" => Ok(Locale::Pt),
            _ => Err(anyhow::anyhow!("Unknown locale '{value}'. Supported locales: en, pt.")),
        }
    }
}
