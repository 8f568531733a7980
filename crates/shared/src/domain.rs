use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub u64);
    };
}

id_newtype!(MessageId);
id_newtype!(SlideId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    Ca,
    #[default]
    Es,
    En,
}

impl Locale {
    pub const ALL: [Locale; 3] = [Locale::Ca, Locale::Es, Locale::En];

    pub fn code(self) -> &'static str {
        match self {
            Locale::Ca => "ca",
            Locale::Es => "es",
            Locale::En => "en",
        }
    }

    /// BCP-47 tag handed to speech recognition engines.
    pub fn speech_tag(self) -> &'static str {
        match self {
            Locale::Ca => "ca-ES",
            Locale::Es => "es-ES",
            Locale::En => "en-GB",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported locale '{0}'")]
pub struct UnknownLocale(pub String);

impl FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ca" => Ok(Locale::Ca),
            "es" => Ok(Locale::Es),
            "en" => Ok(Locale::En),
            other => Err(UnknownLocale(other.to_string())),
        }
    }
}

/// Text available in every supported locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Localized {
    pub ca: &'static str,
    pub es: &'static str,
    pub en: &'static str,
}

impl Localized {
    pub const fn new(ca: &'static str, es: &'static str, en: &'static str) -> Self {
        Self { ca, es, en }
    }

    pub fn get(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::Ca => self.ca,
            Locale::Es => self.es,
            Locale::En => self.en,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    Assistant,
    User,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_locale_codes_case_insensitively() {
        assert_eq!("CA".parse::<Locale>(), Ok(Locale::Ca));
        assert_eq!(" en ".parse::<Locale>(), Ok(Locale::En));
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn speech_tags_follow_locale() {
        assert_eq!(Locale::Ca.speech_tag(), "ca-ES");
        assert_eq!(Locale::default().speech_tag(), "es-ES");
        assert_eq!(Locale::En.speech_tag(), "en-GB");
    }
}
