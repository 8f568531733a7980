use shared::domain::Locale;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageOption {
    pub locale: Locale,
    pub flag: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

pub const LANGUAGES: [LanguageOption; 3] = [
    LanguageOption {
        locale: Locale::Ca,
        flag: "🏴󠁥󠁳󠁣󠁴󠁿",
        name: "Català",
        description: "Comença en català",
    },
    LanguageOption {
        locale: Locale::Es,
        flag: "🇪🇸",
        name: "Español",
        description: "Empieza en español",
    },
    LanguageOption {
        locale: Locale::En,
        flag: "🇬🇧",
        name: "English",
        description: "Start in English",
    },
];

#[derive(Debug, Clone, Default)]
pub struct LanguagePicker {
    selected: Option<Locale>,
}

impl LanguagePicker {
    pub fn options(&self) -> &'static [LanguageOption] {
        &LANGUAGES
    }

    pub fn select(&mut self, locale: Locale) {
        self.selected = Some(locale);
    }

    pub fn selected(&self) -> Option<Locale> {
        self.selected
    }

    pub fn is_selected(&self, locale: Locale) -> bool {
        self.selected == Some(locale)
    }

    /// The continue button only appears once a language is picked.
    pub fn continue_with(&self) -> Option<Locale> {
        self.selected
    }
}
