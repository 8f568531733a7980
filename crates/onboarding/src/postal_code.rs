//! Postal-code entry: numeric validation and the city lookup table.

use shared::domain::{Locale, Localized};

use crate::error::PostalCodeError;

pub const POSTAL_CODE_LEN: usize = 5;

/// City shown in the chat when the postal code is not in the table.
pub const DEFAULT_CITY: &str = "Barcelona";

const CITIES: [(&str, &str); 10] = [
    ("08001", "Barcelona"),
    ("08380", "Malgrat de Mar"),
    ("08301", "Mataró"),
    ("08400", "Granollers"),
    ("08201", "Sabadell"),
    ("08221", "Terrassa"),
    ("08800", "Vilanova i la Geltrú"),
    ("08850", "Gavà"),
    ("08901", "L'Hospitalet de Llobregat"),
    ("08940", "Cornellà de Llobregat"),
];

pub const TITLE: Localized = Localized::new(
    "INTRODUEIX EL TEU CODI POSTAL",
    "INTRODUCE TU CÓDIGO POSTAL",
    "ENTER YOUR POSTAL CODE",
);
pub const SUBTITLE: Localized = Localized::new(
    "Descobreix comerços i serveis al teu barri",
    "Descubre comercios y servicios en tu barrio",
    "Discover shops and services in your neighborhood",
);
const NOT_NUMERIC_MESSAGE: Localized = Localized::new(
    "Només es permeten números",
    "Solo se permiten números",
    "Only numbers are allowed",
);
pub const CTA: Localized = Localized::new("CONTINUAR", "CONTINUAR", "CONTINUE");

/// Exact-match lookup; partial or unknown codes have no city.
pub fn lookup_city(code: &str) -> Option<&'static str> {
    CITIES
        .iter()
        .find(|(candidate, _)| *candidate == code)
        .map(|(_, city)| *city)
}

#[derive(Debug, Clone, Default)]
pub struct PostalCodeForm {
    value: String,
    touched: bool,
    locale: Locale,
}

impl PostalCodeForm {
    pub fn new(locale: Locale) -> Self {
        Self {
            value: String::new(),
            touched: false,
            locale,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replaces the field contents, keeping at most five characters.
    pub fn set_value(&mut self, input: &str) {
        self.value = input.chars().take(POSTAL_CODE_LEN).collect();
        self.touched = true;
    }

    pub fn is_numeric(&self) -> bool {
        self.value.chars().all(|c| c.is_ascii_digit())
    }

    pub fn is_complete(&self) -> bool {
        self.value.len() == POSTAL_CODE_LEN && self.is_numeric()
    }

    pub fn show_error(&self) -> bool {
        self.touched && !self.is_numeric()
    }

    pub fn error_message(&self) -> Option<&'static str> {
        self.show_error()
            .then(|| NOT_NUMERIC_MESSAGE.get(self.locale))
    }

    pub fn can_submit(&self) -> bool {
        self.is_complete()
    }

    pub fn city_name(&self) -> Option<&'static str> {
        if self.is_complete() {
            lookup_city(&self.value)
        } else {
            None
        }
    }

    pub fn submit(&self) -> Result<String, PostalCodeError> {
        if self.value.is_empty() {
            return Err(PostalCodeError::Empty);
        }
        if !self.is_numeric() {
            return Err(PostalCodeError::NotNumeric);
        }
        if !self.is_complete() {
            return Err(PostalCodeError::Incomplete);
        }
        Ok(self.value.clone())
    }
}

#[cfg(test)]
#[path = "tests/postal_code_tests.rs"]
mod tests;
