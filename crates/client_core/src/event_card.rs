//! Display model for the event cards rendered under assistant answers.

use chrono::{Datelike, NaiveDate};
use shared::{
    domain::{Locale, Localized},
    protocol::EventRecord,
};

const MAX_TAGS: usize = 3;

const FREE_LABEL: Localized = Localized::new("Gratuït", "Gratis", "Free");

const SHORT_MONTHS: [Localized; 12] = [
    Localized::new("gen.", "ene", "Jan"),
    Localized::new("febr.", "feb", "Feb"),
    Localized::new("març", "mar", "Mar"),
    Localized::new("abr.", "abr", "Apr"),
    Localized::new("maig", "may", "May"),
    Localized::new("juny", "jun", "Jun"),
    Localized::new("jul.", "jul", "Jul"),
    Localized::new("ag.", "ago", "Aug"),
    Localized::new("set.", "sept", "Sept"),
    Localized::new("oct.", "oct", "Oct"),
    Localized::new("nov.", "nov", "Nov"),
    Localized::new("des.", "dic", "Dec"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventCard {
    pub title: String,
    pub summary: String,
    pub date: String,
    pub time: Option<String>,
    pub place: String,
    pub tags: Vec<String>,
    pub price: Option<String>,
    pub url: Option<String>,
}

impl EventCard {
    pub fn from_record(record: &EventRecord, locale: Locale) -> Self {
        Self {
            title: record.title.clone(),
            summary: record.short_description.clone(),
            date: format_short_date(&record.start_date, locale),
            time: format_time(&record.start_time),
            place: record.place_name.clone(),
            tags: record
                .tags
                .iter()
                .take(MAX_TAGS)
                .map(|tag| tag.replacen('#', "", 1))
                .collect(),
            price: price_label(record, locale),
            url: record.url.clone(),
        }
    }
}

/// `"14 mar"`-style day and month; input that is not an ISO date is returned as-is.
pub fn format_short_date(raw: &str, locale: Locale) -> String {
    let Some(date) = parse_date(raw) else {
        return raw.to_string();
    };
    let month = SHORT_MONTHS[date.month0() as usize].get(locale);
    format!("{} {month}", date.day())
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let head = raw.trim().get(..10)?;
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

fn format_time(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    Some(raw.chars().take(5).collect())
}

fn price_label(record: &EventRecord, locale: Locale) -> Option<String> {
    if record.is_free {
        return Some(FREE_LABEL.get(locale).to_string());
    }
    match record.price_eur {
        Some(price) if price != 0.0 => Some(format!("{price:.2} €")),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> EventRecord {
        EventRecord {
            id: "evt-7".into(),
            title: "Taller de ceràmica".into(),
            short_description: "Per a tota la família".into(),
            long_description: String::new(),
            postal_code: "08301".into(),
            town_name: "Mataró".into(),
            place_name: "Can Palauet".into(),
            full_address: "Carrer d'Argentona, 64, Mataró".into(),
            start_date: "2026-03-14".into(),
            end_date: "2026-03-14".into(),
            start_time: "17:30:00".into(),
            end_time: "19:00:00".into(),
            is_free: false,
            price_eur: Some(12.5),
            categories: vec!["talleres".into()],
            tags: vec![
                "#familia".into(),
                "#arte".into(),
                "#infantil".into(),
                "#otoño".into(),
            ],
            url: Some("https://example.org/taller".into()),
            image_url: None,
            distance_km: Some(1.2),
            similarity_score: 0.77,
            match_level: "media".into(),
        }
    }

    #[test]
    fn builds_card_from_record() {
        let card = EventCard::from_record(&record(), Locale::Es);
        assert_eq!(card.date, "14 mar");
        assert_eq!(card.time.as_deref(), Some("17:30"));
        assert_eq!(card.place, "Can Palauet");
        assert_eq!(card.tags, vec!["familia", "arte", "infantil"]);
        assert_eq!(card.price.as_deref(), Some("12.50 €"));
    }

    #[test]
    fn free_events_show_free_badge() {
        let mut event = record();
        event.is_free = true;
        assert_eq!(
            EventCard::from_record(&event, Locale::Ca).price.as_deref(),
            Some("Gratuït")
        );
    }

    #[test]
    fn zero_or_missing_price_has_no_badge() {
        let mut event = record();
        event.price_eur = Some(0.0);
        assert_eq!(EventCard::from_record(&event, Locale::Es).price, None);
        event.price_eur = None;
        assert_eq!(EventCard::from_record(&event, Locale::Es).price, None);
    }

    #[test]
    fn dates_follow_locale_and_tolerate_bad_input() {
        assert_eq!(format_short_date("2026-09-02", Locale::En), "2 Sept");
        assert_eq!(format_short_date("2026-03-14T10:00:00Z", Locale::Ca), "14 març");
        assert_eq!(format_short_date("próximamente", Locale::Es), "próximamente");
    }

    #[test]
    fn empty_start_time_is_omitted() {
        let mut event = record();
        event.start_time = String::new();
        assert_eq!(EventCard::from_record(&event, Locale::Es).time, None);
    }
}
