//! The onboarding slide deck.

use std::collections::HashSet;

use shared::domain::{Locale, Localized, SlideId};

use crate::error::CarouselError;

#[derive(Debug, Clone, PartialEq)]
pub struct Slide {
    pub id: SlideId,
    pub xp: u32,
    pub title: Localized,
    pub description: Localized,
    /// Opaque key the host maps to artwork.
    pub visual_token: &'static str,
    /// Background color token for the slide's image area.
    pub accent_token: &'static str,
}

impl Slide {
    pub fn title(&self, locale: Locale) -> &'static str {
        self.title.get(locale)
    }

    pub fn description(&self, locale: Locale) -> &'static str {
        self.description.get(locale)
    }

    pub fn xp_badge(&self) -> String {
        format!("+{} XP", self.xp)
    }
}

const BUILTIN_SLIDES: [Slide; 5] = [
    Slide {
        id: SlideId(1),
        xp: 10,
        title: Localized::new(
            "CONNECTA AMB VEÏNS",
            "CONECTA CON VECINOS",
            "CONNECT WITH NEIGHBORS",
        ),
        description: Localized::new(
            "Forma part d'una comunitat activa i solidària.",
            "Forma parte de una comunidad activa y solidaria.",
            "Be part of an active and supportive community.",
        ),
        visual_token: "🤝",
        accent_token: "km0-yellow-300",
    },
    Slide {
        id: SlideId(2),
        xp: 20,
        title: Localized::new(
            "DESCOBREIX EL MERCAT LOCAL",
            "DESCUBRE EL MERCADO LOCAL",
            "DISCOVER THE LOCAL MARKET",
        ),
        description: Localized::new(
            "Troba productes frescos i de proximitat al teu barri.",
            "Encuentra productos frescos y de proximidad en tu barrio.",
            "Find fresh, local products in your neighborhood.",
        ),
        visual_token: "🛒",
        accent_token: "km0-teal-300",
    },
    Slide {
        id: SlideId(3),
        xp: 30,
        title: Localized::new(
            "PARTICIPA EN ACTIVITATS",
            "PARTICIPA EN ACTIVIDADES",
            "JOIN ACTIVITIES",
        ),
        description: Localized::new(
            "Activitats per a tota la família, cada setmana.",
            "Actividades para toda la familia, cada semana.",
            "Activities for the whole family, every week.",
        ),
        visual_token: "🎯",
        accent_token: "km0-coral-300",
    },
    Slide {
        id: SlideId(4),
        xp: 40,
        title: Localized::new(
            "ACONSEGUEIX RECOMPENSES",
            "CONSIGUE RECOMPENSAS",
            "EARN REWARDS",
        ),
        description: Localized::new(
            "Guanya punts i bescanvia'ls per avantatges exclusius.",
            "Gana puntos y canjéalos por ventajas exclusivas.",
            "Earn points and redeem them for exclusive perks.",
        ),
        visual_token: "🏆",
        accent_token: "km0-blue-300",
    },
    Slide {
        id: SlideId(5),
        xp: 50,
        title: Localized::new("APRÈN I CREIX", "APRENDE Y CRECE", "LEARN AND GROW"),
        description: Localized::new(
            "Formació i recursos per millorar cada dia.",
            "Formación y recursos para mejorar cada día.",
            "Training and resources to improve every day.",
        ),
        visual_token: "📚",
        accent_token: "km0-beige-300",
    },
];

/// Ordered, non-empty, immutable sequence of slides.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideDeck {
    slides: Vec<Slide>,
}

impl SlideDeck {
    pub fn new(slides: Vec<Slide>) -> Result<Self, CarouselError> {
        if slides.is_empty() {
            return Err(CarouselError::EmptyDeck);
        }
        let mut seen = HashSet::with_capacity(slides.len());
        for slide in &slides {
            if !seen.insert(slide.id) {
                return Err(CarouselError::DuplicateSlide(slide.id.0));
            }
        }
        Ok(Self { slides })
    }

    pub fn builtin() -> Self {
        Self {
            slides: BUILTIN_SLIDES.to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn first(&self) -> &Slide {
        &self.slides[0]
    }

    pub fn get(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Slide> {
        self.slides.iter()
    }
}

impl Default for SlideDeck {
    fn default() -> Self {
        Self::builtin()
    }
}
