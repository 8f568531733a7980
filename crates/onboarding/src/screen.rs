//! Onboarding screen state: the carousel plus the affordances around it.

use shared::domain::{Locale, Localized};
use tracing::debug;

use crate::{
    carousel::{CarouselController, DragOutcome, VisualParams},
    error::CarouselError,
    slides::{Slide, SlideDeck},
};

const SKIP_LABEL: Localized = Localized::new("SALTAR", "SALTAR", "SKIP");
const START_LABEL: Localized = Localized::new("INICI", "INICIO", "START");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipOutcome {
    JumpedToLast,
    Finished,
}

#[derive(Debug, Clone)]
pub struct OnboardingScreen {
    deck: SlideDeck,
    carousel: CarouselController,
    locale: Locale,
}

impl OnboardingScreen {
    pub fn new(deck: SlideDeck, locale: Locale) -> Self {
        let carousel = CarouselController::for_deck(&deck);
        Self {
            deck,
            carousel,
            locale,
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn deck(&self) -> &SlideDeck {
        &self.deck
    }

    pub fn carousel(&self) -> &CarouselController {
        &self.carousel
    }

    pub fn carousel_mut(&mut self) -> &mut CarouselController {
        &mut self.carousel
    }

    pub fn active_slide(&self) -> &Slide {
        // The cursor is bounded by the deck the controller was built from.
        self.deck
            .get(self.carousel.current_index())
            .unwrap_or_else(|| self.deck.first())
    }

    pub fn peek_previous(&self) -> Option<&Slide> {
        let index = self.carousel.current_index().checked_sub(1)?;
        self.deck.get(index)
    }

    pub fn peek_next(&self) -> Option<&Slide> {
        self.deck.get(self.carousel.current_index() + 1)
    }

    pub fn title(&self) -> &'static str {
        self.active_slide().title(self.locale)
    }

    pub fn description(&self) -> &'static str {
        self.active_slide().description(self.locale)
    }

    pub fn counter_label(&self) -> String {
        format!("{}/{}", self.carousel.current_index() + 1, self.deck.len())
    }

    pub fn previous_enabled(&self) -> bool {
        !self.carousel.is_first()
    }

    pub fn next_enabled(&self) -> bool {
        !self.carousel.is_last()
    }

    pub fn skip_label(&self) -> &'static str {
        if self.carousel.is_last() {
            START_LABEL.get(self.locale)
        } else {
            SKIP_LABEL.get(self.locale)
        }
    }

    pub fn skip(&mut self) -> SkipOutcome {
        if self.carousel.is_last() {
            debug!("onboarding finished");
            SkipOutcome::Finished
        } else {
            self.carousel.go_to_last();
            debug!(slide = self.carousel.current_index(), "skipped to last slide");
            SkipOutcome::JumpedToLast
        }
    }

    pub fn previous(&mut self) -> bool {
        self.carousel.previous()
    }

    pub fn next(&mut self) -> bool {
        self.carousel.next()
    }

    /// Thumbnail and dot selection.
    pub fn select(&mut self, index: usize) -> Result<(), CarouselError> {
        self.carousel.go_to(index)
    }

    pub fn begin_drag(&mut self, pointer_x: f32) {
        self.carousel.begin_drag(pointer_x);
    }

    pub fn update_drag(&mut self, pointer_x: f32) {
        self.carousel.update_drag(pointer_x);
    }

    pub fn end_drag(&mut self, pointer_x: f32) -> DragOutcome {
        let outcome = self.carousel.end_drag(pointer_x);
        debug!(?outcome, slide = self.carousel.current_index(), "drag resolved");
        outcome
    }

    /// Visual parameters for every slide, in deck order.
    pub fn visual_params(&self) -> Vec<VisualParams> {
        (0..self.deck.len())
            .map(|index| self.carousel.visual_params_for(index))
            .collect()
    }
}
