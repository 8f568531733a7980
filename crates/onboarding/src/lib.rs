//! Onboarding flow state: language picker, slide carousel and postal-code entry.

pub mod carousel;
pub mod error;
pub mod language;
pub mod postal_code;
pub mod screen;
pub mod slides;

pub use carousel::{
    visual_params, CarouselController, DragOutcome, TrackLayout, VisualParams, DRAG_THRESHOLD,
};
pub use error::{CarouselError, PostalCodeError};
pub use language::{LanguageOption, LanguagePicker, LANGUAGES};
pub use postal_code::{lookup_city, PostalCodeForm, DEFAULT_CITY};
pub use screen::{OnboardingScreen, SkipOutcome};
pub use slides::{Slide, SlideDeck};
