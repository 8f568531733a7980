use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CarouselError {
    #[error("slide index {index} is out of range for a deck of {len} slides")]
    OutOfRange { index: usize, len: usize },
    #[error("a slide deck needs at least one slide")]
    EmptyDeck,
    #[error("slide id {0} appears more than once in the deck")]
    DuplicateSlide(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PostalCodeError {
    #[error("postal code is empty")]
    Empty,
    #[error("postal code may only contain digits")]
    NotNumeric,
    #[error("postal code must have exactly 5 digits")]
    Incomplete,
}
