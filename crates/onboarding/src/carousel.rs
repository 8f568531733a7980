//! Bounded slide cursor driven by step commands and drag gestures.

use crate::{error::CarouselError, slides::SlideDeck};

/// Pointer travel needed before a drag commits a step.
pub const DRAG_THRESHOLD: f32 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualParams {
    pub distance: usize,
    pub scale: f32,
    pub opacity: f32,
    pub vertical_offset: f32,
    pub z_order: u8,
}

#[derive(Debug, Clone, Copy)]
struct VisualTier {
    scale: f32,
    opacity: f32,
    vertical_offset: f32,
    z_order: u8,
}

const TIERS: [VisualTier; 3] = [
    VisualTier {
        scale: 1.0,
        opacity: 1.0,
        vertical_offset: 0.0,
        z_order: 30,
    },
    VisualTier {
        scale: 0.82,
        opacity: 0.65,
        vertical_offset: 28.0,
        z_order: 20,
    },
    VisualTier {
        scale: 0.68,
        opacity: 0.35,
        vertical_offset: 48.0,
        z_order: 10,
    },
];

/// Visual parameters for the slide at `slide_index` while `current_index` is active.
pub fn visual_params(slide_index: usize, current_index: usize) -> VisualParams {
    let distance = slide_index.abs_diff(current_index);
    let tier = TIERS[distance.min(TIERS.len() - 1)];
    VisualParams {
        distance,
        scale: tier.scale,
        opacity: tier.opacity,
        vertical_offset: tier.vertical_offset,
        z_order: tier.z_order,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackLayout {
    pub container_width: f32,
    pub slot_width: f32,
}

impl Default for TrackLayout {
    fn default() -> Self {
        Self {
            container_width: 390.0,
            slot_width: 260.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct DragSession {
    origin_x: f32,
    offset: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    Advanced,
    WentBack,
    /// Travel stayed within the threshold, or the step hit a bound.
    Cancelled,
    NotDragging,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CarouselController {
    len: usize,
    current: usize,
    drag: Option<DragSession>,
    layout: TrackLayout,
}

impl CarouselController {
    pub fn new(len: usize) -> Result<Self, CarouselError> {
        if len == 0 {
            return Err(CarouselError::EmptyDeck);
        }
        Ok(Self {
            len,
            current: 0,
            drag: None,
            layout: TrackLayout::default(),
        })
    }

    pub fn for_deck(deck: &SlideDeck) -> Self {
        Self {
            len: deck.len(),
            current: 0,
            drag: None,
            layout: TrackLayout::default(),
        }
    }

    pub fn with_layout(mut self, layout: TrackLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn set_layout(&mut self, layout: TrackLayout) {
        self.layout = layout;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 == self.len
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn drag_offset(&self) -> f32 {
        self.drag.map_or(0.0, |drag| drag.offset)
    }

    /// Returns whether the cursor moved.
    pub fn previous(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Returns whether the cursor moved.
    pub fn next(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.current += 1;
        true
    }

    pub fn go_to(&mut self, index: usize) -> Result<(), CarouselError> {
        if index >= self.len {
            return Err(CarouselError::OutOfRange {
                index,
                len: self.len,
            });
        }
        self.current = index;
        Ok(())
    }

    pub fn go_to_last(&mut self) {
        self.current = self.len - 1;
    }

    pub fn begin_drag(&mut self, pointer_x: f32) {
        self.drag = Some(DragSession {
            origin_x: pointer_x,
            offset: 0.0,
        });
    }

    pub fn update_drag(&mut self, pointer_x: f32) {
        if let Some(drag) = self.drag.as_mut() {
            drag.offset = pointer_x - drag.origin_x;
        }
    }

    pub fn end_drag(&mut self, pointer_x: f32) -> DragOutcome {
        let Some(drag) = self.drag.take() else {
            return DragOutcome::NotDragging;
        };

        let delta = drag.origin_x - pointer_x;
        if delta.abs() <= DRAG_THRESHOLD {
            return DragOutcome::Cancelled;
        }

        if delta > 0.0 {
            if self.next() {
                DragOutcome::Advanced
            } else {
                DragOutcome::Cancelled
            }
        } else if self.previous() {
            DragOutcome::WentBack
        } else {
            DragOutcome::Cancelled
        }
    }

    pub fn visual_params_for(&self, slide_index: usize) -> VisualParams {
        visual_params(slide_index, self.current)
    }

    /// Horizontal offset of the slide strip that centers the active slide.
    pub fn track_translation(&self) -> f32 {
        let TrackLayout {
            container_width,
            slot_width,
        } = self.layout;
        container_width / 2.0 - self.current as f32 * slot_width - slot_width / 2.0
            + self.drag_offset()
    }
}

#[cfg(test)]
#[path = "tests/carousel_tests.rs"]
mod tests;

#[cfg(test)]
#[path = "tests/carousel_proptests.rs"]
mod proptests;
