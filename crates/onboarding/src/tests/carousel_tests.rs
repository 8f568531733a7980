use super::*;

fn five() -> CarouselController {
    CarouselController::new(5).expect("carousel")
}

#[test]
fn starts_at_first_slide_without_drag() {
    let carousel = CarouselController::for_deck(&SlideDeck::builtin());
    assert_eq!(carousel.current_index(), 0);
    assert_eq!(carousel.len(), 5);
    assert!(!carousel.is_empty());
    assert!(!carousel.is_dragging());
    assert_eq!(carousel.drag_offset(), 0.0);
    assert!(carousel.is_first());
    assert!(!carousel.is_last());
}

#[test]
fn rejects_empty_carousel() {
    assert_eq!(CarouselController::new(0), Err(CarouselError::EmptyDeck));
}

#[test]
fn next_clamps_at_last_slide() {
    let mut carousel = five();
    for _ in 0..3 {
        assert!(carousel.next());
    }
    assert_eq!(carousel.current_index(), 3);

    assert!(carousel.next());
    assert!(!carousel.next());
    assert_eq!(carousel.current_index(), 4);
    assert!(carousel.is_last());
}

#[test]
fn previous_is_noop_on_first_slide() {
    let mut carousel = five();
    assert!(!carousel.previous());
    assert_eq!(carousel.current_index(), 0);
}

#[test]
fn single_slide_deck_is_first_and_last() {
    let mut carousel = CarouselController::new(1).expect("carousel");
    assert!(carousel.is_first());
    assert!(carousel.is_last());
    assert!(!carousel.next());
    assert!(!carousel.previous());
}

#[test]
fn go_to_rejects_out_of_range_index() {
    let mut carousel = five();
    carousel.go_to(2).expect("in range");
    let err = carousel.go_to(5).expect_err("should fail");
    assert_eq!(err, CarouselError::OutOfRange { index: 5, len: 5 });
    assert_eq!(carousel.current_index(), 2);
}

#[test]
fn drag_under_threshold_keeps_slide() {
    let mut carousel = five();
    carousel.go_to(2).expect("in range");

    carousel.begin_drag(200.0);
    carousel.update_drag(161.0);
    assert!(carousel.is_dragging());
    assert_eq!(carousel.drag_offset(), -39.0);

    assert_eq!(carousel.end_drag(161.0), DragOutcome::Cancelled);
    assert_eq!(carousel.current_index(), 2);
    assert!(!carousel.is_dragging());
    assert_eq!(carousel.drag_offset(), 0.0);
}

#[test]
fn drag_exactly_at_threshold_keeps_slide() {
    let mut carousel = five();
    carousel.begin_drag(100.0);
    assert_eq!(carousel.end_drag(60.0), DragOutcome::Cancelled);
    assert_eq!(carousel.current_index(), 0);
}

#[test]
fn drag_left_past_threshold_advances() {
    let mut carousel = five();
    carousel.go_to(2).expect("in range");
    carousel.begin_drag(200.0);
    assert_eq!(carousel.end_drag(159.0), DragOutcome::Advanced);
    assert_eq!(carousel.current_index(), 3);
}

#[test]
fn drag_right_past_threshold_goes_back() {
    let mut carousel = five();
    carousel.go_to(2).expect("in range");
    carousel.begin_drag(200.0);
    assert_eq!(carousel.end_drag(241.0), DragOutcome::WentBack);
    assert_eq!(carousel.current_index(), 1);
}

#[test]
fn drag_past_bound_is_cancelled() {
    let mut carousel = five();
    carousel.begin_drag(200.0);
    assert_eq!(carousel.end_drag(300.0), DragOutcome::Cancelled);
    assert_eq!(carousel.current_index(), 0);
    assert!(!carousel.is_dragging());
}

#[test]
fn update_and_end_without_drag_do_nothing() {
    let mut carousel = five();
    carousel.update_drag(120.0);
    assert_eq!(carousel.drag_offset(), 0.0);
    assert_eq!(carousel.end_drag(0.0), DragOutcome::NotDragging);
    assert_eq!(carousel.current_index(), 0);
}

#[test]
fn new_drag_replaces_unresolved_drag() {
    let mut carousel = five();
    carousel.begin_drag(300.0);
    carousel.update_drag(200.0);
    assert_eq!(carousel.drag_offset(), -100.0);

    carousel.begin_drag(50.0);
    assert_eq!(carousel.drag_offset(), 0.0);
    assert_eq!(carousel.end_drag(30.0), DragOutcome::Cancelled);
    assert_eq!(carousel.current_index(), 0);
}

#[test]
fn visual_tiers_follow_distance() {
    let mut carousel = five();
    carousel.go_to(2).expect("in range");

    let active = carousel.visual_params_for(2);
    assert_eq!(active.distance, 0);
    assert_eq!(active.scale, 1.0);
    assert_eq!(active.opacity, 1.0);
    assert_eq!(active.vertical_offset, 0.0);

    let neighbour = carousel.visual_params_for(1);
    assert_eq!(neighbour.distance, 1);
    assert_eq!(neighbour.scale, 0.82);
    assert_eq!(neighbour.opacity, 0.65);
    assert_eq!(neighbour.vertical_offset, 28.0);
    assert_eq!(neighbour, carousel.visual_params_for(3));

    let far = carousel.visual_params_for(4);
    assert_eq!(far.distance, 2);
    assert_eq!(far.scale, 0.68);
    assert_eq!(far.opacity, 0.35);
    assert_eq!(far.vertical_offset, 48.0);

    assert!(active.z_order > neighbour.z_order);
    assert!(neighbour.z_order > far.z_order);
}

#[test]
fn far_slides_share_the_last_tier() {
    let params = visual_params(9, 0);
    assert_eq!(params.distance, 9);
    assert_eq!(params.scale, 0.68);
    assert_eq!(params.z_order, visual_params(2, 0).z_order);
}

#[test]
fn track_translation_centers_active_slot() {
    let mut carousel = five().with_layout(TrackLayout {
        container_width: 400.0,
        slot_width: 200.0,
    });
    assert_eq!(carousel.track_translation(), 100.0);

    carousel.next();
    assert_eq!(carousel.track_translation(), -100.0);
}

#[test]
fn track_translation_follows_live_drag() {
    let mut carousel = five().with_layout(TrackLayout {
        container_width: 400.0,
        slot_width: 200.0,
    });
    carousel.begin_drag(300.0);
    carousel.update_drag(270.0);
    assert_eq!(carousel.track_translation(), 70.0);

    carousel.end_drag(270.0);
    assert_eq!(carousel.track_translation(), 100.0);
}
