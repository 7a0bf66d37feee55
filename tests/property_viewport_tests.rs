use proptest::collection::vec;
use proptest::prelude::*;
use pumpdash_rs::core::{ViewMode, ViewportController};

#[derive(Debug, Clone, Copy)]
enum Gesture {
    ZoomIn,
    ZoomOut,
    PanLeft,
    PanRight,
    Reset,
}

fn gesture() -> impl Strategy<Value = Gesture> {
    prop_oneof![
        Just(Gesture::ZoomIn),
        Just(Gesture::ZoomOut),
        Just(Gesture::PanLeft),
        Just(Gesture::PanRight),
        Just(Gesture::Reset),
    ]
}

fn apply(viewport: &mut ViewportController, gesture: Gesture) {
    match gesture {
        Gesture::ZoomIn => viewport.zoom_in(),
        Gesture::ZoomOut => viewport.zoom_out(),
        Gesture::PanLeft => viewport.pan_left(),
        Gesture::PanRight => viewport.pan_right(),
        Gesture::Reset => viewport.reset(),
    }
}

proptest! {
    #[test]
    fn invariants_hold_under_arbitrary_gestures(
        len in 1usize..500,
        gestures in vec(gesture(), 0..60)
    ) {
        let mut viewport = ViewportController::new(len);

        for g in gestures {
            apply(&mut viewport, g);

            prop_assert!(viewport.zoom_level() >= 1.0 - 1e-12);
            prop_assert!(viewport.visible_fraction() >= 0.05 - 1e-9);
            prop_assert!(viewport.visible_fraction() <= 1.0 + 1e-12);
            prop_assert!(viewport.center_index() < len);

            let window = viewport.visible_window();
            prop_assert!(window.start < window.end);
            prop_assert!(window.end <= len);
        }
    }

    #[test]
    fn reset_always_restores_the_full_centered_view(
        len in 1usize..500,
        gestures in vec(gesture(), 0..60)
    ) {
        let mut viewport = ViewportController::new(len);
        for g in gestures {
            apply(&mut viewport, g);
        }

        viewport.reset();
        prop_assert_eq!(viewport.mode(), ViewMode::Full);
        prop_assert_eq!(viewport.center_index(), len / 2);
        prop_assert_eq!(viewport.visible_window(), 0..len);
    }

    #[test]
    fn replay_yields_identical_windows(
        len in 1usize..500,
        gestures in vec(gesture(), 0..60)
    ) {
        let mut first = ViewportController::new(len);
        let mut second = ViewportController::new(len);

        for g in &gestures {
            apply(&mut first, *g);
            apply(&mut second, *g);
            prop_assert_eq!(first.current_window(), second.current_window());
        }
        prop_assert_eq!(first, second);
    }
}
