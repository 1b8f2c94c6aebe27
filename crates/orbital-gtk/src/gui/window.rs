use gtk::prelude::*;
use gtk4 as gtk;
use orbital::{OrbitEngine, Stage, Status};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

pub fn set_stage_size(drawing_area: &gtk::DrawingArea, stage: Stage) {
    drawing_area.set_content_width(stage.width.round() as i32);
    drawing_area.set_content_height(stage.height.round() as i32);
}

fn frame_delta(last: &Cell<Option<i64>>, now_us: i64) -> Duration {
    last.replace(Some(now_us))
        .map(|prev| Duration::from_micros(u64::try_from(now_us - prev).unwrap_or(0)))
        .unwrap_or_default()
}

/// Advances the engine once per displayed frame and redraws while it runs.
///
/// `on_status_change` fires when a tick changes the status on its own, which
/// happens when a finite cycle count runs out.
pub fn start_ticking<F>(
    drawing_area: &gtk::DrawingArea,
    engine: Rc<RefCell<OrbitEngine>>,
    on_status_change: F,
) -> gtk::TickCallbackId
where
    F: Fn(Status) + 'static,
{
    let last_frame = Cell::new(None);

    drawing_area.add_tick_callback(move |area, clock: &gdk4::FrameClock| {
        let delta = frame_delta(&last_frame, clock.frame_time());

        let mut engine = engine.borrow_mut();
        let before = engine.status();
        if engine.is_running() {
            engine.tick(delta);
            area.queue_draw();
        }

        let after = engine.status();
        drop(engine);
        if after != before {
            on_status_change(after);
            area.queue_draw();
        }
        glib::ControlFlow::Continue
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_delta() {
        let last = Cell::new(None);
        assert_eq!(frame_delta(&last, 1_000_000), Duration::ZERO);
        assert_eq!(frame_delta(&last, 1_016_667), Duration::from_micros(16_667));
        // a clock that jumps backwards never produces a negative step
        assert_eq!(frame_delta(&last, 900_000), Duration::ZERO);
        assert_eq!(frame_delta(&last, 950_000), Duration::from_micros(50_000));
    }
}
