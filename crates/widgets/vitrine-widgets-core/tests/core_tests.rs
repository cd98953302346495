use std::collections::HashMap;

use vitrine_widgets_core::{
    binding::TargetResolver,
    carousel::CarouselSpec,
    config::Config,
    counter::CounterSpec,
    engine::Engine,
    geometry::{Rect, Viewport},
    ids::{CarouselId, CounterId},
    inputs::{CarouselCommand, CounterUpdate, Inputs, PageEvent},
    outputs::CoreEvent,
    Value,
};

fn mk_carousel(slides: u32) -> CarouselSpec {
    CarouselSpec {
        name: "testimonials".into(),
        slides,
        dots: slides,
    }
}

fn mk_counter(target: i64, rect: Rect) -> CounterSpec {
    CounterSpec {
        name: "stat".into(),
        target,
        rect,
    }
}

fn viewport_event() -> PageEvent {
    PageEvent::ViewportResized {
        viewport: Viewport {
            width: 1280.0,
            height: 720.0,
        },
    }
}

fn visible_rect() -> Rect {
    Rect::new(100.0, 100.0, 200.0, 50.0)
}

fn offscreen_rect() -> Rect {
    Rect::new(100.0, 2000.0, 200.0, 50.0)
}

fn cmd(c: CarouselCommand) -> Inputs {
    Inputs {
        carousel_cmds: vec![c],
        ..Default::default()
    }
}

/// Run one update and return the collapsed slot state (last write wins).
fn step(eng: &mut Engine, dt: f32, inputs: Inputs) -> HashMap<String, Value> {
    eng.update(dt, inputs).write_batch().to_map().into_iter().collect()
}

/// Indices written as `true` under `carousel.N/<slot>.` in a collapsed state.
fn true_indices(map: &HashMap<String, Value>, carousel: u32, slot: &str) -> Vec<u32> {
    let prefix = format!("carousel.{carousel}/{slot}.");
    let mut indices: Vec<u32> = map
        .iter()
        .filter(|(k, v)| k.starts_with(&prefix) && **v == Value::Bool(true))
        .map(|(k, _)| k[prefix.len()..].parse().unwrap())
        .collect();
    indices.sort_unstable();
    indices
}

// A simple resolver used by tests
struct MapResolver(HashMap<String, String>);
impl TargetResolver for MapResolver {
    fn resolve(&mut self, path: &str) -> Option<String> {
        self.0.get(path).cloned()
    }
}

/// it should show slide 0 and mark dot 0 on the first update
#[test]
fn initialization_shows_first_slide() {
    let mut eng = Engine::new(Config::default());
    let c = eng.add_carousel(mk_carousel(3));
    let map = step(&mut eng, 0.0, Inputs::default());
    assert_eq!(true_indices(&map, c.0, "slide"), vec![0]);
    assert_eq!(true_indices(&map, c.0, "dot"), vec![0]);
    assert_eq!(eng.carousel_index(c), Some(0));
}

/// it should keep exactly one slide shown and one dot active across
/// transitions, at equal indices
#[test]
fn exactly_one_shown_invariant() {
    let mut eng = Engine::new(Config::default());
    let c = eng.add_carousel(mk_carousel(4));
    let _ = step(&mut eng, 0.0, Inputs::default());

    for command in [
        CarouselCommand::NextSlide { carousel: c },
        CarouselCommand::NextSlide { carousel: c },
        CarouselCommand::PrevSlide { carousel: c },
        CarouselCommand::SelectSlide {
            carousel: c,
            index: 3,
        },
    ] {
        let map = step(&mut eng, 0.0, cmd(command));
        let shown = true_indices(&map, c.0, "slide");
        assert_eq!(shown.len(), 1);
        assert_eq!(true_indices(&map, c.0, "dot"), shown);
        assert_eq!(eng.carousel_index(c), Some(shown[0] as usize));
    }
}

/// it should return to the starting index after slide_count next steps
#[test]
fn next_is_cyclic() {
    let mut eng = Engine::new(Config::default());
    let c = eng.add_carousel(mk_carousel(5));
    let _ = step(&mut eng, 0.0, Inputs::default());

    let start = eng.carousel_index(c).unwrap();
    for _ in 0..5 {
        let _ = step(&mut eng, 0.0, cmd(CarouselCommand::NextSlide { carousel: c }));
    }
    assert_eq!(eng.carousel_index(c), Some(start));
}

/// it should invert next with prev at every index, wrapping both ways
#[test]
fn prev_inverts_next() {
    let mut eng = Engine::new(Config::default());
    let c = eng.add_carousel(mk_carousel(3));
    let _ = step(&mut eng, 0.0, Inputs::default());

    for start in 0..3 {
        let _ = step(
            &mut eng,
            0.0,
            cmd(CarouselCommand::SelectSlide {
                carousel: c,
                index: start,
            }),
        );
        let _ = step(&mut eng, 0.0, cmd(CarouselCommand::NextSlide { carousel: c }));
        let _ = step(&mut eng, 0.0, cmd(CarouselCommand::PrevSlide { carousel: c }));
        assert_eq!(eng.carousel_index(c), Some(start));
    }
}

/// it should wrap prev from index 0 to the last slide
#[test]
fn prev_wraps_from_zero() {
    let mut eng = Engine::new(Config::default());
    let c = eng.add_carousel(mk_carousel(4));
    let _ = step(&mut eng, 0.0, Inputs::default());
    let _ = step(&mut eng, 0.0, cmd(CarouselCommand::PrevSlide { carousel: c }));
    assert_eq!(eng.carousel_index(c), Some(3));
}

/// it should keep a zero-slide carousel inert: no writes, no rotation
#[test]
fn zero_slide_carousel_is_inert() {
    let mut eng = Engine::new(Config::default());
    let c = eng.add_carousel(mk_carousel(0));
    let map = step(&mut eng, 0.0, Inputs::default());
    assert!(map.is_empty());

    let map = step(&mut eng, 10.0, cmd(CarouselCommand::NextSlide { carousel: c }));
    assert!(map.is_empty());
    assert_eq!(eng.carousel_index(c), Some(0));
}

/// it should ignore out-of-range dot selections without panicking
#[test]
fn out_of_range_select_is_ignored() {
    let mut eng = Engine::new(Config::default());
    let c = eng.add_carousel(mk_carousel(3));
    let _ = step(&mut eng, 0.0, Inputs::default());
    let map = step(
        &mut eng,
        0.0,
        cmd(CarouselCommand::SelectSlide {
            carousel: c,
            index: 3,
        }),
    );
    assert!(map.is_empty());
    assert_eq!(eng.carousel_index(c), Some(0));
}

/// it should tolerate commands addressed to unknown ids
#[test]
fn unknown_ids_are_safe() {
    let mut eng = Engine::new(Config::default());
    let inputs = Inputs {
        carousel_cmds: vec![CarouselCommand::NextSlide {
            carousel: CarouselId(99),
        }],
        counter_updates: vec![CounterUpdate {
            counter: CounterId(7),
            rect: Some(visible_rect()),
        }],
        ..Default::default()
    };
    let out = eng.update(0.0, inputs);
    assert!(out.changes.is_empty());
}

/// it should latch a fully visible counter, emit the animate write and
/// count up to the exact target on schedule
#[test]
fn counter_latches_and_completes() {
    let mut eng = Engine::new(Config::default());
    let id = eng.add_counter(mk_counter(100, visible_rect()));

    let inputs = Inputs {
        page_events: vec![viewport_event()],
        ..Default::default()
    };
    let map = step(&mut eng, 0.0, inputs);
    assert_eq!(
        map.get(&format!("counter.{}/animate", id.0)),
        Some(&Value::Bool(true))
    );
    assert_eq!(eng.counter_started(id), Some(true));

    // 20 ticks of 50ms: halfway, floored
    let map = step(&mut eng, 1.0, Inputs::default());
    assert_eq!(
        map.get(&format!("counter.{}/value", id.0)),
        Some(&Value::Int(50))
    );
    assert_eq!(eng.counter_display(id), Some(50));

    // 20 more ticks: exact target, finish event
    let out = eng.update(1.0, Inputs::default());
    assert!(out.events.iter().any(
        |e| matches!(e, CoreEvent::CounterFinished { counter, value } if *counter == id && *value == 100)
    ));
    assert_eq!(eng.counter_display(id), Some(100));

    // No further writes once done
    let map = step(&mut eng, 1.0, Inputs::default());
    assert!(!map.contains_key(&format!("counter.{}/value", id.0)));
}

/// it should not latch a partially visible counter
#[test]
fn partial_visibility_does_not_latch() {
    let mut eng = Engine::new(Config::default());
    // Bottom edge crosses the 720px fold
    let id = eng.add_counter(mk_counter(100, Rect::new(100.0, 700.0, 200.0, 50.0)));
    let inputs = Inputs {
        page_events: vec![viewport_event()],
        ..Default::default()
    };
    let _ = step(&mut eng, 0.0, inputs);
    assert_eq!(eng.counter_started(id), Some(false));
}

/// it should never restart a latched counter when it leaves and re-enters
/// the viewport
#[test]
fn latch_is_one_shot() {
    let mut eng = Engine::new(Config::default());
    let id = eng.add_counter(mk_counter(100, visible_rect()));

    let _ = step(
        &mut eng,
        0.0,
        Inputs {
            page_events: vec![viewport_event()],
            ..Default::default()
        },
    );

    // Halfway through the animation, scroll the counter away and back.
    let _ = step(&mut eng, 1.0, Inputs::default());
    let _ = step(
        &mut eng,
        0.0,
        Inputs {
            page_events: vec![PageEvent::Scrolled],
            counter_updates: vec![CounterUpdate {
                counter: id,
                rect: Some(offscreen_rect()),
            }],
            ..Default::default()
        },
    );
    let out = eng.update(
        0.0,
        Inputs {
            page_events: vec![PageEvent::Scrolled],
            counter_updates: vec![CounterUpdate {
                counter: id,
                rect: Some(visible_rect()),
            }],
            ..Default::default()
        },
    );
    // No second start, and progress was preserved.
    assert!(!out
        .events
        .iter()
        .any(|e| matches!(e, CoreEvent::CounterStarted { .. })));
    assert_eq!(eng.counter_display(id), Some(50));

    let _ = step(&mut eng, 1.0, Inputs::default());
    assert_eq!(eng.counter_display(id), Some(100));
}

/// it should not latch counters before the host reports a viewport
#[test]
fn no_latch_inside_zero_viewport() {
    let mut eng = Engine::new(Config::default());
    let id = eng.add_counter(mk_counter(100, visible_rect()));
    let _ = step(&mut eng, 0.0, Inputs::default());
    assert_eq!(eng.counter_started(id), Some(false));
}

/// it should key changes by resolved handles and fall back to canonical
/// paths when unbound
#[test]
fn prebind_resolves_handles_with_fallback() {
    let mut eng = Engine::new(Config::default());
    let c = eng.add_carousel(mk_carousel(2));

    let mut map = HashMap::new();
    map.insert(format!("carousel.{}/slide.0", c.0), "HANDLE_S0".to_string());
    let mut resolver = MapResolver(map);
    eng.prebind(&mut resolver);

    let out = eng.update(0.0, Inputs::default());
    let keys: Vec<_> = out.changes.iter().map(|ch| ch.key.as_str()).collect();
    assert!(keys.contains(&"HANDLE_S0"));
    // Unbound slide falls back to its canonical path
    let fallback = format!("carousel.{}/slide.1", c.0);
    assert!(keys.contains(&fallback.as_str()));
}

/// it should produce identical outputs for the same input sequence
/// (determinism)
#[test]
fn determinism_same_sequence_same_outputs() {
    let build = || {
        let mut eng = Engine::new(Config::default());
        eng.add_carousel(mk_carousel(3));
        eng.add_counter(mk_counter(250, visible_rect()));
        eng
    };
    let mut e1 = build();
    let mut e2 = build();

    let seq: Vec<(f32, Inputs)> = vec![
        (
            0.0,
            Inputs {
                page_events: vec![viewport_event()],
                ..Default::default()
            },
        ),
        (0.016, Inputs::default()),
        (
            0.5,
            cmd(CarouselCommand::NextSlide {
                carousel: CarouselId(0),
            }),
        ),
        (5.0, Inputs::default()),
        (0.1, Inputs::default()),
    ];
    for (dt, inputs) in seq {
        let o1 = serde_json::to_string(e1.update(dt, inputs.clone())).unwrap();
        let o2 = serde_json::to_string(e2.update(dt, inputs)).unwrap();
        assert_eq!(o1, o2);
    }
}

/// it should produce empty outputs on update when the engine has no widgets
#[test]
fn update_with_no_widgets_is_safe_and_empty() {
    let mut eng = Engine::new(Config::default());
    let out = eng.update(0.016, Inputs::default());
    assert!(out.changes.is_empty() && out.events.is_empty());
}
