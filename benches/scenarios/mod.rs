//! Benchmarks for the controller playing realistic input.

use std::{hint::black_box, time::Duration};

use criterion::Criterion;
use wernstrom::{engine::ParameterEngine, SynthConfig, VoiceController};

pub fn bench_playing(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/playing");
    let config = SynthConfig::default();
    let tick = Duration::from_millis(1);

    // === LEGATO LINE ===
    // each press lands before the previous release, 30 ms per step
    group.bench_function("legato_line", |b| {
        let mut controller = VoiceController::new(&config, ParameterEngine::new(3));
        b.iter(|| {
            for key in 60..72u8 {
                controller.press(black_box(key));
                for _ in 0..5 {
                    controller.advance(tick);
                }
                if key > 60 {
                    controller.release(key - 1);
                }
                for _ in 0..25 {
                    controller.advance(tick);
                }
            }
            controller.release(71);
            controller.settle();
        })
    });

    // === CHORD STABS ===
    // three-note chord pressed and released together
    group.bench_function("chord_stabs", |b| {
        let mut controller = VoiceController::new(&config, ParameterEngine::new(3));
        b.iter(|| {
            for root in [60u8, 65, 67, 60] {
                for key in [root, root + 4, root + 7] {
                    controller.press(black_box(key));
                }
                controller.advance(Duration::from_millis(120));
                for key in [root, root + 4, root + 7] {
                    controller.release(key);
                }
                controller.advance(Duration::from_millis(30));
            }
            controller.settle();
        })
    });

    group.finish();
}
