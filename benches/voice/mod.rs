use std::{hint::black_box, time::Duration};

use criterion::{BenchmarkId, Criterion};
use wernstrom::{
    voice::{decide, DelayQueue, GateAction, SlotPool, VoiceEvent},
    SchedulerConfig,
};

use crate::HELD_COUNTS;

pub fn bench_decide(c: &mut Criterion) {
    let mut group = c.benchmark_group("voice/decide");
    let config = SchedulerConfig::default();

    for &held in HELD_COUNTS {
        let mut pool = SlotPool::new();
        for note in 0..held {
            pool.insert(48 + note as u8);
        }

        group.bench_with_input(BenchmarkId::new("note_on", held), &held, |b, _| {
            b.iter(|| {
                decide(
                    black_box(&pool),
                    black_box(VoiceEvent::NoteOn {
                        pitch: 72,
                        octave_shift: 1,
                    }),
                    &config,
                )
            })
        });

        // Release of the first held note (or of nothing, with an empty pool)
        group.bench_with_input(BenchmarkId::new("note_off", held), &held, |b, _| {
            b.iter(|| decide(black_box(&pool), black_box(VoiceEvent::NoteOff { pitch: 48 }), &config))
        });
    }

    group.finish();
}

pub fn bench_queue(c: &mut Criterion) {
    let mut group = c.benchmark_group("voice/queue");

    for &pending in &[1usize, 16, 256] {
        group.bench_with_input(
            BenchmarkId::new("schedule_and_drain", pending),
            &pending,
            |b, &pending| {
                b.iter(|| {
                    let mut queue = DelayQueue::new();
                    for i in 0..pending {
                        let action = if i % 2 == 0 { GateAction::Open } else { GateAction::Close };
                        queue.schedule(Duration::from_micros(i as u64), Duration::from_millis(10), action);
                    }
                    let mut fired = 0;
                    while queue.pop_due(Duration::from_secs(1)).is_some() {
                        fired += 1;
                    }
                    black_box(fired)
                })
            },
        );
    }

    group.finish();
}
