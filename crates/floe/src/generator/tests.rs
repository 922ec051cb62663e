use crate::{
    BasicSnowflakeGenerator, Error, GeneratorConfig, IdGenStatus, LockSnowflakeGenerator,
    TimeSource, WallClock,
};
use core::cell::Cell;
use std::collections::HashSet;
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use std::thread::scope;
use std::time::Duration;

struct MockTime {
    millis: u64,
}

impl TimeSource for MockTime {
    fn current_millis(&self) -> u64 {
        self.millis
    }
}

#[derive(Clone)]
struct SharedMockStepTime {
    clock: Rc<MockStepTime>,
}

impl SharedMockStepTime {
    fn new(values: Vec<u64>) -> Self {
        Self {
            clock: Rc::new(MockStepTime {
                values,
                index: Cell::new(0),
            }),
        }
    }

    fn set_index(&self, index: usize) {
        self.clock.index.set(index);
    }
}

impl TimeSource for SharedMockStepTime {
    fn current_millis(&self) -> u64 {
        self.clock.values[self.clock.index.get()]
    }
}

struct MockStepTime {
    values: Vec<u64>,
    index: Cell<usize>,
}

trait IdGenStatusExt {
    fn unwrap_ready(self) -> u64;
    fn unwrap_pending(self) -> u64;
}

impl IdGenStatusExt for IdGenStatus {
    fn unwrap_ready(self) -> u64 {
        match self {
            Self::Ready { id } => id,
            Self::Pending { yield_until } => {
                panic!("unexpected pending (yield until: {yield_until})")
            }
        }
    }

    fn unwrap_pending(self) -> u64 {
        match self {
            Self::Ready { id } => panic!("unexpected ready ({id})"),
            Self::Pending { yield_until } => yield_until,
        }
    }
}

fn twitter_style() -> GeneratorConfig {
    GeneratorConfig {
        epoch: 0,
        worker_id: 1,
        datacenter_id: 1,
        worker_id_bits: 5,
        datacenter_id_bits: 5,
        sequence_bits: 12,
        ..GeneratorConfig::default()
    }
}

#[test]
fn basic_generator_sequence_increments_within_same_tick() {
    let generator = BasicSnowflakeGenerator::new(twitter_style(), MockTime { millis: 42 }).unwrap();
    let layout = *generator.layout();

    let id1 = generator.poll_id().unwrap_ready();
    let id2 = generator.poll_id().unwrap_ready();
    let id3 = generator.poll_id().unwrap_ready();

    assert!(id1 < id2 && id2 < id3);
    for (id, sequence) in [(id1, 0), (id2, 1), (id3, 2)] {
        let parts = layout.decode(id);
        assert_eq!(parts.timestamp, 42);
        assert_eq!(parts.sequence, sequence);
    }
}

#[test]
fn lock_generator_sequence_increments_within_same_tick() {
    let generator = LockSnowflakeGenerator::new(twitter_style(), MockTime { millis: 42 }).unwrap();
    let layout = *generator.layout();

    let id1 = generator.try_poll_id().unwrap().unwrap_ready();
    let id2 = generator.try_poll_id().unwrap().unwrap_ready();

    assert!(id1 < id2);
    assert_eq!(layout.decode(id1).sequence, 0);
    assert_eq!(layout.decode(id2).sequence, 1);
}

#[test]
fn basic_generator_rollover_pends_then_restarts_sequence() {
    // Two sequence bits: the fourth same-millisecond ID exhausts the space
    // and the generator must wait for the next tick.
    let config = GeneratorConfig {
        epoch: 0,
        sequence_bits: 2,
        ..GeneratorConfig::default()
    };
    let time = SharedMockStepTime::new(vec![42, 43]);
    let generator = BasicSnowflakeGenerator::new(config, time.clone()).unwrap();
    let layout = *generator.layout();

    for sequence in 0..=3 {
        let id = generator.poll_id().unwrap_ready();
        assert_eq!(layout.decode(id).sequence, sequence);
        assert_eq!(layout.decode(id).timestamp, 42);
    }

    let yield_until = generator.poll_id().unwrap_pending();
    assert_eq!(yield_until, 43);

    time.set_index(1);

    let id = generator.poll_id().unwrap_ready();
    assert_eq!(layout.decode(id).timestamp, 43);
    assert_eq!(layout.decode(id).sequence, 0);
}

#[test]
fn lock_generator_rollover_pends_then_restarts_sequence() {
    let config = GeneratorConfig {
        epoch: 0,
        sequence_bits: 2,
        ..GeneratorConfig::default()
    };
    let time = SharedMockStepTime::new(vec![42, 43]);
    let generator = LockSnowflakeGenerator::new(config, time.clone()).unwrap();
    let layout = *generator.layout();

    for sequence in 0..=3 {
        let id = generator.try_poll_id().unwrap().unwrap_ready();
        assert_eq!(layout.decode(id).sequence, sequence);
    }

    let yield_until = generator.try_poll_id().unwrap().unwrap_pending();
    assert_eq!(yield_until, 43);

    time.set_index(1);

    let id = generator.try_poll_id().unwrap().unwrap_ready();
    assert_eq!(layout.decode(id).timestamp, 43);
    assert_eq!(layout.decode(id).sequence, 0);
}

#[test]
fn clock_regression_pends_until_recovery() {
    let time = SharedMockStepTime::new(vec![100, 99, 100, 101]);
    let generator = BasicSnowflakeGenerator::new(twitter_style(), time.clone()).unwrap();
    let layout = *generator.layout();

    let id1 = generator.poll_id().unwrap_ready();
    assert_eq!(layout.decode(id1).timestamp, 100);

    // The clock steps back one millisecond: no ID, pend until it recovers.
    time.set_index(1);
    let yield_until = generator.poll_id().unwrap_pending();
    assert_eq!(yield_until, 100);

    // Recovery to the same millisecond continues the sequence.
    time.set_index(2);
    let id2 = generator.poll_id().unwrap_ready();
    assert_eq!(layout.decode(id2).timestamp, 100);
    assert_eq!(layout.decode(id2).sequence, 1);

    time.set_index(3);
    let id3 = generator.poll_id().unwrap_ready();
    assert_eq!(layout.decode(id3).timestamp, 101);
    assert_eq!(layout.decode(id3).sequence, 0);

    assert!(id1 < id2 && id2 < id3);
}

#[test]
fn ids_are_unique_and_strictly_increasing() {
    let generator = BasicSnowflakeGenerator::new(
        GeneratorConfig {
            worker_id_bits: 5,
            datacenter_id_bits: 5,
            sequence_bits: 12,
            ..GeneratorConfig::default()
        },
        WallClock,
    )
    .unwrap();

    let mut last = 0;
    let mut seen = HashSet::with_capacity(10_000);
    for _ in 0..10_000 {
        let id = generator.next_id();
        assert!(id > last, "IDs must be strictly increasing");
        assert!(seen.insert(id), "IDs must be unique");
        last = id;
    }
    assert_eq!(generator.count(), 10_000);
}

#[test]
fn lock_generator_threaded_uniqueness() {
    const THREADS: usize = 4;
    const IDS_PER_THREAD: usize = 8192;

    let generator = Arc::new(
        LockSnowflakeGenerator::new(
            GeneratorConfig {
                worker_id_bits: 5,
                datacenter_id_bits: 5,
                sequence_bits: 12,
                ..GeneratorConfig::default()
            },
            WallClock,
        )
        .unwrap(),
    );
    let seen_ids = Arc::new(Mutex::new(HashSet::with_capacity(THREADS * IDS_PER_THREAD)));

    scope(|s| {
        for _ in 0..THREADS {
            let generator = Arc::clone(&generator);
            let seen_ids = Arc::clone(&seen_ids);

            s.spawn(move || {
                for _ in 0..IDS_PER_THREAD {
                    let id = generator.try_next_id().unwrap();
                    assert!(seen_ids.lock().unwrap().insert(id));
                }
            });
        }
    });

    let final_count = seen_ids.lock().unwrap().len();
    assert_eq!(final_count, THREADS * IDS_PER_THREAD);
    assert_eq!(generator.count(), (THREADS * IDS_PER_THREAD) as u64);
}

#[test]
fn worker_id_boundary_validation() {
    let at_max = GeneratorConfig {
        worker_id: 31,
        worker_id_bits: 5,
        ..GeneratorConfig::default()
    };
    assert!(BasicSnowflakeGenerator::new(at_max, WallClock).is_ok());

    let past_max = GeneratorConfig {
        worker_id: 32,
        worker_id_bits: 5,
        ..GeneratorConfig::default()
    };
    assert_eq!(
        BasicSnowflakeGenerator::new(past_max, WallClock)
            .err()
            .unwrap(),
        Error::WorkerIdOutOfRange {
            worker_id: 32,
            max: 31
        }
    );
}

#[test]
fn datacenter_id_boundary_validation() {
    let past_max = GeneratorConfig {
        datacenter_id: 1,
        datacenter_id_bits: 0,
        ..GeneratorConfig::default()
    };
    assert_eq!(
        LockSnowflakeGenerator::new(past_max, WallClock)
            .err()
            .unwrap(),
        Error::DatacenterIdOutOfRange {
            datacenter_id: 1,
            max: 0
        }
    );
}

#[test]
fn worker_id_is_checked_before_datacenter_id() {
    let both_invalid = GeneratorConfig {
        worker_id: 1,
        datacenter_id: 1,
        ..GeneratorConfig::default()
    };
    assert_eq!(
        BasicSnowflakeGenerator::new(both_invalid, WallClock)
            .err()
            .unwrap(),
        Error::WorkerIdOutOfRange {
            worker_id: 1,
            max: 0
        }
    );
}

#[test]
fn packs_documented_example() {
    // 100ms after a 2020-01-01 epoch, worker 1, datacenter 1, sequence 0:
    // (100 << 22) | (1 << 17) | (1 << 12) = 419565568.
    let config = GeneratorConfig {
        epoch: 1_577_836_800_000,
        worker_id: 1,
        datacenter_id: 1,
        worker_id_bits: 5,
        datacenter_id_bits: 5,
        sequence_bits: 12,
        ..GeneratorConfig::default()
    };
    let generator = BasicSnowflakeGenerator::new(
        config,
        MockTime {
            millis: 1_577_836_800_100,
        },
    )
    .unwrap();

    assert_eq!(generator.next_id(), 419_565_568);
}

#[test]
fn decoded_fields_round_trip() {
    let config = GeneratorConfig {
        epoch: 1_577_836_800_000,
        worker_id: 19,
        datacenter_id: 7,
        worker_id_bits: 5,
        datacenter_id_bits: 5,
        sequence_bits: 12,
        ..GeneratorConfig::default()
    };
    let generator = BasicSnowflakeGenerator::new(
        config,
        MockTime {
            millis: 1_577_836_800_100,
        },
    )
    .unwrap();

    let parts = generator.layout().decode(generator.next_id());
    assert_eq!(parts.timestamp, 100);
    assert_eq!(parts.datacenter_id, 7);
    assert_eq!(parts.worker_id, 19);
    assert_eq!(parts.sequence, 0);
}

#[test]
fn accessors_report_configuration_and_clock() {
    let generator = BasicSnowflakeGenerator::new(twitter_style(), MockTime { millis: 42 }).unwrap();
    assert_eq!(generator.worker_id(), 1);
    assert_eq!(generator.datacenter_id(), 1);
    assert_eq!(generator.timestamp(), 42);
    assert_eq!(generator.count(), 0);
}

#[test]
fn uptime_reflects_elapsed_time() {
    let generator = BasicSnowflakeGenerator::new(twitter_style(), WallClock).unwrap();
    assert!(generator.uptime() < Duration::from_secs(1));

    std::thread::sleep(Duration::from_millis(20));
    assert!(generator.uptime() >= Duration::from_millis(20));
}
