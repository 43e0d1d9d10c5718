use std::time::Duration;

use criterion::BenchmarkGroup;
use criterion::measurement::Measurement;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const RNG_SEED: u64 = 0x11D7_2026;

/// Runtime profile for a criterion benchmark group, picked by how long
/// one iteration of the workload runs.
#[derive(Clone, Copy)]
pub enum Profile {
    /// Sub-millisecond workloads.
    Quick,
    /// Workloads in the low-millisecond range.
    Standard,
    /// Workloads of tens of milliseconds and up.
    Soak,
}

impl Profile {
    fn sample_size(self) -> usize {
        match self {
            Profile::Quick => 20,
            Profile::Standard => 15,
            Profile::Soak => 10,
        }
    }

    fn warm_up(self) -> Duration {
        match self {
            Profile::Quick => Duration::from_millis(100),
            Profile::Standard => Duration::from_millis(400),
            Profile::Soak => Duration::from_millis(800),
        }
    }

    fn measurement(self) -> Duration {
        match self {
            Profile::Quick => Duration::from_millis(250),
            Profile::Standard => Duration::from_millis(900),
            Profile::Soak => Duration::from_millis(1600),
        }
    }
}

pub fn configure_group<M: Measurement>(group: &mut BenchmarkGroup<'_, M>, profile: Profile) {
    group.sample_size(profile.sample_size());
    group.warm_up_time(profile.warm_up());
    group.measurement_time(profile.measurement());
}

/// Pick the profile for a list workload from its element count.
pub fn profile_for_len(len: usize) -> Profile {
    if len <= 4096 {
        Profile::Quick
    } else if len <= 65536 {
        Profile::Standard
    } else {
        Profile::Soak
    }
}

pub fn seeded_rng(stream: u64) -> StdRng {
    StdRng::seed_from_u64(RNG_SEED ^ stream)
}

pub fn random_keys(len: usize, stream: u64) -> Vec<u64> {
    let mut rng = seeded_rng(stream);
    (0..len).map(|_| rng.random()).collect()
}

pub fn few_unique_keys(len: usize, distinct: u64, stream: u64) -> Vec<u64> {
    let mut rng = seeded_rng(stream);
    (0..len)
        .map(|_| rng.random::<u64>() % distinct.max(1))
        .collect()
}

pub fn sorted_keys(len: usize) -> Vec<u64> {
    (0..len as u64).collect()
}

pub fn reversed_keys(len: usize) -> Vec<u64> {
    (0..len as u64).rev().collect()
}
