//! # Platform Random Number Source
//!
//! Random numbers for the rest of the firmware stack, drawn from the TRNG
//! peripheral. The driver owns the peripheral (or any other
//! [`TrngHardware`] implementation), keeps the last accepted sample as a
//! baseline, and flags stuck hardware output with a sentinel value.
//!
//! For a raw entropy stream, e.g. through the `rand` crate traits, use
//! [`Trng`](crate::trng::Trng) directly instead.

use crate::trng::TrngHardware;

/// Returned by [`Random::rand`] when the hardware produces the same raw
/// word twice in a row.
pub const STUCK_VALUE: u16 = 0xDEAD;

// Sampling profile applied by `init`: min=4x64 and max=1x256 samples with a
// divide-by-two sample clock give the same startup and refill time, about
// 11us (~14us with overhead).
const MIN_SAMPLES_PER_CYCLE: u32 = 256;
const MAX_SAMPLES_PER_CYCLE: u32 = 256;
const SAMPLE_CLOCK_DIVIDER: u32 = 2;

/// # Platform Random Number Source
///
/// Example:
/// ```no_run
/// use cc26x0_hal::random::Random;
/// use cc26x0_hal::trng::Trng;
///
/// let mut random = Random::new(unsafe { Trng::new() });
/// random.init(0);
/// let value = random.rand();
/// ```
///
/// A single instance should own the peripheral for the life of the process,
/// with all calls coming from one execution context. In a concurrent
/// environment, wrap the instance in a mutex or confine it to one task:
/// interleaved calls would race on the sample baseline and on the
/// peripheral's output buffer.
pub struct Random<T: TrngHardware> {
    trng: T,
    last_sample: u32,
}

impl<T: TrngHardware> Random<T> {
    /// Create the random source without touching the hardware.
    ///
    /// The first call to [`rand`](Self::rand) initializes the peripheral
    /// if nothing has called [`init`](Self::init) yet.
    pub fn new(trng: T) -> Self {
        Self {
            trng,
            last_sample: 0,
        }
    }

    /// Configure and start the TRNG, and reset the stuck-sample baseline.
    ///
    /// `_seed` exists for compatibility with the platform seeding contract
    /// and is ignored; the hardware is self-seeding.
    pub fn init(&mut self, _seed: u16) {
        self.trng.configure(
            MIN_SAMPLES_PER_CYCLE,
            MAX_SAMPLES_PER_CYCLE,
            SAMPLE_CLOCK_DIVIDER,
        );
        self.trng.enable();
        self.last_sample = 0;
    }

    /// Produce the next random value.
    ///
    /// Initializes the peripheral first if its enable bit reads clear, then
    /// busy-waits until a sample is ready. There is no timeout: if the
    /// hardware never signals readiness, this call never returns.
    ///
    /// A raw word equal to the previous one is treated as stuck hardware
    /// and reported as [`STUCK_VALUE`] without moving the baseline. The
    /// report is indistinguishable from the hardware legitimately producing
    /// `0xDEAD` as entropy; callers that care can simply call again.
    pub fn rand(&mut self) -> u16 {
        if !self.trng.is_enabled() {
            self.init(0);
        }

        while !self.trng.is_sample_ready() {}

        let sample = self.trng.read_sample();
        if sample == self.last_sample {
            STUCK_VALUE
        } else {
            self.last_sample = sample;
            sample as u16
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FakeTrng {
        samples: Vec<u32>,
        cursor: usize,
        not_ready_polls: usize,
        enabled: bool,
        ready_checks: usize,
        configs: Vec<(u32, u32, u32)>,
    }

    impl FakeTrng {
        fn with_samples(samples: &[u32]) -> Self {
            FakeTrng {
                samples: samples.to_vec(),
                ..FakeTrng::default()
            }
        }
    }

    impl TrngHardware for FakeTrng {
        fn configure(&mut self, min: u32, max: u32, div: u32) {
            self.configs.push((min, max, div));
        }

        fn enable(&mut self) {
            self.enabled = true;
        }

        fn is_enabled(&mut self) -> bool {
            self.enabled
        }

        fn is_sample_ready(&mut self) -> bool {
            self.ready_checks += 1;
            if self.not_ready_polls > 0 {
                self.not_ready_polls -= 1;
                return false;
            }
            true
        }

        fn read_sample(&mut self) -> u32 {
            let sample = self.samples[self.cursor];
            self.cursor += 1;
            sample
        }
    }

    #[test]
    fn init_configures_enables_and_resets_baseline() {
        let mut random = Random::new(FakeTrng::with_samples(&[]));
        random.last_sample = 77;
        random.init(0);
        assert!(random.trng.enabled);
        assert_eq!(random.trng.configs, vec![(256, 256, 2)]);
        assert_eq!(random.last_sample, 0);
    }

    #[test]
    fn first_sample_after_init_is_accepted() {
        let mut random = Random::new(FakeTrng::with_samples(&[0xCAFE]));
        random.init(0);
        assert_eq!(random.rand(), 0xCAFE);
        assert_eq!(random.last_sample, 0xCAFE);
    }

    #[test]
    fn repeated_sample_reports_stuck_value() {
        let mut random = Random::new(FakeTrng::with_samples(&[0xAAAA, 0xAAAA, 0xBBBB]));
        random.init(0);
        assert_eq!(random.rand(), 0xAAAA);
        assert_eq!(random.rand(), STUCK_VALUE);
        assert_eq!(random.rand(), 0xBBBB);
        assert_eq!(random.last_sample, 0xBBBB);
    }

    #[test]
    fn baseline_survives_a_run_of_repeats() {
        let mut random = Random::new(FakeTrng::with_samples(&[0xAAAA, 0xAAAA, 0xAAAA, 0xBBBB]));
        random.init(0);
        assert_eq!(random.rand(), 0xAAAA);
        assert_eq!(random.rand(), STUCK_VALUE);
        assert_eq!(random.rand(), STUCK_VALUE);
        assert_eq!(random.rand(), 0xBBBB);
    }

    #[test]
    fn rand_self_initializes_on_first_use() {
        let mut random = Random::new(FakeTrng::with_samples(&[0x4242]));
        assert_eq!(random.rand(), 0x4242);
        assert_eq!(random.trng.configs, vec![(256, 256, 2)]);
        assert!(random.trng.enabled);
    }

    #[test]
    fn rand_reinitializes_a_disabled_peripheral() {
        let mut random = Random::new(FakeTrng::with_samples(&[0x1234, 0x1234]));
        random.init(0);
        assert_eq!(random.rand(), 0x1234);

        // Enable bit lost, e.g. after a peripheral reset.
        random.trng.enabled = false;
        // The same raw word is accepted again: re-init cleared the baseline.
        assert_eq!(random.rand(), 0x1234);
        assert_eq!(random.trng.configs.len(), 2);
        assert!(random.trng.enabled);
    }

    #[test]
    fn init_is_idempotent() {
        let mut random = Random::new(FakeTrng::with_samples(&[]));
        random.init(0);
        random.init(42);
        assert!(random.trng.enabled);
        assert_eq!(random.trng.configs, vec![(256, 256, 2), (256, 256, 2)]);
        assert_eq!(random.last_sample, 0);
    }

    #[test]
    fn rand_blocks_until_a_sample_is_ready() {
        let mut fake = FakeTrng::with_samples(&[0x5555]);
        fake.not_ready_polls = 3;
        let mut random = Random::new(fake);
        random.init(0);
        assert_eq!(random.rand(), 0x5555);
        assert_eq!(random.trng.ready_checks, 4);
    }

    #[test]
    fn zero_sample_right_after_init_collides_with_the_baseline() {
        let mut random = Random::new(FakeTrng::with_samples(&[0, 0x1111]));
        random.init(0);
        assert_eq!(random.rand(), STUCK_VALUE);
        assert_eq!(random.rand(), 0x1111);
    }

    #[test]
    fn comparison_uses_the_full_word_not_the_truncated_result() {
        let mut random = Random::new(FakeTrng::with_samples(&[0x1234_5678, 0x9ABC_5678]));
        random.init(0);
        assert_eq!(random.rand(), 0x5678);
        // Same low half, different word: accepted, not stuck.
        assert_eq!(random.rand(), 0x5678);
        assert_eq!(random.last_sample, 0x9ABC_5678);
    }

    #[test]
    fn genuine_dead_sample_is_returned_as_is() {
        let mut random = Random::new(FakeTrng::with_samples(&[0xDEAD, 0xBEEF]));
        random.init(0);
        assert_eq!(random.rand(), 0xDEAD);
        assert_eq!(random.rand(), 0xBEEF);
        assert_eq!(random.last_sample, 0xBEEF);
    }
}
