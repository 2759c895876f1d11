//! # True Random Number Generator (TRNG)
//!
//! The TRNG is a hardware module that generates random numbers by sampling
//! a bank of free-running oscillators.
#[cfg(feature = "rand")]
use rand_core::CryptoRng;
#[cfg(feature = "rand")]
use rand_core::RngCore;
#[cfg(feature = "rand")]
use rand_core::impls::{fill_bytes_via_next, next_u64_via_u32};
use tock_registers::interfaces::{ReadWriteable, Readable, Writeable};
use tock_registers::registers::{ReadOnly, ReadWrite, WriteOnly};
use tock_registers::{register_bitfields, register_structs};

/// Base address of the TRNG register block.
pub const TRNG_BASE: usize = 0x4002_8000;

register_bitfields![u32,
    Status [
        /// A new random word is available in the output register.
        RDY OFFSET(0) NUMBITS(1) [],
        /// The FRO shutdown alarm counter overflowed.
        SHUTDOWN_OVF OFFSET(1) NUMBITS(1) [],
    ],
    Control [
        /// Master enable for the entropy engine.
        TRNG_EN OFFSET(10) NUMBITS(1) [],
        /// Samples taken before the first word, in units of 256 samples.
        STARTUP_CYCLES OFFSET(16) NUMBITS(16) [],
    ],
    Config [
        /// Minimum samples per generated word, in units of 64 samples.
        MIN_REFILL_CYCLES OFFSET(0) NUMBITS(8) [],
        /// Sample clock divider; the field holds the divider minus one.
        SMPL_DIV OFFSET(8) NUMBITS(4) [],
        /// Maximum samples per generated word, in units of 256 samples.
        MAX_REFILL_CYCLES OFFSET(16) NUMBITS(16) [],
    ],
];

register_structs! {
    TrngRegisters {
        (0x00 => out0: ReadOnly<u32>),
        // OUT1 (the high output word) is not consumed.
        (0x04 => _reserved0),
        (0x08 => irqflagstat: ReadOnly<u32, Status::Register>),
        (0x0c => _reserved1),
        (0x10 => irqflagclr: WriteOnly<u32, Status::Register>),
        (0x14 => ctl: ReadWrite<u32, Control::Register>),
        (0x18 => cfg0: ReadWrite<u32, Config::Register>),
        (0x1c => @END),
    }
}

/// Operations the platform random source needs from a TRNG peripheral.
///
/// [`Trng`] implements this for the memory-mapped hardware block. A test
/// double implementing the trait can stand in for real hardware.
pub trait TrngHardware {
    /// Set the sampling profile: bounds on the number of samples taken per
    /// generated word, and the sample clock divider.
    fn configure(
        &mut self,
        min_samples_per_cycle: u32,
        max_samples_per_cycle: u32,
        clock_divider: u32,
    );
    /// Start the entropy engine.
    fn enable(&mut self);
    /// Live enable status of the engine.
    fn is_enabled(&mut self) -> bool;
    /// True once a fresh random word is available.
    fn is_sample_ready(&mut self) -> bool;
    /// Consume the current random word.
    fn read_sample(&mut self) -> u32;
}

/// # True Random Number Generator (TRNG) Peripheral
///
/// Example:
/// ```no_run
/// use cc26x0_hal::trng::Trng;
///
/// let trng = unsafe { Trng::new() };
/// trng.configure(256, 256, 2);
/// trng.enable();
/// // Generate a random 32-bit number
/// let random_u32 = trng.gen_u32();
/// ```
pub struct Trng {
    registers: &'static TrngRegisters,
}

impl Trng {
    /// Create a new TRNG peripheral instance.
    ///
    /// ## Safety
    /// The PERIPH power domain must be on and the TRNG clock gate open
    /// before the block is touched; both are handled by board startup
    /// code through the PRCM. Creating more than one instance aliases the
    /// register block.
    pub unsafe fn new() -> Self {
        Self {
            registers: &*(TRNG_BASE as *const TrngRegisters),
        }
    }

    /// Set the sampling profile. The engine is stopped while the profile
    /// is written and must be re-enabled afterwards.
    pub fn configure(
        &self,
        min_samples_per_cycle: u32,
        max_samples_per_cycle: u32,
        clock_divider: u32,
    ) {
        self.registers.ctl.modify(Control::TRNG_EN::CLEAR);
        self.registers
            .ctl
            .modify(Control::STARTUP_CYCLES.val(max_samples_per_cycle >> 8));
        self.registers.cfg0.write(
            Config::MAX_REFILL_CYCLES.val(max_samples_per_cycle >> 8)
                + Config::SMPL_DIV.val(clock_divider.saturating_sub(1))
                + Config::MIN_REFILL_CYCLES.val(min_samples_per_cycle >> 6),
        );
    }

    /// Start the entropy engine.
    #[inline(always)]
    pub fn enable(&self) {
        self.registers.ctl.modify(Control::TRNG_EN::SET);
    }

    /// Stop the entropy engine.
    #[inline(always)]
    pub fn disable(&self) {
        self.registers.ctl.modify(Control::TRNG_EN::CLEAR);
    }

    /// Read the live enable status of the engine.
    #[inline(always)]
    pub fn is_enabled(&self) -> bool {
        self.registers.ctl.is_set(Control::TRNG_EN)
    }

    /// Check if the TRNG peripheral is ready to produce a random number.
    #[doc(hidden)]
    #[inline(always)]
    fn _is_ready(&self) -> bool {
        self.registers.irqflagstat.is_set(Status::RDY)
    }

    /// Read the low output word and acknowledge it, starting the refill
    /// of the next word.
    #[doc(hidden)]
    #[inline(always)]
    fn _read_low_word(&self) -> u32 {
        let value = self.registers.out0.get();
        self.registers.irqflagclr.write(Status::RDY::SET);
        value
    }

    /// Generate a random 32-bit number.
    #[inline(always)]
    pub fn gen_u32(&self) -> u32 {
        while !self._is_ready() {}
        self._read_low_word()
    }
}

impl TrngHardware for Trng {
    #[inline(always)]
    fn configure(
        &mut self,
        min_samples_per_cycle: u32,
        max_samples_per_cycle: u32,
        clock_divider: u32,
    ) {
        Trng::configure(
            self,
            min_samples_per_cycle,
            max_samples_per_cycle,
            clock_divider,
        );
    }

    #[inline(always)]
    fn enable(&mut self) {
        Trng::enable(self);
    }

    #[inline(always)]
    fn is_enabled(&mut self) -> bool {
        Trng::is_enabled(self)
    }

    #[inline(always)]
    fn is_sample_ready(&mut self) -> bool {
        self._is_ready()
    }

    #[inline(always)]
    fn read_sample(&mut self) -> u32 {
        self._read_low_word()
    }
}

/// Enhanced functionality for the TRNG peripheral using the [`rand`] crate.
/// This trait implementation can be disabled by removing the `rand` feature
/// flag since you may want to implement your own [`RngCore`].
///
/// Example:
/// ```no_run
/// use cc26x0_hal::trng::Trng;
/// use rand_core::RngCore;
///
/// let mut trng = unsafe { Trng::new() };
/// trng.configure(256, 256, 2);
/// trng.enable();
/// // Generate a random 64-bit number
/// let random_u64 = trng.next_u64();
/// // Fill a buffer with random bytes
/// let mut buffer = [0u8; 16];
/// trng.fill_bytes(&mut buffer);
/// ```
#[cfg(feature = "rand")]
impl RngCore for Trng {
    #[inline(always)]
    fn next_u32(&mut self) -> u32 {
        self.gen_u32()
    }

    #[inline(always)]
    fn next_u64(&mut self) -> u64 {
        next_u64_via_u32(self)
    }

    #[inline(always)]
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        fill_bytes_via_next(self, dest);
    }

    #[inline(always)]
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        Ok(self.fill_bytes(dest))
    }
}

#[cfg(feature = "rand")]
impl CryptoRng for Trng {}
