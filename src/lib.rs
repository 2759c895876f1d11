//! # Hardware Abstraction Layer for CC26x0/CC13x0 Microcontrollers
#![cfg_attr(not(test), no_std)]

/// Entry point for the runtime application.
#[cfg(feature = "rt")]
pub use cortex_m_rt::entry;

pub mod random;
pub mod trng;
