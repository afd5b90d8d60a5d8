//! Blinky LED module.
//!
//! The LED is switched by a vendor control request addressed to interface 1.

mod device;

pub use device::{LedDevice, LED_INDEX, LED_REQUEST};
