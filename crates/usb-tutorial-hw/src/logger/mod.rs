//! Voltage logger module.
//!
//! The logger samples a 12-bit ADC continuously and ships the readings to
//! the host in packets of ten little-endian words.

mod device;
mod packet;

pub use device::{LoggerDevice, DATA_EP};
pub use packet::{
    decode_samples, Sample, ADC_MAX, PACKET_SIZE, REFERENCE_VOLTAGE, SAMPLES_PER_PACKET,
};
