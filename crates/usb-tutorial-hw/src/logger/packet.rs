//! Logger packet decoding.

use crate::{Error, Result};

/// Samples carried by one packet.
pub const SAMPLES_PER_PACKET: usize = 10;

/// Packet size in bytes.
pub const PACKET_SIZE: usize = SAMPLES_PER_PACKET * 2;

/// Full-scale ADC reading.
pub const ADC_MAX: u16 = 4095;

/// ADC reference voltage.
pub const REFERENCE_VOLTAGE: f64 = 3.3;

/// A raw ADC reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Sample(pub u16);

impl Sample {
    pub fn raw(&self) -> u16 {
        self.0
    }

    /// Converts the reading to volts.
    pub fn voltage(&self) -> f64 {
        self.0 as f64 * REFERENCE_VOLTAGE / ADC_MAX as f64
    }
}

impl std::fmt::Display for Sample {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}V", self.voltage())
    }
}

/// Decodes a packet into samples.
///
/// Short packets are accepted as long as they hold whole samples.
pub fn decode_samples(data: &[u8]) -> Result<Vec<Sample>> {
    if data.len() % 2 != 0 {
        return Err(Error::MalformedPacket(data.len()));
    }
    Ok(data
        .chunks_exact(2)
        .map(|c| Sample(u16::from_le_bytes([c[0], c[1]])))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voltage() {
        assert_eq!(Sample(0).voltage(), 0.0);
        assert!((Sample(4095).voltage() - 3.3).abs() < 1e-9);
        assert_eq!(Sample(2048).to_string(), "1.65V");
        assert_eq!(Sample(4095).to_string(), "3.30V");
    }

    #[test]
    fn test_decode_full_packet() {
        let mut data = Vec::new();
        for raw in [0u16, 1, 255, 256, 1000, 2048, 4000, 4095, 0x0102, 7] {
            data.extend_from_slice(&raw.to_le_bytes());
        }
        assert_eq!(data.len(), PACKET_SIZE);

        let samples = decode_samples(&data).unwrap();
        assert_eq!(samples.len(), SAMPLES_PER_PACKET);
        assert_eq!(samples[3], Sample(256));
        assert_eq!(samples[8], Sample(0x0102));
    }

    #[test]
    fn test_decode_short_and_odd_packets() {
        assert!(decode_samples(&[]).unwrap().is_empty());
        assert_eq!(decode_samples(&[0x34, 0x12]).unwrap(), vec![Sample(0x1234)]);
        assert!(matches!(
            decode_samples(&[1, 2, 3]),
            Err(Error::MalformedPacket(3))
        ));
    }
}
