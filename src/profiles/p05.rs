//! Profile P05 (1-byte counter, CRC-16, implicit 16-bit data-ID).
//!
//! # Frame layout (at `offset`)
//! `[ CRC(2B, little-endian) | COUNTER(1B) | RESERVED(1B) | payload... ]`
//!
//! `length` counts the protected bytes *after* the 2-byte CRC field
//! (counter, reserved byte, and payload) — the CRC field itself is not
//! part of `length` since, unlike the other profiles, nothing precedes
//! it to make a "hole" meaningful. The full frame therefore spans
//! `offset .. offset + 2 + length`.
//!
//! The 16-bit `data_id` is never carried on the wire; it is mixed into
//! the CRC as a little-endian trailer after the protected region.

use crate::crc::CRC16;
use crate::error::{E2EError, E2EResult};
use crate::field_ops::{read_le_u16_at, write_le_u16_at};
use ::crc::Crc;

const MIN_LENGTH: usize = 2;

fn validate(buffer_len: usize, offset: usize, length: usize) -> E2EResult<()> {
    if length < MIN_LENGTH {
        return Err(E2EError::InvalidLength {
            length,
            minimum: MIN_LENGTH,
            buffer_len,
        });
    }
    let required = offset + 2 + length;
    if buffer_len < required {
        return Err(E2EError::BufferTooSmall {
            required,
            offset,
            actual: buffer_len,
        });
    }
    Ok(())
}

fn compute_crc(buffer: &[u8], offset: usize, length: usize, data_id: u16) -> u16 {
    let crc = Crc::<u16>::new(CRC16);
    let mut digest = crc.digest();
    digest.update(&buffer[..offset]);
    digest.update(&buffer[offset + 2..offset + 2 + length]);
    digest.update(&data_id.to_le_bytes());
    digest.finalize()
}

/// Protects `buffer[offset .. offset + 2 + length]` in place: advances
/// the counter (if requested), computes the CRC-16 over the protected
/// region plus the data-ID trailer, and writes it little-endian.
pub fn protect(
    buffer: &mut [u8],
    length: usize,
    data_id: u16,
    offset: usize,
    increment_counter: bool,
) -> E2EResult<()> {
    validate(buffer.len(), offset, length)?;

    let current = buffer[offset + 2];
    let counter_after = if increment_counter {
        current.wrapping_add(1)
    } else {
        current
    };
    buffer[offset + 2] = counter_after;

    let calculated = compute_crc(buffer, offset, length, data_id);
    write_le_u16_at(buffer, offset, calculated);
    Ok(())
}

/// Recomputes the CRC over the protected region and reports whether it
/// matches the in-frame, little-endian CRC.
pub fn check(buffer: &[u8], length: usize, data_id: u16, offset: usize) -> E2EResult<bool> {
    validate(buffer.len(), offset, length)?;
    let calculated = compute_crc(buffer, offset, length, data_id);
    let rx_crc = read_le_u16_at(buffer, offset);
    if calculated != rx_crc {
        tracing::warn!(expected = calculated, actual = rx_crc, "P05 CRC mismatch");
    }
    Ok(calculated == rx_crc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_scenario() {
        let mut data = [0u8; 8];
        protect(&mut data, 6, 0x1234, 0, false).unwrap();
        assert_eq!(data, [0x1C, 0xCA, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]);
        assert!(check(&data, 6, 0x1234, 0).unwrap());
    }

    #[test]
    fn round_trip_with_offset() {
        let mut data = [0u8; 16];
        protect(&mut data, 10, 0xBEEF, 4, true).unwrap();
        assert!(check(&data, 10, 0xBEEF, 4).unwrap());
    }

    #[test]
    fn counter_wraps_modulo_256() {
        let mut data = [0u8; 8];
        for _ in 0..=u8::MAX {
            protect(&mut data, 6, 0x1234, 0, true).unwrap();
        }
        assert_eq!(data[2], 0);
    }

    #[test]
    fn bit_flip_detected() {
        let mut data = [0u8; 8];
        protect(&mut data, 6, 0x1234, 0, false).unwrap();
        assert!(check(&data, 6, 0x1234, 0).unwrap());
        data[5] ^= 0x01;
        assert!(!check(&data, 6, 0x1234, 0).unwrap());
    }

    #[test]
    fn crc_field_flip_detected() {
        let mut data = [0u8; 8];
        protect(&mut data, 6, 0x1234, 0, true).unwrap();
        data[0] ^= 0xFF;
        assert!(!check(&data, 6, 0x1234, 0).unwrap());
    }

    #[test]
    fn buffer_too_small_is_rejected() {
        let mut data = [0u8; 4];
        assert!(matches!(
            protect(&mut data, 6, 0x1234, 0, true),
            Err(E2EError::BufferTooSmall { .. })
        ));
    }
}
