//! Profile P06 (2-byte CRC-16, big-endian length, implicit data-ID).
//!
//! # Frame layout (at `offset`)
//! `[ CRC(2B, big-endian) | LENGTH(2B, big-endian) | COUNTER(1B) | payload... ]`
//!
//! `length` is the total protected frame size (header + payload) and is
//! itself serialized into the frame. The CRC covers
//! `[offset+2, offset+length)` — everything after the CRC field itself
//! — followed by the 16-bit `data_id`, big-endian, which is never
//! carried on the wire but mixed in as a trailer.

use crate::crc::CRC16;
use crate::error::{E2EError, E2EResult};
use crate::field_ops::{read_be_u16_at, write_be_u16_at};
use ::crc::Crc;

const HEADER_LEN: usize = 5;

fn validate(buffer_len: usize, offset: usize, length: usize) -> E2EResult<()> {
    if length < offset + HEADER_LEN || length > u16::MAX as usize {
        return Err(E2EError::InvalidLength {
            length,
            minimum: offset + HEADER_LEN,
            buffer_len,
        });
    }
    if buffer_len < length {
        return Err(E2EError::BufferTooSmall {
            required: length,
            offset,
            actual: buffer_len,
        });
    }
    Ok(())
}

fn compute_crc(buffer: &[u8], offset: usize, length: usize, data_id: u16) -> u16 {
    let crc = Crc::<u16>::new(CRC16);
    let mut digest = crc.digest();
    digest.update(&buffer[offset + 2..length]);
    digest.update(&data_id.to_be_bytes());
    digest.finalize()
}

/// Protects `buffer[offset..length]` in place: writes the big-endian
/// `length` field, advances the counter (if requested), computes the
/// CRC-16 over the region after the CRC field plus the data-ID
/// trailer, and writes it big-endian.
pub fn protect(
    buffer: &mut [u8],
    length: usize,
    data_id: u16,
    offset: usize,
    increment_counter: bool,
) -> E2EResult<()> {
    validate(buffer.len(), offset, length)?;

    write_be_u16_at(buffer, offset + 2, length as u16);
    let current = buffer[offset + 4];
    let counter_after = if increment_counter {
        current.wrapping_add(1)
    } else {
        current
    };
    buffer[offset + 4] = counter_after;

    let calculated = compute_crc(buffer, offset, length, data_id);
    write_be_u16_at(buffer, offset, calculated);
    Ok(())
}

/// Recomputes the CRC over the protected region and reports whether it
/// matches the in-frame, big-endian CRC.
pub fn check(buffer: &[u8], length: usize, data_id: u16, offset: usize) -> E2EResult<bool> {
    validate(buffer.len(), offset, length)?;
    let calculated = compute_crc(buffer, offset, length, data_id);
    let rx_crc = read_be_u16_at(buffer, offset);
    if calculated != rx_crc {
        tracing::warn!(expected = calculated, actual = rx_crc, "P06 CRC mismatch");
    }
    Ok(calculated == rx_crc)
}
