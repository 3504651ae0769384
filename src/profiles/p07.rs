//! Profile P07 (8-byte CRC-64, 32-bit counter, 32-bit data-ID).
//!
//! # Frame layout (at `offset`)
//! `[ CRC(8B, big-endian) | LENGTH(4B, big-endian) | COUNTER(4B, big-endian) | DATA_ID(4B, big-endian) | payload... ]`
//!
//! The CRC-64 covers the whole protected region except its own 8
//! bytes: `[0, offset+8)` followed by `[offset+16, length)`.

use crate::crc::CRC64;
use crate::error::{E2EError, E2EResult};
use crate::field_ops::{read_be_u32_at, read_be_u64_at, write_be_u32_at, write_be_u64_at};
use ::crc::Crc;

const HEADER_LEN: usize = 20;

fn validate(buffer_len: usize, offset: usize, length: usize) -> E2EResult<()> {
    if length < offset + HEADER_LEN || length > u32::MAX as usize {
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

fn compute_crc(buffer: &[u8], offset: usize, length: usize) -> u64 {
    let crc = Crc::<u64>::new(CRC64);
    let mut digest = crc.digest();
    digest.update(&buffer[..offset + 8]);
    digest.update(&buffer[offset + 16..length]);
    digest.finalize()
}

/// Protects `buffer[..length]` in place: writes `length` and
/// `data_id`, advances the 32-bit counter (if requested), computes the
/// CRC-64 over the protected region with the CRC field excised, and
/// writes it.
pub fn protect(
    buffer: &mut [u8],
    length: usize,
    data_id: u32,
    offset: usize,
    increment_counter: bool,
) -> E2EResult<()> {
    validate(buffer.len(), offset, length)?;

    write_be_u32_at(buffer, offset + 8, length as u32);
    let current = read_be_u32_at(buffer, offset + 12);
    let counter_after = if increment_counter {
        current.wrapping_add(1)
    } else {
        current
    };
    write_be_u32_at(buffer, offset + 12, counter_after);
    write_be_u32_at(buffer, offset + 16, data_id);

    let calculated = compute_crc(buffer, offset, length);
    write_be_u64_at(buffer, offset, calculated);
    Ok(())
}

/// Recomputes the CRC over `buffer[..length]` and reports whether it
/// matches the in-frame CRC and the in-frame data-ID matches `data_id`.
pub fn check(buffer: &[u8], length: usize, data_id: u32, offset: usize) -> E2EResult<bool> {
    validate(buffer.len(), offset, length)?;

    let rx_data_id = read_be_u32_at(buffer, offset + 16);
    let rx_crc = read_be_u64_at(buffer, offset);
    let calculated = compute_crc(buffer, offset, length);

    if calculated != rx_crc || rx_data_id != data_id {
        tracing::warn!(
            expected_crc = calculated,
            actual_crc = rx_crc,
            expected_data_id = data_id,
            actual_data_id = rx_data_id,
            "P07 check failed"
        );
    }
    Ok(calculated == rx_crc && rx_data_id == data_id)
}
