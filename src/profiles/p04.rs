//! Profile P04 (SOME/IP-style, 4-byte CRC-32P4, 16-bit counter, 32-bit data-ID).
//!
//! # Frame layout (at `offset`)
//! `[ LENGTH(2B) | COUNTER(2B) | DATA_ID(4B) | CRC(4B) | payload... ]`
//!
//! All multi-byte fields are big-endian. The CRC is computed over the
//! whole protected region except its own 4 bytes, i.e. over
//! `[0, offset+8)` followed by `[offset+12, length)`.

use crate::crc::CRC32P4;
use crate::error::{E2EError, E2EResult};
use crate::field_ops::{read_be_u16_at, read_be_u32_at, write_be_u16_at, write_be_u32_at};
use ::crc::Crc;

const HEADER_LEN: usize = 12;

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

fn compute_crc(buffer: &[u8], offset: usize, length: usize) -> u32 {
    let crc = Crc::<u32>::new(CRC32P4);
    let mut digest = crc.digest();
    digest.update(&buffer[..offset + 8]);
    digest.update(&buffer[offset + 12..length]);
    digest.finalize()
}

/// Protects `buffer[..length]` in place: writes `length` and `data_id`,
/// advances the 16-bit counter (if requested), computes the CRC-32P4
/// over the protected region with the CRC field excised, and writes it.
pub fn protect(
    buffer: &mut [u8],
    length: usize,
    data_id: u32,
    offset: usize,
    increment_counter: bool,
) -> E2EResult<()> {
    validate(buffer.len(), offset, length)?;

    write_be_u16_at(buffer, offset, length as u16);
    let current = read_be_u16_at(buffer, offset + 2);
    let counter_after = if increment_counter {
        current.wrapping_add(1)
    } else {
        current
    };
    write_be_u16_at(buffer, offset + 2, counter_after);
    write_be_u32_at(buffer, offset + 4, data_id);

    let calculated = compute_crc(buffer, offset, length);
    write_be_u32_at(buffer, offset + 8, calculated);
    Ok(())
}

/// Recomputes the CRC over `buffer[..length]` and reports whether it
/// matches the in-frame CRC and the in-frame data-ID matches `data_id`.
pub fn check(buffer: &[u8], length: usize, data_id: u32, offset: usize) -> E2EResult<bool> {
    validate(buffer.len(), offset, length)?;

    let rx_data_id = read_be_u32_at(buffer, offset + 4);
    let rx_crc = read_be_u32_at(buffer, offset + 8);
    let calculated = compute_crc(buffer, offset, length);

    if calculated != rx_crc || rx_data_id != data_id {
        tracing::warn!(
            expected_crc = calculated,
            actual_crc = rx_crc,
            expected_data_id = data_id,
            actual_data_id = rx_data_id,
            "P04 check failed"
        );
    }
    Ok(calculated == rx_crc && rx_data_id == data_id)
}
