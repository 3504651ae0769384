//! Profile P02 (CAN, 1-byte CRC-8H2F, 4-bit counter, data-ID table).
//!
//! # Frame layout
//! `[ CRC(1B) | COUNTER_NIBBLE | ... | payload... ]`
//! - Byte 0: CRC-8H2F.
//! - Byte 1, low nibble: counter, wraps modulo 16.
//!
//! The 16-bit data-ID is never carried on the wire. Sender and receiver
//! each hold the same 16-entry `data_id_list` out of band and fold in
//! `data_id_list[counter]` at the end of the hash.
//!
//! `length` counts the protected bytes *after* byte 0 (the CRC field),
//! i.e. `buffer_len - 1` — matching the original binding's
//! `length = len(data) - 1`. The hashed range is therefore
//! `buffer[1..=length]`, which spans the rest of the buffer when
//! `length` is `buffer.len() - 1`.

use crate::crc::CRC8H2F;
use crate::error::{E2EError, E2EResult};
use ::crc::Crc;

const MIN_LENGTH: usize = 1;
const MAX_LENGTH: usize = 255;
const COUNTER_MODULO: u8 = 16;

fn validate(buffer_len: usize, length: usize) -> E2EResult<()> {
    if length < MIN_LENGTH || length > MAX_LENGTH {
        return Err(E2EError::InvalidLength {
            length,
            minimum: MIN_LENGTH,
            buffer_len,
        });
    }
    if buffer_len <= length {
        return Err(E2EError::BufferTooSmall {
            required: length + 1,
            offset: 0,
            actual: buffer_len,
        });
    }
    Ok(())
}

fn compute_crc(buffer: &[u8], length: usize, data_id_list: &[u8; 16], counter: u8) -> u8 {
    let crc = Crc::<u8>::new(CRC8H2F);
    let mut digest = crc.digest();
    digest.update(&buffer[1..=length]);
    digest.update(&[data_id_list[counter as usize]]);
    digest.finalize()
}

/// Protects `buffer[1..=length]` in place: advances the counter (if
/// requested), computes the CRC-8H2F over the payload plus the
/// counter-selected `data_id_list` entry, and writes it to byte 0.
pub fn protect(
    buffer: &mut [u8],
    length: usize,
    data_id_list: &[u8; 16],
    increment_counter: bool,
) -> E2EResult<()> {
    validate(buffer.len(), length)?;

    let current = crate::field_ops::read_low_nibble_at(buffer, 1);
    let counter_after = if increment_counter {
        (current + 1) % COUNTER_MODULO
    } else {
        current
    };
    crate::field_ops::write_low_nibble_at(buffer, 1, counter_after);

    buffer[0] = compute_crc(buffer, length, data_id_list, counter_after);
    Ok(())
}

/// Recomputes the CRC over `buffer[1..=length]` using the identical rule
/// `protect` used and reports whether it matches the in-frame CRC.
pub fn check(buffer: &[u8], length: usize, data_id_list: &[u8; 16]) -> E2EResult<bool> {
    validate(buffer.len(), length)?;
    let counter = crate::field_ops::read_low_nibble_at(buffer, 1);
    let calculated = compute_crc(buffer, length, data_id_list, counter);
    if calculated != buffer[0] {
        tracing::warn!(
            expected = calculated,
            actual = buffer[0],
            "P02 CRC mismatch"
        );
    }
    Ok(calculated == buffer[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_continues_counter_state_across_calls() {
        let all_zero_ids = [0u8; 16];
        let ramp_ids: [u8; 16] = {
            let mut ids = [0u8; 16];
            for (i, slot) in ids.iter_mut().enumerate() {
                *slot = i as u8;
            }
            ids
        };

        let mut data = [0u8; 8];
        protect(&mut data, 7, &all_zero_ids, true).unwrap();
        assert_eq!(crate::field_ops::read_low_nibble_at(&data, 1), 1);
        assert_eq!(data[0], 0x45);
        assert!(check(&data, 7, &all_zero_ids).unwrap());

        protect(&mut data, 7, &ramp_ids, true).unwrap();
        assert_eq!(crate::field_ops::read_low_nibble_at(&data, 1), 2);
        assert_eq!(data[0], 0xBC);
        assert!(check(&data, 7, &ramp_ids).unwrap());
    }

    #[test]
    fn bit_flip_detected() {
        let ids = [7u8; 16];
        let mut data = [0u8; 8];
        protect(&mut data, 7, &ids, true).unwrap();
        assert!(check(&data, 7, &ids).unwrap());
        data[4] ^= 0x01;
        assert!(!check(&data, 7, &ids).unwrap());
    }

    #[test]
    fn counter_wraps_modulo_16() {
        let ids = [0u8; 16];
        let mut data = [0u8; 8];
        for _ in 0..COUNTER_MODULO {
            protect(&mut data, 7, &ids, true).unwrap();
        }
        assert_eq!(crate::field_ops::read_low_nibble_at(&data, 1), 0);
    }

    #[test]
    fn zero_length_is_rejected() {
        let ids = [0u8; 16];
        let mut data = [0u8; 8];
        assert!(matches!(
            protect(&mut data, 0, &ids, true),
            Err(E2EError::InvalidLength { .. })
        ));
    }

    #[test]
    fn buffer_too_small_is_rejected() {
        let ids = [0u8; 16];
        let mut data = [0u8; 8];
        assert!(matches!(
            protect(&mut data, 8, &ids, true),
            Err(E2EError::BufferTooSmall { .. })
        ));
    }
}
