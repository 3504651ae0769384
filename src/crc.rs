//! CRC engines shared by every protection profile.
//!
//! Six fixed variants, each a table-driven [`crc::Algorithm`]. None of
//! the polynomials, initial values, or reflection settings are
//! configurable — AUTOSAR E2E pins one CRC per profile.

use crc::{Algorithm, Crc, Width};

pub use crc::{
    CRC_16_IBM_3740, CRC_32_AUTOSAR, CRC_32_ISO_HDLC, CRC_64_XZ, CRC_8_AUTOSAR, CRC_8_SAE_J1850,
};

/// CRC-8, SAE J1850 parameters. Used as the general-purpose CRC-8
/// primitive (the library-wide `calculate_crc8`); Profile P01's own
/// internal CRC-8 pass uses [`P01_CRC8`] instead, not this constant.
pub const CRC8: &Algorithm<u8> = &CRC_8_SAE_J1850;

/// CRC-8H2F, used by Profile P02.
pub const CRC8H2F: &Algorithm<u8> = &CRC_8_AUTOSAR;

/// CRC-16/CCITT-FALSE, used by Profiles P05 and P06.
pub const CRC16: &Algorithm<u16> = &CRC_16_IBM_3740;

/// CRC-32, IEEE 802.3. Not bound to any protection profile in this
/// crate; exposed as a standalone engine alongside the other five, the
/// way the `crc` crate's own catalog carries it next to
/// `CRC_32_AUTOSAR`.
pub const CRC32: &Algorithm<u32> = &CRC_32_ISO_HDLC;

/// CRC-32P4, used by Profile P04. Despite the catalog name
/// `CRC_32_AUTOSAR`, this carries polynomial `0xF4ACFB13` — the P4
/// variant, distinct from the plain IEEE 802.3 CRC-32 above (catalogued
/// separately as `CRC_32_ISO_HDLC`).
pub const CRC32P4: &Algorithm<u32> = &CRC_32_AUTOSAR;

/// CRC-64, used by Profile P07.
pub const CRC64: &Algorithm<u64> = &CRC_64_XZ;

/// Profile P01's locally seeded CRC-8 pass: the SAE J1850 polynomial
/// with `init = 0x00`, `xorout = 0x00` rather than the general
/// primitive's `0xFF`/`0xFF`. This is a peculiarity of AUTOSAR Profile
/// 1/11 itself, not a simplification — the profile's own CRC
/// computation never applies the library-wide start value.
pub const P01_CRC8: Algorithm<u8> = Algorithm {
    width: 8,
    poly: 0x1d,
    init: 0x00,
    refin: false,
    refout: false,
    xorout: 0x00,
    check: 0x4b,
    residue: 0xc4,
};

/// Computes a CRC over a buffer with a CRC-field "hole" excised,
/// i.e. over `data[..hole_start]` followed by `data[hole_start +
/// hole_len..]`, as a single conceptual pass.
pub fn over_hole<W: Width>(crc: &Crc<W>, data: &[u8], hole_start: usize, hole_len: usize) -> W {
    let mut digest = crc.digest();
    digest.update(&data[..hole_start]);
    digest.update(&data[hole_start + hole_len..]);
    digest.finalize()
}

/// Streaming CRC-8 over `bytes`. When `first_call` is true the engine's
/// initial value is applied; otherwise `start_value` is used directly
/// as the pre-final-XOR running register state. The final XOR is
/// always applied before returning.
pub fn calculate_crc8(bytes: &[u8], start_value: u8, first_call: bool) -> u8 {
    let crc = Crc::<u8>::new(CRC8);
    let mut digest = if first_call {
        crc.digest()
    } else {
        crc.digest_with_initial(start_value)
    };
    digest.update(bytes);
    digest.finalize()
}

/// Streaming CRC-8H2F over `bytes`. See [`calculate_crc8`] for the
/// `start_value`/`first_call` contract.
pub fn calculate_crc8h2f(bytes: &[u8], start_value: u8, first_call: bool) -> u8 {
    let crc = Crc::<u8>::new(CRC8H2F);
    let mut digest = if first_call {
        crc.digest()
    } else {
        crc.digest_with_initial(start_value)
    };
    digest.update(bytes);
    digest.finalize()
}

/// Streaming CRC-16/CCITT-FALSE over `bytes`.
pub fn calculate_crc16(bytes: &[u8], start_value: u16, first_call: bool) -> u16 {
    let crc = Crc::<u16>::new(CRC16);
    let mut digest = if first_call {
        crc.digest()
    } else {
        crc.digest_with_initial(start_value)
    };
    digest.update(bytes);
    digest.finalize()
}

/// Streaming CRC-32 (IEEE 802.3) over `bytes`. See [`calculate_crc8`]
/// for the `start_value`/`first_call` contract.
pub fn calculate_crc32(bytes: &[u8], start_value: u32, first_call: bool) -> u32 {
    let crc = Crc::<u32>::new(CRC32);
    let mut digest = if first_call {
        crc.digest()
    } else {
        crc.digest_with_initial(start_value)
    };
    digest.update(bytes);
    digest.finalize()
}

/// Streaming CRC-32P4 over `bytes`.
pub fn calculate_crc32p4(bytes: &[u8], start_value: u32, first_call: bool) -> u32 {
    let crc = Crc::<u32>::new(CRC32P4);
    let mut digest = if first_call {
        crc.digest()
    } else {
        crc.digest_with_initial(start_value)
    };
    digest.update(bytes);
    digest.finalize()
}

/// Streaming CRC-64 over `bytes`.
pub fn calculate_crc64(bytes: &[u8], start_value: u64, first_call: bool) -> u64 {
    let crc = Crc::<u64>::new(CRC64);
    let mut digest = if first_call {
        crc.digest()
    } else {
        crc.digest_with_initial(start_value)
    };
    digest.update(bytes);
    digest.finalize()
}

/// `CHECK`, `MAGIC_CHECK`, and `XOR_VALUE` constants per CRC variant.
///
/// `CHECK` is `calculate(b"123456789")`; `MAGIC_CHECK` is the residue
/// left in the register after hashing a message followed by its own
/// CRC in protocol byte order with the final XOR removed (the `crc`
/// crate's `Algorithm::residue` is exactly this quantity); `XOR_VALUE`
/// is the algorithm's `xorout`.
macro_rules! crc_constants {
    ($mod_name:ident, $algo:expr, $width:ty) => {
        pub mod $mod_name {
            pub const CHECK: $width = $algo.check;
            pub const MAGIC_CHECK: $width = $algo.residue;
            pub const XOR_VALUE: $width = $algo.xorout;
        }
    };
}

crc_constants!(crc8_constants, CRC_8_SAE_J1850, u8);
crc_constants!(crc8h2f_constants, CRC_8_AUTOSAR, u8);
crc_constants!(crc16_constants, CRC_16_IBM_3740, u16);
crc_constants!(crc32_constants, CRC_32_ISO_HDLC, u32);
crc_constants!(crc32p4_constants, CRC_32_AUTOSAR, u32);
crc_constants!(crc64_constants, CRC_64_XZ, u64);

#[cfg(test)]
mod tests {
    use super::*;

    const CHECK_INPUT: &[u8] = b"123456789";

    #[test]
    fn crc8_check_vector() {
        assert_eq!(calculate_crc8(CHECK_INPUT, 0, true), 0x4B);
    }

    #[test]
    fn crc8h2f_check_vector() {
        assert_eq!(calculate_crc8h2f(CHECK_INPUT, 0, true), 0xDF);
    }

    #[test]
    fn crc16_check_vector() {
        assert_eq!(calculate_crc16(CHECK_INPUT, 0, true), 0x29B1);
    }

    #[test]
    fn crc32_check_vector() {
        assert_eq!(calculate_crc32(CHECK_INPUT, 0, true), 0xCBF43926);
    }

    #[test]
    fn crc32p4_check_vector() {
        assert_eq!(calculate_crc32p4(CHECK_INPUT, 0, true), 0x1697D06A);
    }

    #[test]
    fn crc64_check_vector() {
        assert_eq!(calculate_crc64(CHECK_INPUT, 0, true), 0x995DC9BBDF1939FA);
    }

    #[test]
    fn crc32_ieee_catalog_constant_is_distinct_from_p4() {
        // Sanity check on the catalog: the plain IEEE CRC-32 is a
        // different polynomial from the P4 variant this crate uses.
        assert_ne!(crc::CRC_32_ISO_HDLC.poly, CRC32P4.poly);
    }

    #[test]
    fn check_constants_match_calculate_check_vectors() {
        assert_eq!(crc8_constants::CHECK, calculate_crc8(CHECK_INPUT, 0, true));
        assert_eq!(
            crc8h2f_constants::CHECK,
            calculate_crc8h2f(CHECK_INPUT, 0, true)
        );
        assert_eq!(
            crc16_constants::CHECK,
            calculate_crc16(CHECK_INPUT, 0, true)
        );
        assert_eq!(
            crc32_constants::CHECK,
            calculate_crc32(CHECK_INPUT, 0, true)
        );
        assert_eq!(
            crc32p4_constants::CHECK,
            calculate_crc32p4(CHECK_INPUT, 0, true)
        );
        assert_eq!(
            crc64_constants::CHECK,
            calculate_crc64(CHECK_INPUT, 0, true)
        );
    }

    #[test]
    fn magic_check_constants_match_spec_table() {
        assert_eq!(crc8_constants::MAGIC_CHECK, 0xC4);
        assert_eq!(crc8h2f_constants::MAGIC_CHECK, 0x42);
        assert_eq!(crc16_constants::MAGIC_CHECK, 0x0000);
        assert_eq!(crc32_constants::MAGIC_CHECK, 0xDEBB20E3);
        assert_eq!(crc32p4_constants::MAGIC_CHECK, 0x904CDDBF);
        assert_eq!(crc64_constants::MAGIC_CHECK, 0x49958C9ABD7D353F);
    }

    #[test]
    fn xor_value_constants_match_spec_table() {
        assert_eq!(crc8_constants::XOR_VALUE, 0xFF);
        assert_eq!(crc8h2f_constants::XOR_VALUE, 0xFF);
        assert_eq!(crc16_constants::XOR_VALUE, 0x0000);
        assert_eq!(crc32_constants::XOR_VALUE, 0xFFFFFFFF);
        assert_eq!(crc32p4_constants::XOR_VALUE, 0xFFFFFFFF);
        assert_eq!(crc64_constants::XOR_VALUE, 0xFFFFFFFFFFFFFFFF);
    }

    #[test]
    fn magic_check_crc16_from_first_principles() {
        // CRC-16/CCITT-FALSE is non-reflected, so its CRC is transmitted
        // big-endian; xorout = 0, so calculate() already returns the
        // bare residue with no XOR to undo.
        let crc = calculate_crc16(CHECK_INPUT, 0, true);
        let mut message_plus_crc = CHECK_INPUT.to_vec();
        message_plus_crc.extend_from_slice(&crc.to_be_bytes());
        let residue = calculate_crc16(&message_plus_crc, 0, true);
        assert_eq!(residue, crc16_constants::MAGIC_CHECK);
    }

    #[test]
    fn streaming_resume_matches_single_pass() {
        // CRC-16/CCITT-FALSE has xorout = 0, so calculate_crc16's return
        // value doubles as the raw pre-XOR register state, letting a
        // caller resume a computation across two calls.
        let whole = calculate_crc16(b"hello world", 0, true);
        let first_part = calculate_crc16(b"hello ", 0, true);
        let resumed = calculate_crc16(b"world", first_part, false);
        assert_eq!(resumed, whole);
    }

    #[test]
    fn over_hole_matches_concatenated_pass() {
        let crc = Crc::<u32>::new(CRC32P4);
        let mut data = vec![0xAAu8; 16];
        data[8..12].copy_from_slice(&[0, 0, 0, 0]);
        let via_hole = over_hole(&crc, &data, 8, 4);

        let mut digest = crc.digest();
        digest.update(&data[..8]);
        digest.update(&data[12..]);
        let via_manual = digest.finalize();

        assert_eq!(via_hole, via_manual);
    }
}
