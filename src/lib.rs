//! # AUTOSAR E2E Protection Library
//!
//! Implements the AUTOSAR End-to-End (E2E) communication protection
//! protocols and their underlying CRC primitives. E2E guards
//! safety-related in-vehicle signals against corruption, loss,
//! reordering, repetition, delay, and addressing faults on shared
//! communication channels (CAN, FlexRay, Ethernet/SOME-IP).
//!
//! ## Layers
//!
//! - [`crc`] — six CRC engines (CRC-8, CRC-8H2F, CRC-16, CRC-32,
//!   CRC-32P4, CRC-64), each a streaming primitive over a byte
//!   sequence.
//! - [`profiles`] — six protection-profile modules (P01, P02, P04,
//!   P05, P06, P07), each exposing `protect`/`check` free functions
//!   over a caller-owned buffer. No profile holds internal state;
//!   counter handling reads and writes only the counter field(s) of
//!   the supplied buffer.
//!
//! Counter-state freshness tracking (duplicate/lost/reordered
//! detection across *successive* messages) is out of scope: `check`
//! verifies the structural integrity of a single frame only. The
//! frame's counter value remains readable from the buffer itself for
//! a freshness layer to track across calls.
//!
//! ## Example
//!
//! ```rust
//! use autosar_e2e_protect::profiles::p01::{self, DataIdMode};
//!
//! let mut frame = [0u8; 8];
//! p01::protect(&mut frame, 7, 0x0123, DataIdMode::Both, true).unwrap();
//! assert!(p01::check(&frame, 7, 0x0123, DataIdMode::Both).unwrap());
//! ```

pub mod crc;
pub mod error;
pub mod field_ops;
pub mod profiles;

pub use error::{E2EError, E2EResult};
