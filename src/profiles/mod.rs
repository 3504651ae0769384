//! One module per AUTOSAR E2E protection profile. Each exposes a pair
//! of free functions, `protect` and `check`, operating on a
//! caller-owned byte buffer; none hold state beyond the call.

pub mod p01;
pub mod p02;
pub mod p04;
pub mod p05;
pub mod p06;
pub mod p07;
