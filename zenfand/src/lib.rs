//! zenfand library surface
//!
//! The daemon's lifecycle pieces, exposed for the binary and for
//! integration tests: DMI identity reading, the cooling-device registry,
//! and shutdown handling.

pub mod dmi;
pub mod shutdown;
pub mod thermal;
