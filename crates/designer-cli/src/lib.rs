//! Library surface of the replay CLI: logging setup and the replay driver,
//! shared between the binary and integration tests.

pub mod logging;
pub mod replay;
