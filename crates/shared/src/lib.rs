//! Wire contract shared between the upload client and the processing backend.

pub mod error;
pub mod protocol;

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
