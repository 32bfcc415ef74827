//! Test harness: shared fixtures plus unit suites.
//!
//! Store reducers, selectors, and form validation are covered by inline
//! `#[cfg(test)]` modules next to their code; the suites here exercise
//! the HTTP adapter and the fetch/submit flows against a mock service.

pub mod common;

mod unit;
