//! marketnav library exports for testing

pub mod core;
pub mod presenter;
pub mod repository;
pub mod tui;

#[cfg(test)]
pub mod test_support;
