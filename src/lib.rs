//! A key-by-key calculator with operator precedence and currency conversion.

pub mod calculator;
pub mod config;
pub mod currency;
