//! Report pipeline stages: normalize, summarize, validate, compare.

pub mod comparison;
pub mod normalizer;
pub mod summary;
pub mod validator;
