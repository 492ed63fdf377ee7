//! Test Utilities
//!
//! Builders and fixtures shared by the workspace's tests. Builders provide
//! sensible defaults so a test only spells out the fields it cares about;
//! fixtures pin the deterministic dates and amounts scenario tests assert
//! against.

pub mod builders;
pub mod fixtures;

pub use builders::{PolicyTermsBuilder, ScheduleParamsBuilder};
pub use fixtures::{DateFixtures, MoneyFixtures};
