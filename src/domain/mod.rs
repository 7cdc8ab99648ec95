//! Domain types: nested CSV records and age buckets.

pub mod age;
pub mod record;

pub use age::{check_age, parse_age, AgeBucket, AgeDistribution, AgeSource};
pub use record::{Field, Record};
