pub mod math;
pub mod range_parsing;
