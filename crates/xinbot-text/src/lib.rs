#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod normalize;
pub mod scorer;

pub use normalize::normalize;
pub use scorer::{lexical_search, score_unit};
