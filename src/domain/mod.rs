//! Domain model: articles and the rules they must satisfy.

pub mod articles;
