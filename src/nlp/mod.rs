//! Rule-based query understanding: date phrases and keyword expansion

pub mod dates;
pub mod lexicon;
