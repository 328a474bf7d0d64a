//! Helpers that are useful when working with a Sheet, but not part of the
//! engine itself.

pub mod printer;
