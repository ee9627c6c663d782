pub mod lowercase;
pub mod possessive;
pub mod stemmer;
pub mod stopword;
