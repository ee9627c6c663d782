pub mod batch;
pub mod index_builder;
