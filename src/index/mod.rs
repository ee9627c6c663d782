pub mod inverted;
pub mod posting;
pub mod row_index;
