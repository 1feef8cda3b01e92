pub mod iteration_based;
pub mod smooth;
