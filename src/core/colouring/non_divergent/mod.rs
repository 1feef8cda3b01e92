pub mod complex_potential;
pub mod final_z_magnitude;
pub mod solid;
