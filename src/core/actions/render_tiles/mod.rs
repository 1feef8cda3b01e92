pub mod render_tiles_parallel_rayon;
