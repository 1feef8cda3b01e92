pub mod colormap_source;
