use crate::controllers::interactive::data::frame_data::FrameData;
use crate::controllers::interactive::data::tile_data::TileData;
use crate::controllers::interactive::errors::render_failure::RenderFailure;

#[derive(Debug)]
pub enum RenderEvent {
    Tile(TileData),
    Completed(FrameData),
    Failed(RenderFailure),
}

impl RenderEvent {
    #[must_use]
    pub fn generation(&self) -> u64 {
        match self {
            Self::Tile(tile) => tile.generation,
            Self::Completed(frame) => frame.generation,
            Self::Failed(failure) => failure.generation,
        }
    }
}
