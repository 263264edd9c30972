use glam::Vec2;

/// Where a ray stopped.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct RayHit {
    /// world point of the first solid sample
    pub point: Vec2,
    /// (row, col) of the tile that was hit
    pub tile: (isize, isize),
    /// number of unit steps marched
    pub raw_depth: u32,
    /// `raw_depth` projected onto the player's forward axis
    pub corrected_depth: f32,
}

/// One ray of the fan, recomputed every frame.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct RayResult {
    /// screen column of the slice
    pub ray_index: usize,
    pub angle: f64,
    /// `None` when the march ran out of depth
    pub hit: Option<RayHit>,
}
