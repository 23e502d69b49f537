pub mod placement;
pub mod platforms;
pub mod scene;
pub mod stitch;
