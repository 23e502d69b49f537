use std::time::Instant;

/// Wall-clock timer for one scene. Timings are reported through logs and
/// `ProceduralWorldGenerator::timings_ms`, never stored in the world itself.
pub struct SceneTimer {
    scene: String,
    start: Instant,
}

impl SceneTimer {
    pub fn start(scene: &str) -> Self {
        Self {
            scene: scene.to_string(),
            start: Instant::now(),
        }
    }

    /// Consumes the timer, returning the scene name and elapsed milliseconds.
    pub fn finish(self) -> (String, f64) {
        let elapsed = self.start.elapsed().as_secs_f64() * 1000.0;
        (self.scene, elapsed)
    }
}
