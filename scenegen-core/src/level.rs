use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Thickness of the ground strip along the bottom of every scene.
pub const GROUND_HEIGHT: f32 = 64.0;

/// Spawn-point key every stitched scene defines.
pub const DEFAULT_ENTRY: &str = "default";

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundTheme {
    Forest,
    Caverns,
    Ruins,
}

impl BackgroundTheme {
    pub fn as_u8(self) -> u8 {
        match self {
            Self::Forest => 0,
            Self::Caverns => 1,
            Self::Ruins => 2,
        }
    }
}

/// Axis-aligned rectangle, `x`/`y` at the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            x: center.x - size.x * 0.5,
            y: center.y - size.y * 0.5,
            width: size.x,
            height: size.y,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Strict overlap; rectangles that only share an edge do not overlap.
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ExitDescriptor {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub target_scene: String,
    pub target_entry: String,
}

impl ExitDescriptor {
    pub fn rect(&self) -> Rect {
        Rect {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct PlatformDescriptor {
    pub center: Vec2,
    pub width: f32,
    pub height: f32,
}

impl PlatformDescriptor {
    pub fn rect(&self) -> Rect {
        Rect::from_center(self.center, Vec2::new(self.width, self.height))
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum VegetationKind {
    Tree,
    Bush,
    Fern,
    Flower,
}

impl VegetationKind {
    pub const ALL: [VegetationKind; 4] = [
        VegetationKind::Tree,
        VegetationKind::Bush,
        VegetationKind::Fern,
        VegetationKind::Flower,
    ];

    pub fn as_u8(self) -> u8 {
        match self {
            Self::Tree => 0,
            Self::Bush => 1,
            Self::Fern => 2,
            Self::Flower => 3,
        }
    }

    /// Width and height in pixels.
    pub fn footprint(self) -> Vec2 {
        match self {
            Self::Tree => Vec2::new(96.0, 160.0),
            Self::Bush => Vec2::new(64.0, 48.0),
            Self::Fern => Vec2::new(40.0, 40.0),
            Self::Flower => Vec2::new(24.0, 24.0),
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct VegetationPlacement {
    pub position: Vec2,
    pub kind: VegetationKind,
}

impl VegetationPlacement {
    pub fn rect(&self) -> Rect {
        Rect::from_center(self.position, self.kind.footprint())
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EnemyKind {
    Slime,
    Goblin,
    Wolf,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Slime, EnemyKind::Goblin, EnemyKind::Wolf];

    pub fn as_u8(self) -> u8 {
        match self {
            Self::Slime => 0,
            Self::Goblin => 1,
            Self::Wolf => 2,
        }
    }

    pub fn footprint(self) -> Vec2 {
        match self {
            Self::Slime => Vec2::new(40.0, 32.0),
            Self::Goblin => Vec2::new(48.0, 64.0),
            Self::Wolf => Vec2::new(72.0, 48.0),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnemyStats {
    pub health: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
}

impl EnemyStats {
    pub fn uniform(value: u32) -> Self {
        Self {
            health: value,
            attack: value,
            defense: value,
            speed: value,
        }
    }

    pub fn total(&self) -> u32 {
        self.health + self.attack + self.defense + self.speed
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct EnemyPlacement {
    pub position: Vec2,
    pub kind: EnemyKind,
    pub stats: EnemyStats,
}

impl EnemyPlacement {
    pub fn rect(&self) -> Rect {
        Rect::from_center(self.position, self.kind.footprint())
    }
}

/// Declarative content of one scene. Placement lists are requests for the
/// runtime to build, not engine objects.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LevelDescription {
    pub name: String,
    pub background: BackgroundTheme,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub spawn_points: BTreeMap<String, Vec2>,
    #[serde(default)]
    pub exits: Vec<ExitDescriptor>,
    #[serde(default)]
    pub platforms: Vec<PlatformDescriptor>,
    #[serde(default)]
    pub vegetation: Vec<VegetationPlacement>,
    #[serde(default)]
    pub enemies: Vec<EnemyPlacement>,
}

impl LevelDescription {
    /// Empty scene, the usual starting point for hand-authored content.
    pub fn new(
        name: impl Into<String>,
        background: BackgroundTheme,
        width: u32,
        height: u32,
    ) -> Self {
        Self {
            name: name.into(),
            background,
            width,
            height,
            spawn_points: BTreeMap::new(),
            exits: Vec::new(),
            platforms: Vec::new(),
            vegetation: Vec::new(),
            enemies: Vec::new(),
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect {
            x: 0.0,
            y: 0.0,
            width: self.width as f32,
            height: self.height as f32,
        }
    }

    /// Top edge of the ground strip.
    pub fn ground_y(&self) -> f32 {
        (self.height as f32 - GROUND_HEIGHT).max(0.0)
    }

    pub fn exits_towards<'a>(
        &'a self,
        scene: &'a str,
    ) -> impl Iterator<Item = &'a ExitDescriptor> + 'a {
        self.exits.iter().filter(move |e| e.target_scene == scene)
    }

    pub fn spawn(&self, entry: &str) -> Option<Vec2> {
        self.spawn_points.get(entry).copied()
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::{BackgroundTheme, ExitDescriptor, LevelDescription, Rect};

    #[test]
    fn touching_rects_do_not_overlap() {
        let a = Rect::from_center(Vec2::new(50.0, 50.0), Vec2::new(20.0, 20.0));
        let b = Rect::from_center(Vec2::new(70.0, 50.0), Vec2::new(20.0, 20.0));
        let c = Rect::from_center(Vec2::new(65.0, 55.0), Vec2::new(20.0, 20.0));
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&a));
    }

    #[test]
    fn ground_sits_at_the_bottom() {
        let level = LevelDescription::new("hub", BackgroundTheme::Ruins, 800, 600);
        assert_eq!(level.ground_y(), 536.0);
    }

    #[test]
    fn exits_towards_filters_by_target() {
        let mut level = LevelDescription::new("hub", BackgroundTheme::Forest, 800, 600);
        for target in ["a", "b", "a"] {
            level.exits.push(ExitDescriptor {
                x: 0.0,
                y: 0.0,
                width: 10.0,
                height: 10.0,
                target_scene: target.to_string(),
                target_entry: "default".to_string(),
            });
        }
        assert_eq!(level.exits_towards("a").count(), 2);
        assert_eq!(level.exits_towards("c").count(), 0);
    }
}
