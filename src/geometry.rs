// =============================================================================
// GEOMETRY.RS: Rectangles, directions and hitboxes
//
// Everything that collides is reduced to an axis-aligned rectangle in screen
// pixels. Entities are anchored at the centre of their "feet": x is the
// horizontal centre of the sprite, y is the bottom edge.
// =============================================================================

use glam::IVec2;

use crate::sprite::Sprite;

// =============================================================================
// RECT
// =============================================================================

/// Half-open axis-aligned rectangle: `min` is inclusive, `max` exclusive.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub min: IVec2,
    pub max: IVec2,
}

impl Rect {
    pub const EMPTY: Self = Self { min: IVec2::ZERO, max: IVec2::ZERO };

    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { min: IVec2::new(x0, y0), max: IVec2::new(x1, y1) }
    }

    /// Rectangle from a top-left corner and a size.
    pub fn from_size(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self::new(x, y, x + w, y + h)
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.max.y - self.min.y
    }

    /// A rectangle with no area never overlaps anything.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    /// True if the two rectangles share a region of non-zero area.
    /// Touching edges do not count.
    pub fn overlaps(&self, other: &Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }

    /// Horizontal midpoint, rounded toward negative infinity.
    #[inline]
    pub fn center_x(&self) -> i32 {
        self.min.x + self.width() / 2
    }

    /// Vertical midpoint, rounded toward negative infinity.
    #[inline]
    pub fn center_y(&self) -> i32 {
        self.min.y + self.height() / 2
    }

    /// The y of the "feet" edge.
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.max.y
    }

    pub fn translate(&self, dx: i32, dy: i32) -> Self {
        let d = IVec2::new(dx, dy);
        Self { min: self.min + d, max: self.max + d }
    }

    /// Which side of `self` is pressed against `other`, if any.
    ///
    /// An edge counts when it lies within 1 pixel of the facing edge of
    /// `other` *and* the midpoint of that edge falls inside `other`'s span.
    /// Corner-to-corner contact does not qualify.
    pub fn adjacent_side(&self, other: &Rect) -> Option<Direction> {
        let mid_x = self.center_x();
        let mid_y = self.center_y();
        let spans_x = mid_x >= other.min.x && mid_x <= other.max.x;
        let spans_y = mid_y >= other.min.y && mid_y <= other.max.y;

        if (self.max.x - other.min.x).abs() <= 1 && spans_y {
            Some(Direction::East)
        } else if (self.max.y - other.min.y).abs() <= 1 && spans_x {
            Some(Direction::South)
        } else if (self.min.x - other.max.x).abs() <= 1 && spans_y {
            Some(Direction::West)
        } else if (self.min.y - other.max.y).abs() <= 1 && spans_x {
            Some(Direction::North)
        } else {
            None
        }
    }
}

// =============================================================================
// DIRECTIONS
// =============================================================================

/// One of the four cardinal directions. Screen space is y-down, so north is
/// `(0, -1)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Player input is resolved in this order each frame.
    pub const ALL: [Direction; 4] = [Direction::West, Direction::East, Direction::North, Direction::South];

    /// Unit step for this direction.
    pub fn offset(self) -> IVec2 {
        match self {
            Direction::North => IVec2::new(0, -1),
            Direction::South => IVec2::new(0, 1),
            Direction::East => IVec2::new(1, 0),
            Direction::West => IVec2::new(-1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// Capitalised name used when composing sprite keys (`linkWalkEast`).
    pub fn name(self) -> &'static str {
        match self {
            Direction::North => "North",
            Direction::South => "South",
            Direction::East => "East",
            Direction::West => "West",
        }
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::North | Direction::South)
    }
}

// =============================================================================
// HITBOXES
// =============================================================================

/// How an entity's sprite maps onto its collision rectangle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HitboxShape {
    /// Bottom half of the frame only. Heads and shoulders overlap scenery
    /// behind them without colliding, which sells the top-down perspective.
    Perspective,
    /// The whole frame above the anchor. Used for static obstacles.
    Full,
    /// Never collides.
    None,
}

/// Collision rectangle for a sprite anchored at `pos`, probed at an offset of
/// `(dx, dy)` without moving anything.
pub fn hitbox(pos: IVec2, sprite: &Sprite, shape: HitboxShape, dx: i32, dy: i32) -> Rect {
    let half_w = sprite.frame_width / 2;
    let x = pos.x + dx;
    let y = pos.y + dy;
    match shape {
        HitboxShape::Perspective => {
            Rect::new(x - half_w, y - sprite.frame_height / 2, x + half_w, y)
        }
        HitboxShape::Full => Rect::new(x - half_w, y - sprite.frame_height, x + half_w, y),
        HitboxShape::None => Rect::EMPTY,
    }
}

/// Anything that can report a collision rectangle.
pub trait Collider {
    /// Hitbox at the current position shifted by `(dx, dy)`.
    fn hitbox(&self, dx: i32, dy: i32) -> Rect;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sprite(w: i32, h: i32) -> Sprite {
        Sprite::new("test", w, h)
    }

    #[test]
    fn test_overlap_requires_area() {
        let a = Rect::new(0, 0, 10, 10);
        assert!(a.overlaps(&Rect::new(5, 5, 15, 15)));
        // Shared edge only.
        assert!(!a.overlaps(&Rect::new(10, 0, 20, 10)));
        assert!(!a.overlaps(&Rect::EMPTY));
        assert!(!Rect::EMPTY.overlaps(&Rect::EMPTY));
    }

    #[test]
    fn test_perspective_hitbox_is_bottom_half() {
        let r = hitbox(IVec2::new(50, 40), &sprite(16, 24), HitboxShape::Perspective, 0, 0);
        assert_eq!(r, Rect::new(42, 28, 58, 40));
        assert_eq!(r.height(), 12);
        assert_eq!(r.center_x(), 50);
    }

    #[test]
    fn test_full_hitbox_spans_frame() {
        let r = hitbox(IVec2::new(50, 40), &sprite(16, 24), HitboxShape::Full, 0, 0);
        assert_eq!(r, Rect::new(42, 16, 58, 40));
    }

    #[test]
    fn test_probe_offset_shifts_rect() {
        let s = sprite(16, 16);
        let base = hitbox(IVec2::new(8, 8), &s, HitboxShape::Perspective, 0, 0);
        let probe = hitbox(IVec2::new(8, 8), &s, HitboxShape::Perspective, -1, 0);
        assert_eq!(probe, base.translate(-1, 0));
    }

    #[test]
    fn test_none_shape_is_empty() {
        let r = hitbox(IVec2::new(8, 8), &sprite(16, 16), HitboxShape::None, 3, 3);
        assert!(r.is_empty());
    }

    #[test]
    fn test_adjacent_side() {
        let npc = Rect::new(20, 20, 36, 32);
        // Right edge touching the NPC's left edge, midpoint inside.
        assert_eq!(Rect::new(4, 20, 20, 32).adjacent_side(&npc), Some(Direction::East));
        // One pixel gap still counts.
        assert_eq!(Rect::new(3, 20, 19, 32).adjacent_side(&npc), Some(Direction::East));
        // Standing above.
        assert_eq!(Rect::new(20, 8, 36, 20).adjacent_side(&npc), Some(Direction::South));
        assert_eq!(Rect::new(36, 22, 52, 34).adjacent_side(&npc), Some(Direction::West));
        assert_eq!(Rect::new(22, 32, 38, 44).adjacent_side(&npc), Some(Direction::North));
        // Diagonal corner only.
        assert_eq!(Rect::new(4, 4, 20, 20).adjacent_side(&npc), None);
        // Too far.
        assert_eq!(Rect::new(0, 20, 16, 32).adjacent_side(&npc), None);
    }

    #[test]
    fn test_direction_offsets_are_unit() {
        for d in Direction::ALL {
            let o = d.offset();
            assert_eq!(o.x.abs() + o.y.abs(), 1);
            assert_eq!(d.opposite().offset(), -o);
        }
    }
}
