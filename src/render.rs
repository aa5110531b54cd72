// =============================================================================
// RENDER.RS: Draw list
//
// The simulation does not draw. After each step the host asks for a render
// list: one item per visible entity with the sprite to use, the sub-frame to
// cut from it and the top-left pixel to put it at, sorted back to front.
// =============================================================================

use glam::IVec2;

use crate::entity::{Character, Doodad, Enemy, Player, Projectile, Tile, Weapon, Wielder};
use crate::geometry::Rect;
use crate::sprite::Sprite;
use crate::world::World;

/// Render order of floor tiles: beneath everything.
pub const FLOOR_ORDER: i32 = i32::MIN;
/// Render order of blocking tiles: above the floor, below anything standing.
pub const COLLIDER_ORDER: i32 = i32::MIN / 2;

/// Draw attributes of one entity.
pub trait Renderable {
    fn position(&self) -> IVec2;
    fn sprite(&self) -> &Sprite;

    fn frame(&self) -> i32 {
        0
    }

    /// Lower draws first. Standing things sort by their feet.
    fn render_order(&self) -> i32 {
        self.position().y
    }

    /// Top-left corner: the anchor is bottom-centre of the frame.
    fn draw_offset(&self) -> IVec2 {
        let s = self.sprite();
        self.position() - IVec2::new(s.frame_width / 2, s.frame_height)
    }

    fn source_rect(&self) -> Rect {
        self.sprite().source_rect(self.frame())
    }
}

macro_rules! animated_renderable {
    ($($ty:ty),*) => {$(
        impl Renderable for $ty {
            fn position(&self) -> IVec2 { self.pos }
            fn sprite(&self) -> &Sprite { &self.sprite }
            fn frame(&self) -> i32 { self.anim.frame }
        }
    )*};
}

animated_renderable!(Player, Character, Enemy, Projectile);

impl Renderable for Doodad {
    fn position(&self) -> IVec2 {
        self.pos
    }

    fn sprite(&self) -> &Sprite {
        &self.sprite
    }
}

impl Renderable for Tile {
    fn position(&self) -> IVec2 {
        self.pos
    }

    fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    fn render_order(&self) -> i32 {
        if self.collider { COLLIDER_ORDER } else { FLOOR_ORDER }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RenderKind {
    Player,
    Weapon,
    Character,
    Enemy,
    Doodad,
    Tile,
    Projectile,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderItem {
    pub kind: RenderKind,
    /// Index into the list `kind` names (0 for the player).
    pub index: usize,
    pub sprite: String,
    pub source: Rect,
    pub offset: IVec2,
    pub order: i32,
}

impl RenderItem {
    fn of(kind: RenderKind, index: usize, r: &impl Renderable) -> Self {
        Self {
            kind,
            index,
            sprite: r.sprite().name.clone(),
            source: r.source_rect(),
            offset: r.draw_offset(),
            order: r.render_order(),
        }
    }
}

/// Everything to draw this frame, back to front. Equal orders keep the
/// order entities were pushed in.
pub fn render_list(world: &World) -> Vec<RenderItem> {
    let mut items = Vec::with_capacity(
        2 + world.characters.len()
            + world.enemies.len()
            + world.doodads.len()
            + world.tiles.len()
            + world.projectiles.len(),
    );

    items.push(RenderItem::of(RenderKind::Player, 0, &world.player));
    for (i, weapon) in world.weapons.iter().enumerate() {
        if let Some(item) = weapon_item(world, i, weapon) {
            items.push(item);
        }
    }
    items.extend(world.characters.iter().enumerate().map(|(i, c)| RenderItem::of(RenderKind::Character, i, c)));
    items.extend(world.enemies.iter().enumerate().map(|(i, e)| RenderItem::of(RenderKind::Enemy, i, e)));
    items.extend(world.doodads.iter().enumerate().map(|(i, d)| RenderItem::of(RenderKind::Doodad, i, d)));
    items.extend(world.tiles.iter().enumerate().map(|(i, t)| RenderItem::of(RenderKind::Tile, i, t)));
    items.extend(world.projectiles.iter().enumerate().map(|(i, p)| RenderItem::of(RenderKind::Projectile, i, p)));

    items.sort_by_key(|item| item.order);
    items
}

fn wielder<'a>(world: &'a World, who: Wielder) -> Option<&'a dyn Renderable> {
    match who {
        Wielder::Player => Some(&world.player as &dyn Renderable),
    }
}

/// A weapon is only drawn mid-attack. Its own first handle is pinned to the
/// wielder's handle for the wielder's current frame; a sprite without
/// handles is held by its centre.
fn weapon_item(world: &World, index: usize, weapon: &Weapon) -> Option<RenderItem> {
    if !weapon.is_attacking {
        return None;
    }
    let holder = wielder(world, weapon.wielder?)?;
    let hs = holder.sprite();
    let grip = hs.handle(holder.frame()).unwrap_or(IVec2::new(hs.frame_width / 2, hs.frame_height / 2));
    let ws = &weapon.sprite;
    let hilt = ws.handle(0).unwrap_or(IVec2::new(ws.frame_width / 2, ws.frame_height / 2));

    Some(RenderItem {
        kind: RenderKind::Weapon,
        index,
        sprite: ws.name.clone(),
        source: ws.source_rect(weapon.anim.frame),
        offset: holder.draw_offset() + grip - hilt,
        order: holder.render_order(),
    })
}
