use std::collections::{HashMap, HashSet};
use std::hash::Hash;
pub use winit::keyboard::KeyCode;

use crate::geometry::Direction;

/// Raw keyboard state for a single frame.
///
/// The window layer feeds key events in through [`press`](Self::press) and
/// [`release`](Self::release), the simulation reads the frame, then
/// [`end_frame`](Self::end_frame) clears the edge sets and ages held keys.
#[derive(Debug, Default, Clone)]
pub struct InputState {
    pub keys_held: HashSet<KeyCode>,
    pub keys_pressed: HashSet<KeyCode>,
    pub keys_released: HashSet<KeyCode>,
    /// Consecutive frames each held key has been down, counting the frame it
    /// was pressed on as 1.
    hold_frames: HashMap<KeyCode, u32>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: KeyCode) {
        // Key repeat from the OS must not restart the hold counter.
        if self.keys_held.insert(key) {
            self.keys_pressed.insert(key);
            self.hold_frames.insert(key, 1);
        }
    }

    pub fn release(&mut self, key: KeyCode) {
        if self.keys_held.remove(&key) {
            self.keys_released.insert(key);
            self.hold_frames.remove(&key);
        }
    }

    /// Finish the frame: forget this frame's edges and age every held key.
    pub fn end_frame(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        for frames in self.hold_frames.values_mut() {
            *frames = frames.saturating_add(1);
        }
    }

    pub fn is_key_held(&self, key: KeyCode) -> bool { self.keys_held.contains(&key) }
    pub fn is_key_pressed(&self, key: KeyCode) -> bool { self.keys_pressed.contains(&key) }
    pub fn is_key_released(&self, key: KeyCode) -> bool { self.keys_released.contains(&key) }

    /// Frames `key` has been held, or 0 if it is up.
    pub fn key_hold_duration(&self, key: KeyCode) -> u32 {
        self.hold_frames.get(&key).copied().unwrap_or(0)
    }
}

// ── Actions ──────────────────────────────────────────────────────────────────

/// Logical inputs the simulation responds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveNorth,
    MoveSouth,
    MoveEast,
    MoveWest,
    Attack,
    Interact,
}

impl Action {
    pub fn movement(dir: Direction) -> Self {
        match dir {
            Direction::North => Action::MoveNorth,
            Direction::South => Action::MoveSouth,
            Direction::East => Action::MoveEast,
            Direction::West => Action::MoveWest,
        }
    }
}

/// Maps logical actions to one or more keys.
#[derive(Debug, Clone)]
pub struct ActionMap<A: Hash + Eq + Copy> {
    bindings: HashMap<A, Vec<KeyCode>>,
}

impl<A: Hash + Eq + Copy> ActionMap<A> {
    pub fn new() -> Self {
        Self { bindings: HashMap::new() }
    }

    pub fn bind(&mut self, action: A, key: KeyCode) {
        self.bindings.entry(action).or_default().push(key);
    }

    fn keys(&self, action: A) -> &[KeyCode] {
        self.bindings.get(&action).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_pressed(&self, action: A, input: &InputState) -> bool {
        self.keys(action).iter().any(|k| input.is_key_pressed(*k))
    }

    pub fn is_held(&self, action: A, input: &InputState) -> bool {
        self.keys(action).iter().any(|k| input.is_key_held(*k))
    }

    pub fn is_released(&self, action: A, input: &InputState) -> bool {
        self.keys(action).iter().any(|k| input.is_key_released(*k))
    }

    /// Longest hold among the bound keys, i.e. how long the action has been
    /// continuously active.
    pub fn hold_duration(&self, action: A, input: &InputState) -> u32 {
        self.keys(action).iter().map(|k| input.key_hold_duration(*k)).max().unwrap_or(0)
    }
}

impl<A: Hash + Eq + Copy> Default for ActionMap<A> {
    fn default() -> Self { Self::new() }
}

impl ActionMap<Action> {
    /// Arrow keys to walk, Space to attack, Enter to talk.
    pub fn default_bindings() -> Self {
        let mut map = Self::new();
        map.bind(Action::MoveNorth, KeyCode::ArrowUp);
        map.bind(Action::MoveSouth, KeyCode::ArrowDown);
        map.bind(Action::MoveEast, KeyCode::ArrowRight);
        map.bind(Action::MoveWest, KeyCode::ArrowLeft);
        map.bind(Action::Attack, KeyCode::Space);
        map.bind(Action::Interact, KeyCode::Enter);
        map
    }
}

// ── Controls ─────────────────────────────────────────────────────────────────

/// The keyboard queries the simulation makes, phrased in actions.
pub trait Controls {
    fn is_held(&self, action: Action) -> bool;
    fn is_pressed(&self, action: Action) -> bool;
    fn is_released(&self, action: Action) -> bool;
    /// Consecutive frames the action has been held; 0 when not held.
    fn hold_duration(&self, action: Action) -> u32;

    /// True if any movement direction other than `dir` was released this frame.
    fn other_direction_released(&self, dir: Direction) -> bool {
        Direction::ALL
            .into_iter()
            .filter(|&d| d != dir)
            .any(|d| self.is_released(Action::movement(d)))
    }

    /// True if `dir` is held and no other held direction was pressed more
    /// recently. Used to pick which walk cycle to resume when several
    /// direction keys are down and one of them is let go.
    fn is_most_recent_direction(&self, dir: Direction) -> bool {
        let d = self.hold_duration(Action::movement(dir));
        d > 0
            && Direction::ALL
                .into_iter()
                .filter(|&o| o != dir)
                .all(|o| {
                    let other = self.hold_duration(Action::movement(o));
                    other == 0 || d < other
                })
    }

    fn any_direction_held(&self) -> bool {
        Direction::ALL.into_iter().any(|d| self.is_held(Action::movement(d)))
    }
}

/// An [`ActionMap`] read against an [`InputState`].
pub struct Bound<'a, A: Hash + Eq + Copy> {
    pub map: &'a ActionMap<A>,
    pub input: &'a InputState,
}

impl<'a, A: Hash + Eq + Copy> Bound<'a, A> {
    pub fn new(map: &'a ActionMap<A>, input: &'a InputState) -> Self {
        Self { map, input }
    }
}

impl Controls for Bound<'_, Action> {
    fn is_held(&self, action: Action) -> bool { self.map.is_held(action, self.input) }
    fn is_pressed(&self, action: Action) -> bool { self.map.is_pressed(action, self.input) }
    fn is_released(&self, action: Action) -> bool { self.map.is_released(action, self.input) }
    fn hold_duration(&self, action: Action) -> u32 { self.map.hold_duration(action, self.input) }
}
