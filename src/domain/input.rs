//! Key-state table shared between the host's input polling and the movement
//! handlers. Written between ticks, read-only during a tick.

pub const LEFT_ARROW: usize = 1;
pub const UP_ARROW: usize = 2;
pub const RIGHT_ARROW: usize = 3;
pub const DOWN_ARROW: usize = 4;
pub const FIRE: usize = 5;

/// Number of tracked key slots. Slot 0 is unassigned.
pub const KEY_SLOTS: usize = 6;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KeyState {
    #[default]
    Released,
    Pressed,
}

impl KeyState {
    pub fn from_pressed(pressed: bool) -> Self {
        if pressed {
            KeyState::Pressed
        } else {
            KeyState::Released
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    keys: [KeyState; KEY_SLOTS],
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Panics if `slot >= KEY_SLOTS`.
    pub fn set(&mut self, slot: usize, state: KeyState) {
        assert!(slot < KEY_SLOTS, "key slot {slot} out of range (max {})", KEY_SLOTS - 1);
        self.keys[slot] = state;
    }

    pub fn press(&mut self, slot: usize) {
        self.set(slot, KeyState::Pressed);
    }

    pub fn release(&mut self, slot: usize) {
        self.set(slot, KeyState::Released);
    }

    pub fn get(&self, slot: usize) -> KeyState {
        assert!(slot < KEY_SLOTS, "key slot {slot} out of range (max {})", KEY_SLOTS - 1);
        self.keys[slot]
    }

    pub fn is_pressed(&self, slot: usize) -> bool {
        self.get(slot) == KeyState::Pressed
    }

    pub fn release_all(&mut self) {
        self.keys = [KeyState::Released; KEY_SLOTS];
    }
}
