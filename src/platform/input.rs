//! Directional input
//!
//! The host presses and releases directions on a [`DirectionHandle`]; the
//! level reads the most recently pressed, still held one through
//! [`DirectionSource`] once per tick.

use std::cell::RefCell;
use std::rc::Rc;

use crate::sim::Direction;

/// Where a level reads its held direction from
pub trait DirectionSource {
    /// Most recently pressed direction that is still held
    fn direction(&self) -> Option<Direction>;

    /// Stop listening; held directions are dropped and later presses ignored
    fn unbind(&mut self);
}

#[derive(Debug, Default)]
struct HeldDirections {
    /// Newest first
    held: Vec<Direction>,
    unbound: bool,
}

impl HeldDirections {
    fn press(&mut self, direction: Direction) {
        if self.unbound || self.held.contains(&direction) {
            return;
        }
        self.held.insert(0, direction);
    }

    fn release(&mut self, direction: Direction) {
        self.held.retain(|d| *d != direction);
    }
}

/// Held-direction tracker owned by the level
#[derive(Debug, Default)]
pub struct DirectionControls {
    state: Rc<RefCell<HeldDirections>>,
}

impl DirectionControls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Host-side handle sharing this tracker's state
    pub fn handle(&self) -> DirectionHandle {
        DirectionHandle {
            state: Rc::clone(&self.state),
        }
    }
}

impl DirectionSource for DirectionControls {
    fn direction(&self) -> Option<Direction> {
        self.state.borrow().held.first().copied()
    }

    fn unbind(&mut self) {
        let mut state = self.state.borrow_mut();
        state.held.clear();
        state.unbound = true;
    }
}

/// Press/release side of [`DirectionControls`]
#[derive(Debug, Clone)]
pub struct DirectionHandle {
    state: Rc<RefCell<HeldDirections>>,
}

impl DirectionHandle {
    pub fn press(&self, direction: Direction) {
        self.state.borrow_mut().press(direction);
    }

    pub fn release(&self, direction: Direction) {
        self.state.borrow_mut().release(direction);
    }

    pub fn release_all(&self) {
        self.state.borrow_mut().held.clear();
    }

    pub fn direction(&self) -> Option<Direction> {
        self.state.borrow().held.first().copied()
    }

    pub fn is_bound(&self) -> bool {
        !self.state.borrow().unbound
    }
}
