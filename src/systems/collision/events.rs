use crate::rigid_body::Vec2;
use crate::rigid_body_system::BodyHandle;

/// Edge-triggered contact events for a monitored pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CollisionEvent {
    /// First tick of contact.
    Start,
    /// Still in contact.
    Touching,
    /// First tick after contact ended.
    End,
}

/// One persisted bit per pair: were they in contact last tick?
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CollisionTracker {
    collided_last_tick: bool,
}

impl CollisionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn collided_last_tick(&self) -> bool {
        self.collided_last_tick
    }

    /// Record this tick's contact state and return the transition, if any.
    pub fn advance(&mut self, collided: bool) -> Option<CollisionEvent> {
        let event = match (self.collided_last_tick, collided) {
            (false, true) => Some(CollisionEvent::Start),
            (true, true) => Some(CollisionEvent::Touching),
            (true, false) => Some(CollisionEvent::End),
            (false, false) => None,
        };
        self.collided_last_tick = collided;
        event
    }
}

/// What a collision handler receives.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contact {
    pub a: BodyHandle,
    pub b: BodyHandle,
    /// Unit normal from `a` toward `b`.
    pub axis: Vec2,
    pub event: CollisionEvent,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use CollisionEvent::*;

    #[rstest]
    #[case::touch_and_release(&[false, true, true, false], &[None, Some(Start), Some(Touching), Some(End)])]
    #[case::never_touch(&[false, false, false], &[None, None, None])]
    #[case::bounce_twice(&[true, false, true], &[Some(Start), Some(End), Some(Start)])]
    fn transitions(#[case] contact: &[bool], #[case] expected: &[Option<CollisionEvent>]) {
        let mut tracker = CollisionTracker::new();
        let events: Vec<_> = contact.iter().map(|c| tracker.advance(*c)).collect();
        assert_eq!(events, expected);
    }
}
