use crate::rigid_body::Body;

use super::handle::BodyHandle;

struct Slot {
    generation: u32,
    body: Option<Body>,
}

/// Counters from one integrate-and-sweep pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BodyPass {
    pub integrated: u32,
    pub pruned: u32,
}

/// Owns every body in a scene.
///
/// Slots are stable for the lifetime of a body, so handles held by force
/// handlers stay valid while other bodies come and go. A separate `order`
/// list keeps insertion order for deterministic iteration.
pub struct RigidBodySystem {
    slots: Vec<Slot>,
    free: Vec<u32>,
    order: Vec<BodyHandle>,
}

impl RigidBodySystem {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            order: Vec::new(),
        }
    }

    /// Add a body at the end of the iteration order.
    pub fn insert(&mut self, body: Body) -> BodyHandle {
        let handle = if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.body = Some(body);
            BodyHandle::new(index, slot.generation)
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot { generation: 0, body: Some(body) });
            BodyHandle::new(index, 0)
        };
        self.order.push(handle);
        handle
    }

    pub fn get(&self, handle: BodyHandle) -> Option<&Body> {
        self.slots
            .get(handle.index())
            .filter(|slot| slot.generation == handle.generation())
            .and_then(|slot| slot.body.as_ref())
    }

    pub fn get_mut(&mut self, handle: BodyHandle) -> Option<&mut Body> {
        self.slots
            .get_mut(handle.index())
            .filter(|slot| slot.generation == handle.generation())
            .and_then(|slot| slot.body.as_mut())
    }

    /// Two distinct live bodies at once. `None` if either is gone or `a == b`.
    pub fn pair_mut(&mut self, a: BodyHandle, b: BodyHandle) -> Option<(&mut Body, &mut Body)> {
        if a.index() == b.index() || !self.contains(a) || !self.contains(b) {
            return None;
        }
        let (lo, hi, swapped) = if a.index() < b.index() { (a, b, false) } else { (b, a, true) };
        let (head, tail) = self.slots.split_at_mut(hi.index());
        let first = head[lo.index()].body.as_mut()?;
        let second = tail[0].body.as_mut()?;
        if swapped {
            Some((second, first))
        } else {
            Some((first, second))
        }
    }

    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.get(handle).is_some()
    }

    /// A handle whose body is gone counts as removed.
    pub fn is_removed(&self, handle: BodyHandle) -> bool {
        self.get(handle).map_or(true, Body::is_removed)
    }

    /// Drop a body immediately, bypassing the sweep.
    pub fn remove(&mut self, handle: BodyHandle) -> Option<Body> {
        let pos = self.order.iter().position(|h| *h == handle)?;
        self.order.remove(pos);
        self.free_slot(handle)
    }

    fn free_slot(&mut self, handle: BodyHandle) -> Option<Body> {
        let slot = self.slots.get_mut(handle.index())?;
        let body = slot.body.take();
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index() as u32);
        body
    }

    /// Live bodies in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (BodyHandle, &Body)> + '_ {
        self.order
            .iter()
            .filter_map(move |h| self.get(*h).map(|body| (*h, body)))
    }

    pub fn handles(&self) -> &[BodyHandle] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Back-to-front over the insertion order: bodies flagged for removal
    /// are dropped, the rest advance by `dt`.
    pub fn integrate_and_sweep(&mut self, dt: f64) -> BodyPass {
        let mut pass = BodyPass::default();
        for i in (0..self.order.len()).rev() {
            let handle = self.order[i];
            if self.is_removed(handle) {
                self.order.remove(i);
                self.free_slot(handle);
                pass.pruned += 1;
            } else if let Some(body) = self.get_mut(handle) {
                body.tick(dt);
                pass.integrated += 1;
            }
        }
        pass
    }

    pub fn clear(&mut self) {
        for handle in std::mem::take(&mut self.order) {
            self.free_slot(handle);
        }
    }
}

impl Default for RigidBodySystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rigid_body::{shapes, RgbColor, Vec2};

    fn body_at(x: f64) -> Body {
        let mut body = Body::new(shapes::rectangle(1.0, 1.0).unwrap(), 1.0, RgbColor::BLACK).unwrap();
        body.set_centroid(Vec2::new(x, 0.0));
        body
    }

    #[test]
    fn stale_handle_misses_after_slot_reuse() {
        let mut sys = RigidBodySystem::new();
        let a = sys.insert(body_at(0.0));
        sys.remove(a).unwrap();
        let b = sys.insert(body_at(1.0));
        assert_eq!(a.index(), b.index());
        assert!(sys.get(a).is_none());
        assert!(sys.is_removed(a));
        assert_eq!(sys.get(b).unwrap().centroid().x, 1.0);
    }

    #[test]
    fn pair_mut_preserves_argument_order() {
        let mut sys = RigidBodySystem::new();
        let a = sys.insert(body_at(0.0));
        let b = sys.insert(body_at(5.0));
        let (bb, aa) = sys.pair_mut(b, a).unwrap();
        assert_eq!(bb.centroid().x, 5.0);
        assert_eq!(aa.centroid().x, 0.0);
        assert!(sys.pair_mut(a, a).is_none());
    }

    #[test]
    fn sweep_drops_flagged_and_integrates_rest() {
        let mut sys = RigidBodySystem::new();
        let handles: Vec<_> = (0..4).map(|i| sys.insert(body_at(i as f64))).collect();
        for h in &handles {
            sys.get_mut(*h).unwrap().set_velocity(Vec2::new(1.0, 0.0));
        }
        sys.get_mut(handles[1]).unwrap().mark_removed();
        sys.get_mut(handles[3]).unwrap().mark_removed();

        let pass = sys.integrate_and_sweep(1.0);
        assert_eq!(pass, BodyPass { integrated: 2, pruned: 2 });
        assert_eq!(sys.handles(), &[handles[0], handles[2]]);
        let xs: Vec<f64> = sys.iter().map(|(_, b)| b.centroid().x).collect();
        assert_eq!(xs, vec![1.0, 3.0]);
    }
}
