use super::visual::Visual;

/// The orbit rings, kept apart from everything else in the scene so they can be shown and
/// hidden as a group.
pub struct RingSet<V> {
    rings: Vec<V>,
    visible: bool,
}

impl<V: Visual> RingSet<V> {
    pub fn new() -> Self {
        RingSet {
            rings: vec![],
            visible: true,
        }
    }

    pub fn add(&mut self, mut ring: V) {
        ring.set_visible(self.visible);
        self.rings.push(ring);
    }

    pub fn show(&mut self, visible: bool) {
        self.visible = visible;
        for ring in self.rings.iter_mut() {
            ring.set_visible(visible);
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn len(&self) -> usize {
        self.rings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &V> + '_ {
        self.rings.iter()
    }
}

impl<V: Visual> Default for RingSet<V> {
    fn default() -> Self {
        Self::new()
    }
}
