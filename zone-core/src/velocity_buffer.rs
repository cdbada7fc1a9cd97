use crate::{node::SimNode, types::NodeId};
use glam::Vec2;

/// A scratch buffer that accumulates velocity corrections per node.
///
/// For each `NodeId`, this buffer stores:
///
/// - The sum of all velocity deltas added for that node.
/// - The number of contributions that were added.
///
/// Forces evaluated independently (for example one per zone, possibly on
/// separate threads) each fill their own buffer. The buffers are then
/// combined with [`VelocityBuffer::merge_from`] and written to the nodes
/// once with [`VelocityBuffer::apply_to`], so no two forces ever write
/// the same node's velocity concurrently.
#[derive(Clone, Debug, Default)]
pub struct VelocityBuffer {
    /// Accumulated velocity delta for each node.
    delta: Vec<Vec2>,
    /// Number of contributions for each node.
    count: Vec<u32>,
}

impl VelocityBuffer {
    /// Creates a buffer for `len` nodes with every delta at `Vec2::ZERO`.
    pub fn with_len(len: usize) -> Self {
        Self {
            delta: vec![Vec2::ZERO; len],
            count: vec![0; len],
        }
    }

    /// Number of nodes the buffer holds slots for.
    pub fn len(&self) -> usize {
        self.delta.len()
    }

    pub fn is_empty(&self) -> bool {
        self.delta.is_empty()
    }

    /// Resizes the buffer to `len` entries and clears it, even if the
    /// length was already correct.
    pub fn ensure_len(&mut self, len: usize) {
        if self.delta.len() != len {
            self.delta.resize(len, Vec2::ZERO);
            self.count.resize(len, 0);
        }
        self.clear();
    }

    /// Resets every delta and count, keeping the length.
    pub fn clear(&mut self) {
        self.delta.fill(Vec2::ZERO);
        self.count.fill(0);
    }

    /// Adds one velocity correction for `id`.
    ///
    /// ### Panics
    /// Panics if `id` is out of bounds.
    #[inline]
    pub fn add(&mut self, id: NodeId, delta: Vec2) {
        self.delta[id] += delta;
        self.count[id] += 1;
    }

    /// Summed correction for `id`, `Vec2::ZERO` if nothing was added.
    #[inline]
    pub fn delta(&self, id: NodeId) -> Vec2 {
        self.delta[id]
    }

    /// Number of corrections added for `id` since the last clear.
    #[inline]
    pub fn contributions(&self, id: NodeId) -> u32 {
        self.count[id]
    }

    /// Returns `true` if at least one correction was added for `id`.
    #[inline]
    pub fn is_touched(&self, id: NodeId) -> bool {
        self.count[id] > 0
    }

    /// Ids of every node with at least one correction, ascending.
    pub fn touched_indices(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.count
            .iter()
            .enumerate()
            .filter_map(|(i, &c)| if c > 0 { Some(i) } else { None })
    }

    /// Adds every delta and count of `other` into `self`.
    ///
    /// ### Panics
    /// Panics if the two buffers have different lengths.
    pub fn merge_from(&mut self, other: &VelocityBuffer) {
        assert_eq!(self.delta.len(), other.delta.len());
        for i in 0..self.delta.len() {
            self.delta[i] += other.delta[i];
            self.count[i] += other.count[i];
        }
    }

    /// Adds each accumulated delta to the matching node's velocity.
    ///
    /// ### Panics
    /// Panics if `nodes` is shorter than the buffer.
    pub fn apply_to<N: SimNode>(&self, nodes: &mut [N]) {
        for id in self.touched_indices() {
            *nodes[id].velocity_mut() += self.delta[id];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Node;

    #[test]
    fn with_len_starts_zeroed() {
        let buf = VelocityBuffer::with_len(4);
        assert_eq!(buf.len(), 4);
        assert!((0..4).all(|i| buf.delta(i) == Vec2::ZERO && !buf.is_touched(i)));
    }

    #[test]
    fn ensure_len_resizes_and_clears() {
        let mut buf = VelocityBuffer::with_len(2);
        buf.add(1, Vec2::new(1.0, 2.0));

        buf.ensure_len(2);
        assert!(!buf.is_touched(1));
        assert_eq!(buf.delta(1), Vec2::ZERO);

        buf.add(0, Vec2::X);
        buf.ensure_len(5);
        assert_eq!(buf.len(), 5);
        assert_eq!(buf.count.len(), 5);
        assert_eq!(buf.touched_indices().count(), 0);
    }

    #[test]
    fn add_sums_contributions() {
        let mut buf = VelocityBuffer::with_len(3);
        buf.add(2, Vec2::new(1.0, 0.0));
        buf.add(2, Vec2::new(-3.0, 2.0));

        assert_eq!(buf.delta(2), Vec2::new(-2.0, 2.0));
        assert_eq!(buf.contributions(2), 2);
        assert_eq!(buf.touched_indices().collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn merge_from_adds_both_buffers() {
        let mut a = VelocityBuffer::with_len(3);
        let mut b = VelocityBuffer::with_len(3);
        a.add(0, Vec2::new(1.0, 0.0));
        b.add(0, Vec2::new(2.0, 0.0));
        b.add(2, Vec2::new(0.0, 3.0));

        a.merge_from(&b);

        assert_eq!(a.delta(0), Vec2::new(3.0, 0.0));
        assert_eq!(a.contributions(0), 2);
        assert!(!a.is_touched(1));
        assert_eq!(a.delta(2), Vec2::new(0.0, 3.0));
    }

    #[test]
    #[should_panic]
    fn merge_from_panics_on_mismatched_lengths() {
        let mut a = VelocityBuffer::with_len(2);
        let b = VelocityBuffer::with_len(3);
        a.merge_from(&b);
    }

    #[test]
    fn apply_to_only_changes_touched_nodes() {
        let mut nodes = vec![Node::at(Vec2::ZERO), Node::at(Vec2::ZERO)];
        nodes[0].vel = Vec2::new(1.0, 1.0);
        nodes[1].vel = Vec2::new(5.0, 5.0);

        let mut buf = VelocityBuffer::with_len(2);
        buf.add(0, Vec2::new(-0.5, 2.0));
        buf.apply_to(&mut nodes);

        assert_eq!(nodes[0].vel, Vec2::new(0.5, 3.0));
        assert_eq!(nodes[1].vel, Vec2::new(5.0, 5.0));
    }
}
