//! Fixed-capacity node containers for the hot loops.
//!
//! Each container is sized once (usually to the network's node count) and
//! reused, so Dijkstra and the topological bush sweeps never grow a
//! collection mid-loop.
//!
//! | Type             | Used by                                           |
//! |------------------|---------------------------------------------------|
//! | `IndexedMinHeap` | Dijkstra over the whole network                   |
//! | `NodeQueue`      | in-degree countdown sweeps inside a bush          |
//! | `NodeSet`        | LCA search along a min-path predecessor chain     |

use crate::NodeId;

// ── IndexedMinHeap ────────────────────────────────────────────────────────────

/// Binary min-heap of nodes keyed by `f64` priority, with decrease-key.
///
/// Slots are 1-based (`values[1]` is the root).  `position[n]` holds the slot
/// of node `n`, or 0 when `n` is not queued, which makes
/// [`decrease_priority`](Self::decrease_priority) O(log n).
///
/// Ties keep their insertion order at the top of the heap: a child only
/// rises past a parent with a strictly larger priority.
#[derive(Debug, Clone)]
pub struct IndexedMinHeap {
    values:     Vec<NodeId>,
    priorities: Vec<f64>,
    position:   Vec<u32>,
    count:      usize,
}

impl IndexedMinHeap {
    /// Create a heap able to hold every node in `0..capacity` at once.
    pub fn new(capacity: usize) -> Self {
        Self {
            values:     vec![NodeId(0); capacity + 1],
            priorities: vec![0.0; capacity + 1],
            position:   vec![0; capacity],
            count:      0,
        }
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// `true` if `node` is currently queued.
    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        self.position[node.index()] != 0
    }

    /// Insert `node` with `priority`.
    ///
    /// # Panics
    /// Panics in debug mode if `node` is already queued.
    pub fn push(&mut self, node: NodeId, priority: f64) {
        debug_assert!(!self.contains(node), "{node} queued twice");
        self.count += 1;
        self.values[self.count] = node;
        self.priorities[self.count] = priority;
        self.position[node.index()] = self.count as u32;
        self.sift_up(self.count);
    }

    /// Remove and return the node with the lowest priority.
    pub fn pop_min(&mut self) -> Option<NodeId> {
        if self.count == 0 {
            return None;
        }
        let min = self.values[1];
        self.position[min.index()] = 0;

        if self.count > 1 {
            self.values[1] = self.values[self.count];
            self.priorities[1] = self.priorities[self.count];
            self.position[self.values[1].index()] = 1;
        }
        self.count -= 1;
        self.sift_down(1);

        Some(min)
    }

    /// Lower the priority of a queued node.  Does nothing if `node` is not
    /// queued.  `priority` must not exceed the current one.
    pub fn decrease_priority(&mut self, node: NodeId, priority: f64) {
        let slot = self.position[node.index()] as usize;
        if slot == 0 {
            return;
        }
        debug_assert!(priority <= self.priorities[slot]);
        self.priorities[slot] = priority;
        self.sift_up(slot);
    }

    /// Empty the heap without releasing its storage.
    pub fn clear(&mut self) {
        for slot in 1..=self.count {
            self.position[self.values[slot].index()] = 0;
        }
        self.count = 0;
    }

    fn sift_up(&mut self, mut n: usize) {
        while n != 1 {
            let parent = n / 2;
            if self.priorities[parent] > self.priorities[n] {
                self.swap(parent, n);
                n = parent;
            } else {
                return;
            }
        }
    }

    fn sift_down(&mut self, mut n: usize) {
        while 2 * n <= self.count {
            let mut child = 2 * n;
            if child < self.count && self.priorities[child + 1] < self.priorities[child] {
                child += 1;
            }
            if self.priorities[n] < self.priorities[child] {
                return;
            }
            self.swap(child, n);
            n = child;
        }
    }

    #[inline]
    fn swap(&mut self, a: usize, b: usize) {
        self.values.swap(a, b);
        self.priorities.swap(a, b);
        self.position[self.values[a].index()] = a as u32;
        self.position[self.values[b].index()] = b as u32;
    }
}

// ── NodeQueue ─────────────────────────────────────────────────────────────────

/// FIFO ring buffer of nodes with a fixed capacity.
#[derive(Debug, Clone)]
pub struct NodeQueue {
    data:  Vec<NodeId>,
    front: usize,
    len:   usize,
}

impl NodeQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            data:  vec![NodeId(0); capacity.max(1)],
            front: 0,
            len:   0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Append `node` at the back.
    ///
    /// # Panics
    /// Panics if the queue is full.
    pub fn push(&mut self, node: NodeId) {
        assert!(self.len < self.data.len(), "NodeQueue overflow (capacity {})", self.data.len());
        let rear = (self.front + self.len) % self.data.len();
        self.data[rear] = node;
        self.len += 1;
    }

    /// Remove and return the node at the front.
    pub fn pop(&mut self) -> Option<NodeId> {
        if self.len == 0 {
            return None;
        }
        let node = self.data[self.front];
        self.front = (self.front + 1) % self.data.len();
        self.len -= 1;
        Some(node)
    }

    pub fn clear(&mut self) {
        self.front = 0;
        self.len = 0;
    }
}

// ── NodeSet ───────────────────────────────────────────────────────────────────

/// Small insertion-ordered set with linear membership tests.
///
/// Meant for the handful of nodes on one bush path; a linear scan over a
/// cache-resident `Vec` beats hashing at that size.
#[derive(Debug, Clone, Default)]
pub struct NodeSet {
    items: Vec<NodeId>,
}

impl NodeSet {
    /// Initial capacity, enough for typical bush path depths.
    pub const DEFAULT_CAPACITY: usize = 100;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { items: Vec::with_capacity(capacity) }
    }

    /// Add `node`.  Duplicates are not filtered; callers insert each path
    /// node once.
    #[inline]
    pub fn insert(&mut self, node: NodeId) {
        self.items.push(node);
    }

    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        self.items.contains(&node)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Forget all members, keeping the allocation.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}
