/// Null terminator for the transient singly linked phases of a sort.
pub(crate) const NONE: usize = usize::MAX;

/// Slot index of the sentinel that anchors circularity. The sentinel
/// carries no payload and is never passed to a comparator.
pub(crate) const HEAD: usize = 0;

/// Link storage for one circular doubly linked list.
///
/// Links encode structure only; payload ownership lives in the queue
/// layer. Outside a sort call every slot reachable from `HEAD` satisfies
/// `prev[next[n]] == n` and the chain closes at the sentinel. During a
/// sort the list is temporarily a `NONE`-terminated singly linked chain
/// and `prev` fields may be repurposed as stack links.
#[derive(Clone)]
pub(crate) struct Links {
    next: Vec<usize>,
    prev: Vec<usize>,
}

impl Links {
    pub fn new() -> Self {
        Self {
            next: vec![HEAD],
            prev: vec![HEAD],
        }
    }

    /// Reserve a fresh unlinked slot and return its index.
    pub fn new_slot(&mut self) -> usize {
        let slot = self.next.len();
        self.next.push(NONE);
        self.prev.push(NONE);
        slot
    }

    #[inline]
    pub fn next(&self, node: usize) -> usize {
        self.next[node]
    }

    #[inline]
    pub fn prev(&self, node: usize) -> usize {
        self.prev[node]
    }

    #[inline]
    pub fn set_next(&mut self, node: usize, to: usize) {
        self.next[node] = to;
    }

    #[inline]
    pub fn set_prev(&mut self, node: usize, to: usize) {
        self.prev[node] = to;
    }

    #[inline]
    pub fn is_sentinel(node: usize) -> bool {
        node == HEAD
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.next[HEAD] == HEAD
    }

    #[inline]
    pub fn is_singular(&self) -> bool {
        self.next[HEAD] != HEAD && self.next[HEAD] == self.prev[HEAD]
    }

    #[inline]
    pub fn insert_between(&mut self, node: usize, before: usize, after: usize) {
        self.next[before] = node;
        self.prev[node] = before;
        self.next[node] = after;
        self.prev[after] = node;
    }

    #[inline]
    pub fn insert_after(&mut self, node: usize, anchor: usize) {
        let after = self.next[anchor];
        self.insert_between(node, anchor, after);
    }

    #[inline]
    pub fn insert_before(&mut self, node: usize, anchor: usize) {
        let before = self.prev[anchor];
        self.insert_between(node, before, anchor);
    }

    /// Unlink `node` from the circle; its own fields are left stale.
    #[inline]
    pub fn unlink(&mut self, node: usize) {
        let p = self.prev[node];
        let n = self.next[node];
        self.next[p] = n;
        self.prev[n] = p;
    }

    /// Relocate `node` to sit immediately after `anchor`.
    #[inline]
    pub fn move_after(&mut self, node: usize, anchor: usize) {
        self.unlink(node);
        self.insert_after(node, anchor);
    }

    /// Count elements by walking the circle (sentinel excluded).
    pub fn count(&self) -> usize {
        let mut n = 0;
        let mut curr = self.next[HEAD];
        while curr != HEAD {
            n += 1;
            curr = self.next[curr];
        }
        n
    }

    /// Mutual next/prev consistency, closure at the sentinel, and the
    /// expected element count.
    pub fn is_well_formed(&self, expected_len: usize) -> bool {
        let mut seen = 0;
        let mut curr = HEAD;
        loop {
            let succ = self.next[curr];
            if succ == NONE || succ >= self.next.len() || self.prev[succ] != curr {
                return false;
            }
            if succ == HEAD {
                break;
            }
            seen += 1;
            if seen > expected_len {
                return false;
            }
            curr = succ;
        }
        seen == expected_len
    }
}
