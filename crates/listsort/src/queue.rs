use std::cmp::Ordering;

use crate::SortStrategy;
use crate::list::{HEAD, Links};
use crate::sort::{adaptive_run, binary_merge, divide_conquer};

/// A queue backed by a circular doubly linked list.
///
/// Payloads live in a slot vector parallel to the link arena; a free
/// list recycles slots so removal never invalidates the indices of the
/// surviving elements. Slot 0 is the sentinel and owns no payload. The
/// sort engines only ever rewrite link fields; elements are relinked,
/// never moved or copied.
#[derive(Clone)]
pub struct Queue<T> {
    links: Links,
    values: Vec<Option<T>>,
    free: Vec<usize>,
    len: usize,
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Queue<T> {
    pub fn new() -> Self {
        Self {
            links: Links::new(),
            values: vec![None],
            free: Vec::new(),
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn alloc(&mut self, value: T) -> usize {
        let slot = match self.free.pop() {
            Some(slot) => slot,
            None => {
                self.values.push(None);
                self.links.new_slot()
            }
        };
        self.values[slot] = Some(value);
        slot
    }

    /// Unlink `node` and take its payload back.
    fn take(&mut self, node: usize) -> T {
        self.links.unlink(node);
        self.free.push(node);
        self.len -= 1;
        match self.values[node].take() {
            Some(value) => value,
            None => unreachable!("linked queue slot without a payload"),
        }
    }

    fn release(&mut self, node: usize) {
        let _ = self.take(node);
    }

    fn value(&self, node: usize) -> &T {
        match self.values[node].as_ref() {
            Some(value) => value,
            None => unreachable!("linked queue slot without a payload"),
        }
    }

    pub fn insert_head(&mut self, value: T) {
        let node = self.alloc(value);
        self.links.insert_after(node, HEAD);
        self.len += 1;
    }

    pub fn insert_tail(&mut self, value: T) {
        let node = self.alloc(value);
        self.links.insert_before(node, HEAD);
        self.len += 1;
    }

    pub fn remove_head(&mut self) -> Option<T> {
        if self.links.is_empty() {
            return None;
        }
        let first = self.links.next(HEAD);
        Some(self.take(first))
    }

    pub fn remove_tail(&mut self) -> Option<T> {
        if self.links.is_empty() {
            return None;
        }
        let last = self.links.prev(HEAD);
        Some(self.take(last))
    }

    /// Delete the middle node (the earlier of the two for even
    /// lengths), located by walking inward from both ends.
    pub fn delete_mid(&mut self) -> Option<T> {
        if self.links.is_empty() {
            return None;
        }
        let mut forward = self.links.next(HEAD);
        let mut backward = self.links.prev(HEAD);
        while forward != backward && self.links.next(forward) != backward {
            forward = self.links.next(forward);
            backward = self.links.prev(backward);
        }
        Some(self.take(forward))
    }

    /// On a sorted queue, delete every element whose value occurs more
    /// than once, including the first of each duplicate group. Returns
    /// false on an empty queue.
    pub fn delete_dup(&mut self) -> bool
    where
        T: PartialEq,
    {
        if self.links.is_empty() {
            return false;
        }
        let mut curr = self.links.next(HEAD);
        while !Links::is_sentinel(curr) {
            let mut next = self.links.next(curr);
            if !Links::is_sentinel(next) && self.value(curr) == self.value(next) {
                while !Links::is_sentinel(next) && self.value(curr) == self.value(next) {
                    let after = self.links.next(next);
                    self.release(next);
                    next = after;
                }
                self.release(curr);
            }
            curr = next;
        }
        true
    }

    /// Swap every two adjacent elements.
    pub fn swap_pairs(&mut self) {
        let mut curr = self.links.next(HEAD);
        while !Links::is_sentinel(curr) && !Links::is_sentinel(self.links.next(curr)) {
            let second = self.links.next(curr);
            self.links.move_after(curr, second);
            curr = self.links.next(curr);
        }
    }

    /// Reverse the whole queue in one O(n) pass.
    pub fn reverse(&mut self) {
        let mut curr = self.links.next(HEAD);
        while !Links::is_sentinel(curr) {
            let next = self.links.next(curr);
            self.links.move_after(curr, HEAD);
            curr = next;
        }
    }

    /// Reverse each complete group of `k` consecutive elements; a
    /// trailing partial group is left as is.
    pub fn reverse_k(&mut self, k: usize) {
        if k < 2 {
            return;
        }
        let mut group_prev = HEAD;
        loop {
            // Check that a full group follows.
            let mut probe = self.links.next(group_prev);
            let mut have = 0;
            while !Links::is_sentinel(probe) && have < k {
                probe = self.links.next(probe);
                have += 1;
            }
            if have < k {
                break;
            }

            // The group's first element ends up last; everything after
            // it is moved to the front of the group one at a time.
            let first = self.links.next(group_prev);
            for _ in 1..k {
                let node = self.links.next(first);
                self.links.move_after(node, group_prev);
            }
            group_prev = first;
        }
    }

    /// Remove every element with a strictly smaller value anywhere to
    /// its right; survivors are non-decreasing. Returns the surviving
    /// length.
    pub fn ascend(&mut self) -> usize
    where
        T: Ord,
    {
        self.prune_against_right(Ordering::Greater)
    }

    /// Remove every element with a strictly greater value anywhere to
    /// its right; survivors are non-increasing. Returns the surviving
    /// length.
    pub fn descend(&mut self) -> usize
    where
        T: Ord,
    {
        self.prune_against_right(Ordering::Less)
    }

    /// Right-to-left scan holding the running extremum; `drop_when` is
    /// the ordering of a doomed element against the best kept so far.
    fn prune_against_right(&mut self, drop_when: Ordering) -> usize
    where
        T: Ord,
    {
        if self.links.is_empty() {
            return 0;
        }
        let mut kept = self.links.prev(HEAD);
        let mut curr = self.links.prev(kept);
        while !Links::is_sentinel(curr) {
            let before = self.links.prev(curr);
            if self.value(curr).cmp(self.value(kept)) == drop_when {
                self.release(curr);
            } else {
                kept = curr;
            }
            curr = before;
        }
        self.len
    }

    /// Drain every queue into one and sort it.
    pub fn merge<I>(queues: I, descend: bool) -> Queue<T>
    where
        I: IntoIterator<Item = Queue<T>>,
        T: Ord,
    {
        let mut out = Queue::new();
        for mut queue in queues {
            while let Some(value) = queue.remove_head() {
                out.insert_tail(value);
            }
        }
        out.sort(SortStrategy::BinaryMerge, descend);
        out
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            queue: self,
            curr: self.links.next(HEAD),
        }
    }

    /// Sort ascending by `T`'s ordering, or descending when requested.
    pub fn sort(&mut self, strategy: SortStrategy, descend: bool)
    where
        T: Ord,
    {
        self.sort_by(strategy, descend, T::cmp);
    }

    /// Sort with a caller comparator. The engines are ascending-only
    /// relative to `cmp`; a descending result is produced by a full
    /// reversal afterwards. `Ordering::Greater` means the left operand
    /// must sort after the right; on ties the earlier element stays
    /// first. State for side effects such as comparison counting is
    /// captured by the closure.
    pub fn sort_by<F>(&mut self, strategy: SortStrategy, descend: bool, mut cmp: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        if self.len > 1 {
            let Self { links, values, .. } = self;
            let mut node_cmp = |a: usize, b: usize| match (values[a].as_ref(), values[b].as_ref())
            {
                (Some(x), Some(y)) => cmp(x, y),
                _ => Ordering::Equal,
            };
            match strategy {
                SortStrategy::BinaryMerge => binary_merge::sort(links, &mut node_cmp),
                SortStrategy::AdaptiveRun => adaptive_run::sort(links, &mut node_cmp),
                SortStrategy::DivideConquer => divide_conquer::sort(links, &mut node_cmp),
            }
        }
        if descend {
            self.reverse();
        }
    }

    pub(crate) fn links_mut(&mut self) -> &mut Links {
        &mut self.links
    }

    /// Structural self-check: every successor's predecessor is the node
    /// itself, the circle closes at the sentinel, and the element count
    /// matches. Intended for tests and debugging.
    pub fn is_well_formed(&self) -> bool {
        self.links.is_well_formed(self.len)
    }
}

impl<T> FromIterator<T> for Queue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut queue = Queue::new();
        for value in iter {
            queue.insert_tail(value);
        }
        queue
    }
}

pub struct Iter<'a, T> {
    queue: &'a Queue<T>,
    curr: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if Links::is_sentinel(self.curr) {
            return None;
        }
        let value = self.queue.value(self.curr);
        self.curr = self.queue.links.next(self.curr);
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contents(queue: &Queue<i32>) -> Vec<i32> {
        queue.iter().copied().collect()
    }

    #[test]
    fn insert_and_remove_at_both_ends() {
        let mut queue = Queue::new();
        assert!(queue.is_empty());
        assert_eq!(queue.remove_head(), None);
        assert_eq!(queue.remove_tail(), None);

        queue.insert_tail(2);
        queue.insert_head(1);
        queue.insert_tail(3);
        assert_eq!(queue.len(), 3);
        assert_eq!(contents(&queue), [1, 2, 3]);
        assert!(queue.is_well_formed());

        assert_eq!(queue.remove_head(), Some(1));
        assert_eq!(queue.remove_tail(), Some(3));
        assert_eq!(queue.remove_head(), Some(2));
        assert!(queue.is_empty());
        assert!(queue.is_well_formed());
    }

    #[test]
    fn slots_are_recycled() {
        let mut queue = Queue::new();
        for i in 0..100 {
            queue.insert_tail(i);
        }
        for _ in 0..100 {
            queue.remove_head();
        }
        let slots_before = queue.values.len();
        for i in 0..100 {
            queue.insert_head(i);
        }
        assert_eq!(queue.values.len(), slots_before);
        assert!(queue.is_well_formed());
    }

    #[test]
    fn delete_mid_walks_inward_from_both_ends() {
        let mut queue: Queue<i32> = [1, 2, 3, 4, 5].into_iter().collect();
        assert_eq!(queue.delete_mid(), Some(3));
        assert_eq!(contents(&queue), [1, 2, 4, 5]);

        // even length: the two scans meet on the earlier middle
        assert_eq!(queue.delete_mid(), Some(2));
        assert_eq!(contents(&queue), [1, 4, 5]);

        let mut empty: Queue<i32> = Queue::new();
        assert_eq!(empty.delete_mid(), None);
    }

    #[test]
    fn delete_dup_removes_whole_groups() {
        let mut queue: Queue<i32> = [1, 1, 1, 2, 3, 3, 4].into_iter().collect();
        assert!(queue.delete_dup());
        assert_eq!(contents(&queue), [2, 4]);
        assert!(queue.is_well_formed());

        let mut all_dup: Queue<i32> = [7, 7].into_iter().collect();
        assert!(all_dup.delete_dup());
        assert!(all_dup.is_empty());

        let mut empty: Queue<i32> = Queue::new();
        assert!(!empty.delete_dup());
    }

    #[test]
    fn swap_pairs_swaps_adjacent_elements() {
        let mut queue: Queue<i32> = [1, 2, 3, 4, 5].into_iter().collect();
        queue.swap_pairs();
        assert_eq!(contents(&queue), [2, 1, 4, 3, 5]);
        assert!(queue.is_well_formed());
    }

    #[test]
    fn reverse_reverses() {
        let mut queue: Queue<i32> = (1..=5).collect();
        queue.reverse();
        assert_eq!(contents(&queue), [5, 4, 3, 2, 1]);
        assert!(queue.is_well_formed());
    }

    #[test]
    fn reverse_k_leaves_partial_groups() {
        let mut queue: Queue<i32> = (1..=8).collect();
        queue.reverse_k(3);
        assert_eq!(contents(&queue), [3, 2, 1, 6, 5, 4, 7, 8]);
        assert!(queue.is_well_formed());

        let mut queue: Queue<i32> = (1..=4).collect();
        queue.reverse_k(1);
        assert_eq!(contents(&queue), [1, 2, 3, 4]);
    }

    #[test]
    fn ascend_keeps_non_decreasing_suffix_minima() {
        let mut queue: Queue<i32> = [5, 2, 13, 3, 8].into_iter().collect();
        assert_eq!(queue.ascend(), 3);
        assert_eq!(contents(&queue), [2, 3, 8]);
        assert!(queue.is_well_formed());

        let mut empty: Queue<i32> = Queue::new();
        assert_eq!(empty.ascend(), 0);
    }

    #[test]
    fn descend_keeps_non_increasing_suffix_maxima() {
        let mut queue: Queue<i32> = [5, 2, 13, 3, 8].into_iter().collect();
        assert_eq!(queue.descend(), 2);
        assert_eq!(contents(&queue), [13, 8]);
        assert!(queue.is_well_formed());
    }

    #[test]
    fn merge_concatenates_and_sorts() {
        let a: Queue<i32> = [3, 1, 9].into_iter().collect();
        let b: Queue<i32> = [4, 1, 5].into_iter().collect();
        let c: Queue<i32> = Queue::new();

        let merged = Queue::merge([a, b, c], false);
        assert_eq!(contents(&merged), [1, 1, 3, 4, 5, 9]);
        assert!(merged.is_well_formed());

        let d: Queue<i32> = [2, 7].into_iter().collect();
        let desc = Queue::merge([d], true);
        assert_eq!(contents(&desc), [7, 2]);
    }
}
