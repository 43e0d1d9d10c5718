use std::cmp::Ordering;

use super::merge;
use crate::list::{HEAD, Links, NONE};

/// Bottom-up stable merge sort driven by a binary counter.
///
/// The list is detached into a `NONE`-terminated singly linked chain and
/// consumed one element at a time. `pending` is a stack of sorted
/// sublists linked through their head's `prev` field, smallest and
/// newest at the front, with these invariants:
///
/// - each sublist is power-of-two in size, sizes strictly increase
///   front to back, and there are zero to two sublists of each size;
/// - two sublists of size 2^k merge as soon as 2^k following elements
///   have arrived, i.e. whenever `count` reaches an odd multiple of
///   2^k. That is as eager as possible while keeping every later merge
///   at worst 2:1 balanced, which costs fewer comparisons than a fully
///   eager bottom-up schedule.
///
/// Each round merges the pair selected by the lowest clear bit of
/// `count`, then pushes one input element as a size-1 sublist.
pub(crate) fn sort<F>(links: &mut Links, cmp: &mut F)
where
    F: FnMut(usize, usize) -> Ordering,
{
    let mut list = links.next(HEAD);
    if list == links.prev(HEAD) {
        // zero or one elements
        return;
    }

    // Convert to a NONE-terminated singly linked chain.
    let last = links.prev(HEAD);
    links.set_next(last, NONE);

    let mut pending = NONE;
    let mut count: usize = 0;

    loop {
        // Find the least-significant clear bit in count. `tail` is a
        // cursor into the pending stack: NONE addresses the `pending`
        // variable itself, any other value addresses the `prev` field
        // of that node.
        let mut bits = count;
        let mut tail = NONE;
        while bits & 1 == 1 {
            tail = if tail == NONE {
                pending
            } else {
                links.prev(tail)
            };
            bits >>= 1;
        }

        // Do the indicated merge.
        if bits != 0 {
            let a = if tail == NONE {
                pending
            } else {
                links.prev(tail)
            };
            let b = links.prev(a);

            let merged = merge::merge(links, cmp, b, a);
            // Install the merged result in place of the two inputs.
            links.set_prev(merged, links.prev(b));
            if tail == NONE {
                pending = merged;
            } else {
                links.set_prev(tail, merged);
            }
        }

        // Move one element from the input chain onto pending.
        links.set_prev(list, pending);
        pending = list;
        list = links.next(list);
        links.set_next(pending, NONE);
        count += 1;

        if list == NONE {
            break;
        }
    }

    // End of input; merge the pending sublists smallest to largest.
    let mut list = pending;
    let mut pending = links.prev(pending);
    loop {
        let next = links.prev(pending);
        if next == NONE {
            break;
        }
        list = merge::merge(links, cmp, pending, list);
        pending = next;
    }

    // The final merge rebuilds prev links and re-closes the circle.
    merge::merge_final(links, cmp, HEAD, pending, list);
}
