use std::cmp::Ordering;

use crate::list::{Links, NONE};

/// Route a forward link either into the local chain head or into the
/// `next` field of `tail`. Emulates the pointer-to-pointer tail cursor
/// of the classic list merge.
#[inline]
fn link_next(links: &mut Links, head: &mut usize, tail: usize, to: usize) {
    if tail == NONE {
        *head = to;
    } else {
        links.set_next(tail, to);
    }
}

/// Merge two sorted `NONE`-terminated chains into one.
///
/// The result is in the intermediate format used between merge passes:
/// `NONE`-terminated, `prev` fields not maintained. On ties the node
/// from `a` is taken, which is what keeps the sort stable; `a` must be
/// the chain whose elements came earlier in the input.
pub(crate) fn merge<F>(links: &mut Links, cmp: &mut F, mut a: usize, mut b: usize) -> usize
where
    F: FnMut(usize, usize) -> Ordering,
{
    let mut head = NONE;
    let mut tail = NONE;

    loop {
        if cmp(a, b) != Ordering::Greater {
            link_next(links, &mut head, tail, a);
            tail = a;
            a = links.next(a);
            if a == NONE {
                link_next(links, &mut head, tail, b);
                break;
            }
        } else {
            link_next(links, &mut head, tail, b);
            tail = b;
            b = links.next(b);
            if b == NONE {
                link_next(links, &mut head, tail, a);
                break;
            }
        }
    }
    head
}

/// Combine the final merge with restoration of the circular doubly
/// linked structure. Duplicates the loop of [`merge`], but saves a
/// separate O(n) prev-link pass.
///
/// The remainder loop invokes the comparator on a node against itself
/// every 256 iterations. That call is not a comparison; it gives the
/// caller's comparator a periodic checkpoint when the merge is highly
/// unbalanced (e.g. already-sorted input) and the loop runs for a long
/// time without consulting it.
pub(crate) fn merge_final<F>(links: &mut Links, cmp: &mut F, head: usize, mut a: usize, mut b: usize)
where
    F: FnMut(usize, usize) -> Ordering,
{
    let mut tail = head;

    loop {
        if cmp(a, b) != Ordering::Greater {
            links.set_next(tail, a);
            links.set_prev(a, tail);
            tail = a;
            a = links.next(a);
            if a == NONE {
                break;
            }
        } else {
            links.set_next(tail, b);
            links.set_prev(b, tail);
            tail = b;
            b = links.next(b);
            if b == NONE {
                b = a;
                break;
            }
        }
    }

    // Finish linking the remainder chain onto tail.
    links.set_next(tail, b);
    let mut count: u8 = 0;
    loop {
        count = count.wrapping_add(1);
        if count == 0 {
            cmp(b, b);
        }
        links.set_prev(b, tail);
        tail = b;
        b = links.next(b);
        if b == NONE {
            break;
        }
    }

    links.set_next(tail, head);
    links.set_prev(head, tail);
}

/// Rebuild `prev` links along a sorted `NONE`-terminated chain and close
/// the circle at the sentinel. Used when a single chain survives and no
/// final merge is needed.
pub(crate) fn build_prev_link(links: &mut Links, head: usize, mut tail: usize, mut list: usize) {
    links.set_next(tail, list);
    loop {
        links.set_prev(list, tail);
        tail = list;
        list = links.next(list);
        if list == NONE {
            break;
        }
    }
    links.set_next(tail, head);
    links.set_prev(head, tail);
}
