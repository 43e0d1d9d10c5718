use std::cmp::Ordering;

use super::merge;
use crate::list::{HEAD, Links, NONE};

/// Transient descriptor for one sorted run awaiting merging. The merge
/// stack is a `Vec<Run>`; the slot below a run is its predecessor, so
/// stack depth stays O(log n) under the collapse invariants.
#[derive(Clone, Copy)]
struct Run {
    head: usize,
    len: usize,
}

/// Adaptive run-detecting merge sort.
///
/// Natural runs are detected (descending runs are reversed in place so
/// every stored run is ascending), padded to a minimum length by
/// galloping insertion, and pushed on a merge stack. After every push
/// the stack is collapsed until, for positions counted from the top,
/// `len[-3] > len[-2] + len[-1]` and `len[-2] > len[-1]` hold. On
/// partially ordered input this performs far fewer comparisons than a
/// blind merge schedule.
pub(crate) fn sort<F>(links: &mut Links, cmp: &mut F)
where
    F: FnMut(usize, usize) -> Ordering,
{
    if links.prev(HEAD) == HEAD {
        return;
    }

    let minrun = min_run_length(links.count());

    // Convert to a NONE-terminated singly linked chain.
    let last = links.prev(HEAD);
    links.set_next(last, NONE);

    let mut runs: Vec<Run> = Vec::with_capacity(64);
    let mut list = links.next(HEAD);
    while list != NONE {
        let (run, rest) = find_run(links, cmp, list, minrun);
        runs.push(run);
        merge_collapse(links, cmp, &mut runs);
        list = rest;
    }

    // End of input; imbalance no longer matters.
    merge_force_collapse(links, cmp, &mut runs);

    if runs.len() == 1 {
        merge::build_prev_link(links, HEAD, HEAD, runs[0].head);
        return;
    }
    merge::merge_final(links, cmp, HEAD, runs[0].head, runs[1].head);
}

/// Minimum run length: the top 5 significant bits of `n`, plus one if
/// any bit shifted out below them was set. Balances the insertion cost
/// of padding runs against the number of merges.
fn min_run_length(mut n: usize) -> usize {
    let mut carry = 0;
    while n > 0b1_1111 {
        carry |= n & 1;
        n >>= 1;
    }
    n + carry
}

/// Detect the next natural run starting at `list`, reversing a
/// descending run in place, then pad it to `minrun` elements by
/// galloping insertion. Returns the closed run and the first
/// unconsumed node.
fn find_run<F>(links: &mut Links, cmp: &mut F, mut list: usize, minrun: usize) -> (Run, usize)
where
    F: FnMut(usize, usize) -> Ordering,
{
    let mut len: usize = 1;
    let mut head = list;
    let mut next = links.next(list);

    if next == NONE {
        return (Run { head, len }, NONE);
    }

    if cmp(list, next) == Ordering::Greater {
        // Descending run; reverse the links as we scan. Equal elements
        // terminate the run so that the reversal cannot reorder them.
        let mut prev = NONE;
        loop {
            len += 1;
            links.set_next(list, prev);
            prev = list;
            list = next;
            next = links.next(list);
            head = list;
            if next == NONE || cmp(list, next) != Ordering::Greater {
                break;
            }
        }
        links.set_next(list, prev);
    } else {
        loop {
            len += 1;
            list = next;
            next = links.next(list);
            if next == NONE || cmp(list, next) == Ordering::Greater {
                break;
            }
        }
        links.set_next(list, NONE);
    }

    // Rebuild prev links inside the run; galloping insertion backs off
    // through them.
    let mut curr = head;
    while links.next(curr) != NONE {
        let succ = links.next(curr);
        links.set_prev(succ, curr);
        curr = succ;
    }

    let mut in_node = next;
    while in_node != NONE && len < minrun {
        let safe = links.next(in_node);
        gallop_insert(links, cmp, &mut head, in_node);
        len += 1;
        in_node = safe;
    }

    (Run { head, len }, in_node)
}

/// Insert `node` into the ascending run headed at `*head`.
///
/// The cursor walks forward two nodes at a time to bracket the
/// insertion point, then backs off linearly. A later element always
/// lands after equal-valued ones, preserving stability. Worst case is
/// linear in the run length, but an element belonging near the front
/// costs far fewer comparisons than a full scan.
fn gallop_insert<F>(links: &mut Links, cmp: &mut F, head: &mut usize, node: usize)
where
    F: FnMut(usize, usize) -> Ordering,
{
    if cmp(node, *head) == Ordering::Less {
        // New minimum; becomes the run head.
        links.set_next(node, *head);
        links.set_prev(*head, node);
        *head = node;
        return;
    }

    let mut prev = *head;
    let mut curr = links.next(prev);

    while curr != NONE {
        if cmp(node, curr) != Ordering::Less {
            let one = links.next(curr);
            if one == NONE {
                prev = curr;
                curr = NONE;
                break;
            }
            let two = links.next(one);
            if two == NONE {
                prev = curr;
                curr = one;
            } else {
                prev = one;
                curr = two;
            }
        } else {
            // Overshoot: `prev` was skipped, not compared. Back off one
            // step if the node belongs before it.
            if cmp(node, prev) == Ordering::Less {
                curr = prev;
                prev = links.prev(curr);
            }
            break;
        }
    }

    links.set_next(node, curr);
    links.set_prev(node, prev);
    links.set_next(prev, node);
    if curr != NONE {
        links.set_prev(curr, node);
    }
}

/// Merge the runs at stack positions `at` and `at + 1` (the run above),
/// replacing both entries with the combined run.
fn merge_at<F>(links: &mut Links, cmp: &mut F, runs: &mut Vec<Run>, at: usize)
where
    F: FnMut(usize, usize) -> Ordering,
{
    let a = runs[at];
    let b = runs[at + 1];
    let head = merge::merge(links, cmp, a.head, b.head);
    runs[at] = Run {
        head,
        len: a.len + b.len,
    };
    runs.remove(at + 1);
}

/// Restore the stack invariants after a push. When a violation is
/// found, merge the side that keeps the result closest in size to its
/// new neighbor, which minimizes comparisons in later merges.
fn merge_collapse<F>(links: &mut Links, cmp: &mut F, runs: &mut Vec<Run>)
where
    F: FnMut(usize, usize) -> Ordering,
{
    while runs.len() >= 2 {
        let n = runs.len();
        let top_pair_too_big = n >= 3 && runs[n - 3].len <= runs[n - 2].len + runs[n - 1].len;
        let next_pair_too_big = n >= 4 && runs[n - 4].len <= runs[n - 3].len + runs[n - 2].len;

        if top_pair_too_big || next_pair_too_big {
            if runs[n - 3].len < runs[n - 1].len {
                merge_at(links, cmp, runs, n - 3);
            } else {
                merge_at(links, cmp, runs, n - 2);
            }
        } else if runs[n - 2].len <= runs[n - 1].len {
            merge_at(links, cmp, runs, n - 2);
        } else {
            break;
        }
    }
}

/// Collapse the stack down to at most two runs, always merging the
/// smaller-adjacent pair. The survivors are handed to the final merge.
fn merge_force_collapse<F>(links: &mut Links, cmp: &mut F, runs: &mut Vec<Run>)
where
    F: FnMut(usize, usize) -> Ordering,
{
    while runs.len() >= 3 {
        let n = runs.len();
        if runs[n - 3].len < runs[n - 1].len {
            merge_at(links, cmp, runs, n - 3);
        } else {
            merge_at(links, cmp, runs, n - 2);
        }
    }
}
