use std::cmp::Ordering;

use super::merge;
use crate::list::{HEAD, Links, NONE};

enum Task {
    Split { head: usize, len: usize },
    Merge,
}

/// Halving merge sort over the detached chain.
///
/// The classic recursive divide-and-conquer formulation, run on an
/// explicit task stack so depth stays bounded on large lists. Sorted
/// halves accumulate on an output stack; a `Merge` task combines the
/// top two. Shares the stable merge primitive with the other engines,
/// so ties keep input order here as well.
pub(crate) fn sort<F>(links: &mut Links, cmp: &mut F)
where
    F: FnMut(usize, usize) -> Ordering,
{
    if links.is_empty() || links.is_singular() {
        return;
    }

    // Convert to a NONE-terminated singly linked chain.
    let last = links.prev(HEAD);
    links.set_next(last, NONE);
    let first = links.next(HEAD);

    let mut len = 0;
    let mut curr = first;
    while curr != NONE {
        len += 1;
        curr = links.next(curr);
    }

    let mut tasks = vec![Task::Split { head: first, len }];
    let mut sorted: Vec<usize> = Vec::new();

    while let Some(task) = tasks.pop() {
        match task {
            Task::Split { head, len } if len <= 1 => sorted.push(head),
            Task::Split { head, len } => {
                let half = len / 2;
                let mut cut = head;
                for _ in 1..half {
                    cut = links.next(cut);
                }
                let right = links.next(cut);
                links.set_next(cut, NONE);

                tasks.push(Task::Merge);
                tasks.push(Task::Split {
                    head: right,
                    len: len - half,
                });
                tasks.push(Task::Split { head, len: half });
            }
            Task::Merge => {
                if let (Some(right), Some(left)) = (sorted.pop(), sorted.pop()) {
                    sorted.push(merge::merge(links, cmp, left, right));
                }
            }
        }
    }

    if let Some(chain) = sorted.pop() {
        merge::build_prev_link(links, HEAD, HEAD, chain);
    }
}
