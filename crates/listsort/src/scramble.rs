//! Input scramblers for exercising the sort engines: a uniform shuffle
//! and an adversarial ordering that maximizes merge comparisons.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::list::{HEAD, Links, NONE};
use crate::queue::Queue;
use crate::sort::merge;

/// Fisher-Yates shuffle of the element order. Only links are rewritten;
/// payloads stay in their slots.
pub fn shuffle<T, R: Rng + ?Sized>(queue: &mut Queue<T>, rng: &mut R) {
    let links = queue.links_mut();

    let mut order = Vec::new();
    let mut curr = links.next(HEAD);
    while curr != HEAD {
        order.push(curr);
        curr = links.next(curr);
    }
    if order.len() < 2 {
        return;
    }

    order.shuffle(rng);

    let mut prev = HEAD;
    for &node in &order {
        links.set_next(prev, node);
        links.set_prev(node, prev);
        prev = node;
    }
    links.set_next(prev, HEAD);
    links.set_prev(HEAD, prev);
}

/// Reorganize a sorted queue into the worst case for the balanced
/// bottom-up merge schedule: recursively split alternating positions
/// apart and concatenate the halves. Every later merge of the result
/// interleaves perfectly, so each merge of two m-element runs costs
/// 2m - 1 comparisons; on a power-of-two length the total reaches
/// n·lg n - n + 1.
pub fn worst_case<T>(queue: &mut Queue<T>) {
    let links = queue.links_mut();
    if links.is_empty() || links.is_singular() {
        return;
    }

    links.set_next(links.prev(HEAD), NONE);
    let first = links.next(HEAD);
    let scrambled = split_interleave(links, first);
    merge::build_prev_link(links, HEAD, HEAD, scrambled);
}

/// Split a NONE-terminated chain into odd and even positions, recurse
/// on both, and chain the results left then right. Recursion depth is
/// logarithmic in the chain length.
fn split_interleave(links: &mut Links, head: usize) -> usize {
    if head == NONE || links.next(head) == NONE {
        return head;
    }

    let mut left = NONE;
    let mut left_tail = NONE;
    let mut right = NONE;
    let mut right_tail = NONE;

    let mut curr = head;
    let mut odd = true;
    while curr != NONE {
        let next = links.next(curr);
        if odd {
            append(links, &mut left, &mut left_tail, curr);
        } else {
            append(links, &mut right, &mut right_tail, curr);
        }
        odd = !odd;
        curr = next;
    }
    if left_tail != NONE {
        links.set_next(left_tail, NONE);
    }
    if right_tail != NONE {
        links.set_next(right_tail, NONE);
    }

    let left = split_interleave(links, left);
    let right = split_interleave(links, right);
    concat(links, left, right)
}

fn append(links: &mut Links, head: &mut usize, tail: &mut usize, node: usize) {
    if *tail == NONE {
        *head = node;
    } else {
        links.set_next(*tail, node);
    }
    *tail = node;
}

fn concat(links: &mut Links, a: usize, b: usize) -> usize {
    if a == NONE {
        return b;
    }
    let mut tail = a;
    while links.next(tail) != NONE {
        tail = links.next(tail);
    }
    links.set_next(tail, b);
    a
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn shuffle_permutes_without_losing_elements() {
        let mut queue: Queue<u32> = (0..200).collect();
        let mut rng = StdRng::seed_from_u64(0x5EED_2026);
        shuffle(&mut queue, &mut rng);

        assert!(queue.is_well_formed());
        let mut seen: Vec<u32> = queue.iter().copied().collect();
        assert_ne!(seen, (0..200).collect::<Vec<u32>>());
        seen.sort();
        assert_eq!(seen, (0..200).collect::<Vec<u32>>());
    }

    #[test]
    fn shuffle_ignores_trivial_queues() {
        let mut queue: Queue<u32> = [9].into_iter().collect();
        let mut rng = StdRng::seed_from_u64(1);
        shuffle(&mut queue, &mut rng);
        assert_eq!(queue.iter().copied().collect::<Vec<u32>>(), [9]);
        assert!(queue.is_well_formed());
    }

    #[test]
    fn worst_case_is_a_permutation() {
        let mut queue: Queue<u32> = (0..64).collect();
        worst_case(&mut queue);

        assert!(queue.is_well_formed());
        let mut seen: Vec<u32> = queue.iter().copied().collect();
        assert_ne!(seen, (0..64).collect::<Vec<u32>>());
        seen.sort();
        assert_eq!(seen, (0..64).collect::<Vec<u32>>());
    }

    #[test]
    fn worst_case_of_four_interleaves_halves() {
        let mut queue: Queue<u32> = (1..=4).collect();
        worst_case(&mut queue);
        assert_eq!(queue.iter().copied().collect::<Vec<u32>>(), [1, 3, 2, 4]);
    }
}
