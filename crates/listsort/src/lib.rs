mod list;
mod queue;
pub mod scramble;
mod sort;

pub use queue::{Iter, Queue};

/// The available engines behind [`Queue::sort`]. All three share one
/// comparator contract, sort ascending relative to it, are stable, and
/// relink nodes in place.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum SortStrategy {
    /// Bottom-up merge sort with binary-counter merge scheduling and at
    /// most two pending runs per power-of-two size.
    BinaryMerge,
    /// Run-detecting merge sort that exploits existing order, with
    /// galloping insertion and a size-invariant merge stack.
    AdaptiveRun,
    /// Iterative halving merge sort on an explicit work stack.
    DivideConquer,
}

pub const ALL_STRATEGIES: [SortStrategy; 3] = [
    SortStrategy::BinaryMerge,
    SortStrategy::AdaptiveRun,
    SortStrategy::DivideConquer,
];

pub fn all_strategies() -> &'static [SortStrategy] {
    &ALL_STRATEGIES
}

pub fn strategy_name(strategy: SortStrategy) -> &'static str {
    match strategy {
        SortStrategy::BinaryMerge => "binary_merge",
        SortStrategy::AdaptiveRun => "adaptive_run",
        SortStrategy::DivideConquer => "divide_conquer",
    }
}
