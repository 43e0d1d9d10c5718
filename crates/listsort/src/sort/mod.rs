pub(crate) mod adaptive_run;
pub(crate) mod binary_merge;
pub(crate) mod divide_conquer;
pub(crate) mod merge;
