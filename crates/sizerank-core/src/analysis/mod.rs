/// Analysis modules -- post-scan algorithms over a result set.

pub mod ranking;

pub use ranking::rank_by_size;
