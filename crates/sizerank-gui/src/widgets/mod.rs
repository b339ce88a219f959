/// UI widgets for SizeRank.

pub mod share_bar;
pub mod status_bar;
pub mod toolbar;
