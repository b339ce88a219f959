/// Platform integration -- interaction with the host desktop.

pub mod reveal;

pub use reveal::{reveal_in_file_browser, reveal_target};
