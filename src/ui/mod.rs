//! Screen layout pieces.
//!
//! - [`viewport`]: Scroll position and visible range management
//! - [`gutter`]: Line-number column
//! - [`status`]: Title bar, status bar and prompts

pub mod gutter;
pub mod status;
pub mod viewport;
