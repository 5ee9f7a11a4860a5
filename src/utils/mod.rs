pub mod links;
pub mod terminal;

pub use links::{row_link, share_link};
pub use terminal::sanitize_cell;
