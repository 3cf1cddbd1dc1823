pub mod errors;
pub mod gift;

pub use gift::{Gift, GiftInput};
