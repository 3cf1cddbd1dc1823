pub mod gift_store;

pub use gift_store::GiftStore;
