//! Grid storage, the cursor-carry click protocol, and the trade economy

pub mod grid;
pub mod manager;
pub mod shop;
pub mod stack;
pub mod wallet;

pub use grid::Grid;
pub use manager::{GridId, InventoryManager, ViewState};
pub use shop::ShopGrid;
pub use stack::Stack;
pub use wallet::Wallet;
