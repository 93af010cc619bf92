//! Shopping cart module.
//!
//! Contains the cart item, the cart collection, pricing, and the shared
//! handle used when several surfaces touch one cart.

#[allow(clippy::module_inception)]
mod cart;
mod item;
mod pricing;
mod store;

pub use cart::Cart;
pub use item::CartItem;
pub use pricing::{CartPricing, LineItemPricing};
pub use store::{CartSink, CartSnapshot, CartSource, MemoryCartStore, SharedCart};
