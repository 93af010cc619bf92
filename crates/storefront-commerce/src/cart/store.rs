//! Shared cart handle and the persistence seams around it.
//!
//! Loading and saving carts belongs to the caller. The engine only defines
//! what a snapshot looks like and guarantees a snapshot never contains a
//! half-applied mutation.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::cart::{Cart, CartItem};
use crate::error::CommerceError;
use crate::ids::{AttributeId, CartItemId, OptionId};
use crate::money::Currency;
use serde::{Deserialize, Serialize};

/// Point-in-time copy of a cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshot {
    /// Cart version the snapshot was taken at.
    #[serde(default)]
    pub version: u64,
    #[serde(default)]
    pub currency: Currency,
    #[serde(default)]
    pub items: Vec<CartItem>,
}

/// Where carts are hydrated from.
pub trait CartSource {
    fn load(&self) -> Result<CartSnapshot, CommerceError>;
}

/// Where carts are persisted to.
pub trait CartSink {
    fn persist(&self, snapshot: &CartSnapshot) -> Result<(), CommerceError>;
}

/// In-process store, holding the last persisted snapshot.
#[derive(Debug, Default)]
pub struct MemoryCartStore {
    snapshot: Mutex<Option<CartSnapshot>>,
    writes: Mutex<u64>,
}

impl MemoryCartStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: CartSnapshot) -> Self {
        Self {
            snapshot: Mutex::new(Some(snapshot)),
            writes: Mutex::new(0),
        }
    }

    pub fn latest(&self) -> Option<CartSnapshot> {
        self.snapshot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of `persist` calls so far.
    pub fn write_count(&self) -> u64 {
        *self.writes.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CartSource for MemoryCartStore {
    fn load(&self) -> Result<CartSnapshot, CommerceError> {
        Ok(self.latest().unwrap_or(CartSnapshot {
            version: 0,
            currency: Currency::default(),
            items: Vec::new(),
        }))
    }
}

impl CartSink for MemoryCartStore {
    fn persist(&self, snapshot: &CartSnapshot) -> Result<(), CommerceError> {
        *self.snapshot.lock().unwrap_or_else(PoisonError::into_inner) = Some(snapshot.clone());
        *self.writes.lock().unwrap_or_else(PoisonError::into_inner) += 1;
        Ok(())
    }
}

/// A cart shared between several callers.
///
/// Mutations run one at a time under a write lock. Readers and persistence
/// only ever see the cart between mutations. Cloning the handle shares the
/// same cart.
#[derive(Debug, Clone, Default)]
pub struct SharedCart {
    cart: Arc<RwLock<Cart>>,
    synced_version: Arc<Mutex<Option<u64>>>,
}

impl SharedCart {
    pub fn new(cart: Cart) -> Self {
        Self {
            cart: Arc::new(RwLock::new(cart)),
            synced_version: Arc::new(Mutex::new(None)),
        }
    }

    /// Load a cart from `source`. The loaded version counts as already synced.
    pub fn hydrate(source: &impl CartSource) -> Result<Self, CommerceError> {
        let cart = Cart::from_snapshot(source.load()?)?;
        let version = cart.version();
        tracing::debug!(version, items = cart.unique_item_count(), "hydrated cart");

        let shared = Self::new(cart);
        *shared.synced() = Some(version);
        Ok(shared)
    }

    /// Run `f` with shared access to the cart.
    pub fn read<R>(&self, f: impl FnOnce(&Cart) -> R) -> R {
        let guard = self.read_guard();
        f(&*guard)
    }

    /// Run `f` with exclusive access to the cart.
    ///
    /// `f` must leave the cart consistent when it returns an error; the cart
    /// methods already do.
    pub fn update<R>(&self, f: impl FnOnce(&mut Cart) -> Result<R, CommerceError>) -> Result<R, CommerceError> {
        let mut guard = self.write_guard();
        f(&mut *guard)
    }

    pub fn set_cart_items(&self, items: Vec<CartItem>) -> Result<(), CommerceError> {
        self.update(|cart| cart.set_cart_items(items))
    }

    pub fn increment_quantity(&self, item_id: &CartItemId) -> Result<CartItem, CommerceError> {
        self.update(|cart| cart.increment_quantity(item_id).cloned())
    }

    pub fn decrement_quantity(&self, item_id: &CartItemId) -> Result<CartItem, CommerceError> {
        self.update(|cart| cart.decrement_quantity(item_id).cloned())
    }

    pub fn set_item_option(
        &self,
        item_id: &CartItemId,
        attribute_id: &AttributeId,
        option_id: &OptionId,
    ) -> Result<CartItem, CommerceError> {
        self.update(|cart| cart.set_item_option(item_id, attribute_id, option_id).cloned())
    }

    pub fn total_in_cents(&self) -> i64 {
        self.read(Cart::total_in_cents)
    }

    pub fn snapshot(&self) -> CartSnapshot {
        self.read(Cart::snapshot)
    }

    /// Persist the current state if it changed since the last sync.
    ///
    /// The lock is held only while the snapshot is copied. Returns whether
    /// anything was written.
    pub fn sync_to(&self, sink: &impl CartSink) -> Result<bool, CommerceError> {
        let snapshot = self.snapshot();
        if *self.synced() == Some(snapshot.version) {
            return Ok(false);
        }

        sink.persist(&snapshot)?;

        let mut synced = self.synced();
        if synced.map_or(true, |v| v < snapshot.version) {
            *synced = Some(snapshot.version);
        }
        tracing::debug!(version = snapshot.version, "cart persisted");
        Ok(true)
    }

    // Mutations validate before writing, so a poisoned lock still guards a
    // consistent cart.
    fn read_guard(&self) -> RwLockReadGuard<'_, Cart> {
        self.cart.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_guard(&self) -> RwLockWriteGuard<'_, Cart> {
        self.cart.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn synced(&self) -> MutexGuard<'_, Option<u64>> {
        self.synced_version
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
