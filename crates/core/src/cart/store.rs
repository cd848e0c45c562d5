//! Cart Store

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    num::NonZeroU32,
    str::FromStr,
    sync::Arc,
};

use rust_decimal::Decimal;
use rustc_hash::FxHashSet;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    cart::{errors::CartError, line_item::LineItem},
    catalog::{Salon, Service},
    ids::{SalonUuid, ServiceUuid},
    prompt::ConfirmationPrompt,
    storage::{CART_ITEMS_KEY, CART_SALON_KEY, DurableStore, StorageError},
};

/// Why a persisted cart could not be re-hydrated.
#[derive(Debug, Error)]
enum RestoreError {
    #[error("unable to read persisted cart")]
    Read(#[from] StorageError),

    #[error("malformed items: {0}")]
    Items(#[from] serde_json::Error),

    #[error("service {0} stored twice")]
    DuplicateService(ServiceUuid),

    #[error("items stored without a salon id")]
    MissingSalon,

    #[error("malformed salon id: {0}")]
    SalonId(#[from] uuid::Error),
}

/// Question put to the user before a salon switch wipes the cart.
pub const SALON_SWITCH_MESSAGE: &str =
    "Adding services from a different salon will clear your current cart. Continue?";

/// Result of [`CartStore::add_service`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new line was appended.
    Added,

    /// The service was already in the cart; its quantity went up by one.
    Incremented,

    /// The service belongs to another salon and the user kept the current
    /// cart. Nothing changed.
    Declined,
}

impl AddOutcome {
    /// `true` unless the user declined the salon switch.
    pub fn accepted(self) -> bool {
        !matches!(self, Self::Declined)
    }
}

/// The session's cart: line items from exactly one salon, mirrored to a
/// durable store after every mutation.
pub struct CartStore {
    items: Vec<LineItem>,
    salon_id: Option<SalonUuid>,
    store: Arc<dyn DurableStore>,
    prompt: Arc<dyn ConfirmationPrompt>,
}

impl Debug for CartStore {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("CartStore")
            .field("items", &self.items)
            .field("salon_id", &self.salon_id)
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Create an empty cart without reading the durable store.
    pub fn new(store: Arc<dyn DurableStore>, prompt: Arc<dyn ConfirmationPrompt>) -> Self {
        Self {
            items: Vec::new(),
            salon_id: None,
            store,
            prompt,
        }
    }

    /// Re-hydrate the cart persisted by a previous session.
    ///
    /// Missing or unreadable data yields an empty cart; unreadable entries are
    /// erased so they do not resurface.
    pub fn restore(store: Arc<dyn DurableStore>, prompt: Arc<dyn ConfirmationPrompt>) -> Self {
        let mut cart = Self::new(store, prompt);

        match cart.load() {
            Ok((items, salon_id)) => {
                cart.items = items;
                cart.salon_id = salon_id;

                if cart.items.is_empty() {
                    cart.erase_persisted();
                }

                debug!(lines = cart.items.len(), "restored cart");
            }
            Err(reason) => {
                warn!("discarding persisted cart: {reason}");

                cart.erase_persisted();
            }
        }

        cart
    }

    fn load(&self) -> Result<(Vec<LineItem>, Option<SalonUuid>), RestoreError> {
        let Some(items_text) = self.store.get(CART_ITEMS_KEY)? else {
            return Ok((Vec::new(), None));
        };

        let items: Vec<LineItem> = serde_json::from_str(&items_text)?;

        if items.is_empty() {
            return Ok((items, None));
        }

        let mut seen = FxHashSet::default();

        if let Some(duplicate) = items.iter().find(|item| !seen.insert(item.service_id())) {
            return Err(RestoreError::DuplicateService(duplicate.service_id()));
        }

        let salon_text = self
            .store
            .get(CART_SALON_KEY)?
            .ok_or(RestoreError::MissingSalon)?;

        let salon_id = SalonUuid::from_str(&salon_text)?;

        Ok((items, Some(salon_id)))
    }

    fn erase_persisted(&self) {
        for key in [CART_ITEMS_KEY, CART_SALON_KEY] {
            if let Err(error) = self.store.remove(key) {
                warn!("failed to erase {key}: {error}");
            }
        }
    }

    /// Persist `items` and `salon_id`, then make them the cart's state.
    ///
    /// Nothing in memory changes unless the store accepted the write.
    fn commit(&mut self, items: Vec<LineItem>, salon_id: Option<SalonUuid>) -> Result<(), CartError> {
        let salon_id = salon_id.filter(|_| !items.is_empty());

        match salon_id {
            Some(salon_id) => {
                self.store
                    .set(CART_ITEMS_KEY, &serde_json::to_string(&items)?)?;
                self.store.set(CART_SALON_KEY, &salon_id.to_string())?;
            }
            None => {
                self.store.remove(CART_ITEMS_KEY)?;
                self.store.remove(CART_SALON_KEY)?;
            }
        }

        self.items = items;
        self.salon_id = salon_id;

        Ok(())
    }

    /// Add one unit of `service` from `salon`.
    ///
    /// When the cart already belongs to a different salon the user is asked
    /// whether to start over; declining leaves the cart untouched. On any
    /// error the cart is left as it was.
    ///
    /// # Errors
    ///
    /// - [`CartError::InvalidPrice`]: the service price is not a non-negative decimal.
    /// - [`CartError::InvalidQuantity`]: the line's quantity would overflow.
    /// - [`CartError::Storage`]: the durable store rejected the write.
    pub async fn add_service(
        &mut self,
        service: &Service,
        salon: &Salon,
    ) -> Result<AddOutcome, CartError> {
        let conflict = self.salon_id.is_some_and(|current| current != salon.id);
        let existing = !conflict
            && self
                .items
                .iter()
                .any(|item| item.service_id() == service.id);

        // Parsed before prompting: a bad price must leave the cart untouched.
        let unit_price = if existing {
            None
        } else {
            Some(parse_price(&service.price)?)
        };

        let mut items = if conflict {
            if !self.prompt.ask(SALON_SWITCH_MESSAGE).await {
                debug!(salon = %salon.id, "salon switch declined");

                return Ok(AddOutcome::Declined);
            }

            info!(from = ?self.salon_id, to = %salon.id, "switching cart salon");

            Vec::new()
        } else {
            self.items.clone()
        };

        let outcome = if let Some(item) = items
            .iter_mut()
            .find(|item| item.service_id() == service.id)
        {
            let quantity = item
                .quantity()
                .checked_add(1)
                .ok_or_else(|| CartError::InvalidQuantity(item.quantity().to_string()))?;

            item.set_quantity(quantity);

            AddOutcome::Incremented
        } else {
            let unit_price = match unit_price {
                Some(price) => price,
                None => parse_price(&service.price)?,
            };

            items.push(LineItem::new(service, salon, unit_price));

            AddOutcome::Added
        };

        self.commit(items, Some(salon.id))?;

        debug!(service = %service.id, ?outcome, "added service to cart");

        Ok(outcome)
    }

    /// Remove the line for `service_id`. Emptying the cart also drops its
    /// salon scope.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Storage`] if the durable store rejected the write;
    /// the line is kept in that case.
    pub fn remove_service(&mut self, service_id: ServiceUuid) -> Result<(), CartError> {
        let mut items = self.items.clone();

        items.retain(|item| item.service_id() != service_id);

        if items.len() == self.items.len() {
            return Ok(());
        }

        self.commit(items, self.salon_id)?;

        debug!(service = %service_id, "removed service from cart");

        Ok(())
    }

    /// Set the quantity of the line for `service_id`.
    ///
    /// Zero or negative quantities remove the line. Unknown ids are ignored.
    ///
    /// # Errors
    ///
    /// - [`CartError::InvalidQuantity`]: `quantity` does not fit in a `u32`.
    /// - [`CartError::Storage`]: the durable store rejected the write; the
    ///   old quantity is kept.
    pub fn update_quantity(&mut self, service_id: ServiceUuid, quantity: i64) -> Result<(), CartError> {
        if quantity <= 0 {
            return self.remove_service(service_id);
        }

        let quantity = u32::try_from(quantity)
            .ok()
            .and_then(NonZeroU32::new)
            .ok_or_else(|| CartError::InvalidQuantity(quantity.to_string()))?;

        let mut items = self.items.clone();

        let Some(item) = items
            .iter_mut()
            .find(|item| item.service_id() == service_id)
        else {
            return Ok(());
        };

        item.set_quantity(quantity);

        self.commit(items, self.salon_id)?;

        debug!(service = %service_id, quantity, "updated cart quantity");

        Ok(())
    }

    /// Empty the cart, drop its salon scope and erase both persisted entries.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Storage`] if the durable store rejected the erase;
    /// the cart keeps its lines in that case.
    pub fn clear_cart(&mut self) -> Result<(), CartError> {
        self.commit(Vec::new(), None)?;

        debug!("cleared cart");

        Ok(())
    }

    /// Empty the in-memory cart without touching the durable store.
    pub(crate) fn forget(&mut self) {
        self.items.clear();
        self.salon_id = None;
    }

    /// Sum of `unit_price × quantity` over all lines.
    pub fn get_total(&self) -> Decimal {
        self.items
            .iter()
            .fold(Decimal::ZERO, |total, item| total.saturating_add(item.subtotal()))
    }

    /// Sum of quantities over all lines.
    pub fn get_item_count(&self) -> u64 {
        self.items
            .iter()
            .map(|item| u64::from(item.quantity().get()))
            .sum()
    }

    /// Total appointment length in minutes.
    pub fn total_duration(&self) -> u64 {
        self.items
            .iter()
            .map(|item| u64::from(item.duration_minutes()) * u64::from(item.quantity().get()))
            .sum()
    }

    /// Lines in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// The salon every line belongs to, if the cart has any lines.
    pub fn salon_id(&self) -> Option<SalonUuid> {
        self.salon_id
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Read a raw catalog price as a non-negative decimal.
fn parse_price(raw: &str) -> Result<Decimal, CartError> {
    Decimal::from_str(raw.trim())
        .ok()
        .filter(|price| *price >= Decimal::ZERO)
        .ok_or_else(|| CartError::InvalidPrice(raw.to_string()))
}

/// Parse a quantity typed by the user.
///
/// Only whole, non-negative numbers are accepted; `0` means "remove".
///
/// # Errors
///
/// Returns [`CartError::InvalidQuantity`] for anything else, e.g. `"2.5"`,
/// `"-1"` or `"two"`.
pub fn parse_quantity(text: &str) -> Result<i64, CartError> {
    text.trim()
        .parse::<i64>()
        .ok()
        .filter(|quantity| *quantity >= 0)
        .ok_or_else(|| CartError::InvalidQuantity(text.to_string()))
}
