//! Cart Accumulator
//!
//! Pure in-session state; never touches storage. Menu item resolution
//! (existence, availability, tenant) happens before a line reaches the
//! cart, so the accumulator only deals with lines it can trust.

use serde::{Deserialize, Serialize};
use shared::{AppError, AppResult, ErrorCode};

/// One selected menu item within the cart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    /// Menu item reference, "menu_item:key" form
    pub menu_item: String,
    /// Name snapshot at add time
    pub name: String,
    /// Price snapshot at add time
    pub price: f64,
    pub quantity: i32,
    #[serde(default)]
    pub notes: String,
    pub subtotal: f64,
}

/// Per-session cart
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    pub items: Vec<CartItem>,
    pub total: f64,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add a resolved menu item to the cart
    ///
    /// Lines are identified by menu item reference alone: adding an item
    /// that is already present increments its quantity and overwrites its
    /// notes rather than creating a second line.
    pub fn add_item(
        &mut self,
        menu_item: &str,
        name: &str,
        price: f64,
        quantity: i32,
        notes: &str,
    ) -> AppResult<()> {
        if quantity <= 0 {
            return Err(AppError::validation("Quantity must be positive"));
        }

        match self.items.iter_mut().find(|i| i.menu_item == menu_item) {
            Some(line) => {
                line.quantity += quantity;
                line.notes = notes.to_string();
                line.subtotal = line.price * line.quantity as f64;
            }
            None => {
                self.items.push(CartItem {
                    menu_item: menu_item.to_string(),
                    name: name.to_string(),
                    price,
                    quantity,
                    notes: notes.to_string(),
                    subtotal: price * quantity as f64,
                });
            }
        }

        self.recompute_total();
        Ok(())
    }

    /// Change the quantity of an existing line
    ///
    /// A quantity of zero or below removes the line entirely. An absent
    /// line is an error, not a silent no-op.
    pub fn update_item(&mut self, menu_item: &str, quantity: i32) -> AppResult<()> {
        let index = self
            .items
            .iter()
            .position(|i| i.menu_item == menu_item)
            .ok_or_else(|| AppError::new(ErrorCode::CartItemNotFound))?;

        if quantity <= 0 {
            self.items.remove(index);
        } else {
            let line = &mut self.items[index];
            line.quantity = quantity;
            line.subtotal = line.price * quantity as f64;
        }

        self.recompute_total();
        Ok(())
    }

    /// Discard all lines
    pub fn clear(&mut self) {
        self.items.clear();
        self.total = 0.0;
    }

    fn recompute_total(&mut self) {
        self.total = self.items.iter().map(|i| i.subtotal).sum();
    }
}
