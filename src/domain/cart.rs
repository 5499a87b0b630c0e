//! The pharmacy shopping cart.
//!
//! The cart is an ordered list of [`CartLine`]s keyed by medicine id: there is
//! at most one line per medicine, and adding a medicine that is already in the
//! cart bumps its quantity instead of adding a second line. The total is
//! never cached; it is recomputed from the lines every time it is read.

use std::num::NonZeroU32;

use serde::Serialize;

use crate::domain::{Medicine, MedicineId, Rupees};

/// One row of the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLine {
    /// The medicine this line is for.
    pub id: MedicineId,
    /// Medicine name at the time it was added.
    pub name: String,
    /// Unit price at the time it was added.
    pub price: Rupees,
    /// Number of units.
    pub qty: NonZeroU32,
}

impl CartLine {
    fn new(medicine: &Medicine) -> Self {
        Self {
            id: medicine.id.clone(),
            name: medicine.name.clone(),
            price: medicine.price,
            qty: NonZeroU32::MIN,
        }
    }

    /// Price multiplied by quantity.
    #[must_use]
    pub fn subtotal(&self) -> Rupees {
        self.price * self.qty.get()
    }
}

/// An ordered collection of cart lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Adds one unit of `medicine`, returning the affected line.
    pub fn add(&mut self, medicine: &Medicine) -> &CartLine {
        if let Some(index) = self.position(&medicine.id) {
            let line = &mut self.lines[index];
            line.qty = line.qty.saturating_add(1);
            tracing::debug!("Incremented {} to {}", line.id, line.qty);
            &self.lines[index]
        } else {
            self.lines.push(CartLine::new(medicine));
            tracing::debug!("Added {} to cart", medicine.id);
            &self.lines[self.lines.len() - 1]
        }
    }

    /// Removes the line for `id`, if there is one.
    ///
    /// Removing a medicine that is not in the cart is not an error.
    pub fn remove(&mut self, id: &MedicineId) -> Option<CartLine> {
        self.position(id).map(|index| self.lines.remove(index))
    }

    /// Sum of `price * qty` over every line.
    #[must_use]
    pub fn total(&self) -> Rupees {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// Empties the cart, returning the lines it held.
    pub fn take(&mut self) -> Vec<CartLine> {
        std::mem::take(&mut self.lines)
    }

    /// The lines, in the order they were first added.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of distinct medicines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn position(&self, id: &MedicineId) -> Option<usize> {
        self.lines.iter().position(|line| &line.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn medicine(id: &str, price: u64) -> Medicine {
        Medicine {
            id: MedicineId::new(id),
            name: format!("Medicine {id}"),
            usage: "Testing".to_string(),
            price: Rupees::new(price),
            stock: 10,
        }
    }

    #[test]
    fn repeated_add_increments_quantity() {
        let mut cart = Cart::default();
        let paracetamol = medicine("M-101", 25);

        cart.add(&paracetamol);
        let line = cart.add(&paracetamol).clone();

        assert_eq!(cart.len(), 1);
        assert_eq!(line.qty.get(), 2);
        assert_eq!(line.id, paracetamol.id);
    }

    #[test]
    fn total_is_sum_of_subtotals() {
        let mut cart = Cart::default();
        let paracetamol = medicine("M-101", 25);
        let cetirizine = medicine("M-103", 18);

        cart.add(&paracetamol);
        cart.add(&cetirizine);
        cart.add(&paracetamol);

        assert_eq!(cart.total(), Rupees::new(68));
    }

    #[test]
    fn total_follows_every_mutation() {
        let mut cart = Cart::default();
        let paracetamol = medicine("M-101", 25);
        let cetirizine = medicine("M-103", 18);

        cart.add(&paracetamol);
        assert_eq!(cart.total(), Rupees::new(25));
        cart.add(&cetirizine);
        assert_eq!(cart.total(), Rupees::new(43));
        cart.remove(&paracetamol.id);
        assert_eq!(cart.total(), Rupees::new(18));
        cart.take();
        assert_eq!(cart.total(), Rupees::ZERO);
    }

    #[test]
    fn lines_keep_insertion_order() {
        let mut cart = Cart::default();
        for id in ["M-103", "M-101", "M-105", "M-101"] {
            cart.add(&medicine(id, 1));
        }

        let ids: Vec<_> = cart.lines().iter().map(|line| line.id.as_str()).collect();
        assert_eq!(ids, ["M-103", "M-101", "M-105"]);
    }

    #[test]
    fn removing_absent_id_is_a_no_op() {
        let mut cart = Cart::default();
        cart.add(&medicine("M-101", 25));
        let before = cart.clone();

        assert!(cart.remove(&MedicineId::new("M-999")).is_none());
        assert_eq!(cart, before);
    }

    #[test]
    fn take_empties_the_cart() {
        let mut cart = Cart::default();
        cart.add(&medicine("M-101", 25));

        let lines = cart.take();

        assert_eq!(lines.len(), 1);
        assert!(cart.is_empty());
    }
}
