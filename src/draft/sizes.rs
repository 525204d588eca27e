use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// One editable size row. All fields are held as raw form strings; numeric
/// coercion happens at payload construction, not here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SizeRowDraft {
    pub size: String,
    pub price: String,
    pub dummy_price: String,
    pub stock: String,
}

/// Addressable field of a size row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeField {
    Size,
    Price,
    DummyPrice,
    Stock,
}

/// Markup applied when deriving a default "was" price from the first price
/// entry.
const DUMMY_PRICE_MARKUP: Decimal = dec!(1.2);

/// Ordered size rows of a draft, never fewer than one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeRows {
    rows: Vec<SizeRowDraft>,
}

impl Default for SizeRows {
    fn default() -> Self {
        Self {
            rows: vec![SizeRowDraft::default()],
        }
    }
}

impl SizeRows {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing rows (populate-for-edit path). An empty input
    /// still yields one blank row.
    pub fn from_rows(rows: Vec<SizeRowDraft>) -> Self {
        if rows.is_empty() {
            Self::default()
        } else {
            Self { rows }
        }
    }

    pub fn rows(&self) -> &[SizeRowDraft] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always false; the editor never lets the row count reach zero.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Set one field of one row. Setting a price while the row's dummy
    /// price is still empty derives `dummy_price = round(price * 1.2)`; an
    /// already-set dummy price is never overwritten.
    pub fn update_field(&mut self, index: usize, field: SizeField, value: impl Into<String>) {
        let Some(row) = self.rows.get_mut(index) else {
            return;
        };
        let value = value.into();
        match field {
            SizeField::Size => row.size = value,
            SizeField::Price => {
                row.price = value;
                if row.dummy_price.trim().is_empty() {
                    if let Ok(price) = row.price.trim().parse::<Decimal>() {
                        row.dummy_price = (price * DUMMY_PRICE_MARKUP).round().normalize().to_string();
                    }
                }
            }
            SizeField::DummyPrice => row.dummy_price = value,
            SizeField::Stock => row.stock = value,
        }
    }

    pub fn add_row(&mut self) {
        self.rows.push(SizeRowDraft::default());
    }

    /// Remove a row; refuses to drop below one row.
    pub fn remove_row(&mut self, index: usize) {
        if self.rows.len() <= 1 || index >= self.rows.len() {
            return;
        }
        self.rows.remove(index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_one_blank_row() {
        let rows = SizeRows::new();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows.rows()[0], SizeRowDraft::default());
    }

    #[test]
    fn first_price_entry_derives_dummy_price() {
        let mut rows = SizeRows::new();
        rows.update_field(0, SizeField::Price, "100");
        assert_eq!(rows.rows()[0].dummy_price, "120");
    }

    #[test]
    fn existing_dummy_price_is_not_rederived() {
        let mut rows = SizeRows::new();
        rows.update_field(0, SizeField::Price, "100");
        rows.update_field(0, SizeField::Price, "200");
        assert_eq!(rows.rows()[0].dummy_price, "120");
    }

    #[test]
    fn explicit_dummy_price_survives_price_edits() {
        let mut rows = SizeRows::new();
        rows.update_field(0, SizeField::DummyPrice, "999");
        rows.update_field(0, SizeField::Price, "100");
        assert_eq!(rows.rows()[0].dummy_price, "999");
    }

    #[test]
    fn unparseable_price_skips_derivation() {
        let mut rows = SizeRows::new();
        rows.update_field(0, SizeField::Price, "abc");
        assert_eq!(rows.rows()[0].dummy_price, "");
    }

    #[test]
    fn fractional_price_rounds_derived_value() {
        let mut rows = SizeRows::new();
        rows.update_field(0, SizeField::Price, "99.99");
        // 99.99 * 1.2 = 119.988, rounded to 120
        assert_eq!(rows.rows()[0].dummy_price, "120");
    }

    #[test]
    fn remove_row_never_drops_below_one() {
        let mut rows = SizeRows::new();
        rows.add_row();
        rows.add_row();
        assert_eq!(rows.len(), 3);
        rows.remove_row(1);
        assert_eq!(rows.len(), 2);
        rows.remove_row(0);
        assert_eq!(rows.len(), 1);
        rows.remove_row(0);
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn update_out_of_range_is_ignored() {
        let mut rows = SizeRows::new();
        rows.update_field(5, SizeField::Size, "M");
        assert_eq!(rows.rows()[0].size, "");
    }
}
