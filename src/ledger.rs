//! Stock movements. Each item keeps a running quantity while every change
//! is recorded in `AppData::stock_history`, newest first.

use crate::errors::StoreError;
use crate::models::{AppData, HistoryKind, MovementKind, StockHistory, StockItem};
use chrono::{DateTime, Utc};

/// Rounds to whole grams so repeated movements do not accumulate drift.
/// Values too large to scale are already coarser than a gram and pass
/// through unchanged.
pub fn round_kg(kg: f64) -> f64 {
    let grams = kg * 1000.0;
    if !grams.is_finite() {
        return kg;
    }
    grams.round() / 1000.0
}

/// Applies one movement to `item`. Stock is allowed to go negative and
/// amounts are not range checked. Sales are priced at the item's current
/// price.
pub fn apply_movement(
    item: &StockItem,
    amount_kg: f64,
    kind: MovementKind,
    entry_id: String,
    at: DateTime<Utc>,
) -> (StockItem, StockHistory) {
    let (stock, amount_usd) = match kind {
        MovementKind::Add => (item.current_stock_kg + amount_kg, None),
        MovementKind::Sale => (
            item.current_stock_kg - amount_kg,
            Some(amount_kg * item.price_per_kg_usd),
        ),
    };

    let updated = StockItem {
        current_stock_kg: round_kg(stock),
        ..item.clone()
    };
    let entry = StockHistory {
        id: entry_id,
        stock_item_id: item.id.clone(),
        stock_item_name: item.name.clone(),
        date: at,
        kind: kind.into(),
        amount_kg,
        amount_usd,
    };
    (updated, entry)
}

/// Kilograms bought by `amount_usd` at the item's price.
pub fn kg_for_usd(item: &StockItem, amount_usd: f64) -> Result<f64, StoreError> {
    if item.price_per_kg_usd <= 0.0 || !item.price_per_kg_usd.is_finite() {
        return Err(StoreError::InvalidPrice {
            name: item.name.clone(),
            price: item.price_per_kg_usd,
        });
    }
    Ok(amount_usd / item.price_per_kg_usd)
}

impl AppData {
    pub fn stock_item(&self, item_id: &str) -> Option<&StockItem> {
        self.stock_items.iter().find(|item| item.id == item_id)
    }

    /// Registers a new item together with its `initial` history entry.
    pub fn create_stock_item(
        mut self,
        item_id: String,
        entry_id: String,
        name: String,
        initial_stock_kg: f64,
        price_per_kg_usd: f64,
        at: DateTime<Utc>,
    ) -> (Self, StockItem) {
        let item = StockItem {
            id: item_id,
            name,
            current_stock_kg: initial_stock_kg,
            price_per_kg_usd,
        };
        self.stock_history.insert(
            0,
            StockHistory {
                id: entry_id,
                stock_item_id: item.id.clone(),
                stock_item_name: item.name.clone(),
                date: at,
                kind: HistoryKind::Initial,
                amount_kg: initial_stock_kg,
                amount_usd: None,
            },
        );
        self.stock_items.push(item.clone());
        (self, item)
    }

    pub fn record_movement(
        mut self,
        item_id: &str,
        amount_kg: f64,
        kind: MovementKind,
        entry_id: String,
        at: DateTime<Utc>,
    ) -> Result<(Self, StockItem, StockHistory), StoreError> {
        let slot = self
            .stock_items
            .iter_mut()
            .find(|item| item.id == item_id)
            .ok_or_else(|| StoreError::StockItemNotFound(item_id.to_string()))?;
        let (updated, entry) = apply_movement(slot, amount_kg, kind, entry_id, at);
        *slot = updated.clone();
        self.stock_history.insert(0, entry.clone());
        Ok((self, updated, entry))
    }

    /// Records a sale expressed as money taken rather than weight.
    pub fn sell_for_usd(
        self,
        item_id: &str,
        amount_usd: f64,
        entry_id: String,
        at: DateTime<Utc>,
    ) -> Result<(Self, StockItem, StockHistory), StoreError> {
        let item = self
            .stock_item(item_id)
            .ok_or_else(|| StoreError::StockItemNotFound(item_id.to_string()))?;
        let kg = kg_for_usd(item, amount_usd)?;
        self.record_movement(item_id, kg, MovementKind::Sale, entry_id, at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chicken() -> (AppData, StockItem) {
        AppData::default().create_stock_item(
            "stock-1".into(),
            "hist-1".into(),
            "Chicken".into(),
            10.0,
            4.5,
            Utc::now(),
        )
    }

    #[test]
    fn creating_item_writes_initial_entry() {
        let (data, item) = chicken();
        assert_eq!(data.stock_items, vec![item]);
        assert_eq!(data.stock_history.len(), 1);
        let entry = &data.stock_history[0];
        assert_eq!(entry.kind, HistoryKind::Initial);
        assert_eq!(entry.amount_kg, 10.0);
        assert_eq!(entry.amount_usd, None);
    }

    #[test]
    fn sale_for_nine_dollars_sells_two_kilos() {
        let (data, item) = chicken();
        let (data, updated, entry) = data
            .sell_for_usd(&item.id, 9.0, "hist-2".into(), Utc::now())
            .unwrap();

        assert_eq!(updated.current_stock_kg, 8.0);
        assert_eq!(entry.kind, HistoryKind::Sale);
        assert!((entry.amount_kg - 2.0).abs() < 1e-9);
        assert_eq!(entry.amount_usd, Some(9.0));
        assert_eq!(data.stock_history.len(), 2);
        assert_eq!(data.stock_history[0].id, "hist-2");
    }

    #[test]
    fn add_then_sale_returns_to_start() {
        let (data, item) = chicken();
        let (data, _, _) = data
            .record_movement(&item.id, 3.3337, MovementKind::Add, "hist-2".into(), Utc::now())
            .unwrap();
        let (_, after, _) = data
            .record_movement(&item.id, 3.3337, MovementKind::Sale, "hist-3".into(), Utc::now())
            .unwrap();
        assert!((after.current_stock_kg - item.current_stock_kg).abs() <= 0.001);
    }

    #[test]
    fn history_grows_by_one_per_mutation() {
        let (mut data, item) = chicken();
        for step in 0..20 {
            let before = data.stock_history.len();
            let kind = if step % 2 == 0 { MovementKind::Add } else { MovementKind::Sale };
            let (next, _, _) = data
                .record_movement(&item.id, 0.1, kind, format!("hist-{step}"), Utc::now())
                .unwrap();
            data = next;
            assert_eq!(data.stock_history.len(), before + 1);
        }
        assert_eq!(data.stock_history.last().unwrap().kind, HistoryKind::Initial);
    }

    #[test]
    fn stock_rounds_to_grams() {
        let (data, item) = chicken();
        let (_, updated, _) = data
            .record_movement(&item.id, 0.1 + 0.2, MovementKind::Add, "hist-2".into(), Utc::now())
            .unwrap();
        assert_eq!(updated.current_stock_kg, 10.3);
    }

    #[test]
    fn huge_stock_stays_finite() {
        assert_eq!(round_kg(1e306), 1e306);
        let (data, item) = chicken();
        let (_, updated, _) = data
            .record_movement(&item.id, 1e306, MovementKind::Add, "hist-2".into(), Utc::now())
            .unwrap();
        assert!(updated.current_stock_kg.is_finite());
    }

    #[test]
    fn oversold_stock_goes_negative() {
        let (data, item) = chicken();
        let (_, updated, _) = data
            .record_movement(&item.id, 12.5, MovementKind::Sale, "hist-2".into(), Utc::now())
            .unwrap();
        assert_eq!(updated.current_stock_kg, -2.5);
    }

    #[test]
    fn sale_uses_price_at_call_time() {
        let (mut data, item) = chicken();
        data.stock_items[0].price_per_kg_usd = 6.0;
        let (_, _, entry) = data
            .record_movement(&item.id, 1.5, MovementKind::Sale, "hist-2".into(), Utc::now())
            .unwrap();
        assert_eq!(entry.amount_usd, Some(9.0));
    }

    #[test]
    fn zero_price_cannot_convert_money() {
        let (data, _) = AppData::default().create_stock_item(
            "stock-1".into(),
            "hist-1".into(),
            "Offal".into(),
            1.0,
            0.0,
            Utc::now(),
        );
        let err = data
            .sell_for_usd("stock-1", 5.0, "hist-2".into(), Utc::now())
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidPrice { .. }));
    }

    #[test]
    fn unknown_item_is_reported() {
        let err = AppData::default()
            .record_movement("ghost", 1.0, MovementKind::Add, "hist-1".into(), Utc::now())
            .unwrap_err();
        assert_eq!(err, StoreError::StockItemNotFound("ghost".into()));
    }
}
