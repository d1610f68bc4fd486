//! # Provider Adapter
//!
//! Turns storage rows and provider JSON payloads into engine values.
//!
//! ## Shape Normalization
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  A joined relation arrives in one of these shapes depending on the      │
//! │  join fan-out:                                                          │
//! │                                                                         │
//! │    "sales": null                    ──►  []                             │
//! │    "sales": { ...one sale... }      ──►  [ {...} ]                      │
//! │    "sales": [ { ... }, { ... } ]    ──►  [ {...}, {...} ]               │
//! │                                                                         │
//! │  normalize_related() flattens all three to a list, so nothing past      │
//! │  this module ever sees the variable shape.                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Unit Cost
//! Rows carry the lot's total purchase price. The engine wants the cost of
//! one unit:
//!
//! ```text
//! unit_cost = purchase_price_total / quantity     (0 when quantity == 0)
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use resell_core::{Article, Sale};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::DbResult;
use crate::repository::{ArticleRow, SaleRow};

// =============================================================================
// Rows
// =============================================================================

/// Cost of one unit of a lot; zero for an empty lot.
pub fn unit_cost(purchase_price_total: f64, quantity: i64) -> f64 {
    if quantity > 0 {
        purchase_price_total / quantity as f64
    } else {
        0.0
    }
}

/// Builds an engine sale from a stored row.
pub fn sale_from_row(row: &SaleRow) -> DbResult<Sale> {
    build_sale(&row.id, row.sale_price, row.sale_date, row.ads_cost)
}

/// Builds an engine article from its row and the rows of its sales.
///
/// ## Errors
/// `DbError::InvalidRecord` when a row holds values the engine rejects
/// (negative amounts, non-finite numbers, empty ids).
pub fn article_from_row(row: &ArticleRow, sales: &[SaleRow]) -> DbResult<Article> {
    let sales = sales
        .iter()
        .map(sale_from_row)
        .collect::<DbResult<Vec<_>>>()?;

    build_article(
        &row.id,
        row.purchase_price_total,
        row.quantity,
        row.purchase_date,
        sales,
    )
}

// =============================================================================
// JSON Payloads
// =============================================================================

/// Flattens a related-record value into a list of records.
///
/// `null` becomes an empty list, a single object becomes a one-element
/// list, and an array is returned with its `null` entries dropped.
pub fn normalize_related(value: Value) -> Vec<Value> {
    match value {
        Value::Null => Vec::new(),
        Value::Array(items) => items.into_iter().filter(|item| !item.is_null()).collect(),
        single => vec![single],
    }
}

#[derive(Debug, Deserialize)]
struct ArticlePayload {
    id: String,
    purchase_price_total: f64,
    quantity: i64,
    #[serde(default)]
    purchase_date: Option<NaiveDate>,
    #[serde(default)]
    sales: Value,
}

#[derive(Debug, Deserialize)]
struct SalePayload {
    id: String,
    sale_price: f64,
    sale_date: DateTime<Utc>,
    #[serde(default)]
    ads_cost: Option<f64>,
}

/// Parses a provider payload of articles with their joined sales.
///
/// The top level may itself be a single article object or an array of
/// them. Unknown fields are ignored.
///
/// ## Example
/// ```rust
/// use resell_db::adapter::articles_from_json;
///
/// let payload = r#"{
///     "id": "a-1",
///     "purchase_price_total": 30.0,
///     "quantity": 3,
///     "sales": { "id": "s-1", "sale_price": 25.0, "sale_date": "2026-03-02T10:00:00Z" }
/// }"#;
///
/// let articles = articles_from_json(payload).unwrap();
/// assert_eq!(articles[0].unit_cost().amount(), 10.0);
/// assert_eq!(articles[0].sales().len(), 1);
/// ```
pub fn articles_from_json(payload: &str) -> DbResult<Vec<Article>> {
    let root: Value = serde_json::from_str(payload)?;

    normalize_related(root)
        .into_iter()
        .map(article_from_value)
        .collect()
}

fn article_from_value(value: Value) -> DbResult<Article> {
    let payload: ArticlePayload = serde_json::from_value(value)?;

    let sales = normalize_related(payload.sales)
        .into_iter()
        .map(|value| {
            let sale: SalePayload = serde_json::from_value(value)?;
            build_sale(&sale.id, sale.sale_price, sale.sale_date, sale.ads_cost)
        })
        .collect::<DbResult<Vec<_>>>()?;

    build_article(
        &payload.id,
        payload.purchase_price_total,
        payload.quantity,
        payload.purchase_date,
        sales,
    )
}

// =============================================================================
// Shared Construction
// =============================================================================

fn build_sale(
    id: &str,
    sale_price: f64,
    sale_date: DateTime<Utc>,
    ads_cost: Option<f64>,
) -> DbResult<Sale> {
    let sale = Sale::new(id, sale_price, sale_date)?;
    match ads_cost {
        Some(cost) => Ok(sale.with_ads_cost(cost)?),
        None => Ok(sale),
    }
}

fn build_article(
    id: &str,
    purchase_price_total: f64,
    quantity: i64,
    purchase_date: Option<NaiveDate>,
    sales: Vec<Sale>,
) -> DbResult<Article> {
    let mut article = Article::new(id, unit_cost(purchase_price_total, quantity), quantity)?;
    if let Some(date) = purchase_date {
        article = article.with_purchase_date(date);
    }

    if sales.len() as i64 > quantity {
        warn!(
            article_id = %id,
            quantity,
            sold = sales.len(),
            "Article has more sales than units"
        );
    }
    debug!(article_id = %id, sales = sales.len(), "Article normalized");

    Ok(article.with_sales(sales))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use chrono::TimeZone;
    use resell_core::ValidationError;
    use serde_json::json;

    fn article_row(total: f64, quantity: i64) -> ArticleRow {
        ArticleRow::new("user-1", "Hoodie", total, quantity, None)
    }

    #[test]
    fn test_unit_cost() {
        assert_eq!(unit_cost(30.0, 3), 10.0);
        assert_eq!(unit_cost(30.0, 0), 0.0);
    }

    #[test]
    fn test_article_from_row() {
        let row = article_row(40.0, 4);
        let when = Utc.with_ymd_and_hms(2026, 1, 5, 12, 0, 0).unwrap();
        let sales = vec![SaleRow::new(&row.id, "user-1", 25.0, when, Some(1.0))];

        let article = article_from_row(&row, &sales).unwrap();
        assert_eq!(article.id(), row.id);
        assert_eq!(article.unit_cost().amount(), 10.0);
        assert_eq!(article.quantity(), 4);
        assert_eq!(article.sales()[0].ads_cost().amount(), 1.0);
    }

    #[test]
    fn test_empty_lot_has_zero_unit_cost() {
        let article = article_from_row(&article_row(25.0, 0), &[]).unwrap();
        assert!(article.unit_cost().is_zero());
    }

    #[test]
    fn test_oversold_rows_are_accepted() {
        let row = article_row(10.0, 1);
        let when = Utc.with_ymd_and_hms(2026, 1, 5, 12, 0, 0).unwrap();
        let sales = vec![
            SaleRow::new(&row.id, "user-1", 15.0, when, None),
            SaleRow::new(&row.id, "user-1", 15.0, when, None),
        ];

        let article = article_from_row(&row, &sales).unwrap();
        assert_eq!(article.sales().len(), 2);
    }

    #[test]
    fn test_invalid_row_is_rejected() {
        let err = article_from_row(&article_row(f64::NAN, 2), &[]).unwrap_err();
        assert!(matches!(
            err,
            DbError::InvalidRecord(ValidationError::NotFinite { .. })
        ));
    }

    #[test]
    fn test_normalize_related_shapes() {
        assert!(normalize_related(Value::Null).is_empty());
        assert_eq!(normalize_related(json!({"id": "s"})), vec![json!({"id": "s"})]);
        assert_eq!(
            normalize_related(json!([{"id": "a"}, null, {"id": "b"}])),
            vec![json!({"id": "a"}), json!({"id": "b"})]
        );
    }

    #[test]
    fn test_articles_from_json_array_and_nested_shapes() {
        let payload = json!([
            {
                "id": "single",
                "purchase_price_total": 20.0,
                "quantity": 2,
                "purchase_date": "2026-02-01",
                "sales": { "id": "s1", "sale_price": 18.0, "sale_date": "2026-02-03T09:00:00Z" }
            },
            {
                "id": "many",
                "purchase_price_total": 9.0,
                "quantity": 3,
                "sales": [
                    { "id": "s2", "sale_price": 5.0, "sale_date": "2026-02-04T09:00:00Z", "ads_cost": 0.5 },
                    { "id": "s3", "sale_price": 6.0, "sale_date": "2026-02-05T09:00:00Z" }
                ]
            },
            { "id": "unsold", "purchase_price_total": 4.0, "quantity": 1, "sales": null }
        ])
        .to_string();

        let articles = articles_from_json(&payload).unwrap();
        assert_eq!(articles.len(), 3);
        assert_eq!(articles[0].sales().len(), 1);
        assert_eq!(
            articles[0].purchase_date(),
            NaiveDate::from_ymd_opt(2026, 2, 1)
        );
        assert_eq!(articles[1].sales().len(), 2);
        assert_eq!(articles[1].unit_cost().amount(), 3.0);
        assert!(articles[2].sales().is_empty());
    }

    #[test]
    fn test_malformed_payload() {
        let err = articles_from_json(r#"{"id": "a"}"#).unwrap_err();
        assert!(matches!(err, DbError::InvalidPayload(_)));

        let err = articles_from_json("not json").unwrap_err();
        assert!(matches!(err, DbError::InvalidPayload(_)));
    }

    #[test]
    fn test_negative_sale_price_in_payload() {
        let payload = r#"{
            "id": "a",
            "purchase_price_total": 10.0,
            "quantity": 1,
            "sales": [{ "id": "s", "sale_price": -1.0, "sale_date": "2026-02-05T09:00:00Z" }]
        }"#;
        let err = articles_from_json(payload).unwrap_err();
        assert!(matches!(
            err,
            DbError::InvalidRecord(ValidationError::Negative { .. })
        ));
    }
}
