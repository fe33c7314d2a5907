//! Column conversions shared by the repositories.
//!
//! Postgres has no unsigned integers, so amounts are stored as `BIGINT` and
//! quantities as `INTEGER`, and converted at the repository boundary.

use sqlx::{Row, postgres::PgRow};

pub(crate) fn try_get_amount(row: &PgRow, col: &str) -> Result<u64, sqlx::Error> {
    let amount_i64: i64 = row.try_get(col)?;

    u64::try_from(amount_i64).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

pub(crate) fn try_get_quantity(row: &PgRow, col: &str) -> Result<u32, sqlx::Error> {
    let quantity_i32: i32 = row.try_get(col)?;

    u32::try_from(quantity_i32).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

pub(crate) fn amount_to_sql(amount: u64) -> Result<i64, sqlx::Error> {
    i64::try_from(amount).map_err(|e| sqlx::Error::Encode(Box::new(e)))
}

pub(crate) fn quantity_to_sql(quantity: u32) -> Result<i32, sqlx::Error> {
    i32::try_from(quantity).map_err(|e| sqlx::Error::Encode(Box::new(e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_above_bigint_range_is_rejected() {
        assert!(amount_to_sql(u64::MAX).is_err());
        assert_eq!(amount_to_sql(1_000).ok(), Some(1_000));
    }

    #[test]
    fn quantity_above_integer_range_is_rejected() {
        assert!(quantity_to_sql(u32::MAX).is_err());
        assert_eq!(quantity_to_sql(3).ok(), Some(3));
    }
}
