use crate::model::OrderCode;
use chrono::{DateTime, Utc};

/// Builds the order code for an order placed at `at`.
///
/// `ORD-` + UTC date as `YYMMDD` + `-` + the last six digits of the epoch milliseconds,
/// zero-padded. Two orders placed in the same millisecond get the same code; the order
/// store treats the code as a unique key and rejects the second one.
///
/// The date is always the UTC calendar date, whatever the host's local time zone.
pub fn order_code(at: DateTime<Utc>) -> OrderCode {
    let millis = at.timestamp_millis().rem_euclid(1_000_000);
    OrderCode(format!("ORD-{}-{millis:06}", at.format("%y%m%d")))
}
