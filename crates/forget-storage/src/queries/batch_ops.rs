//! All-or-nothing execution of a [`StoreOp`] list.

use rusqlite::{Connection, TransactionBehavior};

use forget_core::traits::{BatchOutcome, StoreOp};

use super::{kv_ops, sorted_set_ops};

/// Run `ops` inside one immediate transaction.
///
/// `Expect` guards are checked in order against the transaction's view; the
/// first mismatch rolls everything back and reports a conflict.
pub fn apply(conn: &mut Connection, ops: &[StoreOp]) -> rusqlite::Result<BatchOutcome> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    for op in ops {
        match op {
            StoreOp::Expect { key, value } => {
                let current = kv_ops::get(&tx, key)?;
                if current.as_deref() != value.as_deref() {
                    tx.rollback()?;
                    return Ok(BatchOutcome::Conflict { key: key.clone() });
                }
            }
            StoreOp::Set { key, value } => kv_ops::set(&tx, key, value)?,
            StoreOp::Increment {
                set,
                member,
                amount,
            } => {
                sorted_set_ops::increment(&tx, set, member, *amount)?;
            }
            StoreOp::ScaleScores { set, factor } => {
                sorted_set_ops::scale_scores(&tx, set, *factor)?;
            }
            StoreOp::RemoveRangeByScore { set, min, max } => {
                sorted_set_ops::remove_range_by_score(&tx, set, *min, *max)?;
            }
        }
    }

    tx.commit()?;
    Ok(BatchOutcome::Applied { ops: ops.len() })
}
