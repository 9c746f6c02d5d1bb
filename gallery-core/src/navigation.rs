//! Previous/next links between neighbouring examples.

use crate::models::{reference, ExampleRecord};

/// Attach `prev_ref`/`next_ref` to every record based on sequence order.
///
/// The first record gets no `prev_ref` and the last no `next_ref`.
pub fn link(records: &mut [ExampleRecord]) {
    let refs: Vec<String> = records.iter().map(|r| reference(&r.name)).collect();

    for (idx, record) in records.iter_mut().enumerate() {
        record.prev_ref = idx.checked_sub(1).map(|prev| refs[prev].clone());
        record.next_ref = refs.get(idx + 1).cloned();
    }
}
