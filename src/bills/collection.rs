use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::bill::Bill;
use super::recurrence::{expand_series, IdSource};
use crate::errors::{BillError, Result};

pub const CURRENT_SCHEMA_VERSION: u8 = 1;

/// The persisted collection of bill instances, with series-aware mutation.
///
/// Expansion happens exactly once, when a series is added; edits, paid
/// toggles, and single deletions mutate stored instances in place and never
/// re-expand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillBook {
    #[serde(default)]
    pub bills: Vec<Bill>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "BillBook::schema_version_default")]
    pub schema_version: u8,
}

impl BillBook {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            bills: Vec::new(),
            created_at: now,
            updated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    /// Expands the seed and appends the whole series as one logical unit.
    /// The seed enters unpaid and as its own series root. Returns the seed id.
    pub fn add_series(&mut self, mut seed: Bill, ids: &mut dyn IdSource) -> Uuid {
        seed.is_paid = false;
        seed.parent_id = None;
        let id = seed.id;
        let instances = expand_series(&seed, ids);
        tracing::debug!(seed = %id, count = instances.len(), "appending bill series");
        self.bills.extend(instances);
        self.touch();
        id
    }

    pub fn get(&self, id: Uuid) -> Option<&Bill> {
        self.bills.iter().find(|bill| bill.id == id)
    }

    /// Edits a single stored instance in place.
    pub fn update<F>(&mut self, id: Uuid, edit: F) -> Result<()>
    where
        F: FnOnce(&mut Bill),
    {
        let bill = self
            .bills
            .iter_mut()
            .find(|bill| bill.id == id)
            .ok_or_else(|| BillError::InvalidRef(format!("unknown bill {}", id)))?;
        edit(bill);
        self.touch();
        Ok(())
    }

    /// Flips the paid flag on one instance, returning the new state.
    pub fn toggle_paid(&mut self, id: Uuid) -> Result<bool> {
        let bill = self
            .bills
            .iter_mut()
            .find(|bill| bill.id == id)
            .ok_or_else(|| BillError::InvalidRef(format!("unknown bill {}", id)))?;
        bill.is_paid = !bill.is_paid;
        let paid = bill.is_paid;
        self.touch();
        Ok(paid)
    }

    /// True when the target belongs to a series: it was generated from a
    /// root, or it carries a recurrence rule itself. Hosts use this to decide
    /// whether to offer the series-wide deletion prompt.
    pub fn is_series_member(&self, id: Uuid) -> Result<bool> {
        self.get(id)
            .map(Bill::is_series_member)
            .ok_or_else(|| BillError::InvalidRef(format!("unknown bill {}", id)))
    }

    /// Removes only the targeted instance.
    pub fn delete_one(&mut self, id: Uuid) -> Result<()> {
        let before = self.bills.len();
        self.bills.retain(|bill| bill.id != id);
        if self.bills.len() == before {
            return Err(BillError::InvalidRef(format!("unknown bill {}", id)));
        }
        self.touch();
        Ok(())
    }

    /// Removes the target's whole series: the root (the target's parent when
    /// it has one, otherwise the target itself) plus every instance pointing
    /// at that root. Returns how many bills were removed.
    pub fn delete_series(&mut self, id: Uuid) -> Result<usize> {
        let root = self
            .get(id)
            .map(Bill::series_root)
            .ok_or_else(|| BillError::InvalidRef(format!("unknown bill {}", id)))?;
        let before = self.bills.len();
        self.bills
            .retain(|bill| bill.id != root && bill.parent_id != Some(root));
        let removed = before - self.bills.len();
        tracing::debug!(%root, removed, "deleted bill series");
        self.touch();
        Ok(removed)
    }

    pub fn unpaid(&self) -> Vec<&Bill> {
        self.bills.iter().filter(|bill| !bill.is_paid).collect()
    }

    pub fn len(&self) -> usize {
        self.bills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bills.is_empty()
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}

impl Default for BillBook {
    fn default() -> Self {
        Self::new()
    }
}
