//! Saving dirty wallets.
//!
//! This is the only place dirty flags are cleared. A flag is taken before
//! the save starts and put back if the save fails, so a network event that
//! marks the wallet while the save is running is not lost.

use crate::model::Model;
use crate::persistence::WalletStore;

use std::sync::Arc;
use tracing::{debug, error};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaveReport {
	pub saved: usize,
	pub failed: usize,
}

pub struct PersistenceService {
	store: Arc<dyn WalletStore>,
}

impl PersistenceService {
	pub fn new(store: Arc<dyn WalletStore>) -> Self {
		Self { store }
	}

	/// Save every dirty wallet in the model.
	pub async fn save_dirty(&self, model: &Model) -> SaveReport {
		let mut report = SaveReport::default();
		for record in model.all_records() {
			if !record.take_dirty() {
				continue;
			}
			match self.store.save(record.wallet().wallet(), record.path()).await {
				Ok(()) => report.saved += 1,
				Err(e) => {
					error!("Failed to save wallet {:?}: {}", record.path(), e);
					record.mark_dirty();
					report.failed += 1;
				}
			}
		}
		debug!("Saved {} dirty wallets, {} failed", report.saved, report.failed);
		report
	}
}
