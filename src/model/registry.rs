//! Ordered registry of loaded wallets plus user preferences.
//!
//! Records are kept in load order. At most one record is active; per-wallet
//! preference operations route to it. When the first wallet is added it
//! becomes active, and unloading the active wallet hands the role to the
//! earliest remaining record.

use crate::model::{ModelError, WalletHandle, WalletId, WalletRecord};

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Default)]
pub struct Model {
	records: RwLock<Vec<Arc<WalletRecord>>>,
	active: RwLock<Option<WalletId>>,
	preferences: RwLock<HashMap<String, String>>,
}

impl Model {
	pub fn new() -> Self {
		Self::default()
	}

	/// Append a record in load order. The first record added becomes active.
	pub fn add_record(&self, record: WalletRecord) -> Arc<WalletRecord> {
		let record = Arc::new(record);
		let id = record.wallet().id();
		self.records.write().push(record.clone());

		let mut active = self.active.write();
		if active.is_none() {
			*active = Some(id);
			debug!("Wallet {} at {:?} is now active", id, record.path());
		}
		record
	}

	/// Remove a record when its wallet is unloaded.
	pub fn remove_wallet(&self, id: WalletId) -> Result<Arc<WalletRecord>, ModelError> {
		let mut records = self.records.write();
		let position = records
			.iter()
			.position(|r| r.wallet().id() == id)
			.ok_or(ModelError::UnknownWallet(id))?;
		let removed = records.remove(position);

		let mut active = self.active.write();
		if *active == Some(id) {
			*active = records.first().map(|r| r.wallet().id());
		}
		Ok(removed)
	}

	pub fn set_active_wallet(&self, id: WalletId) -> Result<(), ModelError> {
		let records = self.records.read();
		if !records.iter().any(|r| r.wallet().id() == id) {
			return Err(ModelError::UnknownWallet(id));
		}
		*self.active.write() = Some(id);
		Ok(())
	}

	pub fn active_record(&self) -> Result<Arc<WalletRecord>, ModelError> {
		let active = (*self.active.read()).ok_or(ModelError::NoActiveWallet)?;
		self.records
			.read()
			.iter()
			.find(|r| r.wallet().id() == active)
			.cloned()
			.ok_or(ModelError::NoActiveWallet)
	}

	/// Snapshot of all records in load order.
	pub fn all_records(&self) -> Vec<Arc<WalletRecord>> {
		self.records.read().clone()
	}

	/// First record whose wallet is the given handle.
	pub fn find_record(&self, wallet: &WalletHandle) -> Option<Arc<WalletRecord>> {
		self.records
			.read()
			.iter()
			.find(|r| r.wallet() == wallet)
			.cloned()
	}

	pub fn preference(&self, key: &str) -> Option<String> {
		self.preferences.read().get(key).cloned()
	}

	pub fn set_preference(&self, key: &str, value: &str) {
		self.preferences
			.write()
			.insert(key.to_string(), value.to_string());
	}

	pub fn active_preference(&self, key: &str) -> Result<Option<String>, ModelError> {
		Ok(self.active_record()?.preference(key))
	}

	pub fn set_active_preference(&self, key: &str, value: &str) -> Result<(), ModelError> {
		self.active_record()?.set_preference(key, value);
		Ok(())
	}
}
