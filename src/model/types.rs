use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

static NEXT_WALLET_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque identity assigned to a wallet when it is loaded into memory.
///
/// Two wallets loaded from the same file still receive distinct ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WalletId(u64);

impl WalletId {
	fn next() -> Self {
		Self(NEXT_WALLET_ID.fetch_add(1, Ordering::Relaxed))
	}

	pub fn as_u64(&self) -> u64 {
		self.0
	}
}

impl fmt::Display for WalletId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "wallet#{}", self.0)
	}
}

/// An in-memory wallet as produced by the network service.
///
/// The contents are opaque to the controller.
#[derive(Debug)]
pub struct Wallet {
	id: WalletId,
	contents: Vec<u8>,
}

impl Wallet {
	pub fn new(contents: Vec<u8>) -> Self {
		Self {
			id: WalletId::next(),
			contents,
		}
	}

	pub fn id(&self) -> WalletId {
		self.id
	}

	pub fn contents(&self) -> &[u8] {
		&self.contents
	}
}

/// Shared handle to a loaded wallet.
///
/// Equality is identity: two handles are equal only when they point at the
/// same loaded wallet, never because their contents match.
#[derive(Debug, Clone)]
pub struct WalletHandle(Arc<Wallet>);

impl WalletHandle {
	pub fn new(wallet: Wallet) -> Self {
		Self(Arc::new(wallet))
	}

	pub fn id(&self) -> WalletId {
		self.0.id
	}

	pub fn wallet(&self) -> &Wallet {
		&self.0
	}
}

impl PartialEq for WalletHandle {
	fn eq(&self, other: &Self) -> bool {
		self.0.id == other.0.id
	}
}

impl Eq for WalletHandle {}

/// Per-wallet state tracked by the model.
#[derive(Debug)]
pub struct WalletRecord {
	wallet: WalletHandle,
	path: PathBuf,
	dirty: AtomicBool,
	preferences: RwLock<HashMap<String, String>>,
}

impl WalletRecord {
	pub fn new(wallet: WalletHandle, path: impl Into<PathBuf>) -> Self {
		Self {
			wallet,
			path: path.into(),
			dirty: AtomicBool::new(false),
			preferences: RwLock::new(HashMap::new()),
		}
	}

	pub fn wallet(&self) -> &WalletHandle {
		&self.wallet
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	pub fn is_dirty(&self) -> bool {
		self.dirty.load(Ordering::Acquire)
	}

	/// Mark the record as having state not yet saved.
	pub fn mark_dirty(&self) {
		self.dirty.store(true, Ordering::Release);
	}

	/// Clear the flag, returning whether it was set. Only the persistence
	/// layer calls this, and re-marks the record if the save fails.
	pub(crate) fn take_dirty(&self) -> bool {
		self.dirty.swap(false, Ordering::AcqRel)
	}

	pub fn preference(&self, key: &str) -> Option<String> {
		self.preferences.read().get(key).cloned()
	}

	pub fn set_preference(&self, key: &str, value: &str) {
		self.preferences
			.write()
			.insert(key.to_string(), value.to_string());
	}
}

/// Errors raised by model accessors
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
	#[error("No active wallet")]
	NoActiveWallet,

	#[error("Unknown wallet: {0}")]
	UnknownWallet(WalletId),
}
