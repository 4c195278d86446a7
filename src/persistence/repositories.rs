use crate::model::Wallet;
use crate::persistence::PersistenceError;

use std::path::{Path, PathBuf};
use tracing::info;

/// Storage for wallet files
#[async_trait::async_trait]
pub trait WalletStore: Send + Sync {
	async fn load(&self, path: &Path) -> std::io::Result<Wallet>;
	async fn save(&self, wallet: &Wallet, path: &Path) -> Result<(), PersistenceError>;
}

/// File-based implementation of WalletStore.
///
/// Wallet contents are written as-is; a JSON metadata sidecar per wallet
/// is kept under `data_dir`.
pub struct FileWalletStore {
	data_dir: PathBuf,
}

impl FileWalletStore {
	pub fn new(data_dir: PathBuf) -> Self {
		Self { data_dir }
	}

	pub fn metadata_filename(&self, path: &Path) -> PathBuf {
		let stem = path
			.file_name()
			.map(|name| name.to_string_lossy().into_owned())
			.unwrap_or_else(|| "wallet".to_string());
		self.data_dir.join(format!("{}.meta.json", stem))
	}
}

#[async_trait::async_trait]
impl WalletStore for FileWalletStore {
	async fn load(&self, path: &Path) -> std::io::Result<Wallet> {
		let contents = tokio::fs::read(path).await?;
		Ok(Wallet::new(contents))
	}

	async fn save(&self, wallet: &Wallet, path: &Path) -> Result<(), PersistenceError> {
		tokio::fs::write(path, wallet.contents()).await?;

		let metadata = serde_json::json!({
			"path": path.to_string_lossy(),
			"size": wallet.contents().len(),
			"saved_at": chrono::Utc::now().to_rfc3339(),
		});
		tokio::fs::create_dir_all(&self.data_dir).await?;
		let metadata_filename = self.metadata_filename(path);
		tokio::fs::write(&metadata_filename, serde_json::to_string_pretty(&metadata)?).await?;

		info!("Saved wallet {} to {:?}", wallet.id(), path);
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn test_save_then_load() {
		let dir = tempfile::tempdir().unwrap();
		let store = FileWalletStore::new(dir.path().join("meta"));
		let path = dir.path().join("spending.wallet");

		let wallet = Wallet::new(b"opaque".to_vec());
		store.save(&wallet, &path).await.unwrap();

		let loaded = store.load(&path).await.unwrap();
		assert_eq!(loaded.contents(), b"opaque");
		assert_ne!(loaded.id(), wallet.id());

		let metadata: serde_json::Value = serde_json::from_str(
			&tokio::fs::read_to_string(store.metadata_filename(&path))
				.await
				.unwrap(),
		)
		.unwrap();
		assert_eq!(metadata["size"], 6);
		assert!(metadata["saved_at"].as_str().is_some());
	}

	#[tokio::test]
	async fn test_save_into_missing_directory_fails() {
		let dir = tempfile::tempdir().unwrap();
		let store = FileWalletStore::new(dir.path().to_path_buf());
		let result = store
			.save(&Wallet::new(vec![1]), &dir.path().join("no/such/dir/x.wallet"))
			.await;
		assert!(matches!(result, Err(PersistenceError::Io(_))));
	}
}
