//! First-run setup
//!
//! Writes the built-in category registries and the default roster so a new
//! ledger is usable straight away.

use crate::config::paths::LedgerPaths;
use crate::error::LedgerError;
use crate::models::{CategoryRegistry, FamilyMember};

use super::file_io::write_json_atomic;

/// Create the data directory and seed files that don't exist yet.
/// Existing files are left alone.
pub fn initialize_storage(paths: &LedgerPaths) -> Result<(), LedgerError> {
    paths.ensure_directories()?;

    if !paths.categories_file().exists() {
        write_json_atomic(paths.categories_file(), &CategoryRegistry::builtin())?;
        tracing::info!("created default categories");
    }

    if !paths.family_file().exists() {
        let roster = serde_json::json!({ "members": FamilyMember::default_roster() });
        write_json_atomic(paths.family_file(), &roster)?;
        tracing::info!("created default family roster");
    }

    Ok(())
}

/// True until the seed files exist
pub fn needs_initialization(paths: &LedgerPaths) -> bool {
    !paths.categories_file().exists() || !paths.family_file().exists()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Storage;
    use tempfile::TempDir;

    #[test]
    fn test_initialize_storage() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert!(needs_initialization(&paths));
        initialize_storage(&paths).unwrap();
        assert!(!needs_initialization(&paths));

        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        assert_eq!(storage.categories.registry().unwrap().len(), 17);
        assert_eq!(storage.family.get_all().unwrap().len(), 2);
    }

    #[test]
    fn test_doesnt_overwrite_existing() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        initialize_storage(&paths).unwrap();

        let storage = Storage::new(paths.clone()).unwrap();
        storage.load_all().unwrap();
        storage.family.insert(FamilyMember::new("Papa", "parent")).unwrap();
        storage.family.save().unwrap();

        initialize_storage(&paths).unwrap();

        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        assert_eq!(storage.family.get_all().unwrap().len(), 3);
    }
}
