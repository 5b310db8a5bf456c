pub mod generate;
pub mod init;
pub mod list;
pub mod list_models;
pub mod quiz;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;

use verbdrill_core::ids::IdAllocator;
use verbdrill_core::slot::FileSlot;
use verbdrill_core::VerbStore;
use verbdrill_providers::config::load_config_from;
use verbdrill_providers::VerbdrillConfig;

/// Config plus the store it points at.
pub struct Workspace {
    pub config: VerbdrillConfig,
    pub store: VerbStore,
    pub data_dir: PathBuf,
}

/// Load config and open the verb collection.
///
/// `--data-dir` wins over everything the config resolves.
pub fn open_workspace(
    config_path: Option<&Path>,
    data_dir: Option<PathBuf>,
    ids: Arc<dyn IdAllocator>,
) -> Result<Workspace> {
    let config = load_config_from(config_path)?;
    let data_dir = data_dir.unwrap_or_else(|| config.resolve_data_dir());
    tracing::debug!("using data dir {}", data_dir.display());

    let slot = Arc::new(FileSlot::new(data_dir));
    let data_dir = slot.dir().to_path_buf();
    let store = VerbStore::load(slot, ids);
    Ok(Workspace {
        config,
        store,
        data_dir,
    })
}
