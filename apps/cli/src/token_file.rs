use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tokio::sync::watch;

use skincare_core::auth::{AuthTokens, MemoryTokenStore, TokenStore};
use skincare_core::errors::Error;
use skincare_core::Result;

const CURRENT_VERSION: u32 = 1;

/// Token store persisted as a JSON file so the session survives between
/// invocations. Reads are served from memory.
pub struct FileTokenStore {
    path: PathBuf,
    memory: MemoryTokenStore,
    lock: Mutex<()>,
}

#[derive(Serialize, Deserialize)]
struct StoredTokens {
    version: u32,
    tokens: AuthTokens,
}

impl FileTokenStore {
    pub fn open(path: PathBuf) -> Result<Self> {
        let tokens = load(&path)?;
        Ok(Self {
            path,
            memory: MemoryTokenStore::with_tokens(tokens),
            lock: Mutex::new(()),
        })
    }

    fn guard(&self) -> Result<std::sync::MutexGuard<'_, ()>> {
        self.lock
            .lock()
            .map_err(|_| Error::Unexpected("Token file lock poisoned".into()))
    }
}

fn load(path: &Path) -> Result<Option<AuthTokens>> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read(path).map_err(io_error)?;
    if raw.is_empty() {
        return Ok(None);
    }
    let stored: StoredTokens = serde_json::from_slice(&raw)?;
    Ok(Some(stored.tokens))
}

/// Truncating writer; on unix the file is created readable by the owner only.
fn owner_only_options() -> fs::OpenOptions {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    options
}

fn io_error(err: std::io::Error) -> Error {
    Error::Unexpected(format!("Token file: {}", err))
}

impl TokenStore for FileTokenStore {
    fn tokens(&self) -> Option<AuthTokens> {
        self.memory.tokens()
    }

    fn save_tokens(&self, tokens: AuthTokens) -> Result<()> {
        let _guard = self.guard()?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        let stored = StoredTokens {
            version: CURRENT_VERSION,
            tokens,
        };
        let json = serde_json::to_string_pretty(&stored)?;
        let mut file = owner_only_options().open(&self.path).map_err(io_error)?;
        // An older file may predate the mode; tighten it before writing.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(0o600)).map_err(io_error)?;
        }
        file.write_all(json.as_bytes()).map_err(io_error)?;
        self.memory.save_tokens(stored.tokens)
    }

    fn clear_tokens(&self) -> Result<()> {
        let _guard = self.guard()?;
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(io_error)?;
        }
        self.memory.clear_tokens()
    }

    fn subscribe(&self) -> watch::Receiver<Option<AuthTokens>> {
        self.memory.subscribe()
    }
}
