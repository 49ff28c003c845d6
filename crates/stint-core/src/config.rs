use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use tracing::info;

/// Resolves where the task file and view file live: `--data` flag, then the
/// `STINT_DATA` environment variable, then the platform data directory.
/// Creates the directory when absent. Only the CLI layer calls this; core
/// semantics never read the environment.
#[tracing::instrument(skip(override_dir))]
pub fn resolve_data_dir(override_dir: Option<&Path>) -> anyhow::Result<PathBuf> {
    let dir = if let Some(path) = override_dir {
        expand_tilde(path)
    } else if let Ok(env_dir) = std::env::var("STINT_DATA") {
        expand_tilde(Path::new(&env_dir))
    } else {
        default_data_dir()?
    };

    if !dir.exists() {
        info!(dir = %dir.display(), "creating data directory");
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }

    Ok(dir)
}

fn default_data_dir() -> anyhow::Result<PathBuf> {
    let base = dirs::data_local_dir()
        .ok_or_else(|| anyhow!("cannot determine platform data directory"))?;
    Ok(base.join("stint"))
}

fn expand_tilde(path: &Path) -> PathBuf {
    let text = path.to_string_lossy();
    if let Some(rest) = text.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    path.to_path_buf()
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use tempfile::tempdir;

    use super::resolve_data_dir;

    #[test]
    fn override_dir_is_created_when_absent() {
        let temp = tempdir().expect("tempdir");
        let target = temp.path().join("nested").join("data");
        let resolved = resolve_data_dir(Some(&target)).expect("resolve");
        assert_eq!(resolved, target);
        assert!(resolved.is_dir());
    }

    #[test]
    fn existing_override_dir_is_reused() {
        let temp = tempdir().expect("tempdir");
        let resolved = resolve_data_dir(Some(temp.path())).expect("resolve");
        assert_eq!(resolved, Path::new(temp.path()));
    }
}
