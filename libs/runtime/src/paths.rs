use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};

/// Resolve the application home directory to an absolute path.
///
/// - `None` → `<user home>/<default_subdir>`
/// - a leading `~` is expanded to the user home
/// - relative paths are taken from the current directory
///
/// When `create` is set the directory is created if missing.
pub fn resolve_home_dir(
    configured: Option<&str>,
    default_subdir: &str,
    create: bool,
) -> Result<PathBuf> {
    let path = match configured {
        None => user_home()?.join(default_subdir),
        Some(raw) => expand_tilde(raw)?,
    };

    let path = if path.is_absolute() {
        path
    } else {
        std::env::current_dir()
            .context("Cannot determine current directory")?
            .join(path)
    };

    if create {
        std::fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create home_dir {}", path.display()))?;
    }
    Ok(path)
}

fn expand_tilde(raw: &str) -> Result<PathBuf> {
    if raw == "~" {
        return user_home();
    }
    match raw.strip_prefix("~/").or_else(|| raw.strip_prefix("~\\")) {
        Some(rest) => Ok(user_home()?.join(rest)),
        None => Ok(Path::new(raw).to_path_buf()),
    }
}

fn user_home() -> Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| anyhow!("User home directory is not available"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn absolute_path_is_kept_and_created() {
        let tmp = tempdir().unwrap();
        let target = tmp.path().join("a/b");

        let resolved = resolve_home_dir(target.to_str(), ".ignored", true).unwrap();

        assert_eq!(resolved, target);
        assert!(target.is_dir());
    }

    #[test]
    fn relative_path_becomes_absolute() {
        let resolved = resolve_home_dir(Some("some/rel"), ".ignored", false).unwrap();

        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("some/rel"));
    }

    #[test]
    fn tilde_expands_to_user_home() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        let resolved = resolve_home_dir(Some("~/.users_info_test"), ".ignored", false).unwrap();

        assert_eq!(resolved, home.join(".users_info_test"));
    }

    #[test]
    fn missing_value_uses_default_subdir() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        let resolved = resolve_home_dir(None, ".users_info_default", false).unwrap();

        assert_eq!(resolved, home.join(".users_info_default"));
    }
}
