//! Matching a project path to an existing Claude `projects` key.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};
use tracing::debug;

/// Pick the key under `projects` that refers to `desired`.
///
/// An exact key wins. Otherwise both sides are canonicalized and the first key
/// pointing at the same directory is returned, so a project opened through a
/// symlink keeps using its existing node. Falls back to `desired` unchanged.
pub fn resolve_project_key(projects: Option<&Map<String, Value>>, desired: &str) -> String {
    let Some(projects) = projects else {
        return desired.to_string();
    };
    if projects.contains_key(desired) {
        return desired.to_string();
    }

    let Ok(desired_real) = fs::canonicalize(desired) else {
        return desired.to_string();
    };
    for key in projects.keys() {
        match fs::canonicalize(Path::new(key)) {
            Ok(real) if real == desired_real => {
                debug!(desired, key = %key, "Resolved Claude project through alias");
                return key.clone();
            }
            Ok(_) => {}
            Err(err) => debug!(key = %key, error = %err, "Skipping unresolvable project key"),
        }
    }
    desired.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn projects(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn exact_key_wins() {
        let map = projects(json!({"/not/on/disk": {}}));
        assert_eq!(resolve_project_key(Some(&map), "/not/on/disk"), "/not/on/disk");
    }

    #[test]
    fn missing_projects_returns_desired() {
        assert_eq!(resolve_project_key(None, "/work/app"), "/work/app");
    }

    #[test]
    fn unresolvable_desired_returns_desired() {
        let map = projects(json!({"/other": {}}));
        assert_eq!(
            resolve_project_key(Some(&map), "/definitely/missing/dir"),
            "/definitely/missing/dir"
        );
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_path_maps_to_existing_key() {
        let temp = TempDir::new().expect("tempdir");
        let real = temp.path().join("real");
        fs::create_dir(&real).expect("create real dir");
        let link = temp.path().join("link");
        std::os::unix::fs::symlink(&real, &link).expect("create symlink");

        let real_key = real.to_string_lossy().to_string();
        let map = projects(json!({ "/gone/away": {}, real_key.clone(): {} }));
        let resolved = resolve_project_key(Some(&map), &link.to_string_lossy());
        assert_eq!(resolved, real_key);
    }
}
