//! Typed file loading for content units.
//!
//! All readers map a missing file to [`ContentError::FileNotFound`] and
//! attach the path to parse failures. Entity readers additionally run the
//! non-built conversion, so a caller receives either a fully formed entity
//! or an error naming the file that broke.

use std::path::{Path, PathBuf};

use mp_core::constants::DEF_FILE_SUFFIX;
use mp_core::Buildable;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ContentError, ContentResult};

fn read_file(path: &Path) -> ContentResult<String> {
    std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ContentError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ContentError::Io {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })
}

/// Parse a YAML string into `T`, reporting failures against `path`.
pub fn parse_yaml_typed<T: DeserializeOwned>(content: &str, path: &Path) -> ContentResult<T> {
    serde_yaml::from_str(content).map_err(|e| ContentError::YamlParse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load a YAML file and deserialize it into `T`.
pub fn load_yaml_typed<T: DeserializeOwned>(path: &Path) -> ContentResult<T> {
    let content = read_file(path)?;
    parse_yaml_typed(&content, path)
}

/// Load a YAML file as a JSON value tree.
pub fn load_yaml_as_value(path: &Path) -> ContentResult<Value> {
    let content = read_file(path)?;
    let yaml: serde_yaml::Value = parse_yaml_typed(&content, path)?;
    Ok(yaml_to_json_value(yaml))
}

/// Load a JSON file and deserialize it into `T`.
pub fn load_json_typed<T: DeserializeOwned>(path: &Path) -> ContentResult<T> {
    let content = read_file(path)?;
    serde_json::from_str(&content).map_err(|e| ContentError::JsonParse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Parse a TOML string into `T`, reporting failures against `path`.
pub fn parse_toml_typed<T: DeserializeOwned>(content: &str, path: &Path) -> ContentResult<T> {
    toml::from_str(content).map_err(|e| ContentError::TomlParse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load a TOML file and deserialize it into `T`.
pub fn load_toml_typed<T: DeserializeOwned>(path: &Path) -> ContentResult<T> {
    let content = read_file(path)?;
    parse_toml_typed(&content, path)
}

/// Load one non-built component file as an entity.
pub fn load_non_built<E: Buildable>(path: &Path) -> ContentResult<E> {
    let non_built: E::NonBuilt = load_yaml_typed(path)?;
    E::from_non_built(non_built).map_err(|source| ContentError::Conversion {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse a non-built document held in memory (e.g. a file fetched from
/// another branch) as an entity.
pub fn parse_non_built<E: Buildable>(content: &str, path: &Path) -> ContentResult<E> {
    let non_built: E::NonBuilt = parse_yaml_typed(content, path)?;
    E::from_non_built(non_built).map_err(|source| ContentError::Conversion {
        path: path.to_path_buf(),
        source,
    })
}

/// Load one non-built entity per definition file under `dir`, recursing into
/// sub-directories. A missing directory yields an empty list.
pub fn load_non_built_dir<E: Buildable>(dir: &Path) -> ContentResult<Vec<E>> {
    definition_files(dir)?
        .iter()
        .map(|path| load_non_built(path))
        .collect()
}

/// Definition files under `dir`, sorted by path. A missing directory yields
/// an empty list.
pub fn definition_files(dir: &Path) -> ContentResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    if !dir.is_dir() {
        tracing::debug!(dir = %dir.display(), "component directory absent");
        return Ok(files);
    }
    collect_definition_files(dir, &mut files)?;
    files.sort();
    Ok(files)
}

fn collect_definition_files(dir: &Path, out: &mut Vec<PathBuf>) -> ContentResult<()> {
    let entries = std::fs::read_dir(dir).map_err(|e| ContentError::Io {
        path: dir.to_path_buf(),
        source: e,
    })?;
    for entry in entries {
        let entry = entry.map_err(|e| ContentError::Io {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if path.is_dir() {
            collect_definition_files(&path, out)?;
        } else if path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(DEF_FILE_SUFFIX))
        {
            out.push(path);
        }
    }
    Ok(())
}

/// Convert a `serde_yaml::Value` to a `serde_json::Value`.
///
/// Non-string mapping keys are rendered through YAML; tagged values keep
/// only their inner value.
pub fn yaml_to_json_value(yaml: serde_yaml::Value) -> Value {
    match yaml {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Number(i.into())
            } else if let Some(u) = n.as_u64() {
                Value::Number(u.into())
            } else if let Some(f) = n.as_f64() {
                serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .unwrap_or(Value::Null)
            } else {
                Value::Null
            }
        }
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(seq) => {
            Value::Array(seq.into_iter().map(yaml_to_json_value).collect())
        }
        serde_yaml::Value::Mapping(map) => {
            let obj = map
                .into_iter()
                .map(|(k, v)| {
                    let key = match k {
                        serde_yaml::Value::String(s) => s,
                        other => serde_yaml::to_string(&other)
                            .unwrap_or_default()
                            .trim()
                            .to_string(),
                    };
                    (key, yaml_to_json_value(v))
                })
                .collect();
            Value::Object(obj)
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json_value(tagged.value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_file_is_file_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_yaml_as_value(&dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, ContentError::FileNotFound { .. }));
    }

    #[test]
    fn malformed_yaml_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.yaml");
        std::fs::write(&path, "key: [unterminated").unwrap();
        let err = load_yaml_as_value(&path).unwrap_err();
        match err {
            ContentError::YamlParse { path: p, .. } => assert_eq!(p, path),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn definition_files_recurse_and_sort() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("b.yaml"), "").unwrap();
        std::fs::write(dir.path().join("a.yaml"), "").unwrap();
        std::fs::write(dir.path().join("nested/c.yaml"), "").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "").unwrap();

        let files = definition_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            names,
            vec![
                PathBuf::from("a.yaml"),
                PathBuf::from("b.yaml"),
                PathBuf::from("nested/c.yaml")
            ]
        );
    }

    #[test]
    fn absent_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(definition_files(&dir.path().join("widgets")).unwrap().is_empty());
    }

    #[test]
    fn yaml_numbers_and_nesting_convert() {
        let yaml: serde_yaml::Value =
            serde_yaml::from_str("version: 2.0\ncount: 3\ntags: [a, b]\n").unwrap();
        assert_eq!(
            yaml_to_json_value(yaml),
            json!({"version": 2.0, "count": 3, "tags": ["a", "b"]})
        );
    }
}
