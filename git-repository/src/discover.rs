use std::path::{Path, PathBuf};

use crate::{repository::Paths, Error};

/// Classify `path` as a repository layout, per the discovery algorithm: the path must be a
/// directory containing `objects/` and `HEAD`; bareness is then inferred from whether the final
/// path component is `.git`.
pub(crate) fn discover(path: &Path) -> Result<Paths, Error> {
    if !path.is_dir() {
        return Err(Error::NotADirectory(path.to_path_buf()));
    }

    let path_repository = normalize_with_trailing_separator(path);

    let path_odb = path_repository.join("objects");
    if !path_odb.is_dir() {
        return Err(Error::NotARepository { path: path_repository, reason: "missing an objects/ directory" });
    }

    if !path_repository.join("HEAD").is_file() {
        return Err(Error::NotARepository { path: path_repository, reason: "missing a HEAD file" });
    }

    let is_git_dir_named = path.file_name().map(|name| name == ".git").unwrap_or(false);
    let (is_bare, path_index, path_workdir) = if is_git_dir_named {
        let workdir = path_repository.parent().map(|p| normalize_with_trailing_separator(p));
        (false, Some(path_repository.join("index")), workdir)
    } else {
        (true, None, None)
    };

    Ok(Paths { path_repository, path_odb, path_index, path_workdir, is_bare })
}

/// Resolve a repository layout from explicitly provided paths, applying the documented defaults
/// and no `.git`-suffix heuristics.
pub(crate) fn discover_explicit(
    git_dir: &Path,
    object_directory: Option<&Path>,
    index_file: Option<&Path>,
    work_tree: Option<&Path>,
) -> Result<Paths, Error> {
    if !git_dir.is_dir() {
        return Err(Error::RequiredPathMissing(git_dir.to_path_buf()));
    }
    let path_repository = normalize_with_trailing_separator(git_dir);

    let path_odb = object_directory.map(Path::to_path_buf).unwrap_or_else(|| path_repository.join("objects"));
    if !path_odb.is_dir() {
        return Err(Error::RequiredPathMissing(path_odb));
    }

    let path_index = index_file.map(Path::to_path_buf).unwrap_or_else(|| path_repository.join("index"));
    if !path_index.is_file() {
        return Err(Error::RequiredPathMissing(path_index));
    }

    let path_workdir = work_tree.map(|p| normalize_with_trailing_separator(p));
    let is_bare = path_workdir.is_none();

    Ok(Paths { path_repository, path_odb, path_index: Some(path_index), path_workdir, is_bare })
}

fn normalize_with_trailing_separator(path: &Path) -> PathBuf {
    let mut joined = path.to_path_buf();
    joined.push("");
    joined
}
