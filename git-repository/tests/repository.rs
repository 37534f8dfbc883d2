use git_repository::{
    object::{Blob, Commit, Payload, Tag, Tree, TreeEntry},
    ErrorKind, Repository,
};

fn init_non_bare(root: &std::path::Path) -> std::path::PathBuf {
    let git_dir = root.join(".git");
    std::fs::create_dir_all(git_dir.join("objects")).unwrap();
    std::fs::write(git_dir.join("HEAD"), b"ref: refs/heads/main\n").unwrap();
    std::fs::write(git_dir.join("index"), b"").unwrap();
    git_dir
}

fn init_bare(root: &std::path::Path, name: &str) -> std::path::PathBuf {
    let git_dir = root.join(name);
    std::fs::create_dir_all(git_dir.join("objects")).unwrap();
    std::fs::write(git_dir.join("HEAD"), b"ref: refs/heads/main\n").unwrap();
    git_dir
}

#[test]
fn opening_a_dot_git_directory_resolves_a_working_tree_and_index() {
    let root = tempfile::tempdir().unwrap();
    let git_dir = init_non_bare(root.path());

    let repo = Repository::open(&git_dir).unwrap();
    assert!(!repo.is_bare());
    assert_eq!(repo.paths().path_index, Some(git_dir.join("index")));
    assert!(repo.paths().path_workdir.is_some());
}

#[test]
fn opening_a_non_dot_git_basename_is_bare_with_no_workdir() {
    let root = tempfile::tempdir().unwrap();
    let git_dir = init_bare(root.path(), "project.git");

    let repo = Repository::open(&git_dir).unwrap();
    assert!(repo.is_bare());
    assert!(repo.paths().path_workdir.is_none());
}

#[test]
fn writing_a_blob_reproduces_the_well_known_digest_from_the_canonical_pre_image() {
    let root = tempfile::tempdir().unwrap();
    let git_dir = init_non_bare(root.path());
    let mut repo = Repository::open(&git_dir).unwrap();

    let handle = repo.new_object(Payload::Blob(Blob { data: b"hello".to_vec() }));
    let digest = repo.write(&handle).unwrap();
    assert_eq!(digest.to_hex(), "b6fc4c620b67d95f953a5c1c1230aaab5db5a1b0");
}

#[test]
fn looking_up_a_tree_as_a_commit_fails_with_invalid_type() {
    let root = tempfile::tempdir().unwrap();
    let git_dir = init_non_bare(root.path());
    let mut repo = Repository::open(&git_dir).unwrap();

    let tree = repo.new_object(Payload::Tree(Tree {
        entries: vec![TreeEntry { mode: 0o100644, name: "a.txt".into(), id: git_hash::ObjectId::null() }],
    }));
    let digest = repo.write(&tree).unwrap();

    let err = repo.lookup(digest, Some(git_odb::Kind::Commit)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidType);
}

#[test]
fn a_commit_referencing_a_tree_round_trips_through_the_repository() {
    let root = tempfile::tempdir().unwrap();
    let git_dir = init_non_bare(root.path());
    let mut repo = Repository::open(&git_dir).unwrap();

    let tree = repo.new_object(Payload::Tree(Tree { entries: Vec::new() }));
    let tree_digest = repo.write(&tree).unwrap();

    let commit = repo.new_object(Payload::Commit(Commit {
        tree: tree_digest,
        parents: Vec::new(),
        author: "A <a@example.com> 0 +0000".into(),
        committer: "A <a@example.com> 0 +0000".into(),
        message: "initial commit\n".into(),
    }));
    let commit_digest = repo.write(&commit).unwrap();

    let looked_up = repo.lookup(commit_digest, Some(git_odb::Kind::Commit)).unwrap();
    match looked_up.borrow().payload() {
        Payload::Commit(c) => assert_eq!(c.tree, tree_digest),
        other => panic!("expected a commit payload, got {other:?}"),
    }
}

#[test]
fn a_tag_pointing_at_a_blob_round_trips() {
    let root = tempfile::tempdir().unwrap();
    let git_dir = init_non_bare(root.path());
    let mut repo = Repository::open(&git_dir).unwrap();

    let blob = repo.new_object(Payload::Blob(Blob { data: b"contents".to_vec() }));
    let blob_digest = repo.write(&blob).unwrap();

    let tag = repo.new_object(Payload::Tag(Tag {
        target: blob_digest,
        target_kind: git_odb::Kind::Blob,
        name: "v1".into(),
        tagger: "A <a@example.com> 0 +0000".into(),
        message: "first release\n".into(),
    }));
    let tag_digest = repo.write(&tag).unwrap();

    let looked_up = repo.lookup(tag_digest, Some(git_odb::Kind::Tag)).unwrap();
    match looked_up.borrow().payload() {
        Payload::Tag(t) => assert_eq!(t.target, blob_digest),
        other => panic!("expected a tag payload, got {other:?}"),
    }
}

#[test]
fn the_index_is_materialized_lazily_and_reused() {
    let root = tempfile::tempdir().unwrap();
    let git_dir = init_non_bare(root.path());
    let repo = Repository::open(&git_dir).unwrap();

    let first = repo.index().unwrap();
    let second = repo.index().unwrap();
    assert_eq!(first.path(), second.path());
}

#[test]
fn a_bare_repository_has_no_index() {
    let root = tempfile::tempdir().unwrap();
    let git_dir = init_bare(root.path(), "bare.git");
    let repo = Repository::open(&git_dir).unwrap();
    assert!(repo.index().is_none());
}

#[test]
fn opening_a_path_without_head_is_not_a_repository() {
    let root = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(root.path().join("objects")).unwrap();
    let err = Repository::open(root.path()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotARepository);
}
