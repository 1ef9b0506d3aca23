//! Shared test utilities for integration tests.
//!
//! Builds bare git repositories commit by commit with git2, so history,
//! authors and timestamps are fully deterministic.

#![allow(dead_code)]

use anyhow::Result;
use git2::{ObjectType, Oid, Repository, Signature, Time};
use std::collections::BTreeMap;
use tempfile::TempDir;

/// 2018-03-06 16:51:36 UTC
pub const FIRST_COMMIT_TIME: i64 = 1_520_355_096;

pub const STREAM_DATA: &[u8] = b"other or unknown files should be delivered as binary.";
pub const KITTEN_DATA: &[u8] = &[0xff, 0xd8, 0xff, 0xe0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00, 0x01];
pub const OTHER_V1: &str = "# Other\n\nfirst version\n";
pub const OTHER_V2: &str = "# Other\n\nsecond version\n";
pub const TRAVERSING_V1: &str = "# Traversing\n\nfirst draft\n";
pub const TRAVERSING_V2: &str = "# Traversing\n\nsecond draft\n";
pub const PHOENIX: &str = "# Phoenix\n\nrises again\n";

enum Item {
    File(Vec<u8>),
    Gitlink(Oid),
}

/// A bare repository plus the working set of files for the next commit.
pub struct FixtureRepo {
    pub dir: TempDir,
    pub repo: Repository,
    files: BTreeMap<String, Item>,
    pub commits: Vec<Oid>,
}

impl FixtureRepo {
    pub fn new() -> Result<Self> {
        let dir = TempDir::new()?;
        let repo = Repository::init_bare(dir.path())?;
        Ok(Self {
            dir,
            repo,
            files: BTreeMap::new(),
            commits: Vec::new(),
        })
    }

    pub fn write(&mut self, path: &str, data: impl Into<Vec<u8>>) -> &mut Self {
        self.files.insert(path.to_string(), Item::File(data.into()));
        self
    }

    pub fn gitlink(&mut self, path: &str, target: Oid) -> &mut Self {
        self.files.insert(path.to_string(), Item::Gitlink(target));
        self
    }

    pub fn remove(&mut self, path: &str) -> &mut Self {
        self.files.remove(path);
        self
    }

    /// Commits the current file set on top of the previous commit.
    pub fn commit(&mut self, author: &str, time: i64, offset_minutes: i32, message: &str) -> Result<Oid> {
        let entries: Vec<(Vec<&str>, &Item)> = self
            .files
            .iter()
            .map(|(path, item)| (path.split('/').collect(), item))
            .collect();
        let tree_id = write_tree(&self.repo, &entries)?;
        let tree = self.repo.find_tree(tree_id)?;

        let email = format!("{}@example.com", author.to_lowercase());
        let signature = Signature::new(author, &email, &Time::new(time, offset_minutes))?;

        let parents = self
            .commits
            .last()
            .map(|oid| self.repo.find_commit(*oid))
            .transpose()?;
        let parent_refs: Vec<&git2::Commit> = parents.iter().collect();

        let oid = self
            .repo
            .commit(Some("HEAD"), &signature, &signature, message, &tree, &parent_refs)?;
        self.commits.push(oid);
        Ok(oid)
    }
}

fn write_tree(repo: &Repository, entries: &[(Vec<&str>, &Item)]) -> Result<Oid> {
    let mut builder = repo.treebuilder(None)?;
    let mut folders: BTreeMap<&str, Vec<(Vec<&str>, &Item)>> = BTreeMap::new();

    for (segments, item) in entries {
        match (segments.as_slice(), item) {
            ([name], Item::File(data)) => {
                let blob = repo.blob(data)?;
                builder.insert(*name, blob, 0o100644)?;
            }
            ([name], Item::Gitlink(target)) => {
                builder.insert(*name, *target, 0o160000)?;
            }
            ([folder, rest @ ..], _) => {
                folders.entry(*folder).or_default().push((rest.to_vec(), *item));
            }
            ([], _) => {}
        }
    }

    for (name, children) in folders {
        let subtree = write_tree(repo, &children)?;
        builder.insert(name, subtree, 0o040000)?;
    }

    Ok(builder.write()?)
}

pub fn blob_id(data: &[u8]) -> Result<Oid> {
    Ok(Oid::hash_object(ObjectType::Blob, data)?)
}

/// The repository most tests run against.
///
/// 1. Alice creates everything.
/// 2. Bob edits `other.md` and deletes `phoenix.md`.
/// 3. Carol (UTC+1) edits `down/traversing.md`, re-adds `phoenix.md` with
///    its original content and adds a `vendored` submodule.
pub struct DocsRepo {
    pub fixture: FixtureRepo,
    pub first: Oid,
    pub second: Oid,
    pub third: Oid,
}

pub fn docs_repo() -> Result<DocsRepo> {
    let mut fixture = FixtureRepo::new()?;

    fixture
        .write("index.md", "Git Docs Test Repository\n========================\n\nSome words about this project.")
        .write("other.md", OTHER_V1)
        .write("phoenix.md", PHOENIX)
        .write("kitten.jpg", KITTEN_DATA)
        .write("stream", STREAM_DATA)
        .write(".hidden", "not for your eyes")
        .write("down/index.md", "# \"Folders\" are a thing\n")
        .write("down/traversing.md", TRAVERSING_V1)
        .write("down/text-rendering.txt", "Text\nshould be\nalso\nrendered")
        .write("down/under/missing-index.md", "# Missing index\n")
        .write("sorting/.dotfile.md", "# hidden\n")
        .write("sorting/Alpha.md", "# Alpha\n")
        .write("sorting/beta.md", "# beta\n")
        .write("sorting/gamma.txt", "gamma")
        .write("sorting/Index.TXT", "not an index, no renderer")
        .write("sorting/index.txt", "the index")
        .write("sorting/zulu.bin", vec![0u8, 1, 2, 3])
        .write("sorting/Delta/readme.md", "# Delta\n")
        .write("sorting/charlie/readme.md", "# charlie\n")
        .write("garbled/broken.md", vec![b'#', b' ', 0xff, 0xfe]);
    let first = fixture.commit("Alice", FIRST_COMMIT_TIME, 0, "Initial content")?;

    fixture.write("other.md", OTHER_V2).remove("phoenix.md");
    let second = fixture.commit("Bob", FIRST_COMMIT_TIME + 3600, 0, "Edit other, drop phoenix")?;

    fixture
        .write("down/traversing.md", TRAVERSING_V2)
        .write("phoenix.md", PHOENIX)
        .gitlink("vendored", first);
    let third = fixture.commit("Carol", FIRST_COMMIT_TIME + 7200, 60, "Second draft, phoenix returns")?;

    Ok(DocsRepo {
        fixture,
        first,
        second,
        third,
    })
}
