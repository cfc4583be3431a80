use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use taskpick_cache::CacheConfig;
use taskpick_core::{Task, TaskSource};
use taskpick_discovery::{filter, DiscoveryConfig, TaskDiscovery};
use tempfile::TempDir;

/// A project tree plus an isolated cache directory
struct Fixture {
    tree: TempDir,
    cache: TempDir,
}

impl Fixture {
    fn new() -> Self {
        Self {
            tree: TempDir::new().unwrap(),
            cache: TempDir::new().unwrap(),
        }
    }

    fn root(&self) -> &Path {
        self.tree.path()
    }

    fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.root().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    fn config(&self) -> DiscoveryConfig {
        DiscoveryConfig::default().cache(CacheConfig::in_dir(self.cache.path()))
    }

    fn discovery_in(&self, relative: &str) -> TaskDiscovery {
        TaskDiscovery::new(self.root().join(relative), self.config())
    }
}

fn names(tasks: &[Task]) -> Vec<&str> {
    tasks.iter().map(|t| t.name.as_str()).collect()
}

fn labelled(tasks: &[Task]) -> Vec<String> {
    tasks.iter().map(Task::qualified_name).collect()
}

fn bump_mtime(path: &Path) {
    let later = SystemTime::now() + Duration::from_secs(120);
    File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(later)
        .unwrap();
}

#[test]
fn test_single_returns_every_script_verbatim() {
    let fixture = Fixture::new();
    fixture.write(
        "package.json",
        r#"{"scripts":{"dev":"vite --host 0.0.0.0","build":"tsc && vite build","test":"vitest run"}}"#,
    );

    let tasks = fixture.discovery_in("").discover(false);

    let pairs: Vec<(&str, &str)> = tasks
        .iter()
        .map(|t| (t.name.as_str(), t.command.as_str()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("dev", "vite --host 0.0.0.0"),
            ("build", "tsc && vite build"),
            ("test", "vitest run"),
        ]
    );
    assert!(tasks.iter().all(|t| t.package_label.is_none() && t.package_directory.is_none()));
}

#[test]
fn test_single_without_manifest_is_empty() {
    let fixture = Fixture::new();
    fs::create_dir_all(fixture.root().join("empty")).unwrap();

    let discovery = fixture.discovery_in("empty");
    if let Some(dir) = discovery.nearest_definition_dir() {
        eprintln!(
            "skipping: temp dir sits below a package.json in {}",
            dir.display()
        );
        return;
    }
    assert!(discovery.discover(false).is_empty());
    assert_eq!(discovery.files_parsed(), 0);
}

#[test]
fn test_single_finds_manifest_in_ancestor() {
    let fixture = Fixture::new();
    fixture.write("package.json", r#"{"scripts":{"start":"node index.js"}}"#);
    fs::create_dir_all(fixture.root().join("src/routes/api")).unwrap();

    let tasks = fixture.discovery_in("src/routes/api").discover(false);
    assert_eq!(names(&tasks), vec!["start"]);
}

#[test]
fn test_workspace_union_is_sorted_by_label_then_name() {
    let fixture = Fixture::new();
    fixture.write(
        "package.json",
        r#"{"workspaces":["packages/*"],"scripts":{"release":"changeset publish","build":"turbo build"}}"#,
    );
    fixture.write("packages/z/package.json", r#"{"scripts":{"build":"tsup"}}"#);
    fixture.write(
        "packages/a/package.json",
        r#"{"scripts":{"test":"jest","build":"rollup -c"}}"#,
    );

    let tasks = fixture.discovery_in("packages/z").discover(true);

    assert_eq!(
        labelled(&tasks),
        vec![
            "(root):build",
            "(root):release",
            "packages/a:build",
            "packages/a:test",
            "packages/z:build",
        ]
    );
    let z_build = tasks.last().unwrap();
    assert_eq!(z_build.command, "tsup");
    assert_eq!(
        z_build.package_directory.as_deref(),
        Some(fixture.root().join("packages/z").as_path())
    );
}

#[test]
fn test_workspace_skips_excluded_directories() {
    let fixture = Fixture::new();
    fixture.write("package.json", r#"{"workspaces":["packages/*"]}"#);
    fixture.write("packages/app/package.json", r#"{"scripts":{"dev":"next dev"}}"#);
    fixture.write(
        "node_modules/some-dep/package.json",
        r#"{"scripts":{"postinstall":"node-gyp rebuild"}}"#,
    );
    fixture.write(
        "packages/app/node_modules/.bin/package.json",
        r#"{"scripts":{"nested":"true"}}"#,
    );
    fixture.write(".git/hooks/package.json", r#"{"scripts":{"hook":"true"}}"#);

    let tasks = fixture.discovery_in("").discover(true);
    assert_eq!(labelled(&tasks), vec!["packages/app:dev"]);
}

#[test]
fn test_workspace_recognises_declaration_file() {
    let fixture = Fixture::new();
    fixture.write("package.json", r#"{"scripts":{"lint":"eslint ."}}"#);
    fixture.write("pnpm-workspace.yaml", "packages:\n  - 'apps/*'\n");
    fixture.write("apps/docs/package.json", r#"{"scripts":{"dev":"astro dev"}}"#);

    let tasks = fixture.discovery_in("apps/docs").discover(true);
    assert_eq!(labelled(&tasks), vec!["(root):lint", "apps/docs:dev"]);
}

#[test]
fn test_workspace_without_markers_falls_back_to_single() {
    let fixture = Fixture::new();
    fixture.write("package.json", r#"{"scripts":{"b":"two","a":"one"}}"#);
    fixture.write("nested/package.json", r#"{"scripts":{"c":"three"}}"#);

    let discovery = fixture.discovery_in("");
    let single = discovery.discover(false);
    assert_eq!(names(&single), vec!["b", "a"]);

    if let Some(root) = taskpick_discovery::find_workspace_root(fixture.root()) {
        eprintln!(
            "skipping fallback check: temp dir sits inside workspace {}",
            root.display()
        );
        return;
    }
    assert_eq!(discovery.discover(true), single);
}

#[test]
fn test_workspace_honours_extra_excluded_names() {
    let fixture = Fixture::new();
    fixture.write("package.json", r#"{"workspaces":["packages/*"]}"#);
    fixture.write("packages/app/package.json", r#"{"scripts":{"dev":"vite"}}"#);
    fixture.write(
        "fixtures/broken-app/package.json",
        r#"{"scripts":{"dev":"exit 1"}}"#,
    );

    let everything = fixture.discovery_in("").discover(true);
    assert_eq!(
        labelled(&everything),
        vec!["fixtures/broken-app:dev", "packages/app:dev"]
    );

    let config = fixture.config().exclude("fixtures");
    let tasks = TaskDiscovery::new(fixture.root(), config).discover(true);
    assert_eq!(labelled(&tasks), vec!["packages/app:dev"]);
}

#[test]
fn test_duplicate_names_across_packages_are_kept() {
    let fixture = Fixture::new();
    fixture.write("package.json", r#"{"workspaces":["*"],"scripts":{"test":"jest"}}"#);
    fixture.write("web/package.json", r#"{"scripts":{"test":"vitest"}}"#);
    fixture.write("api/package.json", r#"{"scripts":{"test":"mocha"}}"#);

    let tasks = fixture.discovery_in("").discover(true);
    assert_eq!(labelled(&tasks), vec!["(root):test", "api:test", "web:test"]);
}

#[test]
fn test_broken_member_manifest_does_not_abort_discovery() {
    let fixture = Fixture::new();
    fixture.write("package.json", r#"{"workspaces":["packages/*"]}"#);
    fixture.write("packages/ok/package.json", r#"{"scripts":{"build":"tsc"}}"#);
    fixture.write("packages/broken/package.json", "{ this is not json");

    let tasks = fixture.discovery_in("").discover(true);
    assert_eq!(labelled(&tasks), vec!["packages/ok:build"]);
}

#[test]
fn test_build_file_targets() {
    let fixture = Fixture::new();
    fixture.write(
        "Makefile",
        ".PHONY: all build\nall:\n\nbuild:\n\tcargo build --release\n\tstrip target/release/app\n",
    );

    let config = fixture.config().source(TaskSource::BuildFile);
    let tasks = TaskDiscovery::new(fixture.root(), config).discover(false);

    let pairs: Vec<(&str, &str)> = tasks
        .iter()
        .map(|t| (t.name.as_str(), t.command.as_str()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("all", "make all"),
            ("build", "cargo build --release && strip target/release/app"),
        ]
    );
    assert!(tasks.iter().all(|t| t.source == TaskSource::BuildFile));
}

#[test]
fn test_build_files_in_workspace() {
    let fixture = Fixture::new();
    fixture.write("package.json", r#"{"workspaces":["services/*"]}"#);
    fixture.write("Makefile", "up:\n\tdocker compose up\n");
    fixture.write("services/auth/Makefile", "migrate:\n\t./migrate.sh\n");
    fixture.write("services/auth/package.json", r#"{"scripts":{"dev":"tsx"}}"#);

    let config = fixture.config().source(TaskSource::BuildFile);
    let tasks = TaskDiscovery::new(fixture.root(), config).discover(true);

    assert_eq!(labelled(&tasks), vec!["(root):up", "services/auth:migrate"]);
}

#[test]
fn test_cache_round_trip_skips_parsing() {
    let fixture = Fixture::new();
    fixture.write("package.json", r#"{"workspaces":["pkgs/*"],"scripts":{"ci":"turbo ci"}}"#);
    fixture.write("pkgs/one/package.json", r#"{"scripts":{"build":"tsc"}}"#);

    let first = fixture.discovery_in("");
    let initial = first.discover(true);
    assert_eq!(first.files_parsed(), 2);

    let second = fixture.discovery_in("");
    let cached = second.discover(true);
    assert_eq!(cached, initial);
    assert_eq!(second.files_parsed(), 0);
    assert_eq!(second.cache().unwrap().statistics().hits, 1);
}

#[test]
fn test_touching_a_file_invalidates_the_cache() {
    let fixture = Fixture::new();
    fixture.write("package.json", r#"{"workspaces":["pkgs/*"]}"#);
    let member = fixture.write("pkgs/one/package.json", r#"{"scripts":{"build":"tsc"}}"#);

    fixture.discovery_in("").discover(true);

    fs::write(&member, r#"{"scripts":{"build":"tsc -b"}}"#).unwrap();
    bump_mtime(&member);

    let discovery = fixture.discovery_in("");
    let tasks = discovery.discover(true);
    assert_eq!(discovery.files_parsed(), 2);
    assert_eq!(tasks[0].command, "tsc -b");
}

#[test]
fn test_new_package_invalidates_the_cache() {
    let fixture = Fixture::new();
    fixture.write("package.json", r#"{"workspaces":["pkgs/*"]}"#);
    fixture.write("pkgs/one/package.json", r#"{"scripts":{"build":"tsc"}}"#);
    fixture.discovery_in("").discover(true);

    fixture.write("pkgs/two/package.json", r#"{"scripts":{"build":"esbuild"}}"#);

    let discovery = fixture.discovery_in("");
    let tasks = discovery.discover(true);
    assert_eq!(discovery.files_parsed(), 3);
    assert_eq!(labelled(&tasks), vec!["pkgs/one:build", "pkgs/two:build"]);
}

#[test]
fn test_disabled_cache_always_parses() {
    let fixture = Fixture::new();
    fixture.write("package.json", r#"{"scripts":{"x":"y"}}"#);

    for _ in 0..2 {
        let discovery = TaskDiscovery::new(fixture.root(), fixture.config().without_cache());
        discovery.discover(false);
        assert_eq!(discovery.files_parsed(), 1);
    }
    assert!(!fixture.cache.path().join("scripts.json").exists());
}

#[test]
fn test_discovered_tasks_feed_the_matcher() {
    let fixture = Fixture::new();
    fixture.write(
        "package.json",
        r#"{"scripts":{"test":"jest","test:watch":"jest --watch","build":"tsc"}}"#,
    );

    let tasks = fixture.discovery_in("").discover(false);
    let matched: Vec<&str> = filter(&tasks, "test watch")
        .into_iter()
        .map(|t| t.name.as_str())
        .collect();
    assert_eq!(matched, vec!["test:watch"]);
}
