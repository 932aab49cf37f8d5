//! Integration tests for projdoc


use std::fs;

use assert_cmd::Command;
use harness::{TestTree, document, json_paths, json_size, run_projdoc};
use predicates::prelude::*;

#[test]
fn test_basic_project_documented() {
    let tree = TestTree::new();
    tree.add_sized("src/main.txt", 100);
    tree.add_sized("README.md", 50);
    let out = TestTree::new();

    let (markdown, json) = document(&tree, out.path(), &[]);

    assert_eq!(json_paths(&json), vec!["src", "src/main.txt", "README.md"]);
    assert_eq!(json_size(&json, "src"), 100);
    assert_eq!(json_size(&json, "README.md"), 50);
    assert_eq!(json["files"][0]["type"], "dir");
    assert_eq!(json["files"][1]["type"], "file");

    assert!(markdown.contains("- **src/** — `100 B`"), "{}", markdown);
    assert!(markdown.contains("- main.txt — `100 B`"), "{}", markdown);
    assert!(markdown.contains("- README.md — `50 B`"), "{}", markdown);
    assert!(markdown.ends_with('\n'));
}

#[test]
fn test_markdown_sections_in_order() {
    let tree = TestTree::new();
    tree.add_file("index.php", "<?php");
    let out = TestTree::new();

    let (markdown, _json) = document(&tree, out.path(), &[]);

    let title = markdown.find("# Project structure for").expect("title");
    let versions = markdown.find("## Versions").expect("versions");
    let listing = markdown.find("## Project Tree").expect("tree");
    assert!(title < versions && versions < listing);
    assert!(markdown.contains("> Generated By: projdoc"));
    assert!(markdown.contains("- Framework: **Unknown**"));
    assert!(markdown.contains("- Database: **Unavailable**"));
    assert!(!markdown.contains("## Packages"));
}

#[test]
fn test_default_excludes_skip_dependency_dirs() {
    let tree = TestTree::new();
    tree.add_sized("node_modules/left-pad/index.js", 500);
    tree.add_sized("vendor/autoload.php", 500);
    tree.add_sized("app/Http/Kernel.php", 10);
    let out = TestTree::new();

    let (markdown, json) = document(&tree, out.path(), &[]);

    assert_eq!(json_paths(&json), vec!["app", "app/Http", "app/Http/Kernel.php"]);
    assert_eq!(json_size(&json, "app"), 10);
    assert!(!markdown.contains("node_modules"));
    assert!(!markdown.contains("vendor"));
}

#[test]
fn test_extra_exclude_flag() {
    let tree = TestTree::new();
    tree.add_sized("cache/blob.bin", 100);
    tree.add_sized("keep.txt", 1);
    let out = TestTree::new();

    let (_markdown, json) = document(&tree, out.path(), &["--exclude", "cache"]);
    assert_eq!(json_paths(&json), vec!["keep.txt"]);
}

#[test]
fn test_exact_match_does_not_treat_names_as_patterns() {
    let tree = TestTree::new();
    tree.add_sized("debug.log", 1);
    tree.add_sized("main.txt", 1);
    let out = TestTree::new();

    let (_markdown, json) = document(&tree, out.path(), &["--exclude", "*.log"]);
    assert_eq!(json_paths(&json), vec!["debug.log", "main.txt"]);
}

#[test]
fn test_glob_flag_matches_patterns() {
    let tree = TestTree::new();
    tree.add_sized("debug.log", 1);
    tree.add_sized("logs/today.log", 1);
    tree.add_sized("main.txt", 1);
    let out = TestTree::new();

    let (_markdown, json) = document(&tree, out.path(), &["--glob", "--exclude", "*.log"]);
    assert_eq!(json_paths(&json), vec!["logs", "main.txt"]);
    assert_eq!(json_size(&json, "logs"), 0);
}

#[test]
fn test_depth_zero_lists_only_top_level() {
    let tree = TestTree::new();
    tree.add_sized("sub/one.txt", 10);
    tree.add_sized("sub/two.txt", 20);
    tree.add_sized("top.txt", 5);
    let out = TestTree::new();

    let (markdown, json) = document(&tree, out.path(), &["--depth", "0"]);

    assert_eq!(json_paths(&json), vec!["sub", "top.txt"]);
    assert_eq!(json_size(&json, "sub"), 0);
    assert!(markdown.contains("- **sub/** — `?`"), "{}", markdown);
}

#[test]
fn test_invalid_depth_means_unbounded() {
    let tree = TestTree::new();
    tree.add_sized("a/b/c/deep.txt", 7);
    let out = TestTree::new();

    for depth in ["-1", "many"] {
        let (_markdown, json) = document(&tree, out.path(), &["--depth", depth]);
        assert_eq!(
            json_paths(&json),
            vec!["a", "a/b", "a/b/c", "a/b/c/deep.txt"],
            "depth {depth}"
        );
        assert_eq!(json_size(&json, "a"), 7);
    }
}

#[test]
fn test_natural_case_insensitive_ordering() {
    let tree = TestTree::new();
    for name in ["file10.txt", "File2.txt", "file1.txt", "apple.txt", "Zebra.txt"] {
        tree.add_sized(name, 1);
    }
    let out = TestTree::new();

    let (_markdown, json) = document(&tree, out.path(), &[]);
    assert_eq!(
        json_paths(&json),
        vec!["apple.txt", "file1.txt", "File2.txt", "file10.txt", "Zebra.txt"]
    );
}

#[test]
fn test_human_readable_sizes() {
    let tree = TestTree::new();
    tree.add_sized("big.bin", 1536);
    tree.add_sized("empty.txt", 0);
    let out = TestTree::new();

    let (markdown, json) = document(&tree, out.path(), &[]);
    assert!(markdown.contains("- big.bin — `1.5 KB`"), "{}", markdown);
    assert!(markdown.contains("- empty.txt — `?`"), "{}", markdown);
    assert_eq!(json_size(&json, "big.bin"), 1536);
    assert_eq!(json_size(&json, "empty.txt"), 0);
}

#[test]
fn test_json_header_fields() {
    let tree = TestTree::new();
    tree.add_file("a.txt", "a");
    let out = TestTree::new();

    let (_markdown, json) = document(&tree, out.path(), &[]);
    let project = tree
        .path()
        .canonicalize()
        .unwrap()
        .file_name()
        .unwrap()
        .to_string_lossy()
        .to_string();
    assert_eq!(json["project"], project.as_str());
    assert_eq!(json["type"], "Software Project");
    assert_eq!(json["versions"]["framework"], "Unknown");
    assert_eq!(json["versions"]["database"], "Unavailable");
    assert_eq!(json["packages"].as_array().unwrap().len(), 0);
    assert_eq!(json["discoverable"].as_array().unwrap().len(), 0);
    assert!(json["files"][0]["modified"].is_string());
}

#[test]
fn test_json_is_four_space_indented() {
    let tree = TestTree::new();
    tree.add_file("a.txt", "a");
    let out = TestTree::new();

    document(&tree, out.path(), &[]);
    let raw = fs::read_to_string(out.path().join("report.json")).unwrap();
    assert!(raw.starts_with("{\n    \"project\""), "{}", raw);
}

#[test]
fn test_no_json_flag() {
    let tree = TestTree::new();
    tree.add_file("a.txt", "a");
    let out = TestTree::new();
    let md = out.path().join("report.md");

    let result = run_projdoc(
        out.path(),
        &[
            tree.path().to_str().unwrap(),
            "--output",
            md.to_str().unwrap(),
            "--no-json",
        ],
    );
    assert!(result.success, "{}", result.stderr);
    assert!(md.exists());
    assert!(!out.path().join("report.json").exists());
    assert!(result.stdout.contains("Wrote markdown to:"));
    assert!(!result.stdout.contains("Wrote JSON to:"));
}

#[test]
fn test_json_name_appended_for_non_md_output() {
    let tree = TestTree::new();
    tree.add_file("a.txt", "a");
    let out = TestTree::new();
    let target = out.path().join("structure.txt");

    let result = run_projdoc(
        out.path(),
        &[tree.path().to_str().unwrap(), "-o", target.to_str().unwrap()],
    );
    assert!(result.success, "{}", result.stderr);
    assert!(target.exists());
    assert!(out.path().join("structure.txt.json").exists());
}

#[test]
fn test_default_output_lands_in_project() {
    let tree = TestTree::new();
    tree.add_file("a.txt", "a");

    let result = run_projdoc(tree.path(), &[]);
    assert!(result.success, "{}", result.stderr);
    assert!(tree.path().join("project-structure.md").exists());
    assert!(tree.path().join("project-structure.json").exists());
    assert!(result.stdout.contains("Entries written: 1"), "{}", result.stdout);
}

#[test]
fn test_output_parent_dirs_created() {
    let tree = TestTree::new();
    tree.add_file("a.txt", "a");
    let out = TestTree::new();
    let target = out.path().join("docs/nested/structure.md");

    let result = run_projdoc(
        out.path(),
        &[tree.path().to_str().unwrap(), "-o", target.to_str().unwrap()],
    );
    assert!(result.success, "{}", result.stderr);
    assert!(target.exists());
    assert!(out.path().join("docs/nested/structure.json").exists());
}

#[test]
fn test_repeat_runs_have_same_listing() {
    let tree = TestTree::new();
    tree.add_sized("src/a.txt", 3);
    tree.add_sized("src/b/c.txt", 4);
    tree.add_sized("z.txt", 5);
    let out = TestTree::new();

    let (first_md, first_json) = document(&tree, out.path(), &[]);
    let (second_md, second_json) = document(&tree, out.path(), &[]);

    assert_eq!(first_json["files"], second_json["files"]);
    let listing = |md: &str| md[md.find("## Project Tree").unwrap()..].to_string();
    assert_eq!(listing(&first_md), listing(&second_md));
}

#[test]
fn test_repeat_runs_with_default_output_skip_own_report() {
    let tree = TestTree::new();
    tree.add_sized("src/a.txt", 3);
    tree.add_sized("z.txt", 5);

    let first = run_projdoc(tree.path(), &[]);
    assert!(first.success, "{}", first.stderr);
    let first_json = fs::read_to_string(tree.path().join("project-structure.json")).unwrap();
    let second = run_projdoc(tree.path(), &[]);
    assert!(second.success, "{}", second.stderr);
    let second_json = fs::read_to_string(tree.path().join("project-structure.json")).unwrap();

    let first_json: serde_json::Value = serde_json::from_str(&first_json).unwrap();
    let second_json: serde_json::Value = serde_json::from_str(&second_json).unwrap();
    assert_eq!(json_paths(&second_json), vec!["src", "src/a.txt", "z.txt"]);
    assert_eq!(first_json["files"], second_json["files"]);
    assert!(second.stdout.contains("Entries written: 3"), "{}", second.stdout);
}

#[test]
fn test_relative_output_inside_project_is_skipped() {
    let tree = TestTree::new();
    tree.add_sized("docs/guide.txt", 8);

    for _ in 0..2 {
        let result = run_projdoc(tree.path(), &[".", "-o", "docs/structure.md"]);
        assert!(result.success, "{}", result.stderr);
    }

    let json = fs::read_to_string(tree.path().join("docs/structure.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(json_paths(&json), vec!["docs", "docs/guide.txt"]);
    assert_eq!(json_size(&json, "docs"), 8);
}

#[test]
fn test_composer_lock_packages_listed() {
    let tree = TestTree::new();
    tree.add_file(
        "composer.lock",
        r#"{
    "packages": [
        {"name": "acme/widgets", "version": "v2.1.0", "extra": {"laravel": {
            "providers": ["Acme\\Widgets\\WidgetServiceProvider"],
            "aliases": {"Widget": "Acme\\Widgets\\Facade"}
        }}},
        {"name": "monolog/monolog", "version": "3.5.0", "extra": []}
    ]
}"#,
    );
    let out = TestTree::new();

    let (markdown, json) = document(&tree, out.path(), &[]);

    assert!(markdown.contains("## Packages"));
    assert!(markdown.contains("| acme/widgets | v2.1.0 |"));
    assert!(markdown.contains("| monolog/monolog | 3.5.0 |"));
    assert!(markdown.contains("## Discoverable Packages"));
    assert!(markdown.contains("- **acme/widgets** `v2.1.0`"));
    assert!(markdown.contains("`Acme\\Widgets\\WidgetServiceProvider`"));
    assert!(markdown.contains("`Widget` → `Acme\\Widgets\\Facade`"));
    assert!(!markdown.contains("- **monolog/monolog**"));

    assert_eq!(json["packages"].as_array().unwrap().len(), 2);
    assert_eq!(json["discoverable"].as_array().unwrap().len(), 1);
    assert_eq!(json["discoverable"][0]["name"], "acme/widgets");
}

#[test]
fn test_no_packages_flag() {
    let tree = TestTree::new();
    tree.add_file(
        "composer.lock",
        r#"{"packages": [{"name": "acme/widgets", "version": "1.0.0"}]}"#,
    );
    let out = TestTree::new();

    let (markdown, json) = document(&tree, out.path(), &["--no-packages"]);
    assert!(!markdown.contains("## Packages"));
    assert_eq!(json["packages"].as_array().unwrap().len(), 0);
}

#[test]
fn test_broken_lock_file_is_not_fatal() {
    let tree = TestTree::new();
    tree.add_file("composer.lock", "{ not json");
    let out = TestTree::new();

    let (markdown, json) = document(&tree, out.path(), &[]);
    assert!(!markdown.contains("## Packages"));
    assert_eq!(json_paths(&json), vec!["composer.lock"]);
}

#[test]
fn test_config_file_in_project() {
    let tree = TestTree::new();
    tree.add_file(
        ".projdoc.toml",
        r#"
[project]
type = "Laravel Application"
framework_label = "Laravel"

[files]
exclude = ["private"]

[versions]
framework = { value = "11.2.0" }
"#,
    );
    tree.add_sized("private/secret.txt", 1);
    tree.add_sized("vendor/kept.php", 1);
    let out = TestTree::new();

    let (markdown, json) = document(&tree, out.path(), &[]);

    assert!(markdown.contains("> Project Type: Laravel Application"));
    assert!(markdown.contains("- Laravel: **11.2.0**"));
    assert_eq!(json["versions"]["framework"], "11.2.0");
    // the configured list replaces the defaults
    assert_eq!(
        json_paths(&json),
        vec!["vendor", "vendor/kept.php", ".projdoc.toml"]
    );
}

#[test]
fn test_explicit_config_flag() {
    let tree = TestTree::new();
    tree.add_sized("a.txt", 1);
    let out = TestTree::new();
    let config = out.path().join("custom.toml");
    fs::write(&config, "[json]\nenabled = false\n").unwrap();
    let md = out.path().join("report.md");

    let result = run_projdoc(
        out.path(),
        &[
            tree.path().to_str().unwrap(),
            "-o",
            md.to_str().unwrap(),
            "-c",
            config.to_str().unwrap(),
        ],
    );
    assert!(result.success, "{}", result.stderr);
    assert!(md.exists());
    assert!(!out.path().join("report.json").exists());
}

#[cfg(unix)]
#[test]
fn test_version_command_probe() {
    let tree = TestTree::new();
    tree.add_file(
        ".projdoc.toml",
        "[versions]\nruntime = { command = [\"sh\", \"-c\", \"echo 8.3.4\"] }\ndatabase = { command = [\"false\"] }\n",
    );
    let out = TestTree::new();

    let (markdown, json) = document(&tree, out.path(), &[]);
    assert!(markdown.contains("- Runtime: **8.3.4**"), "{}", markdown);
    assert_eq!(json["versions"]["database"], "Unavailable");
}

#[test]
fn test_bad_config_is_an_error() {
    let tree = TestTree::new();
    tree.add_file(".projdoc.toml", "[bogus]\nkey = 1\n");

    Command::cargo_bin("projdoc")
        .unwrap()
        .arg(tree.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("invalid config"));
}

#[test]
fn test_missing_root_fails() {
    let out = TestTree::new();
    let missing = out.path().join("does-not-exist");

    Command::cargo_bin("projdoc")
        .unwrap()
        .current_dir(out.path())
        .arg(&missing)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("projdoc: Path not found"));

    assert!(!out.path().join("project-structure.md").exists());
}

#[test]
fn test_file_root_fails() {
    let tree = TestTree::new();
    let file = tree.add_file("plain.txt", "x");

    Command::cargo_bin("projdoc")
        .unwrap()
        .arg(&file)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("not a directory"));
}

#[test]
fn test_quiet_prints_nothing() {
    let tree = TestTree::new();
    tree.add_file("a.txt", "a");

    Command::cargo_bin("projdoc")
        .unwrap()
        .arg(tree.path())
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_summary_without_color_has_no_escapes() {
    let tree = TestTree::new();
    tree.add_file("a.txt", "a");

    Command::cargo_bin("projdoc")
        .unwrap()
        .arg(tree.path())
        .args(["--color", "never"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote JSON to:"))
        .stdout(predicate::str::contains("\x1b[").not());
}
