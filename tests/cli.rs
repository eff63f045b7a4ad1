use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::str::contains;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tempfile::TempDir;

fn folio(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("folio"));
    cmd.current_dir(dir).env_remove("RUST_LOG");
    cmd
}

fn site() -> TempDir {
    let dir = TempDir::new().expect("tmp dir");
    let blog = dir.path().join("content").join("blog");
    fs::create_dir_all(&blog).expect("create blog dir");
    fs::write(blog.join("zeta.md"), "---\ntitle: Z\n---\nlast").expect("write zeta");
    fs::write(blog.join("alpha.mdx"), "---\ntitle: A\n---\nfirst").expect("write alpha");
    dir
}

fn saved_tutorials(path: &Path) -> Vec<String> {
    let file: Value = serde_json::from_str(&fs::read_to_string(path).expect("read favorites"))
        .expect("favorites json");
    let raw = file["saved_tutorials"].as_str().expect("saved_tutorials entry");
    serde_json::from_str(raw).expect("saved list")
}

#[test]
fn render_json_skips_frontmatter() {
    let dir = TempDir::new().expect("tmp dir");
    fs::write(
        dir.path().join("post.md"),
        "---\ntitle: T\n---\n# Hi\n**bold** body",
    )
    .expect("write post");

    let assert = folio(dir.path())
        .args(["render", "post.md", "--format", "json"])
        .assert()
        .success();

    let blocks: Value = serde_json::from_slice(&assert.get_output().stdout).expect("json output");
    assert_eq!(
        blocks,
        json!([
            { "type": "heading", "level": 1, "text": "Hi" },
            {
                "type": "paragraph",
                "content": [
                    { "type": "bold", "text": "bold" },
                    { "type": "text", "text": " body" }
                ]
            }
        ])
    );
}

#[test]
fn render_html_to_output_file() {
    let dir = TempDir::new().expect("tmp dir");
    fs::write(dir.path().join("post.md"), "## Titre").expect("write post");

    folio(dir.path())
        .args(["render", "post.md", "-o", "post.html"])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(dir.path().join("post.html")).expect("read output"),
        "<h2>Titre</h2>\n"
    );
}

#[test]
fn list_blog_is_sorted_by_slug() {
    let dir = site();
    folio(dir.path())
        .args(["list", "blog"])
        .assert()
        .success()
        .stdout("alpha\tA\nzeta\tZ\n");
}

#[test]
fn show_renders_item() {
    let dir = site();
    folio(dir.path())
        .args(["show", "blog", "alpha"])
        .assert()
        .success()
        .stdout("<p>first</p>\n");
}

#[test]
fn show_unknown_slug_fails() {
    let dir = site();
    folio(dir.path())
        .args(["show", "blog", "nope"])
        .assert()
        .code(1)
        .stderr(contains("Error: no blog item named nope"));
}

#[test]
fn copy_prints_code_block_verbatim() {
    let dir = TempDir::new().expect("tmp dir");
    fs::write(
        dir.path().join("guide.md"),
        "```sh\necho one\n```\n\nText\n\n```py\nprint(1)\n    print(2)\n```\n",
    )
    .expect("write guide");

    folio(dir.path())
        .args(["copy", "guide.md", "2"])
        .assert()
        .success()
        .stdout("print(1)\n    print(2)");
}

#[test]
fn copy_index_is_one_based() {
    let dir = TempDir::new().expect("tmp dir");
    fs::write(dir.path().join("guide.md"), "```\na\n```\n```\nb\n```").expect("write guide");

    folio(dir.path())
        .args(["copy", "guide.md", "0"])
        .assert()
        .code(1)
        .stdout("")
        .stderr(contains("has 2 code blocks, no block 0"));

    folio(dir.path())
        .args(["copy", "guide.md", "3"])
        .assert()
        .code(1)
        .stderr(contains("no block 3"));
}

#[test]
fn save_twice_toggles_favorites_file() {
    let dir = TempDir::new().expect("tmp dir");
    let favorites = dir.path().join("favorites.json");

    folio(dir.path())
        .args(["save", "rust-intro"])
        .assert()
        .success()
        .stdout("Saved rust-intro\n");
    assert_eq!(saved_tutorials(&favorites), vec!["rust-intro".to_string()]);

    folio(dir.path())
        .args(["save", "rust-intro"])
        .assert()
        .success()
        .stdout("Removed rust-intro\n");
    assert_eq!(saved_tutorials(&favorites), Vec::<String>::new());
}

#[test]
fn config_file_moves_content_root() {
    let dir = site();
    fs::rename(dir.path().join("content"), dir.path().join("site")).expect("move content");
    fs::write(dir.path().join("site.toml"), "[content]\nroot = \"site\"\n").expect("write config");

    folio(dir.path())
        .args(["--config", "site.toml", "list", "blog"])
        .assert()
        .success()
        .stdout("alpha\tA\nzeta\tZ\n");
}
