//! End-to-end scaffolding runs through the public API

use anyhow::Result;
use scaffold_core::ui::Validator;
use scaffold_core::{
    Catalog, Choice, CreateArgs, LocalTemplates, Outcome, PackageManifest, ProductConfig,
    RemoteTemplates, ScaffoldError, Scaffolder, Ui,
};
use std::collections::VecDeque;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use url::Url;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const CATALOG: &str = r#"[
    { "name": "echarts", "color": "green" },
    { "name": "typescript", "color": "green" },
    {
        "name": "vue3.2",
        "color": "green",
        "variants": [
            { "name": "vue3.2", "display": "JavaScript", "color": "green" },
            { "name": "vue3.2-ts", "display": "TypeScript", "color": "blue" }
        ]
    }
]"#;

#[derive(Clone)]
struct Product;

impl ProductConfig for Product {
    fn name(&self) -> &'static str {
        "scaffold-flow-test"
    }

    fn display_name(&self) -> &'static str {
        "Scaffold Flow Test"
    }

    fn catalog_json(&self) -> &'static str {
        CATALOG
    }

    fn user_agent_env(&self) -> &'static str {
        "SCAFFOLD_FLOW_TEST_USER_AGENT_UNSET"
    }
}

enum Reply {
    Text(&'static str),
    Confirm(bool),
    Select(usize),
}

/// Answers prompts from a queue and remembers what it was asked
#[derive(Default)]
struct Replay {
    replies: VecDeque<Reply>,
    asked: Vec<String>,
    rejected: Vec<&'static str>,
    tasks: Vec<(String, bool)>,
}

impl Replay {
    fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: replies.into_iter().collect(),
            ..Self::default()
        }
    }
}

impl Ui for Replay {
    fn input(&mut self, message: &str, default: &str, validate: Option<Validator>) -> Result<String> {
        loop {
            self.asked.push(message.to_string());
            let value = match self.replies.pop_front() {
                Some(Reply::Text("")) => default.to_string(),
                Some(Reply::Text(text)) => text.to_string(),
                _ => panic!("no text reply for {}", message),
            };
            match validate.map(|check| check(value.as_str())) {
                Some(Err(rejection)) => self.rejected.push(rejection),
                _ => return Ok(value),
            }
        }
    }

    fn confirm(&mut self, message: &str) -> Result<bool> {
        self.asked.push(message.to_string());
        match self.replies.pop_front() {
            Some(Reply::Confirm(value)) => Ok(value),
            _ => panic!("no confirm reply for {}", message),
        }
    }

    fn select(&mut self, message: &str, choices: &[Choice]) -> Result<usize> {
        self.asked.push(message.to_string());
        match self.replies.pop_front() {
            Some(Reply::Select(idx)) if idx < choices.len() => Ok(idx),
            _ => panic!("no select reply for {}", message),
        }
    }

    fn info(&mut self, _message: &str) -> Result<()> {
        Ok(())
    }

    fn task_started(&mut self, _message: &str) -> Result<()> {
        Ok(())
    }

    fn task_finished(&mut self, message: &str, success: bool) -> Result<()> {
        self.tasks.push((message.to_string(), success));
        Ok(())
    }
}

fn bundled_templates() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../templates")
}

fn args(target: &str, template: Option<&str>) -> CreateArgs {
    CreateArgs {
        target_dir: Some(target.to_string()),
        template: template.map(str::to_string),
    }
}

fn workdir() -> (TempDir, PathBuf) {
    let temp = TempDir::new().unwrap();
    let cwd = temp.path().to_path_buf();
    (temp, cwd)
}

#[tokio::test]
async fn test_bundled_typescript_project() {
    let (_temp, cwd) = workdir();
    let catalog = Product.catalog().unwrap();
    let provider = LocalTemplates::new(bundled_templates());
    let scaffolder = Scaffolder::new(&Product, &catalog, &provider, cwd.clone());
    // "typescript" is the second framework in the list
    let mut ui = Replay::new([Reply::Select(1)]);

    let outcome = scaffolder.run(&args("demo", None), &mut ui).await.unwrap();

    let Outcome::Done(report) = outcome else {
        panic!("scaffold did not finish");
    };
    let root = cwd.join("demo");
    assert_eq!(report.root, root);
    assert_eq!(ui.asked, vec!["Select a framework:"]);

    let manifest = PackageManifest::read_from(&root).unwrap();
    assert_eq!(manifest.name(), Some("demo"));
    assert_eq!(manifest.get("private"), Some(&serde_json::Value::Bool(true)));
    assert!(root.join(".gitignore").is_file());
    assert!(!root.join("_gitignore").exists());
    assert!(root.join("src/main.ts").is_file());
    assert!(root.join("index.html").is_file());
}

#[tokio::test]
async fn test_bundled_variant_picked_interactively() {
    let (_temp, cwd) = workdir();
    let catalog = Product.catalog().unwrap();
    let provider = LocalTemplates::new(bundled_templates());
    let scaffolder = Scaffolder::new(&Product, &catalog, &provider, cwd.clone());
    let mut ui = Replay::new([
        Reply::Text("vue-app"),
        Reply::Select(2),
        Reply::Select(1),
    ]);

    let outcome = scaffolder
        .run(&CreateArgs::default(), &mut ui)
        .await
        .unwrap();

    let Outcome::Done(report) = outcome else {
        panic!("scaffold did not finish");
    };
    assert_eq!(report.template_id, "vue3.2-ts");
    assert_eq!(report.package_name, "vue-app");
    assert_eq!(
        ui.asked,
        vec!["Project name:", "Select a framework:", "Select a variant:"]
    );
    assert!(cwd.join("vue-app/src/App.vue").is_file());
    assert!(cwd.join("vue-app/vite.config.ts").is_file());
}

#[tokio::test]
async fn test_declined_overwrite_leaves_directory_alone() {
    let (_temp, cwd) = workdir();
    std::fs::create_dir_all(cwd.join("demo")).unwrap();
    std::fs::write(cwd.join("demo/notes.txt"), "keep me").unwrap();

    let catalog = Product.catalog().unwrap();
    let provider = LocalTemplates::new(bundled_templates());
    let scaffolder = Scaffolder::new(&Product, &catalog, &provider, cwd.clone());
    let mut ui = Replay::new([Reply::Confirm(false)]);

    let outcome = scaffolder
        .run(&args("demo", Some("typescript")), &mut ui)
        .await
        .unwrap();

    assert!(matches!(outcome, Outcome::Aborted(ref msg) if msg == "Operation cancelled"));
    assert_eq!(
        std::fs::read_to_string(cwd.join("demo/notes.txt")).unwrap(),
        "keep me"
    );
    assert!(!cwd.join("demo/package.json").exists());
}

#[tokio::test]
async fn test_unknown_template_is_reported() {
    let (_temp, cwd) = workdir();
    let catalog = Catalog::from_json(r#"[{ "name": "svelte" }]"#).unwrap();
    let provider = LocalTemplates::new(bundled_templates());
    let scaffolder = Scaffolder::new(&Product, &catalog, &provider, cwd.clone());
    let mut ui = Replay::default();

    let err = scaffolder
        .run(&args("demo", Some("svelte")), &mut ui)
        .await
        .unwrap_err();

    assert!(err
        .chain()
        .any(|cause| matches!(cause.downcast_ref::<ScaffoldError>(), Some(ScaffoldError::TemplateNotFound(id)) if id == "svelte")));
    assert_eq!(ui.tasks, vec![("Copy failed".to_string(), false)]);
}

#[tokio::test]
async fn test_invalid_package_name_is_asked_again() {
    let (_temp, cwd) = workdir();
    let catalog = Product.catalog().unwrap();
    let provider = LocalTemplates::new(bundled_templates());
    let scaffolder = Scaffolder::new(&Product, &catalog, &provider, cwd.clone());
    let mut ui = Replay::new([Reply::Text("Not Valid"), Reply::Text("my-site")]);

    let outcome = scaffolder
        .run(&args("My Site", Some("typescript")), &mut ui)
        .await
        .unwrap();

    let Outcome::Done(report) = outcome else {
        panic!("scaffold did not finish");
    };
    assert_eq!(ui.asked, vec!["Package name:", "Package name:"]);
    assert_eq!(ui.rejected, vec!["Invalid package.json name"]);
    assert_eq!(report.package_name, "my-site");
    assert_eq!(
        PackageManifest::read_from(&cwd.join("My Site")).unwrap().name(),
        Some("my-site")
    );
}

fn repository_archive() -> Vec<u8> {
    let mut buffer = Vec::new();
    {
        let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
        let options = SimpleFileOptions::default();
        for (path, contents) in [
            ("template-echarts-master/package.json", r#"{"name":"template-echarts","private":true}"#),
            ("template-echarts-master/_gitignore", "dist\n"),
            ("template-echarts-master/src/main.js", "import * as echarts from 'echarts'\n"),
        ] {
            zip.start_file(path, options).unwrap();
            zip.write_all(contents.as_bytes()).unwrap();
        }
        zip.finish().unwrap();
    }
    buffer
}

const ECHARTS_ARCHIVE_PATH: &str = "/fazba/template-echarts/zip/refs/heads/master";

fn remote_provider(server: &mockito::Server) -> RemoteTemplates {
    let base = Url::parse(&server.url()).unwrap();
    RemoteTemplates::new(base, "fazba", "master", "scaffold-flow-test")
}

#[tokio::test]
async fn test_remote_template_download() {
    let (_temp, cwd) = workdir();
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", ECHARTS_ARCHIVE_PATH)
        .with_status(200)
        .with_header("content-type", "application/zip")
        .with_body(repository_archive())
        .create_async()
        .await;

    let catalog = Product.catalog().unwrap();
    let provider = remote_provider(&server);
    let scaffolder = Scaffolder::new(&Product, &catalog, &provider, cwd.clone());
    let mut ui = Replay::default();

    let outcome = scaffolder
        .run(&args("charts", Some("echarts")), &mut ui)
        .await
        .unwrap();

    assert!(matches!(outcome, Outcome::Done(_)));
    mock.assert_async().await;
    assert_eq!(ui.tasks, vec![("Download complete".to_string(), true)]);

    let root = cwd.join("charts");
    assert_eq!(
        PackageManifest::read_from(&root).unwrap().name(),
        Some("charts")
    );
    assert!(root.join(".gitignore").is_file());
    assert!(root.join("src/main.js").is_file());
}

#[tokio::test]
async fn test_remote_missing_repository_fails_download() {
    let (_temp, cwd) = workdir();
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", ECHARTS_ARCHIVE_PATH)
        .with_status(404)
        .with_body("Not Found")
        .create_async()
        .await;

    let catalog = Product.catalog().unwrap();
    let provider = remote_provider(&server);
    let scaffolder = Scaffolder::new(&Product, &catalog, &provider, cwd.clone());
    let mut ui = Replay::default();

    let err = scaffolder
        .run(&args("charts", Some("echarts")), &mut ui)
        .await
        .unwrap_err();

    mock.assert_async().await;
    assert!(err.to_string().contains("writing template files"));
    assert!(err
        .chain()
        .any(|cause| matches!(cause.downcast_ref::<ScaffoldError>(), Some(ScaffoldError::Download { .. }))));
    assert_eq!(ui.tasks, vec![("Download failed".to_string(), false)]);
    assert!(!cwd.join("charts").join("package.json").exists());
}
