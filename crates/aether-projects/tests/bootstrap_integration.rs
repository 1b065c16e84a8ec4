//! Integration tests for the bootstrap pipeline
//!
//! These run the real `git` binary against template repositories built in
//! temporary directories.

use aether_core::types::BootstrapConfig;
use aether_projects::bootstrap::{
    BootstrapReport, BootstrapRequest, Bootstrapper, BranchState, NormalizeOutcome, Selector,
};
use aether_projects::Error;
use camino::{Utf8Path, Utf8PathBuf};
use serde_json::Value;
use std::process::Command;
use tempfile::TempDir;

const MANIFEST: &str = r#"{
  "name": "aether-template",
  "version": "1.2.0",
  "repository": {
    "type": "git",
    "url": "https://github.com/aether-cms/aether-template.git"
  },
  "scripts": {
    "dev": "aether dev"
  }
}
"#;

fn git(dir: &Utf8Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .current_dir(dir)
        .args(args)
        .output()
        .expect("Failed to run git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

struct Template {
    _temp: TempDir,
    source: Utf8PathBuf,
    workspace: Utf8PathBuf,
}

impl Template {
    /// Three commits on `default_branch`, tagged `v1.0.0`, `v1.2.0`
    /// (annotated) and `stable`; the last commit is untagged
    fn build(default_branch: &str, with_manifest: bool) -> Self {
        let temp = TempDir::new().unwrap();
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap();
        let source = root.join("template");
        let workspace = root.join("workspace");
        std::fs::create_dir_all(&source).unwrap();
        std::fs::create_dir_all(&workspace).unwrap();

        git(&source, &["init", "--quiet"]);
        git(
            &source,
            &["symbolic-ref", "HEAD", &format!("refs/heads/{}", default_branch)],
        );
        git(&source, &["config", "user.name", "Template Author"]);
        git(&source, &["config", "user.email", "author@example.com"]);
        git(&source, &["config", "commit.gpgsign", "false"]);
        git(&source, &["config", "tag.gpgsign", "false"]);

        if with_manifest {
            std::fs::write(source.join("package.json"), MANIFEST).unwrap();
        }
        std::fs::write(source.join("README.md"), "# Aether template\n").unwrap();
        git(&source, &["add", "--all"]);
        git(&source, &["commit", "--quiet", "-m", "initial template"]);
        git(&source, &["tag", "v1.0.0"]);

        std::fs::write(source.join("CHANGELOG.md"), "## 1.2.0\n").unwrap();
        git(&source, &["add", "--all"]);
        git(&source, &["commit", "--quiet", "-m", "release 1.2.0"]);
        git(&source, &["tag", "-a", "v1.2.0", "-m", "Release 1.2.0"]);
        git(&source, &["tag", "stable"]);

        std::fs::write(source.join("NEXT.md"), "unreleased\n").unwrap();
        git(&source, &["add", "--all"]);
        git(&source, &["commit", "--quiet", "-m", "work in progress"]);

        Self {
            _temp: temp,
            source,
            workspace,
        }
    }

    fn request(&self, selector: Selector) -> BootstrapRequest {
        BootstrapRequest {
            template_url: self.source.to_string(),
            destination: self.workspace.join("site"),
            selector,
            git_name: Some("Site Owner".to_string()),
            git_email: Some("owner@example.com".to_string()),
        }
    }

    fn commit_of(&self, reference: &str) -> String {
        git(
            &self.source,
            &["rev-parse", &format!("{}^{{commit}}", reference)],
        )
    }
}

async fn bootstrap(template: &Template, selector: Selector) -> BootstrapReport {
    Bootstrapper::new(BootstrapConfig::default())
        .run(&template.request(selector))
        .await
        .expect("Bootstrap failed")
}

fn read_manifest(root: &Utf8Path) -> Value {
    let content = std::fs::read_to_string(root.join("package.json")).unwrap();
    serde_json::from_str(&content).unwrap()
}

#[tokio::test]
async fn test_latest_installs_default_branch_head() {
    let template = Template::build("trunk", true);
    let report = bootstrap(&template, Selector::default()).await;
    let site = &report.destination;

    assert!(report.warnings.is_empty(), "warnings: {:?}", report.warnings);
    assert_eq!(report.branch.as_deref(), Some("main"));
    assert_eq!(
        report.normalize,
        NormalizeOutcome::Normalized {
            from: BranchState::OnOther("trunk".to_string()),
            strategy: "checkout-create",
        }
    );

    let installed = report.installed_version.clone().unwrap();
    assert!(template.commit_of("HEAD").starts_with(&installed));
    assert_eq!(git(site, &["rev-parse", "main~1"]), template.commit_of("HEAD"));

    assert_eq!(git(site, &["remote"]), "upstream");
    assert_eq!(git(site, &["remote", "get-url", "upstream"]), template.source.as_str());
    assert_eq!(
        report.remotes,
        vec![("upstream".to_string(), template.source.to_string())]
    );
    assert_eq!(git(site, &["config", "--local", "pull.rebase"]), "false");
    assert_eq!(git(site, &["config", "--local", "merge.ours.driver"]), "true");
    assert_eq!(
        git(site, &["log", "-1", "--format=%s"]),
        "chore: initialize project from aether template"
    );
    assert_eq!(git(site, &["status", "--porcelain"]), "");
}

#[tokio::test]
async fn test_manifest_records_install() {
    let template = Template::build("trunk", true);
    let report = bootstrap(&template, Selector::tag("stable")).await;

    assert!(report.metadata_stamped);
    assert_eq!(report.installed_version.as_deref(), Some("stable"));

    let manifest = read_manifest(&report.destination);
    let keys: Vec<&String> = manifest.as_object().unwrap().keys().collect();
    assert_eq!(keys, ["name", "version", "repository", "scripts", "aetherCMS"]);

    let metadata = &manifest["aetherCMS"];
    assert_eq!(metadata["installedVersion"], "stable");
    assert_eq!(metadata["installOptions"]["tag"], "stable");
    assert!(metadata["installOptions"].get("hash").is_none());
    assert_eq!(metadata["templateName"], "aether-template");
    assert_eq!(metadata["templateVersion"], "1.2.0");
    assert_eq!(
        metadata["templateRepository"],
        "https://github.com/aether-cms/aether-template.git"
    );
    assert!(metadata["installedAt"].as_str().unwrap().contains('T'));
}

#[tokio::test]
async fn test_tag_target_lands_on_main() {
    let template = Template::build("trunk", true);
    let report = bootstrap(&template, Selector::tag("v1.0.0")).await;
    let site = &report.destination;

    assert_eq!(report.branch.as_deref(), Some("main"));
    assert!(matches!(
        report.normalize,
        NormalizeOutcome::Normalized {
            from: BranchState::Detached,
            ..
        }
    ));
    assert_eq!(git(site, &["rev-parse", "main~1"]), template.commit_of("v1.0.0"));
    assert!(!site.join("CHANGELOG.md").exists());
}

#[tokio::test]
async fn test_hash_target_lands_on_main() {
    let template = Template::build("trunk", true);
    let hash = template.commit_of("v1.0.0");
    let report = bootstrap(&template, Selector::hash(hash.as_str())).await;

    assert_eq!(report.installed_version.as_deref(), Some(hash.as_str()));
    assert_eq!(git(&report.destination, &["rev-parse", "main~1"]), hash);
}

#[tokio::test]
async fn test_path_named_hash_is_rejected() {
    let template = Template::build("trunk", true);

    let result = Bootstrapper::new(BootstrapConfig::default())
        .run(&template.request(Selector::hash("README.md")))
        .await;

    match result {
        Err(Error::CheckoutFailed { target, .. }) => assert_eq!(target, "README.md"),
        other => panic!("Expected CheckoutFailed, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_annotated_tag_through_version_selector() {
    let template = Template::build("main", true);
    let report = bootstrap(&template, Selector::version("v1.2.0")).await;

    assert_eq!(
        report.normalize,
        NormalizeOutcome::Normalized {
            from: BranchState::Detached,
            strategy: "force-move",
        }
    );
    assert_eq!(report.branch.as_deref(), Some("main"));
    assert_eq!(
        git(&report.destination, &["rev-parse", "main~1"]),
        template.commit_of("v1.2.0")
    );
}

#[tokio::test]
async fn test_missing_tag_leaves_no_destination() {
    let template = Template::build("trunk", true);
    let request = template.request(Selector::tag("v1.1.0"));

    let result = Bootstrapper::new(BootstrapConfig::default())
        .run(&request)
        .await;

    match result {
        Err(Error::TargetNotFound {
            target,
            suggestions,
            omitted,
        }) => {
            assert_eq!(target, "v1.1.0");
            assert_eq!(suggestions, vec!["v1.2.0", "v1.0.0", "stable"]);
            assert_eq!(omitted, 0);
        }
        other => panic!("Expected TargetNotFound, got: {:?}", other),
    }
    assert!(!request.destination.exists());
}

#[tokio::test]
async fn test_suggestions_respect_limit() {
    let template = Template::build("trunk", true);
    let mut config = BootstrapConfig::default();
    config.suggestion_limit = 2;

    let result = Bootstrapper::new(config)
        .run(&template.request(Selector::tag("v9")))
        .await;

    match result {
        Err(Error::TargetNotFound {
            suggestions,
            omitted,
            ..
        }) => {
            assert_eq!(suggestions, vec!["v1.2.0", "v1.0.0"]);
            assert_eq!(omitted, 1);
        }
        other => panic!("Expected TargetNotFound, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_existing_destination_is_fatal() {
    let template = Template::build("trunk", true);
    let request = template.request(Selector::default());
    std::fs::create_dir_all(&request.destination).unwrap();

    let result = Bootstrapper::new(BootstrapConfig::default())
        .run(&request)
        .await;
    assert!(matches!(result, Err(Error::RepoExists { .. })));
}

#[tokio::test]
async fn test_missing_manifest_still_commits() {
    let template = Template::build("trunk", false);
    let report = bootstrap(&template, Selector::default()).await;

    assert!(!report.metadata_stamped);
    assert!(report.committed);
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].contains("install metadata"));
    assert_eq!(git(&report.destination, &["remote"]), "upstream");
}
