//! Tests for loading guide definitions and wiring a controller from disk

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;

use guidebook::application::ApplicationError;
use guidebook::config::Settings;
use guidebook::domain::{DomainError, EntryId};
use guidebook::infrastructure::di::ServiceContainer;
use guidebook::infrastructure::registry::load_registry;
use guidebook::infrastructure::traits::{RealFileSystem, SelectionItem, Selector};
use guidebook::infrastructure::InfraError;

/// Selector that always cancels
struct CancelSelector;

impl Selector for CancelSelector {
    fn select_one(
        &self,
        _items: &[SelectionItem],
        _prompt: &str,
    ) -> Result<Option<SelectionItem>, String> {
        Ok(None)
    }
}

/// Helper to create a file (and its parent dirs) below the temp root
fn create_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, content).expect("write file");
    path
}

fn content_tree() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    create_file(
        root,
        "guides/engineering.toml",
        r#"
[[guide]]
id = "Engineering"
name = "guide-entry-engineering"
text = "/Guidebook/Engineering.txt"
children = ["Power"]
priority = 1

[[guide]]
id = "Power"
name = "guide-entry-power"
text = "/Guidebook/Power.txt"
filter_enabled = true
"#,
    );
    create_file(
        root,
        "guides/rules/rules.toml",
        r#"
[[guide]]
id = "DefaultRuleset"
name = "guide-entry-rules"
text = "/Guidebook/Rules.txt"
rule_entry = true
"#,
    );
    create_file(
        root,
        "locale/en-US/guides.ftl",
        "guide-entry-engineering = Engineering\nguide-entry-power = Power\nguide-entry-rules = Server Rules\n",
    );
    create_file(
        root,
        "Guidebook/Engineering.txt",
        "<Document>\n# Engineering\n\nKeep the lights on. See [power](guide:Power).\n</Document>",
    );
    create_file(
        root,
        "Guidebook/Power.txt",
        "<Document>\nGenerators make power.\n\nCables move power.\n\nSMES units store it.\n</Document>",
    );
    create_file(
        root,
        "Guidebook/Rules.txt",
        "<Document>\n# Rules\n\nNo griefing.\n</Document>",
    );
    temp
}

fn container_for(temp: &TempDir) -> ServiceContainer {
    let settings = Settings {
        content_dir: temp.path().to_path_buf(),
        ..Settings::default()
    };
    ServiceContainer::with_deps(settings, Arc::new(RealFileSystem), Arc::new(CancelSelector))
}

#[test]
fn given_nested_definition_files_when_loading_then_all_entries_found() {
    let temp = content_tree();
    let registry = load_registry(&RealFileSystem, &temp.path().join("guides")).unwrap();

    assert_eq!(registry.len(), 3);
    let power = registry.get("Power").unwrap();
    assert!(power.filter_enabled);
    assert_eq!(power.text, "/Guidebook/Power.txt");
    assert!(registry.get("DefaultRuleset").unwrap().rule_entry);
}

#[test]
fn given_duplicate_id_across_files_when_loading_then_errors() {
    let temp = content_tree();
    create_file(
        temp.path(),
        "guides/zz_more.toml",
        "[[guide]]\nid = \"Power\"\nname = \"x\"\ntext = \"/x.txt\"\n",
    );

    let err = load_registry(&RealFileSystem, &temp.path().join("guides")).unwrap_err();
    assert!(
        matches!(
            err,
            InfraError::Application(ApplicationError::Domain(DomainError::DuplicateEntry { ref id, .. }))
                if id == &EntryId::from("Power")
        ),
        "unexpected error: {err:?}"
    );
}

#[test]
fn given_entry_without_text_when_loading_then_invalid_entry() {
    let temp = TempDir::new().unwrap();
    create_file(
        temp.path(),
        "guides/bad.toml",
        "[[guide]]\nid = \"Bad\"\nname = \"bad\"\ntext = \"\"\n",
    );

    let err = load_registry(&RealFileSystem, &temp.path().join("guides")).unwrap_err();
    assert!(matches!(
        err,
        InfraError::Application(ApplicationError::Domain(DomainError::InvalidEntry { .. }))
    ));
}

#[test]
fn given_malformed_toml_when_loading_then_parse_error() {
    let temp = TempDir::new().unwrap();
    create_file(temp.path(), "guides/broken.toml", "[[guide]\nid = ");

    let err = load_registry(&RealFileSystem, &temp.path().join("guides")).unwrap_err();
    assert!(matches!(err, InfraError::Parse { .. }));
}

#[test]
fn given_missing_guides_dir_when_loading_then_io_error() {
    let temp = TempDir::new().unwrap();
    let err = load_registry(&RealFileSystem, &temp.path().join("guides")).unwrap_err();
    assert!(matches!(err, InfraError::Io { .. }));
}

#[test]
fn given_content_dir_when_building_controller_then_tree_uses_localized_labels() {
    let temp = content_tree();
    let controller = container_for(&temp).controller().unwrap();

    let labels: Vec<_> = controller
        .tree()
        .items()
        .map(|(_, item)| item.label.clone())
        .collect();
    // DefaultRuleset (priority 0) before Engineering (priority 1)
    assert_eq!(labels, vec!["Server Rules", "Engineering", "Power"]);
}

#[test]
fn given_content_dir_when_following_link_then_filters_target() {
    let temp = content_tree();
    let mut controller = container_for(&temp).controller().unwrap();

    controller.handle_click("Engineering");
    let link = controller.view().content.elements()[1].links[0].clone();
    controller.handle_click(link.as_str());
    controller.set_search_text("cables");

    assert_eq!(controller.last_entry(), Some(&EntryId::from("Power")));
    let visible: Vec<_> = controller
        .view()
        .content
        .visible_elements()
        .map(|e| e.text.clone())
        .collect();
    assert_eq!(visible, vec!["Cables move power."]);
}

#[test]
fn given_cancelling_selector_when_selecting_then_none() {
    let temp = content_tree();
    let container = container_for(&temp);
    let selected = container.selector.select_one(&[], "Guide> ").unwrap();
    assert!(selected.is_none());
}
