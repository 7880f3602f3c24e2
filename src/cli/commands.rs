//! Command dispatch

use std::io;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::GuidebookController;
use crate::cli::args::{Cli, Commands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::Settings;
use crate::domain::{sorted_roots, DomainError, EntryId, TreeNodeConvert};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::traits::{Localization, SelectionItem};
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Err(CliError::Usage(
            "no command given, see `guidebook --help`".to_string(),
        ));
    };

    if let Commands::Completion { shell } = command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let settings = Settings::load(cli.content_dir.as_deref())?;
    debug!("settings: {:?}", settings);
    let container = ServiceContainer::new(settings);

    match command {
        Commands::Tree { roots, force_root } => _tree(&container, roots, force_root.as_deref()),
        Commands::Roots => _roots(&container),
        Commands::Show { id, search } => _show(&container, id, search.as_deref()),
        Commands::Select => _select(&container),
        Commands::Config => _config(&container),
        Commands::Completion { .. } => Ok(()),
    }
}

#[instrument(skip(container))]
fn _tree(container: &ServiceContainer, roots: &[String], force_root: Option<&str>) -> CliResult<()> {
    let registry = container.load_registry()?;
    let mut controller = GuidebookController::new(container.collaborators()?);

    let roots: Vec<EntryId> = roots.iter().map(|r| EntryId::from(r.as_str())).collect();
    let roots = (!roots.is_empty()).then_some(roots.as_slice());
    let force_root = force_root.map(EntryId::from);
    controller.update_guides(registry, roots, force_root.as_ref(), None);

    output::info(&controller.tree().to_tree_string());
    Ok(())
}

#[instrument(skip(container))]
fn _roots(container: &ServiceContainer) -> CliResult<()> {
    let registry = container.load_registry()?;
    let localization = container.collaborators()?.localization;
    for entry in sorted_roots(&registry, None) {
        output::info(&format!(
            "{}\t{}\t{}",
            entry.priority,
            entry.id,
            localization.get_string(&entry.name)
        ));
    }
    Ok(())
}

#[instrument(skip(container))]
fn _show(container: &ServiceContainer, id: &str, search: Option<&str>) -> CliResult<()> {
    let mut controller = container.controller()?;
    if !controller.entries().contains_key(id) {
        return Err(DomainError::UnknownEntry(EntryId::from(id)).into());
    }

    controller.handle_click(id);
    if let Some(query) = search {
        if controller.filter_active() {
            controller.set_search_text(query);
        } else {
            output::warning(&format!("filtering is not enabled for {}", id));
        }
    }

    render(&controller);
    Ok(())
}

#[instrument(skip(container))]
fn _select(container: &ServiceContainer) -> CliResult<()> {
    let controller = container.controller()?;
    let items: Vec<SelectionItem> = controller
        .tree()
        .items()
        .filter_map(|(_, item)| {
            item.metadata.entry_id().map(|id| SelectionItem {
                display: format!("{} ({})", item.label, id),
                value: id.to_string(),
            })
        })
        .collect();

    let selected = container
        .selector
        .select_one(&items, "Guide> ")
        .map_err(|message| InfraError::Selector { message })?;

    match selected {
        Some(item) => _show(container, &item.value, None),
        None => Ok(()),
    }
}

fn _config(container: &ServiceContainer) -> CliResult<()> {
    output::info(&container.settings.to_toml()?);
    Ok(())
}

fn render(controller: &GuidebookController) {
    let view = controller.view();
    if view.placeholder_visible {
        output::detail(&"Select a guide entry.");
        return;
    }

    if let Some(id) = controller.last_entry() {
        let title = controller
            .tree()
            .index_from_metadata(id)
            .and_then(|idx| controller.tree().get(idx))
            .map(|item| item.label.clone())
            .unwrap_or_else(|| id.to_string());
        output::header(&title);
    }

    for element in view.content.visible_elements() {
        output::element(element);
    }

    let hidden = view.content.elements().len() - view.content.visible_elements().count();
    if hidden > 0 {
        output::detail(&format!("({} hidden by search \"{}\")", hidden, view.search_text.trim()));
    }
    if view.return_container_visible {
        output::detail(&"[Return to rules]");
    }
}
