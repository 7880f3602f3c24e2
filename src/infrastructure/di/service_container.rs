//! Service container for dependency injection
//!
//! Wires the controller's collaborators from settings.

use std::sync::Arc;

use crate::application::{Collaborators, GuidebookController};
use crate::config::Settings;
use crate::domain::GuideRegistry;
use crate::infrastructure::localization::LocaleCatalog;
use crate::infrastructure::markup::MarkupParser;
use crate::infrastructure::registry::load_registry;
use crate::infrastructure::traits::{
    ConfiguredRulesResolver, ContentResourceReader, FileSystem, RealFileSystem, Selector,
    SkimSelector,
};
use crate::infrastructure::InfraResult;

/// Container holding settings and I/O abstractions.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Interactive entry picker
    pub selector: Arc<dyn Selector>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem), Arc::new(SkimSelector))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        fs: Arc<dyn FileSystem>,
        selector: Arc<dyn Selector>,
    ) -> Self {
        Self {
            settings: Arc::new(settings),
            fs,
            selector,
        }
    }

    /// All guide definitions below the configured guides directory.
    pub fn load_registry(&self) -> InfraResult<GuideRegistry> {
        load_registry(self.fs.as_ref(), &self.settings.guides_path())
    }

    /// Collaborators backed by the content directory.
    pub fn collaborators(&self) -> InfraResult<Collaborators> {
        let catalog = LocaleCatalog::load_dir(self.fs.as_ref(), &self.settings.locale_path())?;
        Ok(Collaborators {
            resources: Arc::new(ContentResourceReader::new(
                self.settings.content_dir.clone(),
                Arc::clone(&self.fs),
            )),
            parser: Arc::new(MarkupParser::new()),
            localization: Arc::new(catalog),
            rules: Arc::new(ConfiguredRulesResolver::new(
                self.settings.core_rules_entry.as_str(),
            )),
        })
    }

    /// Controller loaded with every guide, nothing selected.
    pub fn controller(&self) -> InfraResult<GuidebookController> {
        let registry = self.load_registry()?;
        let mut controller = GuidebookController::new(self.collaborators()?);
        controller.update_guides(registry, None, None, None);
        Ok(controller)
    }
}
