//! Site listing and creation.

use std::sync::Arc;

use serde::Serialize;
use tokio::fs;

use crate::error::PanelError;
use crate::sites::{SiteName, SitePaths, Toggler};
use crate::templates::TemplateStore;

/// One row of the site list.
#[derive(Debug, Serialize)]
pub struct SiteSummary {
    pub name: String,
    pub enabled: bool,
    pub path: String,
}

/// Scans the available directory and creates new site files.
pub struct SiteCatalog {
    paths: SitePaths,
    templates: Arc<TemplateStore>,
}

impl SiteCatalog {
    pub fn new(paths: SitePaths, templates: Arc<TemplateStore>) -> Self {
        Self { paths, templates }
    }

    /// List every site in the available directory together with its
    /// enabled state. Entries that do not match the site-name pattern are
    /// skipped.
    pub async fn list(&self, toggler: &Toggler) -> Result<Vec<SiteSummary>, PanelError> {
        let mut entries = fs::read_dir(&self.paths.available_dir).await?;
        let mut sites = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let file_name = entry.file_name();
            let Some(raw) = file_name.to_str() else {
                continue;
            };
            let Ok(name) = SiteName::parse(raw) else {
                continue;
            };
            sites.push(SiteSummary {
                enabled: toggler.is_enabled(&name).await,
                path: self.paths.available(&name).display().to_string(),
                name: name.to_string(),
            });
        }

        sites.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(sites)
    }

    /// Raw content of a site's config file.
    pub async fn read(&self, name: &SiteName) -> Result<String, PanelError> {
        match fs::read_to_string(self.paths.available(name)).await {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(PanelError::NotFound("File"))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Create a new site file from a template or the default skeleton.
    /// Refuses to overwrite an existing file.
    pub async fn create(
        &self,
        name: &SiteName,
        template_id: Option<&str>,
    ) -> Result<(), PanelError> {
        let path = self.paths.available(name);
        if fs::try_exists(&path).await? {
            return Err(PanelError::AlreadyExists(name.to_string()));
        }

        let mut content = String::new();
        if let Some(id) = template_id {
            if let Some(template) = self.templates.find(id).await {
                content = template.render(name.as_str());
            }
        }
        if content.is_empty() {
            content = default_skeleton(name);
        }

        fs::write(&path, content).await?;
        tracing::info!(site = %name, "Site created");
        Ok(())
    }
}

/// The hardcoded skeleton used when no template is selected.
fn default_skeleton(name: &SiteName) -> String {
    format!(
        "server {{\n    listen 80;\n    server_name {name};\n\n    root /var/www/{name};\n    index index.html;\n\n    location / {{\n        try_files $uri $uri/ =404;\n    }}\n}}\n"
    )
}
