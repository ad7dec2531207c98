//! Shared utilities for component and server tests.
//!
//! Each test gets a scratch world: temp directories standing in for the
//! nginx tree and the panel data dir, plus a stub nginx executable whose
//! verdict the test controls through a marker file.

#![allow(dead_code)]

use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;

use nginx_panel::auth::Role;
use nginx_panel::config::PanelConfig;
use nginx_panel::history::VersionStore;
use nginx_panel::nginx::Nginx;
use nginx_panel::sites::{Lifecycle, SitePaths, Toggler};

pub struct TestWorld {
    root: TempDir,
}

impl TestWorld {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        for dir in ["available", "enabled", "conf-root", "logs", "data/history", "data/backups"] {
            std::fs::create_dir_all(root.path().join(dir)).unwrap();
        }

        // Stub nginx: fails whenever the marker file exists, so a test can
        // flip the validator's verdict at will. Also swallows `-s reload`.
        let marker = root.path().join("fail-validation");
        let script = format!(
            "#!/bin/sh\n\
             if [ -f \"{}\" ]; then\n\
             \techo \"nginx: [emerg] invalid directive\" >&2\n\
             \techo \"nginx: configuration file test failed\" >&2\n\
             \texit 1\n\
             fi\n\
             echo \"nginx: configuration file test is successful\"\n\
             exit 0\n",
            marker.display()
        );
        let script_path = root.path().join("fake-nginx");
        std::fs::write(&script_path, script).unwrap();
        std::fs::set_permissions(&script_path, std::fs::Permissions::from_mode(0o755)).unwrap();

        Self { root }
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.root.path().join(rel)
    }

    /// A fully wired config pointing every directory into the scratch
    /// world.
    pub fn config(&self) -> PanelConfig {
        let mut config = PanelConfig::default();
        config.listener.bind_address = "127.0.0.1:0".to_string();
        config.nginx.available_dir = self.path("available").display().to_string();
        config.nginx.enabled_dir = self.path("enabled").display().to_string();
        config.nginx.config_root = self.path("conf-root").display().to_string();
        config.nginx.binary_path = self.path("fake-nginx").display().to_string();
        config.nginx.access_log = self.path("logs/access.log").display().to_string();
        config.nginx.error_log = self.path("logs/error.log").display().to_string();
        config.panel.data_dir = self.path("data").display().to_string();
        config.panel.static_dir = self.path("static").display().to_string();
        config.timeouts.validate_secs = 5;
        config.timeouts.backup_secs = 30;
        config
    }

    /// Flip the stub validator's verdict.
    pub fn fail_validation(&self, fail: bool) {
        let marker = self.path("fail-validation");
        if fail {
            std::fs::write(&marker, b"").unwrap();
        } else {
            let _ = std::fs::remove_file(&marker);
        }
    }

    pub fn site_paths(&self) -> SitePaths {
        SitePaths::new(self.path("available"), self.path("enabled"))
    }

    pub fn nginx(&self) -> Arc<Nginx> {
        Arc::new(Nginx::new(
            self.path("fake-nginx"),
            false,
            Duration::from_secs(5),
        ))
    }

    pub fn version_store(&self) -> Arc<VersionStore> {
        Arc::new(VersionStore::new(self.path("data/history")))
    }

    pub fn lifecycle(&self) -> (Lifecycle, Arc<VersionStore>) {
        let versions = self.version_store();
        let lifecycle = Lifecycle::new(self.site_paths(), versions.clone(), self.nginx());
        (lifecycle, versions)
    }

    pub fn toggler(&self) -> Toggler {
        Toggler::new(self.site_paths())
    }

    /// Write users.json. Low bcrypt cost keeps tests fast.
    pub fn seed_users(&self, users: &[(&str, &str, Role)]) {
        let records: Vec<serde_json::Value> = users
            .iter()
            .map(|(username, password, role)| {
                serde_json::json!({
                    "username": username,
                    "passwordHash": bcrypt::hash(password, 4).unwrap(),
                    "role": role,
                })
            })
            .collect();
        std::fs::write(
            self.path("data/users.json"),
            serde_json::to_vec_pretty(&records).unwrap(),
        )
        .unwrap();
    }

    pub fn write_templates(&self, templates: &serde_json::Value) {
        std::fs::write(
            self.path("data/templates.json"),
            serde_json::to_vec_pretty(templates).unwrap(),
        )
        .unwrap();
    }
}
