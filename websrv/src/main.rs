// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{
    env::current_exe,
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;

use crate::config::Config;

mod config;
mod env;
mod routing;
mod runtime;
mod state;

#[must_use]
const fn app_name() -> &'static str {
    env!("CARGO_PKG_NAME")
}

#[must_use]
fn app_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("org", "rigmart", app_name())
}

#[must_use]
fn app_config_dir(app_dirs: &ProjectDirs) -> &Path {
    app_dirs.config_dir()
}

#[must_use]
fn new_config_file_path(app_dirs: &ProjectDirs, file_suffix: &str) -> PathBuf {
    let mut path_buf = app_config_dir(app_dirs).to_path_buf();
    path_buf.push("config");
    path_buf.set_extension(file_suffix);
    path_buf
}

/// Missing or unreadable configuration files fall back to defaults.
#[must_use]
fn load_app_config(app_dirs: &ProjectDirs) -> Config {
    let file_path = new_config_file_path(app_dirs, "ron");
    log::info!("Loading configuration from file: {}", file_path.display());
    match fs::read_to_string(&file_path) {
        Ok(text) => ron::from_str(&text)
            .map_err(|err| {
                log::warn!("Failed to parse configuration data: {err}");
            })
            .unwrap_or_default(),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Config::default(),
        Err(err) => {
            log::warn!("Failed to read configuration data from file: {err}");
            Config::default()
        }
    }
}

fn main() {
    env::init_environment();

    if let Err(err) = env::init_tracing_and_logging() {
        eprintln!("Failed to initialize tracing and logging: {err}");
        return;
    }

    if let Ok(exe_path) = current_exe() {
        log::info!("Executable: {}", exe_path.display());
    }
    log::info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let mut config = app_dirs().as_ref().map(load_app_config).unwrap_or_default();
    log::info!("Patching configuration from .env file and environment variables");
    env::parse_config_into(&mut config);
    log::debug!("Configuration: {config:?}");

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            log::error!("Failed to create Tokio runtime: {err}");
            return;
        }
    };

    if let Err(err) = runtime.block_on(runtime::run(config)) {
        log::error!("Server terminated with error: {err:#}");
        std::process::exit(1);
    }

    log::info!("Exiting");
}
