//! `vipergen init`: folder skeleton and common support files.

use tracing::info;
use vipergen_adapters::{
    DEFAULT_CONFIG_FILE, LocalFilesystem, PbxprojLoader, YamlConfigStore, common_templates,
};
use vipergen_core::prelude::InitService;

use crate::{
    cli::InitArgs,
    commands::{bundle_name, load_effective_config, project_bundle},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Prepare the project at `args.project` for VIPER modules.
pub fn execute(args: InitArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let project = project_bundle(&args.project)?;
    let name = bundle_name(&project)?;

    let config_path = if args.initfile {
        let path = project
            .parent()
            .map(|dir| dir.join(DEFAULT_CONFIG_FILE))
            .unwrap_or_else(|| DEFAULT_CONFIG_FILE.into());
        if YamlConfigStore::new().write_default(&path, &name, args.force)? {
            output.success(&format!("Wrote default configuration to {}", path.display()))?;
        } else {
            output.info(&format!(
                "Using existing {} (use --force to overwrite)",
                path.display()
            ))?;
        }
        path
    } else {
        args.config.unwrap_or(config.config_file)
    };

    let effective = load_effective_config(&config_path, &name, &args.targets)?;

    let service = InitService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(common_templates()?),
        Box::new(PbxprojLoader::new()),
    );
    let report = service.init(&effective, &project)?;
    info!(
        directories = report.directories_created.len(),
        files = report.files.len(),
        "Init finished"
    );

    output.init_report(&report)?;
    Ok(())
}
