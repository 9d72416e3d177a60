//! `vipergen add`: generate one module and register its files.

use tracing::info;
use vipergen_adapters::{LocalFilesystem, PbxprojLoader, module_templates};
use vipergen_core::prelude::{AddModuleService, ModuleName, ViperError};

use crate::{
    cli::AddArgs,
    commands::{bundle_name, load_effective_config, project_bundle},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Generate `args.module` in the project at `args.project`.
pub fn execute(args: AddArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let module = ModuleName::parse(args.module).map_err(ViperError::from)?;
    let project = project_bundle(&args.project)?;
    let name = bundle_name(&project)?;

    let config_path = args.config.unwrap_or(config.config_file);
    let effective = load_effective_config(&config_path, &name, &args.targets)?;

    let service = AddModuleService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(module_templates(effective.templates_dir())?),
        Box::new(PbxprojLoader::new()),
    );
    let report = service.add_module(&effective, &project, &module, args.storyboard.as_deref())?;
    info!(
        module = %report.module_name,
        unchanged = report.unchanged_count(),
        "Add finished"
    );

    output.module_report(&report)?;
    Ok(())
}
