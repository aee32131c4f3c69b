//! gpig's main application entry point and orchestration logic.
//! Handles command-line argument parsing, parameter collection and
//! validation, and hands the run over to the materializer.

use std::path::Path;

use gpig::{
    cli::{get_args, Args},
    config::get_config,
    error::{default_error_handler, GpigError, GpigResult},
    index::ProjectIndex,
    logger::init_logger,
    materializer::Materializer,
    params::ParameterSet,
    prompt::{collect_parameters, load_from_stdin, DialoguerPrompter, Prompter},
    template::resolve_template_root,
    validate::{check_package_absent, validate_parameters},
};

/// Main application entry point.
fn main() {
    let args = get_args();
    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Ensures the output directory exists so it can be checked for emptiness.
fn ensure_output_dir(output_dir: &Path) -> GpigResult<()> {
    if !output_dir.exists() {
        log::debug!("Creating output directory '{}'", output_dir.display());
        std::fs::create_dir_all(output_dir)?;
    }
    Ok(())
}

/// Main application logic execution.
///
/// # Flow
/// 1. Loads the generator configuration and locates the template root
/// 2. Collects parameters from stdin, flags and prompts
/// 3. Validates them and rejects packages that already exist
/// 4. Generates the installer package into the output directory
fn run(args: Args) -> GpigResult<()> {
    let mut config = get_config(&args.template)?;
    config.copy_opaque |= args.copy_opaque;
    let template_root = resolve_template_root(&args.template, &config)?;

    let mut provided = if args.stdin { load_from_stdin()? } else { ParameterSet::new() };
    provided.merge(args.parameters());

    // Stdin is taken by the parameter object, so prompts are off too.
    let terminal = DialoguerPrompter::new();
    let prompter: Option<&dyn Prompter> =
        if args.yes || args.stdin { None } else { Some(&terminal) };
    let params = collect_parameters(prompter, provided, &config.parameter_defaults()?)?;

    let report = validate_parameters(&params);
    if let Some(advisory) = report.advisory() {
        log::warn!("{}", advisory);
    }
    if !report.is_valid() {
        return Err(GpigError::ValidationError(report.errors().join("; ")));
    }

    let index = ProjectIndex::new(&args.project);
    let package_name = params.package_name().unwrap_or_default();
    if !check_package_absent(package_name, &index) {
        return Err(GpigError::DuplicatePackageError {
            package_name: package_name.to_string(),
        });
    }

    ensure_output_dir(&args.output_dir)?;

    let scratch_parent = args.project.join(&config.scratch_parent);
    let materializer = Materializer::new(&index, &index, &config, template_root, scratch_parent)?;
    let generation = materializer.generate(&args.output_dir, &params)?;

    for path in &generation.generated {
        println!("Generated: '{}'", generation.destination.join(path).display());
    }
    println!(
        "Installer package '{}' (namespace {}) generated successfully in {}.",
        package_name,
        generation.namespace,
        generation.destination.display()
    );
    Ok(())
}
