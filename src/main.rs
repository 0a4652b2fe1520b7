use clap::Parser;
use ebuild_rename::cli::Args;
use ebuild_rename::config::config_from_env;
use ebuild_rename::error::AppError;
use ebuild_rename::logging;
use ebuild_rename::output::{display_execution_result, display_json, display_preview, FormatContext};
use ebuild_rename::progress::{should_use_colors, Progress};
use ebuild_rename::prompt::confirm;
use ebuild_rename::{PkgdevManifest, RenameOptions, RenameResult, RenameSpec, Renamer};
use std::io::{self, Write};
use tracing::{debug, error, info};

fn main() {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    logging::init(args.verbose);

    if let Err(e) = run(args) {
        error!("{}", e);
        eprintln!("\nError: {}", e.detailed_message());
        std::process::exit(e.exit_code().into());
    }
}

fn run(args: Args) -> Result<(), AppError> {
    let config = config_from_env().with_overlay_override(args.overlay.clone());
    debug!(?config, "Configuration loaded");

    let colors_enabled = should_use_colors();
    if !colors_enabled {
        colored::control::set_override(false);
    }

    let spec = RenameSpec::new(
        args.category.clone(),
        args.pattern.clone(),
        args.old_version.clone(),
        args.new_version.clone(),
    );
    let options = RenameOptions {
        dry_run: args.dry,
        skip_prompt: args.yes,
        no_manifest: args.no_manifest,
        force: args.force,
    };

    let renamer = Renamer::new(
        config.overlay_root.clone(),
        PkgdevManifest::new(config.manifest_tool.clone()),
    );
    let mut stdout = io::stdout();

    // Plan with the caller's force setting so blocking hazards surface before any prompt
    let plan_options = RenameOptions {
        dry_run: true,
        ..options
    };
    let preview_ctx = FormatContext::new(&spec, args.dry);

    let planned = match renamer.execute(&spec, &plan_options, &mut Progress::silent()) {
        Ok(result) => result,
        Err(e) => {
            if let Some(partial) = e.partial_result() {
                render_preview(partial, &preview_ctx, args.json, &mut stdout)?;
            }
            return Err(e.into());
        }
    };

    info!(matches = planned.len(), "Planning complete");

    if args.dry || planned.is_empty() {
        render_preview(&planned, &preview_ctx, args.json, &mut stdout)?;
        return Ok(());
    }

    if !options.skip_prompt {
        if !args.json {
            display_preview(&planned, &preview_ctx, &mut stdout)?;
            stdout.flush()?;
        }

        let question = format!("Rename {} ebuild(s)?", planned.len());
        let accepted = confirm(&question, &mut io::stdin().lock(), &mut io::stderr())?;
        if !accepted {
            return Err(AppError::Aborted);
        }
    }

    let mut progress = Progress::new_with_ui(args.verbose > 0, colors_enabled);
    let result = renamer.execute(&spec, &options, &mut progress)?;

    let result_ctx = FormatContext::new(&spec, false);
    if args.json {
        display_json(&result, &mut stdout)?;
    } else {
        display_execution_result(&result, &result_ctx, &mut stdout)?;
    }

    if result.has_failures() {
        return Err(AppError::PartialFailure {
            failed: result.failed.clone(),
            total: result.matches.len(),
        });
    }

    Ok(())
}

fn render_preview(
    result: &RenameResult,
    ctx: &FormatContext,
    json: bool,
    writer: &mut impl Write,
) -> Result<(), AppError> {
    if json {
        display_json(result, writer)?;
    } else {
        display_preview(result, ctx, writer)?;
    }
    Ok(())
}
