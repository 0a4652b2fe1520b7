use crate::rename::{RenameResult, RenameSpec};
use std::io::{self, Write};

/// How a result should be presented
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatContext {
    pub dry_run: bool,
    /// The search covered every category
    pub global_search: bool,
}

impl FormatContext {
    pub fn new(spec: &RenameSpec, dry_run: bool) -> Self {
        Self {
            dry_run,
            global_search: spec.is_global_search(),
        }
    }
}

/// Render a preview or an execution result to a string
pub fn format_result(result: &RenameResult, ctx: &FormatContext) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail
    let _ = if ctx.dry_run {
        display_preview(result, ctx, &mut buf)
    } else {
        display_execution_result(result, ctx, &mut buf)
    };
    String::from_utf8_lossy(&buf).into_owned()
}

/// Display the planned renames and any hazards found
pub fn display_preview(
    result: &RenameResult,
    ctx: &FormatContext,
    writer: &mut impl Write,
) -> io::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "========================================")?;
    if ctx.dry_run {
        writeln!(writer, "              DRY RUN")?;
    } else {
        writeln!(writer, "           RENAME PREVIEW")?;
    }
    writeln!(writer, "========================================")?;
    writeln!(writer)?;

    if ctx.global_search {
        write_global_banner(writer)?;
    }

    writeln!(writer, "Matches: {}", result.matches.len())?;
    writeln!(writer)?;

    if result.matches.is_empty() {
        writeln!(writer, "No ebuilds matched.")?;
        writeln!(writer, "  0 ebuilds would be renamed")?;
        return Ok(());
    }

    writeln!(writer, "Planned changes:")?;
    writeln!(writer)?;

    for (i, m) in result.matches.iter().enumerate() {
        writeln!(writer, "  {}. {}", i + 1, m.atom())?;
        writeln!(writer, "     From: {}", m.old_filename)?;
        writeln!(writer, "     To:   {}", m.new_filename)?;

        if m.has_revision {
            writeln!(writer, "     [!] Revision suffix will be dropped")?;
        }

        writeln!(writer)?;
    }

    write_version_files(result, writer)?;
    write_conflicts(result, writer)?;

    writeln!(writer, "----------------------------------------")?;
    writeln!(writer, "Summary:")?;
    writeln!(writer, "  {} ebuilds would be renamed", result.matches.len())?;

    let revision_count = result.revision_count();
    if revision_count > 0 {
        writeln!(writer, "  {} revision suffixes would be dropped", revision_count)?;
    }
    if !result.version_files.is_empty() {
        writeln!(
            writer,
            "  {} version-specific files need review",
            result.version_files.len()
        )?;
    }
    if !result.conflicts.is_empty() {
        writeln!(writer, "  {} destinations already taken", result.conflicts.len())?;
    }

    if ctx.dry_run {
        writeln!(writer)?;
        writeln!(writer, "Run without --dry to apply these changes.")?;
    }

    Ok(())
}

/// Display execution results (non-dry-run)
pub fn display_execution_result(
    result: &RenameResult,
    ctx: &FormatContext,
    writer: &mut impl Write,
) -> io::Result<()> {
    writeln!(writer)?;

    if ctx.global_search {
        write_global_banner(writer)?;
    }

    if result.matches.is_empty() {
        writeln!(writer, "No ebuilds matched. Nothing was renamed.")?;
        return Ok(());
    }

    writeln!(
        writer,
        "Renamed {} of {} ebuilds.",
        result.renamed.len(),
        result.matches.len()
    )?;

    for m in &result.renamed {
        let note = if m.has_revision {
            " (revision dropped)"
        } else {
            ""
        };
        writeln!(
            writer,
            "  {}: {} -> {}{}",
            m.atom(),
            m.old_filename,
            m.new_filename,
            note
        )?;
    }

    if !result.failed.is_empty() {
        writeln!(writer)?;
        writeln!(writer, "Failed renames ({}):", result.failed.len())?;
        for failure in &result.failed {
            writeln!(
                writer,
                "  {}: {} -> {}",
                failure.rename_match.atom(),
                failure.rename_match.old_filename,
                failure.rename_match.new_filename
            )?;
            writeln!(writer, "      {}", failure.message)?;
        }
    }

    if !result.version_files.is_empty() {
        writeln!(writer)?;
        write_version_files(result, writer)?;
    }

    if !result.conflicts.is_empty() {
        writeln!(writer)?;
        writeln!(writer, "Overwritten destinations ({}):", result.conflicts.len())?;
        for conflict in &result.conflicts {
            writeln!(
                writer,
                "  {}: {}",
                conflict.rename_match.atom(),
                conflict.rename_match.new_filename
            )?;
        }
    }

    if !result.manifest_updates.is_empty() {
        writeln!(writer)?;
        writeln!(
            writer,
            "Manifests updated: {} of {}",
            result.manifest_success_count(),
            result.manifest_updates.len()
        )?;
        for update in result.manifest_failures() {
            writeln!(
                writer,
                "  [!] {}: {}",
                update.atom(),
                update.error.as_deref().unwrap_or("unknown error")
            )?;
        }
    }

    Ok(())
}

/// Display the result as pretty-printed JSON for scripting
pub fn display_json(result: &RenameResult, writer: &mut impl Write) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, result)?;
    writeln!(writer)
}

fn write_global_banner(writer: &mut impl Write) -> io::Result<()> {
    writeln!(writer, "[!] Searching ALL categories in the overlay.")?;
    writeln!(writer, "[!] Review every match below before continuing.")?;
    writeln!(writer)
}

fn write_version_files(result: &RenameResult, writer: &mut impl Write) -> io::Result<()> {
    if result.version_files.is_empty() {
        return Ok(());
    }

    writeln!(
        writer,
        "Version-specific files ({}), not renamed automatically:",
        result.version_files.len()
    )?;
    for file in &result.version_files {
        writeln!(
            writer,
            "  {}/{}: files/{}",
            file.category, file.package, file.filename
        )?;
    }
    writeln!(writer)
}

fn write_conflicts(result: &RenameResult, writer: &mut impl Write) -> io::Result<()> {
    if result.conflicts.is_empty() {
        return Ok(());
    }

    writeln!(writer, "Destination conflicts ({}):", result.conflicts.len())?;
    for conflict in &result.conflicts {
        writeln!(
            writer,
            "  {}: {} -> {} (taken by {})",
            conflict.rename_match.atom(),
            conflict.rename_match.old_filename,
            conflict.rename_match.new_filename,
            conflict.existing_path.display()
        )?;
    }
    writeln!(writer)
}
