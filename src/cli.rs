use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ebuild-rename")]
#[command(author, version, long_about = None)]
#[command(about = "Rename ebuild versions across a Gentoo overlay")]
pub struct Args {
    /// Category to search, or '*' for every category
    pub category: String,

    /// Package name or glob (at least 3 characters before any wildcard)
    pub pattern: String,

    /// Exact version to rename, without revision suffix
    pub old_version: String,

    /// New version
    pub new_version: String,

    /// Overlay root (defaults to $OVERLAY_ROOT)
    #[arg(short, long, value_name = "DIR")]
    pub overlay: Option<PathBuf>,

    /// Simulate changes without modifying the filesystem
    #[arg(short, long)]
    pub dry: bool,

    /// Do not ask for confirmation
    #[arg(short, long)]
    pub yes: bool,

    /// Skip Manifest regeneration
    #[arg(long)]
    pub no_manifest: bool,

    /// Rename despite version-specific files or existing destinations
    #[arg(short, long)]
    pub force: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_arguments() {
        let args = Args::try_parse_from(["ebuild-rename", "app-misc", "hello", "1.0", "2.0"]).unwrap();

        assert_eq!(args.category, "app-misc");
        assert_eq!(args.pattern, "hello");
        assert_eq!(args.old_version, "1.0");
        assert_eq!(args.new_version, "2.0");
        assert!(!args.dry);
        assert!(!args.force);
        assert!(args.overlay.is_none());
    }

    #[test]
    fn test_flags() {
        let args = Args::try_parse_from([
            "ebuild-rename",
            "-o",
            "/overlay",
            "--dry",
            "--force",
            "--no-manifest",
            "-y",
            "-vv",
            "*",
            "py*",
            "1.0",
            "2.0",
        ])
        .unwrap();

        assert_eq!(args.overlay, Some(PathBuf::from("/overlay")));
        assert!(args.dry && args.force && args.no_manifest && args.yes);
        assert_eq!(args.verbose, 2);
        assert_eq!(args.category, "*");
    }

    #[test]
    fn test_missing_versions_rejected() {
        assert!(Args::try_parse_from(["ebuild-rename", "app-misc", "hello"]).is_err());
    }
}
