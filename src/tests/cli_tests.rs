// CLI Tests
//
// Argument parsing and path collection; output writers are covered in
// cli/output.rs.

use crate::cli::{collect_paths, load_config, BatchArgs, Cli, Commands, OutputFormatArg};
use crate::error::MetaError;
use crate::language::Grammar;
use crate::tests::test_utils::write_files;
use clap::Parser;
use std::io::Cursor;
use tempfile::TempDir;

fn batch_args(paths: &[&str], dir: Option<std::path::PathBuf>, stdin: bool) -> BatchArgs {
    BatchArgs {
        paths: paths.iter().map(|p| p.to_string()).collect(),
        dir,
        stdin,
    }
}

#[test]
fn test_parse_script_command_with_kind() {
    let cli = Cli::try_parse_from(["mpmeta", "script", "pages/index.js", "--kind", "page", "--format", "ndjson"]).unwrap();
    assert!(matches!(cli.format, OutputFormatArg::Ndjson));
    match cli.command {
        Commands::Script { file, kind } => {
            assert_eq!(file.to_string_lossy(), "pages/index.js");
            assert!(kind.is_some());
        }
        other => panic!("unexpected command {:?}", other),
    }
}

#[test]
fn test_parse_batch_command_with_global_flags() {
    let cli = Cli::try_parse_from(["mpmeta", "--threads", "2", "css-files", "a.css", "b.wxss", "--progress"]).unwrap();
    assert_eq!(cli.threads, Some(2));
    assert!(cli.progress);
    match cli.command {
        Commands::CssFiles(args) => assert_eq!(args.paths, vec!["a.css", "b.wxss"]),
        other => panic!("unexpected command {:?}", other),
    }
}

#[test]
fn test_unknown_kind_is_rejected() {
    assert!(Cli::try_parse_from(["mpmeta", "script", "a.js", "--kind", "widget"]).is_err());
}

#[test]
fn test_collect_paths_from_all_sources() {
    let dir = TempDir::new().unwrap();
    write_files(dir.path(), &[("a.js", ""), ("nested/b.js", ""), ("c.css", "")]);

    let args = batch_args(&["explicit.js"], Some(dir.path().to_path_buf()), true);
    let paths = collect_paths(&args, Grammar::Script, Cursor::new(r#"["from-stdin.js"]"#)).unwrap();

    assert_eq!(paths.len(), 4);
    assert_eq!(paths[0], "explicit.js");
    assert!(paths[1].ends_with("a.js"));
    assert!(paths[2].ends_with("b.js"));
    assert_eq!(paths[3], "from-stdin.js");
}

#[test]
fn test_stdin_must_be_an_array() {
    let args = batch_args(&[], None, true);
    let error = collect_paths(&args, Grammar::Style, Cursor::new(r#"{"paths": []}"#)).unwrap_err();
    assert!(matches!(error.downcast_ref::<MetaError>(), Some(MetaError::Usage(_))));
}

#[test]
fn test_explicit_config_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("custom.toml");
    std::fs::write(&path, "threads = 5").unwrap();
    assert_eq!(load_config(Some(&path)).unwrap().threads, Some(5));
}
