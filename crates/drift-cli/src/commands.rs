use anyhow::Context;
use tracing::debug;

use drift_engine::{compare, ArrayDiffMode, DiffOptions};
use drift_tree::Renderer;
use drift_value::Value;

use crate::cli::*;
use crate::render::{summary, TextRenderer};

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Compare(args) => cmd_compare(args, cli.format),
    }
}

fn cmd_compare(args: CompareArgs, format: OutputFormat) -> anyhow::Result<()> {
    let old = load_document(&args.old)?;
    let new = load_document(&args.new)?;

    let options = build_options(&args);
    let result = compare(&old, &new, &options)?;

    match format {
        OutputFormat::Json if args.stats_only => {
            println!("{}", serde_json::to_string_pretty(&result.stats)?);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        OutputFormat::Text if args.stats_only => {
            println!("{}", summary(&result.stats));
        }
        OutputFormat::Text => {
            print!("{}", TextRenderer.render(&result));
        }
    }
    Ok(())
}

fn build_options(args: &CompareArgs) -> DiffOptions {
    DiffOptions {
        max_depth: args.max_depth,
        ignore_keys: args.ignore_keys.iter().cloned().collect(),
        array_diff: match args.array_diff {
            ArrayDiffArg::Lcs => ArrayDiffMode::Lcs,
            ArrayDiffArg::Positional => ArrayDiffMode::Positional,
        },
        detect_cycles: !args.no_cycle_detection,
    }
}

/// Read and parse one document. Tag-form extended values (`{"$date": ms}`
/// and friends) decode to their extended kinds.
fn load_document(path: &str) -> anyhow::Result<Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {path}"))?;
    let value: Value = serde_json::from_str(&text)
        .with_context(|| format!("invalid JSON in {path}"))?;
    debug!(path, kind = %value.kind(), "loaded document");
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn compare_args(old: &tempfile::NamedTempFile, new: &tempfile::NamedTempFile) -> CompareArgs {
        CompareArgs {
            old: old.path().to_string_lossy().into_owned(),
            new: new.path().to_string_lossy().into_owned(),
            max_depth: None,
            ignore_keys: Vec::new(),
            array_diff: ArrayDiffArg::Lcs,
            no_cycle_detection: false,
            stats_only: false,
        }
    }

    #[test]
    fn load_document_parses_json() {
        let file = write_temp(r#"{"a": [1, 2], "b": null}"#);
        let value = load_document(&file.path().to_string_lossy()).unwrap();
        assert_eq!(value.kind(), drift_value::ValueKind::Object);
    }

    #[test]
    fn load_document_decodes_tagged_values() {
        let file = write_temp(r#"{"when": {"$date": 1000}}"#);
        let value = load_document(&file.path().to_string_lossy()).unwrap();
        match value {
            Value::Object(object) => {
                assert_eq!(object.get("when"), Some(Value::date(1000)));
            }
            other => panic!("expected object, got {:?}", other),
        }
    }

    #[test]
    fn load_document_errors_name_the_file() {
        let err = load_document("/no/such/drift-input.json").unwrap_err();
        assert!(err.to_string().contains("/no/such/drift-input.json"));

        let file = write_temp("not json at all");
        let err = load_document(&file.path().to_string_lossy()).unwrap_err();
        assert!(err.to_string().contains("invalid JSON"));
    }

    #[test]
    fn build_options_maps_every_flag() {
        let old = write_temp("{}");
        let new = write_temp("{}");
        let mut args = compare_args(&old, &new);
        args.max_depth = Some(5);
        args.ignore_keys = vec!["etag".to_string()];
        args.array_diff = ArrayDiffArg::Positional;
        args.no_cycle_detection = true;

        let options = build_options(&args);
        assert_eq!(options.max_depth, Some(5));
        assert!(options.ignore_keys.contains("etag"));
        assert_eq!(options.array_diff, ArrayDiffMode::Positional);
        assert!(!options.detect_cycles);
    }

    #[test]
    fn compare_command_runs_end_to_end() {
        let old = write_temp(r#"{"name": "a", "age": 30}"#);
        let new = write_temp(r#"{"name": "a", "age": 31, "tag": "x"}"#);

        cmd_compare(compare_args(&old, &new), OutputFormat::Text).unwrap();
        cmd_compare(compare_args(&old, &new), OutputFormat::Json).unwrap();

        let mut stats_args = compare_args(&old, &new);
        stats_args.stats_only = true;
        cmd_compare(stats_args, OutputFormat::Text).unwrap();
    }

    #[test]
    fn compare_command_rejects_zero_depth() {
        let old = write_temp("{}");
        let new = write_temp("{}");
        let mut args = compare_args(&old, &new);
        args.max_depth = Some(0);
        assert!(cmd_compare(args, OutputFormat::Text).is_err());
    }
}
