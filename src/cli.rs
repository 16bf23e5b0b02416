//! Minimal CLI: build a union from primitive kinds → (check documents | print AST)
use std::io::Read;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use rayon::prelude::*;
use serde_json::Value;

use json_sum::{builder, Coercible, Meta, Nominal, Outcome, Predicate, Primitive, Rule, TypeRef};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// build `kind | kind | ...` union types and check JSON/NDJSON documents against them
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// try every input document against the union and report per-document verdicts
    Check(CheckOut),
    /// print the union's AST as JSON
    Ast(AstOut),
}

#[derive(Args, Debug, Clone)]
struct TypeSettings {
    /// primitive kinds, tried left to right (null, boolean, integer, number, string, array, object)
    #[arg(long, short, num_args = 1.., required = true)]
    kind: Vec<Primitive>,

    /// coerce loose input (e.g. "5" → 5) instead of requiring the exact primitive
    #[arg(long, default_value_t = false)]
    coerce: bool,

    /// also accept null (`null | ...`)
    #[arg(long, default_value_t = false)]
    nullable: bool,

    /// numeric lower bound (exclusive)
    #[arg(long)]
    gt: Option<f64>,

    /// numeric upper bound (exclusive)
    #[arg(long)]
    lt: Option<f64>,

    /// minimum size of strings, arrays and objects
    #[arg(long)]
    min_size: Option<usize>,

    /// maximum size of strings, arrays and objects
    #[arg(long)]
    max_size: Option<usize>,

    /// metadata entries `key=value`; values parse as JSON when possible
    #[arg(long, value_parser = parse_meta_entry)]
    meta: Vec<(String, Value)>,
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// treat input as newline-delimited JSON (NDJSON)
    #[arg(long, default_value_t = false)]
    ndjson: bool,

    /// One or more inputs. May be literal paths or quoted glob patterns or '-' for stdin
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(clap::Parser, Debug)]
struct CheckOut {
    #[command(flatten)]
    type_settings: TypeSettings,

    #[command(flatten)]
    input_settings: InputSettings,

    /// only print rejected documents
    #[arg(long, short)]
    quiet: bool,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct AstOut {
    #[command(flatten)]
    type_settings: TypeSettings,

    /// leave metadata out of the tree
    #[arg(long)]
    no_meta: bool,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

/// One parsed input document and where it came from.
#[derive(Debug)]
struct Document {
    label: String,
    value: Value,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl TypeSettings {
    fn rule(&self) -> Option<Rule> {
        let preds = [
            self.gt.map(Predicate::gt),
            self.lt.map(Predicate::lt),
            self.min_size.map(Predicate::MinSize),
            self.max_size.map(Predicate::MaxSize),
        ];
        preds.into_iter().flatten().map(Rule::from).reduce(|a, b| a & b)
    }

    fn build(&self) -> Result<TypeRef> {
        let leaves = self.kind.iter().map(|&p| -> TypeRef {
            if self.coerce { std::sync::Arc::new(Coercible::new(p)) } else { std::sync::Arc::new(Nominal::new(p)) }
        });
        let mut ty = builder::any_of(leaves).context("at least one --kind is required")?;
        if self.nullable {
            ty = builder::optional(ty);
        }
        if let Some(rule) = self.rule() {
            ty = ty.constrained(rule);
        }
        if !self.meta.is_empty() {
            ty = ty.with_meta(self.meta.iter().cloned().collect::<Meta>());
        }
        tracing::debug!(name = %ty.name(), constrained = ty.is_constrained(), "built type");
        Ok(ty)
    }
}

impl InputSettings {
    fn load(&self) -> Result<Vec<Document>> {
        let mut docs = Vec::new();
        for source_path in resolve_file_path_patterns(&self.input)? {
            let source_path_str = source_path.to_string_lossy().to_string();
            let source = if source_path_str == "-" {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf).context("failed to read stdin")?;
                buf
            } else {
                std::fs::read_to_string(&source_path)
                    .with_context(|| format!("failed to read source file ({source_path_str})"))?
            };
            if self.ndjson {
                for (ix, line) in source.lines().enumerate().filter(|(_, l)| !l.trim().is_empty()) {
                    let value = serde_json::from_str::<Value>(line).with_context(|| {
                        format!("failed to parse JSON line ({source_path_str}:{})", ix + 1)
                    })?;
                    docs.push(Document { label: format!("{source_path_str}:{}", ix + 1), value });
                }
            } else {
                let value = serde_json::from_str::<Value>(&source)
                    .with_context(|| format!("failed to parse JSON source file ({source_path_str})"))?;
                docs.push(Document { label: source_path_str, value });
            }
        }
        tracing::debug!(documents = docs.len(), "loaded inputs");
        Ok(docs)
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }
    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Check(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }

                let ty = target.type_settings.build()?;
                let docs = target.input_settings.load()?;

                // descriptors are immutable, so documents are checked in parallel
                let outcomes: Vec<Outcome> = docs.par_iter().map(|doc| ty.try_call(&doc.value, None)).collect();

                let mut rejected = 0usize;
                for (doc, outcome) in docs.iter().zip(&outcomes) {
                    match outcome {
                        Outcome::Success(value) => {
                            if !target.quiet {
                                println!("{} {} → {}", "ok".green().bold(), doc.label, value);
                            }
                        }
                        Outcome::Failure(failure) => {
                            rejected += 1;
                            println!("{} {}: {}", "rejected".red().bold(), doc.label, failure.error);
                        }
                    }
                }
                if rejected > 0 {
                    bail!("{rejected} of {} documents rejected by {}", docs.len(), ty.name());
                }
                Ok(())
            }
            Command::Ast(target) => {
                let ty = target.type_settings.build()?;
                let ast = ty.to_ast(!target.no_meta);
                let ast_src = serde_json::to_string_pretty(&ast)?;
                if let Some(out) = target.out.as_ref() {
                    if let Some(parent) = out.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(out, &ast_src)?;
                } else {
                    println!("{ast_src}");
                }
                Ok(())
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn parse_meta_entry(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw.split_once('=').ok_or_else(|| format!("expected key=value, got `{raw}`"))?;
    let value = serde_json::from_str::<Value>(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.trim().to_string(), value))
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'['))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                matched_any = true;
                out.push(entry?);
            }
            if !matched_any {
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            // literal path, or '-' for stdin
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn settings(args: &[&str]) -> TypeSettings {
        #[derive(Parser)]
        struct Wrap {
            #[command(flatten)]
            inner: TypeSettings,
        }
        let argv = std::iter::once("json-sum").chain(args.iter().copied());
        Wrap::parse_from(argv).inner
    }

    #[test]
    fn builds_left_fold_of_kinds() {
        let ty = settings(&["--kind", "string", "integer", "boolean"]).build().unwrap();
        assert_eq!(ty.name(), "string | integer | boolean");
        assert!(ty.is_valid(&json!(true)));
        assert!(!ty.is_valid(&json!(null)));
    }

    #[test]
    fn nullable_bounds_constrain_the_non_null_branch() {
        let ty = settings(&["--kind", "integer", "--nullable", "--gt", "0"]).build().unwrap();
        assert!(ty.is_optional());
        assert!(ty.is_valid(&json!(null)));
        assert!(ty.is_valid(&json!(1)));
        assert!(!ty.is_valid(&json!(0)));
    }

    #[test]
    fn coerce_and_meta_flags() {
        let ty = settings(&["--kind", "integer", "--coerce", "--meta", "doc=\"count\"", "--meta", "v=2"])
            .build()
            .unwrap();
        assert_eq!(ty.try_call(&json!("12"), None), Outcome::Success(json!(12)));
        assert_eq!(ty.meta().get("doc"), Some(&json!("count")));
        assert_eq!(ty.meta().get("v"), Some(&json!(2)));
    }

    /// A fresh file under the system temp dir, unique per test process.
    fn scratch(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("json-sum-cli-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn cli(args: &[&str]) -> CommandLineInterface {
        CommandLineInterface::parse_from(std::iter::once("json-sum").chain(args.iter().copied()))
    }

    #[test]
    fn ndjson_documents_are_labelled_by_line() {
        let path = scratch("lines.ndjson", "1\n\n\"two\"\n[3]\n");
        let path_str = path.to_string_lossy().to_string();
        let settings = InputSettings { ndjson: true, input: vec![path_str.clone()] };
        let docs = settings.load().unwrap();
        let labels: Vec<_> = docs.iter().map(|d| d.label.clone()).collect();
        assert_eq!(labels, vec![format!("{path_str}:1"), format!("{path_str}:3"), format!("{path_str}:4")]);
        assert_eq!(docs[1].value, json!("two"));
    }

    #[test]
    fn bad_ndjson_line_names_its_position() {
        let path = scratch("broken.ndjson", "1\n{oops\n");
        let settings = InputSettings { ndjson: true, input: vec![path.to_string_lossy().to_string()] };
        let err = settings.load().unwrap_err();
        assert!(err.to_string().ends_with(":2)"), "{err}");
    }

    #[test]
    fn glob_without_matches_is_an_error() {
        let dir = scratch("anchor.json", "null");
        let pattern = format!("{}/*.nothing-here", dir.parent().unwrap().display());
        let settings = InputSettings { ndjson: false, input: vec![pattern] };
        let err = settings.load().unwrap_err();
        assert!(err.to_string().contains("matched no files"), "{err}");
    }

    #[test]
    fn dash_stays_a_stdin_marker() {
        assert_eq!(resolve_file_path_patterns(["-"]).unwrap(), vec![PathBuf::from("-")]);
    }

    #[test]
    fn check_fails_when_any_document_is_rejected() {
        let path = scratch("mixed.ndjson", "5\n\"x\"\n2.5\n");
        let path = path.to_string_lossy().to_string();
        let err = cli(&["check", "--kind", "integer", "string", "--ndjson", "--input", &path]).run().unwrap_err();
        assert_eq!(err.to_string(), "1 of 3 documents rejected by integer | string");

        cli(&["check", "--kind", "integer", "number", "-q", "--ndjson", "--input", &path])
            .run()
            .unwrap_err();
        cli(&["check", "--kind", "number", "string", "-q", "--ndjson", "--input", &path]).run().unwrap();
    }

    #[test]
    fn ast_output_keeps_meta_of_constrained_type() {
        let out = scratch("tree.json", "");
        let out_str = out.to_string_lossy().to_string();
        cli(&["ast", "--kind", "integer", "--gt", "0", "--meta", "doc=count", "--out", &out_str]).run().unwrap();
        let tree: Value = serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(tree[0], json!("constrained"));
        assert_eq!(tree[1][0], json!(["nominal", ["integer", { "doc": "count" }]]));

        cli(&["ast", "--kind", "integer", "--gt", "0", "--meta", "doc=count", "--no-meta", "--out", &out_str])
            .run()
            .unwrap();
        let tree: Value = serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(tree[1][0], json!(["nominal", ["integer", {}]]));
    }

    #[test]
    fn meta_entry_falls_back_to_string() {
        assert_eq!(parse_meta_entry("k=plain").unwrap(), ("k".into(), json!("plain")));
        assert!(parse_meta_entry("novalue").is_err());
    }
}
