//! End-to-end tests for the compile pipeline: load a `.vr` file from disk, lex, parse, and write the log.

use std::fs;
use std::io;
use std::path::PathBuf;

use clap::Parser as _;
use rotate::cli::compile::{CompileOptions, Stage, compile};
use rotate::cli::{Cli, CliError, ExitCode};
use rotate::diagnostics::{Collector, Palette, ParseErrorKind, WriterSink};

/// A scratch directory unique to one test.
struct Scratch {
    dir: PathBuf,
}

impl Scratch {
    fn new(name: &str) -> Self {
        let dir = std::env::temp_dir().join(format!("rotate_pipeline_{}_{name}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        Self { dir }
    }

    fn write(&self, file: &str, contents: &str) -> PathBuf {
        let path = self.dir.join(file);
        fs::write(&path, contents).unwrap();
        path
    }
}

impl Drop for Scratch {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.dir);
    }
}

fn options(path: PathBuf) -> CompileOptions {
    CompileOptions {
        path,
        ..Default::default()
    }
}

#[test]
fn compiles_a_small_program() {
    let scratch = Scratch::new("ok");
    let path = scratch.write(
        "main.vr",
        "io :: import \"std/io\"\n\nadd :: fn(a: int, b: int) int {\n    ret a + b\n}\n\nmain :: fn() {\n    x := add(1, 2)\n}\n",
    );

    let mut sink = Collector::new();
    let mut out: Vec<u8> = Vec::new();
    let stats = compile(&options(path), &mut sink, &mut out).unwrap();

    assert!(sink.is_empty());
    assert!(out.is_empty());
    assert_eq!(stats.declaration_count, 3);
    assert!(stats.token_count > 20);
    assert_eq!(stats.file_size, fs::metadata(scratch.dir.join("main.vr")).unwrap().len() as usize);
}

#[test]
fn ast_flag_prints_the_tree() {
    let scratch = Scratch::new("ast");
    let path = scratch.write("main.vr", "x := 1 + 2 * 3\n");

    let mut sink = Collector::new();
    let mut out: Vec<u8> = Vec::new();
    let opts = CompileOptions {
        print_ast: true,
        ..options(path)
    };
    compile(&opts, &mut sink, &mut out).unwrap();

    insta::assert_snapshot!(String::from_utf8(out).unwrap().trim_end(), @"(var x (+ 1 (* 2 3)))");
}

#[test]
fn lex_flag_stops_before_parsing() {
    let scratch = Scratch::new("lex");
    // Not a valid program, but lexically fine.
    let path = scratch.write("main.vr", "} } ret\n");

    let mut sink = Collector::new();
    let mut out: Vec<u8> = Vec::new();
    let opts = CompileOptions {
        lex_only: true,
        ..options(path)
    };
    let stats = compile(&opts, &mut sink, &mut out).unwrap();

    assert!(sink.is_empty());
    assert_eq!(stats.token_count, 5);
    assert_eq!(stats.declaration_count, 0);
    let listing = String::from_utf8(out).unwrap();
    assert_eq!(listing.lines().count(), 5);
    assert!(listing.lines().last().unwrap().contains("eot"));
}

#[test]
fn parse_error_is_reported_to_the_sink() {
    let scratch = Scratch::new("parse_err");
    let path = scratch.write("bad.vr", "fn f( {\n");

    let mut sink = Collector::new();
    let mut out: Vec<u8> = Vec::new();
    let failure = compile(&options(path), &mut sink, &mut out).unwrap_err();

    assert_eq!(failure.stage(), Stage::Parser);
    assert_eq!(sink.diagnostics().len(), 1);
    let err = &sink.diagnostics()[0];
    assert_eq!(err.parse_kind(), Some(ParseErrorKind::UnmatchedParen));
    assert_eq!((err.line, err.column), (1, 7));

    let cli_err: CliError = failure.into();
    assert_eq!(cli_err.message, "Compilation failed at stage: PARSER");
    assert_eq!(cli_err.exit_code, ExitCode::FAILURE);
}

#[test]
fn lex_error_renders_plain_report() {
    let scratch = Scratch::new("lex_err");
    let path = scratch.write("bad.vr", "x := 1\ny := @\n");

    let mut sink = WriterSink::new(Vec::new(), Palette::plain());
    let mut out: Vec<u8> = Vec::new();
    let failure = compile(&options(path.clone()), &mut sink, &mut out).unwrap_err();
    assert_eq!(failure.stage(), Stage::Lexer);

    let rendered = String::from_utf8(sink.into_inner()).unwrap();
    let expected_prefix = format!(" > {}:2:6: error: ", path.to_string_lossy());
    assert!(rendered.starts_with(&expected_prefix), "{rendered}");
    assert!(rendered.contains("y := @"));
}

#[test]
fn loader_failures_stop_at_file_read() {
    let scratch = Scratch::new("load");
    let wrong_ext = scratch.write("main.txt", "x := 1\n");
    let empty = scratch.write("empty.vr", "");

    for path in [wrong_ext, empty, scratch.dir.join("missing.vr")] {
        let mut sink = Collector::new();
        let failure = compile(&options(path), &mut sink, &mut io::sink()).unwrap_err();
        assert_eq!(failure.stage(), Stage::FileRead);
        assert!(failure.detail.is_some());
        assert!(sink.is_empty());
    }
}

#[test]
fn log_flag_writes_org_dump() {
    let scratch = Scratch::new("log");
    let path = scratch.write("main.vr", "K :: 3\n");
    let log_path = scratch.dir.join("out.org");

    let cli = Cli::try_parse_from([
        "rotate",
        "--log",
        "--log-file",
        log_path.to_str().unwrap(),
        path.to_str().unwrap(),
    ])
    .unwrap();
    let mut sink = Collector::new();
    compile(&cli.options(), &mut sink, &mut io::sink()).unwrap();

    let log = fs::read_to_string(&log_path).unwrap();
    assert!(log.starts_with("#+TITLE: COMPILATION LOG\n"));
    assert!(log.contains("- number of tokens: 5\n"));
    assert!(log.contains("[VARIABLE]: n: 0, name: `K`, constant: yes"));
    assert!(log.trim_end().ends_with("** TODO TYPECHECKER"));
}

#[test]
fn log_is_written_even_when_parsing_fails() {
    let scratch = Scratch::new("log_err");
    let path = scratch.write("bad.vr", "x := (1\n");
    let log_path = scratch.dir.join("out.org");

    let opts = CompileOptions {
        log_file: Some(log_path.clone()),
        ..options(path)
    };
    let failure = compile(&opts, &mut Collector::new(), &mut io::sink()).unwrap_err();
    assert_eq!(failure.stage(), Stage::Parser);

    let log = fs::read_to_string(&log_path).unwrap();
    assert!(log.contains("No AST declarations found"));
}

#[test]
fn unwritable_log_fails_at_logger_stage() {
    let scratch = Scratch::new("log_dir");
    let path = scratch.write("main.vr", "x := 1\n");

    let opts = CompileOptions {
        // A directory cannot be opened as a file.
        log_file: Some(scratch.dir.clone()),
        ..options(path)
    };
    let failure = compile(&opts, &mut Collector::new(), &mut io::sink()).unwrap_err();
    assert_eq!(failure.stage(), Stage::Logger);
}

#[test]
fn deeply_nested_source_fails_with_one_diagnostic() {
    let scratch = Scratch::new("deep");
    let depth = 5_000;
    let path = scratch.write("deep.vr", &format!("x := {}1{}\n", "(".repeat(depth), ")".repeat(depth)));

    let mut sink = Collector::new();
    let failure = compile(&options(path), &mut sink, &mut io::sink()).unwrap_err();

    assert_eq!(failure.stage(), Stage::Parser);
    assert_eq!(sink.diagnostics().len(), 1);
    let err = &sink.diagnostics()[0];
    assert_eq!(err.parse_kind(), Some(ParseErrorKind::UnexpectedToken));
    assert!(err.message.starts_with("nesting too deep"), "{}", err.message);
}
