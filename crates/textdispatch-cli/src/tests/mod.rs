//! Runner tests driven through an in-memory configuration loader.

use std::cell::RefCell;
use std::ffi::OsString;
use std::process::ExitCode;

use rstest::{fixture, rstest};
use textdispatch_config::Config;
use textdispatch_core::NumericDomain;

use crate::config::ConfigLoader;
use crate::errors::AppError;
use crate::run_with_loader;

struct StaticConfigLoader {
    config: Config,
    seen: RefCell<Vec<OsString>>,
}

impl StaticConfigLoader {
    fn new(config: Config) -> Self {
        Self {
            config,
            seen: RefCell::new(Vec::new()),
        }
    }
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self, args: &[OsString]) -> Result<Config, AppError> {
        self.seen.replace(args.to_vec());
        Ok(self.config.clone())
    }
}

struct Outcome {
    exit: ExitCode,
    stdout: String,
    stderr: String,
}

fn run_cli(loader: &StaticConfigLoader, args: &[&str]) -> Outcome {
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let argv = std::iter::once("textdispatch")
        .chain(args.iter().copied())
        .map(OsString::from);
    let exit = run_with_loader(argv, &mut stdout, &mut stderr, loader);
    Outcome {
        exit,
        stdout: String::from_utf8(stdout).expect("stdout utf8"),
        stderr: String::from_utf8(stderr).expect("stderr utf8"),
    }
}

#[fixture]
fn loader() -> StaticConfigLoader {
    StaticConfigLoader::new(Config::default())
}

#[rstest]
fn describe_renders_the_forth_table(loader: StaticConfigLoader) {
    let outcome = run_cli(&loader, &["describe", "forth"]);
    assert_eq!(outcome.exit, ExitCode::SUCCESS);
    insta::assert_snapshot!(outcome.stdout, @r"
    +     -> plus
    -     -> minus
    *     -> mult
    /     -> div
    %     -> mod
    .     -> print
    drop  -> drop
    dup   -> dup
    deep  -> deep
    swap  -> swap
    integers (i32) -> ParseInt
    strings -> (none)
    ");
}

#[rstest]
fn describe_renders_json(loader: StaticConfigLoader) {
    let outcome = run_cli(&loader, &["--output", "json", "describe", "second"]);
    assert_eq!(outcome.exit, ExitCode::SUCCESS);
    assert_eq!(
        outcome.stdout,
        concat!(
            r#"{"actions":[{"token":"M","method":"M"}],"#,
            r#""integer_sink":null,"string_sink":null,"numeric_domain":"i32"}"#,
            "\n"
        )
    );
}

#[rstest]
#[case::prints("2 3 + .", "5\n")]
#[case::leaves_stack("1 2", "stack: 1 2\n")]
#[case::prints_and_leaves("4 5 6 * .", "30\nstack: 4\n")]
fn forth_reports_output_and_stack(
    loader: StaticConfigLoader,
    #[case] line: &str,
    #[case] expected: &str,
) {
    let outcome = run_cli(&loader, &["forth", line]);
    assert_eq!(outcome.exit, ExitCode::SUCCESS);
    assert_eq!(outcome.stdout, expected);
}

#[rstest]
fn forth_lines_share_one_stack(loader: StaticConfigLoader) {
    let outcome = run_cli(&loader, &["forth", "2", "3", "-", "."]);
    assert_eq!(outcome.stdout, "-1\n");
}

#[rstest]
fn forth_json_reports_stack(loader: StaticConfigLoader) {
    let outcome = run_cli(&loader, &["forth", "--output", "json", "2 3 +"]);
    assert_eq!(outcome.exit, ExitCode::SUCCESS);
    assert_eq!(outcome.stdout, "{\"output\":\"\",\"stack\":[5]}\n");
}

#[rstest]
fn forth_unknown_word_fails(loader: StaticConfigLoader) {
    let outcome = run_cli(&loader, &["forth", "1 frobnicate"]);
    assert_eq!(outcome.exit, ExitCode::FAILURE);
    assert!(outcome.stdout.is_empty());
    assert!(
        outcome
            .stderr
            .contains("token 'frobnicate' does not match any dispatchable method"),
        "stderr: {}",
        outcome.stderr
    );
}

#[test]
fn numeric_domain_comes_from_configuration() {
    let config = Config {
        numeric_domain: NumericDomain::I8,
        ..Config::default()
    };
    let loader = StaticConfigLoader::new(config);
    let accepted = run_cli(&loader, &["forth", "127 ."]);
    assert_eq!(accepted.stdout, "127\n");

    let rejected = run_cli(&loader, &["forth", "128"]);
    assert_eq!(rejected.exit, ExitCode::FAILURE);
    assert!(rejected.stderr.contains("token '128'"));
}

#[test]
fn oversized_tape_length_is_reported() {
    let config = Config {
        tape_length: usize::MAX,
        ..Config::default()
    };
    let loader = StaticConfigLoader::new(config);
    let outcome = run_cli(&loader, &["bf", "--code", "+."]);
    assert_eq!(outcome.exit, ExitCode::FAILURE);
    assert!(
        outcome.stderr.contains("exceeds the limit of 16777216 cells"),
        "stderr: {}",
        outcome.stderr
    );
}

#[rstest]
fn config_flags_reach_the_loader_only(loader: StaticConfigLoader) {
    let outcome = run_cli(
        &loader,
        &["--numeric-domain", "i64", "describe", "second"],
    );
    assert_eq!(outcome.exit, ExitCode::SUCCESS);
    let seen: Vec<String> = loader
        .seen
        .borrow()
        .iter()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();
    assert_eq!(seen, ["textdispatch", "--numeric-domain", "i64"]);
}

#[rstest]
fn bf_runs_inline_code_with_input(loader: StaticConfigLoader) {
    let outcome = run_cli(&loader, &["bf", "--code", ",+.", "--input", "a"]);
    assert_eq!(outcome.exit, ExitCode::SUCCESS);
    assert_eq!(outcome.stdout, "b");
}

#[rstest]
fn bf_reads_program_files(loader: StaticConfigLoader) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("adder.bf");
    std::fs::write(&path, textdispatch_demos::brainf::ADDER).expect("write program");
    let outcome = run_cli(&loader, &["bf", path.to_str().expect("utf8 path")]);
    assert_eq!(outcome.exit, ExitCode::SUCCESS);
    assert_eq!(outcome.stdout, "7");
}

#[rstest]
#[case::no_program(&["bf"], "bf needs a program")]
#[case::missing_file(&["bf", "/nonexistent/program.bf"], "failed to read program")]
#[case::unbalanced(&["bf", "--code", "[+"], "unmatched '['")]
#[case::underflow(&["bf", "--code", "<"], "left of cell 0")]
fn bf_failures_are_reported(
    loader: StaticConfigLoader,
    #[case] args: &[&str],
    #[case] message: &str,
) {
    let outcome = run_cli(&loader, args);
    assert_eq!(outcome.exit, ExitCode::FAILURE);
    assert!(outcome.stderr.contains(message), "stderr: {}", outcome.stderr);
}

#[rstest]
fn bf_json_reports_pointer(loader: StaticConfigLoader) {
    let outcome = run_cli(&loader, &["--output", "json", "bf", "--code", ">>+++."]);
    assert_eq!(outcome.stdout, "{\"output\":\"\\u0003\",\"pointer\":2}\n");
}

#[rstest]
#[case::encode(&["encode", "brainf", "+", "."], "2 4\n")]
#[case::decode(&["decode", "brainf", "0", "7"], "> ]\n")]
#[case::forth_alias(&["encode", "forth", "swap", "%"], "9 4\n")]
fn catalog_commands(
    loader: StaticConfigLoader,
    #[case] args: &[&str],
    #[case] expected: &str,
) {
    let outcome = run_cli(&loader, args);
    assert_eq!(outcome.exit, ExitCode::SUCCESS, "stderr: {}", outcome.stderr);
    assert_eq!(outcome.stdout, expected);
}

#[rstest]
#[case::unknown_token(&["encode", "forth", "42"], "token '42' is not in the catalog")]
#[case::foreign_id(&["decode", "second", "1"], "catalog id 1 is out of range")]
fn catalog_rejections(loader: StaticConfigLoader, #[case] args: &[&str], #[case] message: &str) {
    let outcome = run_cli(&loader, args);
    assert_eq!(outcome.exit, ExitCode::FAILURE);
    assert!(outcome.stderr.contains(message), "stderr: {}", outcome.stderr);
}

#[rstest]
fn demo_prints_every_section(loader: StaticConfigLoader) {
    let outcome = run_cli(&loader, &["demo"]);
    assert_eq!(outcome.exit, ExitCode::SUCCESS, "stderr: {}", outcome.stderr);
    insta::assert_snapshot!(outcome.stdout, @r"
    SHOWCASE:
    	OK calling an instance method.
    	OK calling another instance method.
    	OK calling static methods.
    	OK parsing the int got 64
    	OK parsing the string got 'Not recognizable string'
    	OK having multiple dispatchers.
    	OK not dispatching to multiple parameters methods.
    	OK not dispatching to not void returning methods.
    BRAINF CAN EXECUTE:
    	7 = 7
    	Hello World! = Hello World!
    FORTH SELF TEST:
    	  100 == 100
    	   30 == 30
    	    2 == 2
    	    0 == 0
    ");
}

#[rstest]
fn help_goes_to_stdout(loader: StaticConfigLoader) {
    let outcome = run_cli(&loader, &["--help"]);
    assert_eq!(outcome.exit, ExitCode::SUCCESS);
    assert!(outcome.stdout.contains("Usage: textdispatch"));
    assert!(outcome.stderr.is_empty());
}

#[rstest]
fn usage_errors_go_to_stderr(loader: StaticConfigLoader) {
    let outcome = run_cli(&loader, &["describe", "nobody"]);
    assert_eq!(outcome.exit, ExitCode::FAILURE);
    assert!(outcome.stdout.is_empty());
    assert!(outcome.stderr.contains("invalid value 'nobody'"));
}
