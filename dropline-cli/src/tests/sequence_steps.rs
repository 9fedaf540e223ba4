//! Behaviour-driven step definitions driving the sequence CLI scenarios.

use super::helpers::{Workspace, line_stops, write_request, write_utf8};
use super::*;
use crate::sequence::{DefaultSequencerBuilder, SequenceOutput, run_sequence_with};
use camino::Utf8PathBuf;
use dropline_core::SequenceRequest;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;

#[derive(Debug)]
struct SequenceWorld {
    workspace: Workspace,
    request_path: Utf8PathBuf,
    include_request: RefCell<bool>,
    start_args: RefCell<Vec<String>>,
    extra_args: RefCell<Vec<String>>,
    stdout: RefCell<Vec<u8>>,
    result: RefCell<Option<Result<(), CliError>>>,
}

impl SequenceWorld {
    fn new() -> Self {
        let workspace = Workspace::new();
        let request_path = workspace.path("stops.json");
        let start_args = [ARG_START_LAT, ARG_START_LNG]
            .into_iter()
            .flat_map(|flag| [format!("--{flag}"), "0".to_owned()])
            .collect();

        Self {
            workspace,
            request_path,
            include_request: RefCell::new(true),
            start_args: RefCell::new(start_args),
            extra_args: RefCell::new(Vec::new()),
            stdout: RefCell::new(Vec::new()),
            result: RefCell::new(None),
        }
    }

    fn build_command_line(&self) -> Vec<String> {
        let mut argv = vec!["dropline".to_owned(), "sequence".to_owned()];
        if *self.include_request.borrow() {
            argv.push(self.request_path.as_str().to_owned());
        }
        argv.extend(self.start_args.borrow().iter().cloned());
        argv.extend(self.extra_args.borrow().iter().cloned());
        argv
    }

    fn expect_error(&self) -> std::cell::Ref<'_, CliError> {
        std::cell::Ref::map(self.result.borrow(), |result| {
            result
                .as_ref()
                .expect("result recorded")
                .as_ref()
                .expect_err("expected error")
        })
    }
}

#[fixture]
fn world() -> SequenceWorld {
    SequenceWorld::new()
}

#[given("a stop manifest exists on disk")]
fn stop_manifest_exists(#[from(world)] world: &SequenceWorld) {
    write_request(&world.request_path, &SequenceRequest::new(line_stops()));
}

#[given("the stop manifest contains invalid JSON")]
fn stop_manifest_contains_invalid_json(#[from(world)] world: &SequenceWorld) {
    write_utf8(&world.request_path, b"{ not valid json");
}

#[given("I omit the manifest path")]
fn omit_manifest_path(#[from(world)] world: &SequenceWorld) {
    *world.include_request.borrow_mut() = false;
}

#[given("I choose the code strategy")]
fn choose_code_strategy(#[from(world)] world: &SequenceWorld) {
    world
        .extra_args
        .borrow_mut()
        .extend([format!("--{ARG_STRATEGY}"), "code".to_owned()]);
}

#[given("I only pass a start latitude")]
fn only_start_latitude(#[from(world)] world: &SequenceWorld) {
    world
        .start_args
        .replace(vec![format!("--{ARG_START_LAT}"), "-33.6".to_owned()]);
}

#[when("I run the sequence command")]
fn run_sequence_command(#[from(world)] world: &SequenceWorld) {
    let invocation = world.build_command_line();
    let parsed = Cli::try_parse_from(invocation).map_err(CliError::from);
    let outcome = parsed.and_then(|cli| match cli.command {
        Command::Sequence(args) => {
            let mut buffer = world.stdout.borrow_mut();
            run_sequence_with(args, &DefaultSequencerBuilder, &mut *buffer)
        }
    });

    world.result.replace(Some(outcome));
}

#[then("the command succeeds and prints stops {order}")]
fn command_succeeds_and_prints_stops(#[from(world)] world: &SequenceWorld, order: String) {
    let borrowed = world.result.borrow();
    let result = borrowed.as_ref().expect("result recorded");
    result.as_ref().expect("expected success");

    let output: SequenceOutput =
        serde_json::from_slice(&world.stdout.borrow()).expect("output should be JSON route");
    let ids: Vec<&str> = output.stops.iter().map(|stop| stop.id.as_str()).collect();
    let expected: Vec<&str> = order.trim_matches('"').split(", ").collect();
    assert_eq!(ids, expected);
    assert!(
        world.workspace.path("stops.json").as_std_path().is_file(),
        "manifest should be left in place"
    );
}

#[then("the command fails because the manifest JSON is invalid")]
fn command_fails_invalid_json(#[from(world)] world: &SequenceWorld) {
    match &*world.expect_error() {
        CliError::ParseRequest { .. } => {}
        other => panic!("expected ParseRequest, found {other:?}"),
    }
}

#[then("the command fails because the manifest path is missing")]
fn command_fails_missing_request_path(#[from(world)] world: &SequenceWorld) {
    match &*world.expect_error() {
        CliError::MissingArgument { field, .. } => assert_eq!(*field, ARG_REQUEST),
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[then("the command fails because the start point is incomplete")]
fn command_fails_incomplete_start(#[from(world)] world: &SequenceWorld) {
    match &*world.expect_error() {
        CliError::IncompleteStart { given, missing } => {
            assert_eq!(*given, ARG_START_LAT);
            assert_eq!(*missing, ARG_START_LNG);
        }
        other => panic!("expected IncompleteStart, found {other:?}"),
    }
}

macro_rules! register_sequence_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/sequence_command.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: SequenceWorld) {
            let _ = world;
        }
    };
}

register_sequence_scenario!(sequence_happy_path, "sequencing a manifest from JSON");
register_sequence_scenario!(sequence_by_code, "sequencing by order code");
register_sequence_scenario!(sequence_invalid_json, "rejecting invalid JSON input");
register_sequence_scenario!(sequence_missing_request, "rejecting missing request paths");
register_sequence_scenario!(
    sequence_incomplete_start,
    "rejecting a half-specified start point"
);
