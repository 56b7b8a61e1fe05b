// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Conversion of [`report`] entities into [`junit`] ones.
//!
//! [`junit`]: crate::junit
//! [`report`]: crate::report

use std::io;

use tracing::debug;

use crate::{
    config::Config,
    error::Result,
    junit::{Marker, TestCase, TestSuite, TestSuites},
    report::{Feature, Report, Scenario, ScenarioKind, Status, Step},
};

/// Converts a raw Cucumber JSON `report` into a JUnit XML report, returned
/// as a [`String`].
///
/// Blank input is not an error: it converts into the placeholder document
/// with a single empty `<testsuite/>`, same as a report without features.
///
/// # Errors
///
/// - [`Error::Parse`] if a non-blank `report` is not valid Cucumber JSON.
/// - [`Error::Xml`] or [`Error::Utf8`] if XML serialization fails.
///
/// [`Error::Parse`]: crate::Error::Parse
/// [`Error::Utf8`]: crate::Error::Utf8
/// [`Error::Xml`]: crate::Error::Xml
pub fn convert(report: &str, config: &Config) -> Result<String> {
    convert_report(&parse_report(report)?, config).to_xml(config)
}

/// Converts a raw Cucumber JSON `report`, writing the JUnit XML report into
/// the given `out` writer.
///
/// # Errors
///
/// - [`Error::Parse`] if a non-blank `report` is not valid Cucumber JSON.
/// - [`Error::Xml`] if writing into `out` fails.
///
/// [`Error::Parse`]: crate::Error::Parse
/// [`Error::Xml`]: crate::Error::Xml
pub fn convert_into(
    report: &str,
    out: impl io::Write,
    config: &Config,
) -> Result<()> {
    convert_report(&parse_report(report)?, config).write_xml(out, config)
}

/// Parses a raw Cucumber JSON report.
///
/// Blank input parses as a [`Report`] without [`Feature`]s.
///
/// # Errors
///
/// [`Error::Parse`] if a non-blank `report` is not valid Cucumber JSON.
///
/// [`Error::Parse`]: crate::Error::Parse
pub fn parse_report(report: &str) -> Result<Report> {
    if report.trim().is_empty() {
        return Ok(Report::new());
    }
    Ok(serde_json::from_str(report)?)
}

/// Converts a parsed [`Report`] into a [`TestSuites`] tree.
#[must_use]
pub fn convert_report(report: &Report, config: &Config) -> TestSuites {
    let mut suites = TestSuites::new();
    for feature in report {
        suites.add_suite(convert_feature(feature, config));
    }
    debug!(features = report.len(), "converted Cucumber JSON report");
    suites
}

/// Converts a single [`Feature`] into a [`TestSuite`].
///
/// Background elements represent shared setup rather than tests of their
/// own, so they don't participate in the conversion at all: neither in the
/// suite counters, nor in its total time.
#[must_use]
pub fn convert_feature(feature: &Feature, config: &Config) -> TestSuite {
    let mut suite = TestSuite::new(prefixed(&feature.name, config));
    for scenario in &feature.elements {
        if scenario.kind == ScenarioKind::Background {
            continue;
        }
        suite.add_case(convert_scenario(scenario, &feature.name, config));
    }
    debug!(
        feature = feature.key(),
        tests = suite.tests,
        failures = suite.failures,
        skipped = suite.skipped,
        "converted feature"
    );
    suite
}

/// Converts a single [`Scenario`] into a [`TestCase`].
///
/// The name of the owning [`Feature`] is passed along, as the produced
/// failure/skip markup names both the scenario and its feature.
#[must_use]
pub fn convert_scenario(
    scenario: &Scenario,
    feature_name: &str,
    config: &Config,
) -> TestCase {
    TestCase {
        name: prefixed(&scenario.name, config),
        // Not `sum()`: summing no durations yields -0.0, rendered as `-0`.
        time: scenario
            .steps
            .iter()
            .filter_map(|step| step.result.duration)
            .fold(0., |time, duration| time + seconds(duration)),
        markers: markers(scenario, feature_name, config),
    }
}

/// Converts a step duration into seconds.
///
/// Durations are microsecond-scale integers: dividing by `1000` yields
/// milliseconds, and by `1000` once more the seconds of `time` attributes.
fn seconds(duration: u64) -> f64 {
    // Up to 2^53 microseconds (over 285 years) this is exact.
    duration as f64 / 1_000_000.
}

/// Prepends the configured prefix, if any, to the given `name`.
fn prefixed(name: &str, config: &Config) -> String {
    config
        .prefix
        .as_ref()
        .map_or_else(|| name.to_owned(), |prefix| format!("{prefix}{name}"))
}

/// Per-[`Scenario`] tally of its [`Step`] statuses.
#[derive(Debug, Default)]
struct Tally {
    /// Total number of [`Step`]s.
    total: usize,

    /// Number of [`Status::Passed`] [`Step`]s.
    passed: usize,

    /// Number of [`Status::Pending`] [`Step`]s.
    pending: usize,

    /// Number of [`Status::Undefined`] [`Step`]s.
    undefined: usize,

    /// Indices of [`Status::Failed`] [`Step`]s, in their original order.
    failed: Vec<usize>,
}

impl Tally {
    /// Tallies up the given `steps`.
    fn count(steps: &[Step]) -> Self {
        let mut tally = Self::default();
        for (i, step) in steps.iter().enumerate() {
            tally.total += 1;
            match step.result.status {
                Status::Passed => tally.passed += 1,
                Status::Failed => tally.failed.push(i),
                Status::Pending => tally.pending += 1,
                Status::Undefined => tally.undefined += 1,
                // Only ever relevant as "not passed".
                Status::Skipped | Status::Unknown => {}
            }
        }
        tally
    }

    /// Indicates whether every [`Step`] passed.
    ///
    /// Vacuously `true` for a [`Scenario`] without [`Step`]s.
    fn all_passed(&self) -> bool {
        self.passed == self.total
    }
}

/// Produces the failure/skip markup of a [`Scenario`].
///
/// The outcome is decided in a fixed precedence order:
/// 1. Every step passed (or there are none): no markup.
/// 2. Some step is pending: a single skip, or a single failure in strict
///    mode. Pending wins even over failed steps, as the scenario is not
///    implemented to completion yet.
/// 3. Some steps failed: one failure per failed step.
/// 4. Some step is undefined: a single failure, in strict mode only.
/// 5. Anything else (skipped or unrecognized statuses): no markup, the
///    scenario counts as passed.
fn markers(scenario: &Scenario, feature_name: &str, config: &Config) -> Vec<Marker> {
    let tally = Tally::count(&scenario.steps);

    if tally.all_passed() {
        vec![]
    } else if tally.pending > 0 {
        vec![if config.strict {
            scenario_failure(scenario, feature_name, "Scenario pending")
        } else {
            scenario_skip(scenario, feature_name)
        }]
    } else if !tally.failed.is_empty() {
        tally
            .failed
            .iter()
            .map(|&i| step_failure(&scenario.steps[i], scenario, feature_name))
            .collect()
    } else if config.strict && tally.undefined > 0 {
        vec![scenario_failure(scenario, feature_name, "Scenario undefined")]
    } else {
        vec![]
    }
}

/// Builds the [`Marker::Failure`] of a single failed [`Step`].
///
/// The `message` attribute carries the first line of the step's error, and
/// the body restates the scenario, feature and step names before the full
/// error text.
fn step_failure(step: &Step, scenario: &Scenario, feature_name: &str) -> Marker {
    let error = step.result.error_message.as_deref().unwrap_or_default();
    Marker::Failure {
        message: error.lines().next().unwrap_or_default().to_owned(),
        body: format!(
            "Scenario: {}\nFeature: {}\nStep: {}\n\n{error}",
            scenario.name, feature_name, step.name,
        ),
    }
}

/// Builds a [`Scenario`]-level [`Marker::Failure`] with the given `message`,
/// for strict mode escalations of pending and undefined [`Step`]s.
fn scenario_failure(
    scenario: &Scenario,
    feature_name: &str,
    message: &str,
) -> Marker {
    Marker::Failure {
        message: message.to_owned(),
        body: format!(
            "Scenario: {}\nFeature: {}\n\n{message}",
            scenario.name, feature_name,
        ),
    }
}

/// Builds the [`Marker::Skipped`] of a [`Scenario`] with pending [`Step`]s.
fn scenario_skip(scenario: &Scenario, feature_name: &str) -> Marker {
    Marker::Skipped {
        message: "Scenario skipped".to_owned(),
        body: format!(
            "Scenario: {}\nFeature: {}\n\nScenario skipped",
            scenario.name, feature_name,
        ),
    }
}

#[cfg(test)]
mod tests {
    use crate::report::StepResult;

    use super::*;

    fn step(name: &str, status: Status) -> Step {
        Step {
            name: name.to_owned(),
            result: StepResult { status, duration: None, error_message: None },
        }
    }

    fn timed_step(name: &str, status: Status, duration: u64) -> Step {
        Step {
            name: name.to_owned(),
            result: StepResult {
                status,
                duration: Some(duration),
                error_message: None,
            },
        }
    }

    fn failed_step(name: &str, error: &str) -> Step {
        Step {
            name: name.to_owned(),
            result: StepResult {
                status: Status::Failed,
                duration: None,
                error_message: Some(error.to_owned()),
            },
        }
    }

    fn scenario(name: &str, steps: Vec<Step>) -> Scenario {
        Scenario { name: name.to_owned(), steps, ..Scenario::default() }
    }

    #[test]
    fn passed_scenario_has_no_markers() {
        let sc = scenario(
            "all good",
            vec![step("one", Status::Passed), step("two", Status::Passed)],
        );

        let case = convert_scenario(&sc, "Feature", &Config::default());

        assert_eq!(case.name, "all good");
        assert!(case.markers.is_empty());
        assert!(!case.is_failed());
        assert!(!case.is_skipped());
    }

    #[test]
    fn stepless_scenario_counts_as_passed() {
        let case = convert_scenario(
            &scenario("empty", vec![]),
            "Feature",
            &Config::default(),
        );

        assert!(case.markers.is_empty());
        assert!((case.time - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn untimed_scenario_time_is_positive_zero() {
        let sc = scenario("untimed", vec![step("no match", Status::Undefined)]);

        let case = convert_scenario(&sc, "Feature", &Config::default());

        assert!(case.time.is_sign_positive());
        assert_eq!(case.time.to_string(), "0");
    }

    #[test]
    fn sums_step_durations_into_seconds() {
        let sc = scenario(
            "timed",
            vec![
                timed_step("one", Status::Passed, 1_000_000),
                timed_step("two", Status::Passed, 2_000_000),
                step("three", Status::Passed),
            ],
        );

        let case = convert_scenario(&sc, "Feature", &Config::default());

        assert!((case.time - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn failed_steps_produce_one_failure_each() {
        let sc = scenario(
            "multi-fail",
            vec![
                step("fine", Status::Passed),
                failed_step("first boom", "expected 1\ngot 2"),
                failed_step("second boom", "connection refused"),
            ],
        );

        let case = convert_scenario(&sc, "Some feature", &Config::default());

        assert!(case.is_failed());
        assert_eq!(
            case.markers,
            vec![
                Marker::Failure {
                    message: "expected 1".into(),
                    body: "Scenario: multi-fail\nFeature: Some feature\n\
                           Step: first boom\n\nexpected 1\ngot 2"
                        .into(),
                },
                Marker::Failure {
                    message: "connection refused".into(),
                    body: "Scenario: multi-fail\nFeature: Some feature\n\
                           Step: second boom\n\nconnection refused"
                        .into(),
                },
            ],
        );
    }

    #[test]
    fn failure_without_error_message_is_empty() {
        let sc = scenario("silent", vec![step("boom", Status::Failed)]);

        let case = convert_scenario(&sc, "Feature", &Config::default());

        assert_eq!(
            case.markers,
            vec![Marker::Failure {
                message: String::new(),
                body: "Scenario: silent\nFeature: Feature\nStep: boom\n\n"
                    .into(),
            }],
        );
    }

    #[test]
    fn pending_scenario_is_skipped() {
        let sc = scenario(
            "not yet",
            vec![step("done", Status::Passed), step("todo", Status::Pending)],
        );

        let case = convert_scenario(&sc, "Big feature", &Config::default());

        assert!(case.is_skipped());
        assert_eq!(
            case.markers,
            vec![Marker::Skipped {
                message: "Scenario skipped".into(),
                body: "Scenario: not yet\nFeature: Big feature\n\n\
                       Scenario skipped"
                    .into(),
            }],
        );
    }

    #[test]
    fn pending_wins_over_failed() {
        let sc = scenario(
            "half-baked",
            vec![failed_step("boom", "kaboom"), step("todo", Status::Pending)],
        );

        let case = convert_scenario(&sc, "Feature", &Config::default());

        assert!(case.is_skipped());
        assert_eq!(case.markers.len(), 1);
    }

    #[test]
    fn undefined_scenario_passes_when_not_strict() {
        let sc = scenario(
            "unmatched",
            vec![step("no def", Status::Undefined)],
        );

        let case = convert_scenario(&sc, "Feature", &Config::default());

        assert!(case.markers.is_empty());
    }

    #[test]
    fn strict_mode_fails_pending_and_undefined() {
        let config = Config { strict: true, ..Config::default() };

        let pending = convert_scenario(
            &scenario("not yet", vec![step("todo", Status::Pending)]),
            "Feature",
            &config,
        );
        assert_eq!(
            pending.markers,
            vec![Marker::Failure {
                message: "Scenario pending".into(),
                body: "Scenario: not yet\nFeature: Feature\n\n\
                       Scenario pending"
                    .into(),
            }],
        );

        let undefined = convert_scenario(
            &scenario("unmatched", vec![step("no def", Status::Undefined)]),
            "Feature",
            &config,
        );
        assert_eq!(
            undefined.markers,
            vec![Marker::Failure {
                message: "Scenario undefined".into(),
                body: "Scenario: unmatched\nFeature: Feature\n\n\
                       Scenario undefined"
                    .into(),
            }],
        );
    }

    #[test]
    fn strict_mode_keeps_passed_scenarios_passed() {
        let config = Config { strict: true, ..Config::default() };
        let sc = scenario("all good", vec![step("one", Status::Passed)]);

        let case = convert_scenario(&sc, "Feature", &config);

        assert!(case.markers.is_empty());
    }

    #[test]
    fn skipped_and_unknown_statuses_produce_no_markers() {
        let sc = scenario(
            "odd",
            vec![
                step("one", Status::Passed),
                step("two", Status::Skipped),
                step("three", Status::Unknown),
            ],
        );

        let case = convert_scenario(&sc, "Feature", &Config::default());

        assert!(case.markers.is_empty());
    }

    #[test]
    fn converts_feature_without_backgrounds() {
        let feature = Feature {
            id: "cooking;bake".into(),
            name: "Cooking".into(),
            elements: vec![
                Scenario {
                    name: "Preheat".into(),
                    kind: ScenarioKind::Background,
                    steps: vec![timed_step(
                        "heat the oven",
                        Status::Passed,
                        500_000,
                    )],
                    ..Scenario::default()
                },
                scenario(
                    "Bake a cake",
                    vec![timed_step("mix and bake", Status::Passed, 1_500_000)],
                ),
                scenario("Burn a cake", vec![failed_step("bake", "charcoal")]),
            ],
        };

        let suite = convert_feature(&feature, &Config::default());

        assert_eq!(suite.name, "Cooking");
        assert_eq!(suite.tests, 2);
        assert_eq!(suite.failures, 1);
        assert_eq!(suite.skipped, 0);
        assert!((suite.time - 1.5).abs() < f64::EPSILON);
        assert_eq!(suite.cases[0].name, "Bake a cake");
        assert_eq!(suite.cases[1].name, "Burn a cake");
    }

    #[test]
    fn empty_feature_converts_to_empty_suite() {
        let suite = convert_feature(&Feature::default(), &Config::default());

        assert_eq!(suite.tests, 0);
        assert_eq!(suite.failures, 0);
        assert_eq!(suite.skipped, 0);
        assert!(suite.cases.is_empty());
    }

    #[test]
    fn prefixes_suite_and_case_names_verbatim() {
        let config = Config {
            prefix: Some("nightly ".into()),
            ..Config::default()
        };
        let feature = Feature {
            name: "Login".into(),
            elements: vec![scenario(
                "Valid login",
                vec![step("todo", Status::Pending)],
            )],
            ..Feature::default()
        };

        let suite = convert_feature(&feature, &config);

        assert_eq!(suite.name, "nightly Login");
        assert_eq!(suite.cases[0].name, "nightly Valid login");
        // Markup keeps the original names.
        assert_eq!(
            suite.cases[0].markers,
            vec![Marker::Skipped {
                message: "Scenario skipped".into(),
                body: "Scenario: Valid login\nFeature: Login\n\n\
                       Scenario skipped"
                    .into(),
            }],
        );
    }

    #[test]
    fn parses_blank_report_as_empty() {
        assert!(parse_report("").unwrap().is_empty());
        assert!(parse_report("  \n\t ").unwrap().is_empty());
        assert!(parse_report("[]").unwrap().is_empty());
    }

    #[test]
    fn rejects_malformed_report() {
        let res = parse_report("{not json");

        assert!(matches!(res, Err(crate::Error::Parse(_))));
    }

    #[test]
    fn converts_multiple_features_in_order() {
        let report = vec![
            Feature { name: "First".into(), ..Feature::default() },
            Feature { name: "Second".into(), ..Feature::default() },
        ];

        let suites = convert_report(&report, &Config::default());

        assert_eq!(suites.suites.len(), 2);
        assert_eq!(suites.suites[0].name, "First");
        assert_eq!(suites.suites[1].name, "Second");
    }
}
