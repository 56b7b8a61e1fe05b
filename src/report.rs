// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [Cucumber JSON format][1] data model.
//!
//! Only the part of the format that the conversion looks at is modelled
//! here; any other fields of a report are ignored.
//!
//! [1]: https://github.com/cucumber/cucumber-json-schema

use serde::Deserialize;

/// Deserialized Cucumber JSON report: an ordered list of [`Feature`]s.
pub type Report = Vec<Feature>;

/// [`Feature`] of a [`Report`], emitted as a single `<testsuite>`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Feature {
    /// [`Feature`] identifier. Doesn't have to be unique.
    #[serde(default)]
    pub id: String,

    /// [`Feature`] name.
    #[serde(default)]
    pub name: String,

    /// [`Scenario`]s of this [`Feature`], backgrounds included.
    #[serde(default)]
    pub elements: Vec<Scenario>,
}

impl Feature {
    /// Returns the key of this [`Feature`]: the part of its identifier
    /// before the first `;`.
    ///
    /// Cucumber composes element identifiers as `feature-id;scenario-id`,
    /// so the key stays stable across all elements of one [`Feature`].
    #[must_use]
    pub fn key(&self) -> &str {
        self.id.split_once(';').map_or(self.id.as_str(), |(key, _)| key)
    }
}

/// Element of a [`Feature`], emitted as a single `<testcase>` unless it's a
/// [`ScenarioKind::Background`].
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Scenario {
    /// [`Scenario`] identifier. Doesn't have to be unique.
    #[serde(default)]
    pub id: String,

    /// [`Scenario`] name.
    #[serde(default)]
    pub name: String,

    /// Kind of this element.
    #[serde(default, rename = "type")]
    pub kind: ScenarioKind,

    /// [`Step`]s of this [`Scenario`].
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// Kind of a [`Scenario`] element.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioKind {
    /// Regular scenario, reported as a test case.
    #[default]
    Scenario,

    /// Shared setup block, not a test of its own.
    Background,

    /// Any other element kind, reported like a regular scenario.
    #[serde(other)]
    Other,
}

/// Single [`Step`] of a [`Scenario`].
#[derive(Clone, Debug, Deserialize)]
pub struct Step {
    /// [`Step`] name.
    #[serde(default)]
    pub name: String,

    /// Result of this [`Step`]'s execution.
    ///
    /// Not optional: a report with a resultless step is malformed and fails
    /// the whole parse.
    pub result: StepResult,
}

/// Result of a [`Step`]'s execution.
#[derive(Clone, Debug, Deserialize)]
pub struct StepResult {
    /// [`Status`] the [`Step`] has finished with.
    pub status: Status,

    /// Time the [`Step`] has taken, in microseconds.
    ///
    /// Absent for [`Step`]s that were never run.
    #[serde(default)]
    pub duration: Option<u64>,

    /// Error message of a [`Status::Failed`] [`Step`].
    #[serde(default)]
    pub error_message: Option<String>,
}

/// Status of a finished [`Step`].
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// [`Step`] matched a definition and ran successfully.
    Passed,

    /// [`Step`] matched a definition and errored.
    Failed,

    /// [`Step`] matched a definition marked as unimplemented yet.
    Pending,

    /// [`Step`] didn't match any definition.
    Undefined,

    /// [`Step`] wasn't run, because some previous [`Step`] didn't pass.
    Skipped,

    /// Any [`Status`] this crate isn't aware of (`ambiguous`, for example).
    #[serde(other)]
    Unknown,
}
