// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Converter of [Cucumber JSON reports][1] into [JUnit XML reports][2]
//! consumable by CI servers and dashboards.
//!
//! Every [`Feature`] of a report becomes a `<testsuite>`, every one of its
//! non-background [`Scenario`]s a `<testcase>`, and step outcomes decide the
//! `<failure>`/`<skipped>` markup. The conversion is a single pass over the
//! parsed report and never mutates it.
//!
//! # Example
//!
//! ```rust
//! use cucumber_junit::{convert, Config};
//!
//! let report = r#"[{"id": "login", "name": "Login", "elements": []}]"#;
//!
//! let xml = convert(report, &Config::default()).unwrap();
//!
//! assert!(xml.contains(
//!     r#"<testsuite name="Login" time="0" tests="0" failures="0" skipped="0"/>"#,
//! ));
//! ```
//!
//! [1]: https://github.com/cucumber/cucumber-json-schema
//! [2]: https://llg.cubic.org/docs/junit

pub mod config;
pub mod convert;
pub mod error;
pub mod junit;
pub mod report;

pub use self::{
    config::{Config, Declaration, Indent},
    convert::{
        convert, convert_feature, convert_into, convert_report,
        convert_scenario, parse_report,
    },
    error::{Error, Result},
    junit::{Marker, TestCase, TestSuite, TestSuites},
    report::{Feature, Report, Scenario, ScenarioKind, Status, Step, StepResult},
};
