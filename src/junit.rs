// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [JUnit XML report][1] data model and serialization.
//!
//! A report is a `<testsuites>` root with one `<testsuite>` per feature,
//! one `<testcase>` per scenario, and `<failure>`/`<skipped>` markup on
//! test cases that didn't pass.
//!
//! [1]: https://llg.cubic.org/docs/junit

use std::io;

use quick_xml::{
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
    Writer,
};

use crate::{
    config::{Config, Indent},
    error::Result,
};

/// Root of a JUnit XML report: an ordered collection of [`TestSuite`]s.
#[derive(Clone, Debug, Default)]
pub struct TestSuites {
    /// [`TestSuite`]s of this report.
    pub suites: Vec<TestSuite>,
}

impl TestSuites {
    /// Creates an empty collection of [`TestSuite`]s.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a [`TestSuite`] to this report.
    pub fn add_suite(&mut self, suite: TestSuite) -> &mut Self {
        self.suites.push(suite);
        self
    }

    /// Serializes this report as XML into the given `out` writer.
    ///
    /// A report without any [`TestSuite`]s is serialized with a single empty
    /// `<testsuite/>` placeholder, so that consumers expecting at least one
    /// suite element keep working.
    ///
    /// # Errors
    ///
    /// If writing to `out` fails.
    pub fn write_xml(&self, out: impl io::Write, config: &Config) -> Result<()> {
        let mut writer = match config.indent {
            Indent::None => Writer::new(out),
            Indent::Spaces(n) => Writer::new_with_indent(out, b' ', n),
            Indent::Tabs(n) => Writer::new_with_indent(out, b'\t', n),
        };

        if let Some(decl) = &config.declaration {
            writer.write_event(Event::Decl(BytesDecl::new(
                &decl.version,
                decl.encoding.as_deref(),
                decl.standalone.as_deref(),
            )))?;
        }

        writer.write_event(Event::Start(BytesStart::new("testsuites")))?;
        if self.suites.is_empty() {
            writer.write_event(Event::Empty(BytesStart::new("testsuite")))?;
        } else {
            for suite in &self.suites {
                write_suite(suite, &mut writer)?;
            }
        }
        writer.write_event(Event::End(BytesEnd::new("testsuites")))?;

        // Trailing newline, unless the whole document is a single line.
        if config.indent != Indent::None {
            writer.write_indent()?;
        }
        Ok(())
    }

    /// Serializes this report as XML into a [`String`].
    ///
    /// # Errors
    ///
    /// If XML serialization fails. Running out of memory aside, this cannot
    /// really happen when writing into a [`String`].
    pub fn to_xml(&self, config: &Config) -> Result<String> {
        let mut buf = Vec::new();
        self.write_xml(&mut buf, config)?;
        Ok(String::from_utf8(buf)?)
    }
}

/// Single `<testsuite>` of a JUnit XML report, with its aggregated counters.
#[derive(Clone, Debug, Default)]
pub struct TestSuite {
    /// Name of this [`TestSuite`].
    pub name: String,

    /// Total time taken by this [`TestSuite`], in seconds.
    pub time: f64,

    /// Number of [`TestCase`]s in this [`TestSuite`].
    pub tests: usize,

    /// Number of failed [`TestCase`]s in this [`TestSuite`].
    pub failures: usize,

    /// Number of skipped [`TestCase`]s in this [`TestSuite`].
    pub skipped: usize,

    /// [`TestCase`]s of this [`TestSuite`], in their original order.
    pub cases: Vec<TestCase>,
}

impl TestSuite {
    /// Creates a new empty [`TestSuite`] with the given `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    /// Adds a [`TestCase`] to this [`TestSuite`], aggregating its time and
    /// outcome into the suite-level counters.
    pub fn add_case(&mut self, case: TestCase) -> &mut Self {
        self.tests += 1;
        if case.is_failed() {
            self.failures += 1;
        }
        if case.is_skipped() {
            self.skipped += 1;
        }
        self.time += case.time;
        self.cases.push(case);
        self
    }
}

/// Single `<testcase>` of a [`TestSuite`].
#[derive(Clone, Debug, Default)]
pub struct TestCase {
    /// Name of this [`TestCase`].
    pub name: String,

    /// Time taken by this [`TestCase`], in seconds.
    pub time: f64,

    /// Failure/skip markup of this [`TestCase`].
    ///
    /// A list, not an optional value: a scenario with several failed steps
    /// legitimately carries one [`Marker::Failure`] per failed step.
    pub markers: Vec<Marker>,
}

impl TestCase {
    /// Creates a new [`TestCase`] with the given `name`, zero time and no
    /// [`Marker`]s.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    /// Indicates whether this [`TestCase`] is reported as failed.
    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self.markers.first(), Some(Marker::Failure { .. }))
    }

    /// Indicates whether this [`TestCase`] is reported as skipped.
    #[must_use]
    pub fn is_skipped(&self) -> bool {
        matches!(self.markers.first(), Some(Marker::Skipped { .. }))
    }
}

/// Failure or skip markup of a [`TestCase`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Marker {
    /// `<failure>` element of a failed [`TestCase`].
    Failure {
        /// Single-line description, emitted as the `message` attribute.
        message: String,

        /// Full details, emitted as the element's text.
        body: String,
    },

    /// `<skipped>` element of a skipped [`TestCase`].
    Skipped {
        /// Single-line description, emitted as the `message` attribute.
        message: String,

        /// Full details, emitted as the element's text.
        body: String,
    },
}

impl Marker {
    /// Returns the XML tag name of this [`Marker`].
    fn tag(&self) -> &'static str {
        match self {
            Self::Failure { .. } => "failure",
            Self::Skipped { .. } => "skipped",
        }
    }

    /// Returns the `message` attribute and text body of this [`Marker`].
    fn parts(&self) -> (&str, &str) {
        match self {
            Self::Failure { message, body } | Self::Skipped { message, body } => {
                (message, body)
            }
        }
    }
}

fn write_suite<W: io::Write>(
    suite: &TestSuite,
    writer: &mut Writer<W>,
) -> Result<()> {
    let mut tag = BytesStart::new("testsuite");
    tag.extend_attributes([
        ("name", suite.name.as_str()),
        ("time", seconds(suite.time).as_str()),
        ("tests", suite.tests.to_string().as_str()),
        ("failures", suite.failures.to_string().as_str()),
        ("skipped", suite.skipped.to_string().as_str()),
    ]);

    if suite.cases.is_empty() {
        writer.write_event(Event::Empty(tag))?;
    } else {
        writer.write_event(Event::Start(tag))?;
        for case in &suite.cases {
            write_case(case, writer)?;
        }
        writer.write_event(Event::End(BytesEnd::new("testsuite")))?;
    }
    Ok(())
}

fn write_case<W: io::Write>(
    case: &TestCase,
    writer: &mut Writer<W>,
) -> Result<()> {
    let mut tag = BytesStart::new("testcase");
    tag.extend_attributes([
        ("name", case.name.as_str()),
        ("time", seconds(case.time).as_str()),
    ]);

    if case.markers.is_empty() {
        writer.write_event(Event::Empty(tag))?;
    } else {
        writer.write_event(Event::Start(tag))?;
        for marker in &case.markers {
            write_marker(marker, writer)?;
        }
        writer.write_event(Event::End(BytesEnd::new("testcase")))?;
    }
    Ok(())
}

fn write_marker<W: io::Write>(
    marker: &Marker,
    writer: &mut Writer<W>,
) -> Result<()> {
    let (message, body) = marker.parts();

    let mut tag = BytesStart::new(marker.tag());
    tag.push_attribute(("message", message));

    if body.is_empty() {
        writer.write_event(Event::Empty(tag))?;
    } else {
        writer.write_event(Event::Start(tag))?;
        writer.write_event(Event::Text(BytesText::new(body)))?;
        writer.write_event(Event::End(BytesEnd::new(marker.tag())))?;
    }
    Ok(())
}

/// Formats a `time` attribute value.
///
/// [`f64`]'s [`Display`] yields the shortest representation that
/// round-trips, so whole-second values serialize as `3`, not `3.000`.
///
/// [`Display`]: std::fmt::Display
fn seconds(time: f64) -> String {
    time.to_string()
}
