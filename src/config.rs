// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Tools for configuring a conversion.

use smart_default::SmartDefault;

/// Options for converting a Cucumber JSON report into a JUnit XML report.
#[derive(Clone, Debug, SmartDefault)]
pub struct Config {
    /// Prefix prepended to every test-suite and test-case name.
    ///
    /// Prepended verbatim: no separator is inserted, so include trailing
    /// whitespace in the prefix itself if one is wanted.
    pub prefix: Option<String>,

    /// Whether to report `pending` and `undefined` steps as failures.
    ///
    /// Without it, scenarios with `pending` steps are reported as skipped,
    /// and scenarios consisting of `undefined` steps only as passed.
    pub strict: bool,

    /// Indentation of the produced XML document.
    pub indent: Indent,

    /// XML declaration to lead the produced document with, if any.
    #[default(Some(Declaration::default()))]
    pub declaration: Option<Declaration>,
}

/// Indentation of a produced XML document.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Indent {
    /// Single-line output without any whitespace between elements.
    None,

    /// Every nesting level indented with the given number of spaces.
    Spaces(usize),

    /// Every nesting level indented with the given number of tabs.
    Tabs(usize),
}

impl Default for Indent {
    fn default() -> Self {
        Self::Spaces(4)
    }
}

/// XML declaration leading a produced document.
#[derive(Clone, Debug, Eq, PartialEq, SmartDefault)]
pub struct Declaration {
    /// XML standard version.
    #[default(String::from("1.0"))]
    pub version: String,

    /// Document encoding, as spelled in the `encoding` pseudo-attribute.
    ///
    /// The declaration only names the encoding, it doesn't transcode: the
    /// produced document is always UTF-8.
    #[default(Some(String::from("UTF-8")))]
    pub encoding: Option<String>,

    /// Value of the `standalone` pseudo-attribute, if any.
    pub standalone: Option<String>,
}
