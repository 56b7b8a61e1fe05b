// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Error types of this crate.

use std::{io, string::FromUtf8Error};

use derive_more::{Display, From};

/// Top-level error of a conversion.
// `derive_more::Error` stays a qualified path: importing it would pull in
// the trait re-export as well, clashing with this very enum.
#[derive(Debug, Display, derive_more::Error, From)]
pub enum Error {
    /// Report is not a valid Cucumber JSON document.
    #[display("Failed to parse Cucumber JSON report: {_0}")]
    Parse(serde_json::Error),

    /// XML writer failed to emit an event.
    #[display("Failed to write JUnit XML: {_0}")]
    Xml(quick_xml::Error),

    /// Produced XML is not valid UTF-8.
    ///
    /// Cannot happen with the writers of this crate, but is surfaced instead
    /// of panicking when buffering a report into a [`String`].
    #[display("Produced JUnit XML is not valid UTF-8: {_0}")]
    Utf8(FromUtf8Error),

    /// I/O error while reading a report or writing the produced XML.
    #[display("I/O operation failed: {_0}")]
    Io(io::Error),
}

/// Result of a fallible operation of this crate.
pub type Result<T> = std::result::Result<T, Error>;
