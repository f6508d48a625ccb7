// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// A content view that prints what the shell would do to a real web view.

use std::io::Write;
use std::sync::Mutex;

use webwrap_bridge::traits::ContentView;
use webwrap_core::error::{Result, ShellError};

pub struct ConsoleView<W> {
    out: Mutex<W>,
}

impl<W: Write + Send> ConsoleView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    fn emit(&self, line: &str) -> Result<()> {
        let mut out = self
            .out
            .lock()
            .map_err(|_| ShellError::View("console output poisoned".into()))?;
        writeln!(out, "{line}")?;
        out.flush()?;
        Ok(())
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|p| p.into_inner())
    }
}

impl<W: Write + Send> ContentView for ConsoleView<W> {
    fn reload(&self) -> Result<()> {
        self.emit("view: reload")
    }

    fn inject_script(&self, script: &str) -> Result<()> {
        let first = script.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
        self.emit(&format!("view: inject {} bytes: {}", script.len(), first.trim()))
    }

    fn post_message(&self, message: &str) -> Result<()> {
        self.emit(&format!("view: post {message}"))
    }

    fn go_back(&self) -> Result<()> {
        self.emit("view: back")
    }

    fn set_offline_placeholder(&self, visible: bool) -> Result<()> {
        self.emit(if visible {
            "view: offline placeholder shown"
        } else {
            "view: offline placeholder hidden"
        })
    }
}
