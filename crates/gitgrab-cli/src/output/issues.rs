// SPDX-License-Identifier: Apache-2.0

use std::io::{self, Write};

use console::style;

use super::Renderable;
use crate::cli::OutputContext;
use crate::commands::types::IssuesResult;

impl Renderable for IssuesResult {
    fn render_text(&self, w: &mut dyn Write, ctx: &OutputContext) -> io::Result<()> {
        if ctx.verbose {
            writeln!(w, "{}", style(format!("Query: {}", self.query)).dim())?;
        }
        writeln!(w, "{}", self.digest)?;
        Ok(())
    }

    fn render_markdown(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        writeln!(w, "## Good first issues\n")?;
        if self.issues.is_empty() {
            writeln!(w, "{}", self.digest)?;
            return Ok(());
        }
        for issue in &self.issues {
            writeln!(w, "- [{}]({}) ({})", issue.title, issue.html_url, issue.labels_display())?;
        }
        Ok(())
    }
}
