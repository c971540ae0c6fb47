// SPDX-License-Identifier: Apache-2.0

use std::io::{self, Write};

use console::style;

use super::Renderable;
use crate::cli::OutputContext;
use crate::commands::types::LanguagesResult;

impl Renderable for LanguagesResult {
    fn render_text(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        writeln!(
            w,
            "{}",
            style(format!("Top languages of {}:", self.username)).bold()
        )?;
        if self.languages.is_empty() {
            writeln!(w, "  {}", style("No languages found").dim())?;
        }
        for (i, language) in self.languages.iter().enumerate() {
            writeln!(w, "  {} {}", style(format!("{}.", i + 1)).dim(), style(language).cyan())?;
        }
        Ok(())
    }

    fn render_markdown(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        writeln!(w, "## Top languages of {}\n", self.username)?;
        if self.languages.is_empty() {
            writeln!(w, "No languages found.")?;
        }
        for language in &self.languages {
            writeln!(w, "- {language}")?;
        }
        Ok(())
    }
}
