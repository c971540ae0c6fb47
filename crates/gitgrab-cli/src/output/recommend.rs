// SPDX-License-Identifier: Apache-2.0

use std::io::{self, Write};

use console::style;

use super::Renderable;
use crate::cli::OutputContext;
use crate::commands::types::RecommendResult;

impl Renderable for RecommendResult {
    fn render_text(&self, w: &mut dyn Write, ctx: &OutputContext) -> io::Result<()> {
        let rec = &self.recommendation;
        writeln!(w, "{}", rec.report.trim_end())?;

        if ctx.verbose
            && let Some(stats) = &rec.stats
        {
            writeln!(w)?;
            writeln!(
                w,
                "{}",
                style(format!(
                    "{} | {} input / {} output tokens | {} ms",
                    stats.model, stats.input_tokens, stats.output_tokens, stats.duration_ms
                ))
                .dim()
            )?;
        }
        Ok(())
    }

    fn render_markdown(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        let rec = &self.recommendation;
        writeln!(w, "# Good first issues for @{}\n", rec.username)?;
        writeln!(w, "{}", rec.report.trim_end())?;
        Ok(())
    }
}
