// SPDX-License-Identifier: Apache-2.0

use std::io::{self, Write};

use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};

use super::Renderable;
use crate::cli::OutputContext;
use crate::commands::types::ProvidersResult;

impl Renderable for ProvidersResult {
    fn render_text(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["Provider", "Name", "API key", "Models"]);

        for p in &self.providers {
            let name = if p.active {
                format!("{} *", p.name)
            } else {
                p.name.clone()
            };
            table.add_row(vec![
                name,
                p.display_name.clone(),
                p.api_key_env.clone(),
                p.models.join("\n"),
            ]);
        }

        writeln!(w, "{table}")?;
        writeln!(w, "* configured provider")?;
        Ok(())
    }

    fn render_markdown(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        writeln!(w, "| Provider | Name | API key | Models |")?;
        writeln!(w, "|---|---|---|---|")?;
        for p in &self.providers {
            writeln!(
                w,
                "| {} | {} | {} | {} |",
                p.name,
                p.display_name,
                p.api_key_env,
                p.models.join(", ")
            )?;
        }
        Ok(())
    }
}
