//! The build pipeline
//!
//! Strictly sequential: extract, lint, minify script, minify style,
//! reassemble, substitute, archive, report. Each stage consumes the previous
//! stage's output and any failure aborts the build. Intermediate files are
//! overwritten in place on each run.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::archive;
use crate::config::{Config, ToolConfig};
use crate::document::{self, Document};
use crate::markup;
use crate::report::{fmt_bytes, BuildReport, GateOutcome};
use crate::tools::{CommandTransform, OutputMode, TextTransform};

/// Orchestrates one build from input page to size-checked archive.
pub struct Pipeline {
    config: Config,
    quiet: bool,
}

impl Pipeline {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            quiet: false,
        }
    }

    /// Suppress the stage narration (used for `--json` output).
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    fn say(&self, msg: &str) {
        if !self.quiet {
            println!("{msg}");
        }
    }

    /// Run the full pipeline and return the byte accounting.
    ///
    /// The substitution table is validated before the input page is read, so
    /// a configuration error aborts the run without touching any file. A
    /// build whose archive exceeds the budget still returns `Ok`; the
    /// outcome is in the report and the caller decides how to exit.
    pub fn run(&self) -> Result<BuildReport> {
        let table = self
            .config
            .substitution_table()
            .context("Invalid substitution table")?;

        let input_path = self.config.input_path();
        let source = fs::read_to_string(&input_path)
            .with_context(|| format!("Failed to read input page: {}", input_path.display()))?;
        let source_bytes = source.len() as u64;
        let mut doc = Document::parse(&source)
            .with_context(|| format!("Malformed input page: {}", input_path.display()))?;

        let build_dir = self.config.build_dir();
        fs::create_dir_all(&build_dir)
            .with_context(|| format!("Failed to create build directory: {}", build_dir.display()))?;

        let stem = self.config.input_stem().to_string();
        let script_path = build_dir.join(format!("{stem}.js"));
        let script_min_path = build_dir.join(format!("{stem}.min.js"));
        let style_path = build_dir.join(format!("{stem}.css"));
        let style_min_path = build_dir.join(format!("{stem}.min.css"));
        let markup_min_path = build_dir.join(format!("{stem}.min.html"));

        // Lint, and persist any fixes back into the source page.
        self.say("Linting script...");
        let lint = CommandTransform::new(
            "linter",
            &self.config.tools.lint,
            &script_path,
            &script_path,
        );
        let linted = lint.apply(doc.script()).context("Lint stage failed")?;
        if linted != doc.script() {
            self.say(&format!(
                "  Updating {} with linted script.",
                input_path.display()
            ));
            doc.set_script(linted);
            fs::write(&input_path, doc.render())
                .with_context(|| format!("Failed to update {}", input_path.display()))?;
        }
        let script_bytes = doc.script().len() as u64;
        self.say("");

        // Minify the script.
        self.say("Minifying script...");
        let script_min = self.run_tool(
            "script minifier",
            &self.config.tools.script,
            &script_path,
            &script_min_path,
            doc.script(),
        )?;
        let script_min_bytes = script_min.len() as u64;
        self.say(&format!(
            "  {stem}.js ({}) -> {stem}.min.js ({})\n",
            fmt_bytes(script_bytes),
            fmt_bytes(script_min_bytes)
        ));

        // Minify the style.
        self.say("Minifying style...");
        let style_bytes = doc.style().len() as u64;
        let style_min = self.run_tool(
            "style minifier",
            &self.config.tools.style,
            &style_path,
            &style_min_path,
            doc.style(),
        )?;
        let style_min_bytes = style_min.len() as u64;
        self.say(&format!(
            "  {stem}.css ({}) -> {stem}.min.css ({})\n",
            fmt_bytes(style_bytes),
            fmt_bytes(style_min_bytes)
        ));

        // Collapse the shell and put the minified bodies back.
        self.say("Building compressed markup...");
        let collapsed = markup::collapse(doc.shell());
        let compressed = document::fill(&collapsed, &script_min, &style_min);
        debug!(
            shell = doc.shell().len(),
            collapsed = collapsed.len(),
            "collapsed markup shell"
        );
        fs::write(&markup_min_path, &compressed)
            .with_context(|| format!("Failed to write {}", markup_min_path.display()))?;
        let markup_bytes = compressed.len() as u64;
        self.say(&format!(
            "  {} ({}) -> {} ({})\n",
            self.config.input_file_name(),
            fmt_bytes(source_bytes),
            markup_min_path.display(),
            fmt_bytes(markup_bytes)
        ));

        // Shrink further with the substitution table.
        self.say("Applying substitutions...");
        let substituted = table.apply(&compressed);
        let dist_dir = self.config.dist_dir();
        fs::create_dir_all(&dist_dir)
            .with_context(|| format!("Failed to create dist directory: {}", dist_dir.display()))?;
        let dist_page = self.config.dist_page_path();
        fs::write(&dist_page, &substituted)
            .with_context(|| format!("Failed to write {}", dist_page.display()))?;
        let final_bytes = substituted.len() as u64;
        self.say(&format!(
            "  {} ({}) -> {} ({})\n",
            markup_min_path.display(),
            fmt_bytes(markup_bytes),
            dist_page.display(),
            fmt_bytes(final_bytes)
        ));

        // Archive and check the budget.
        self.say("Building archive...");
        let archive_path = self.config.archive_path();
        let archive_bytes = archive::write_archive(
            &archive_path,
            self.config.input_file_name(),
            substituted.as_bytes(),
        )?;
        let target_bytes = self.config.budget.target_bytes;

        let report = BuildReport {
            source_bytes,
            script_bytes,
            script_min_bytes,
            style_bytes,
            style_min_bytes,
            markup_bytes,
            final_bytes,
            archive_bytes,
            target_bytes,
            outcome: GateOutcome::measure(archive_bytes, target_bytes),
        };
        self.say(&format!(
            "  {} ({} => {}%)\n",
            archive_path.display(),
            fmt_bytes(archive_bytes),
            report.reduction_percent()
        ));

        match report.outcome {
            GateOutcome::Within { margin } => {
                self.say(&format!("Build succeeded! {} to spare!", fmt_bytes(margin)));
            }
            GateOutcome::Exceeded { overage } => {
                self.say(&format!(
                    "Build failed! Archive is {} over budget.",
                    fmt_bytes(overage)
                ));
            }
        }

        Ok(report)
    }

    /// Run one external tool stage and make sure its artifact is on disk.
    fn run_tool(
        &self,
        name: &str,
        tool: &ToolConfig,
        input_path: &Path,
        output_path: &Path,
        text: &str,
    ) -> Result<String> {
        let transform = CommandTransform::new(name, tool, input_path, output_path);
        let result = transform
            .apply(text)
            .with_context(|| format!("{name} stage failed"))?;
        // A stdout tool leaves nothing behind; persist the artifact ourselves.
        if tool.output == OutputMode::Stdout {
            fs::write(output_path, &result)
                .with_context(|| format!("Failed to write {}", output_path.display()))?;
        }
        Ok(result)
    }
}
