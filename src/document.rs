//! Input page parsing
//!
//! Splits a page into its markup shell and the inline script and style
//! bodies. The shell keeps placeholders where the bodies were, so processed
//! text can be substituted back in later stages.

use thiserror::Error;

/// Placeholder left in the shell where the script body was extracted.
pub const SCRIPT_PLACEHOLDER: &str = "__SCRIPT__";
/// Placeholder left in the shell where the style body was extracted.
pub const STYLE_PLACEHOLDER: &str = "__STYLE__";

const SCRIPT_OPEN: &str = "<script>";
const SCRIPT_CLOSE: &str = "</script>";
const STYLE_OPEN: &str = "<style>";
const STYLE_CLOSE: &str = "</style>";

/// Errors for malformed input pages.
#[derive(Debug, Clone, Copy, Error)]
pub enum DocumentError {
    #[error("no <script>...</script> block found in the input page")]
    MissingScript,

    #[error("no <style>...</style> block found in the input page")]
    MissingStyle,
}

/// A parsed page: markup shell with placeholders plus the extracted bodies.
///
/// The input must contain exactly one contiguous script block and one
/// contiguous style block.
#[derive(Debug, Clone)]
pub struct Document {
    shell: String,
    script: String,
    style: String,
}

impl Document {
    /// Parse a page, extracting the script and style bodies and leaving
    /// placeholders in the shell.
    pub fn parse(text: &str) -> Result<Self, DocumentError> {
        let (shell, script) = extract_block(
            text,
            SCRIPT_OPEN,
            SCRIPT_CLOSE,
            SCRIPT_PLACEHOLDER,
            DocumentError::MissingScript,
        )?;
        let (shell, style) = extract_block(
            &shell,
            STYLE_OPEN,
            STYLE_CLOSE,
            STYLE_PLACEHOLDER,
            DocumentError::MissingStyle,
        )?;
        Ok(Self {
            shell,
            script,
            style,
        })
    }

    /// The markup shell, with placeholders in place of the bodies.
    pub fn shell(&self) -> &str {
        &self.shell
    }

    /// The extracted script body.
    pub fn script(&self) -> &str {
        &self.script
    }

    /// The extracted style body.
    pub fn style(&self) -> &str {
        &self.style
    }

    /// Replace the script body, e.g. after a linter rewrote it.
    pub fn set_script(&mut self, script: String) {
        self.script = script;
    }

    /// Render the page with the current bodies back in place.
    ///
    /// With unmodified bodies this reproduces the original page text.
    pub fn render(&self) -> String {
        fill(&self.shell, &self.script, &self.style)
    }
}

/// Substitute script and style bodies into a placeholder-bearing shell.
///
/// Each placeholder is replaced exactly once.
pub fn fill(shell: &str, script: &str, style: &str) -> String {
    shell
        .replacen(SCRIPT_PLACEHOLDER, script, 1)
        .replacen(STYLE_PLACEHOLDER, style, 1)
}

fn extract_block(
    text: &str,
    open: &str,
    close: &str,
    placeholder: &str,
    missing: DocumentError,
) -> Result<(String, String), DocumentError> {
    let start = text.find(open).ok_or(missing)?;
    let body_start = start + open.len();
    let body_len = text[body_start..].find(close).ok_or(missing)?;
    let body = text[body_start..body_start + body_len].to_string();

    let mut shell = String::with_capacity(text.len() - body.len() + placeholder.len());
    shell.push_str(&text[..body_start]);
    shell.push_str(placeholder);
    shell.push_str(&text[body_start + body_len..]);
    Ok((shell, body))
}
