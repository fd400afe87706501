use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// The marker tokens the scanner recognizes.
///
/// Markers are plain text embedded in comments, recognized independent of
/// the host language's comment syntax. The defaults match the canonical
/// exemplify tokens, but tools can override them, e.g. from a TOML
/// configuration section:
///
/// ```toml
/// [markers]
/// start_token = "@@snippet-start@@"
/// end_token = "@@snippet-end@@"
/// callout_token = "@@callout@@"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerSyntax {
    /// Token opening an extracted region, followed by an attribute block.
    pub start_token: String,

    /// Token closing the innermost open region. Takes no attributes.
    pub end_token: String,

    /// Token attaching an annotation to a single line, followed by an
    /// attribute block. May trail executable code on the same line.
    pub callout_token: String,
}

impl Default for MarkerSyntax {
    fn default() -> Self {
        Self {
            start_token: "##exemplify-start##".to_string(),
            end_token: "##exemplify-end##".to_string(),
            callout_token: "##callout##".to_string(),
        }
    }
}

impl MarkerSyntax {
    /// Parse a `MarkerSyntax` from a TOML document and validate it.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let syntax: MarkerSyntax =
            toml::from_str(s).context("Failed to parse marker syntax configuration")?;
        syntax.validate()?;
        Ok(syntax)
    }

    /// Validate the configuration for correctness.
    pub fn validate(&self) -> Result<()> {
        for (name, token) in [
            ("start_token", &self.start_token),
            ("end_token", &self.end_token),
            ("callout_token", &self.callout_token),
        ] {
            if token.is_empty() {
                anyhow::bail!("Marker token `{}` cannot be empty", name);
            }
            if token.contains('\n') || token.contains('\r') {
                anyhow::bail!("Marker token `{}` cannot span lines: {:?}", name, token);
            }
        }

        // Tokens must be distinguishable: a token that is a prefix of
        // another would make every longer marker also match the shorter.
        let tokens = [&self.start_token, &self.end_token, &self.callout_token];
        for (i, a) in tokens.iter().enumerate() {
            for (j, b) in tokens.iter().enumerate() {
                if i != j && a.contains(b.as_str()) {
                    anyhow::bail!(
                        "Marker tokens must not contain each other: {:?} contains {:?}",
                        a,
                        b
                    );
                }
            }
        }

        Ok(())
    }
}
