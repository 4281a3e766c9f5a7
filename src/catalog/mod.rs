//! Resident space object records as served by the catalog API.
//!
//! A record is keyed by its SatCat number, which the server may emit either
//! as a JSON string or as a bare integer. Both decode to the same
//! [`SatcatNumber`] so lookups never depend on the wire representation.

pub mod coords;
pub mod filter;
pub mod index;

#[cfg(test)]
pub(crate) mod strategy;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Satellite catalog identifier, the primary key of an [`RsoRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "SatcatRepr", into = "String")]
pub struct SatcatNumber(String);

/// Either JSON shape the identifier arrives in.
#[derive(Deserialize)]
#[serde(untagged)]
enum SatcatRepr {
    Text(String),
    Unsigned(u64),
    Signed(i64),
}

impl From<SatcatRepr> for SatcatNumber {
    fn from(repr: SatcatRepr) -> Self {
        match repr {
            SatcatRepr::Text(s) => Self(s),
            SatcatRepr::Unsigned(n) => Self(n.to_string()),
            SatcatRepr::Signed(n) => Self(n.to_string()),
        }
    }
}

impl From<SatcatNumber> for String {
    fn from(id: SatcatNumber) -> Self {
        id.0
    }
}

impl SatcatNumber {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Decimal string form used for hashing, display and search.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SatcatNumber {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<u32> for SatcatNumber {
    fn from(n: u32) -> Self {
        Self(n.to_string())
    }
}

impl fmt::Display for SatcatNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One cataloged object.
///
/// Records are immutable once loaded; a fresh fetch replaces the whole
/// collection rather than patching individual entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RsoRecord {
    pub satcat_number: SatcatNumber,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub international_designator: String,
    /// Two-line element set. Carried through for display, never propagated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aliases: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl RsoRecord {
    pub fn new(
        satcat_number: impl Into<SatcatNumber>,
        display_name: impl Into<String>,
        international_designator: impl Into<String>,
    ) -> Self {
        Self {
            satcat_number: satcat_number.into(),
            display_name: display_name.into(),
            international_designator: international_designator.into(),
            tle: None,
            aliases: None,
            tags: None,
        }
    }

    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = Some(aliases.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_tle(mut self, tle: impl Into<String>) -> Self {
        self.tle = Some(tle.into());
        self
    }

    /// Aliases, empty when the field was absent.
    pub fn aliases(&self) -> &[String] {
        self.aliases.as_deref().unwrap_or(&[])
    }

    /// Tags, empty when the field was absent.
    pub fn tags(&self) -> &[String] {
        self.tags.as_deref().unwrap_or(&[])
    }

    /// Rich-text description attached to the rendered entity.
    pub fn description_markup(&self) -> String {
        format!(
            "<strong>{}</strong><br/>SatCat {}<br/>{}",
            escape_markup(&self.display_name),
            escape_markup(self.satcat_number.as_str()),
            escape_markup(&self.international_designator),
        )
    }
}

fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Flatten description markup into display text.
///
/// `<br/>` becomes a newline, other tags are dropped and the three escaped
/// entities are restored.
pub fn markup_to_text(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut rest = markup;
    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        let Some(close) = rest[open..].find('>') else {
            out.push_str(&rest[open..]);
            rest = "";
            break;
        };
        let tag = &rest[open + 1..open + close];
        if tag.trim_end_matches('/').trim().eq_ignore_ascii_case("br") {
            out.push('\n');
        }
        rest = &rest[open + close + 1..];
    }
    out.push_str(rest);
    out.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
