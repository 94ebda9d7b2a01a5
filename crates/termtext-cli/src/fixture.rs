//! Response fixtures: a recorded HTTP response, an optional error and an
//! optional domain object, stored as YAML or JSON.
//!
//! ```yaml
//! status: 404
//! headers:
//!   Content-Type: application/json
//! body:
//!   status: 404
//!   message: not found
//! error: widget lookup failed
//! object:
//!   id: 7
//!   name: gear
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use serde_json::{Map, Value};
use termtext::{Describable, HttpResponse, Listable, Profile, TabWriter};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Fixture {
    pub status: u16,
    #[serde(default)]
    pub status_text: Option<String>,
    #[serde(default)]
    pub headers: BTreeMap<String, HeaderValues>,
    #[serde(default)]
    pub content_length: Option<i64>,
    #[serde(default)]
    pub transfer_encoding: Vec<String>,
    #[serde(default)]
    pub uncompressed: bool,
    /// A string is used verbatim; anything else is serialized as JSON.
    #[serde(default)]
    pub body: Option<Value>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub object: Option<Map<String, Value>>,
}

/// A header given as one value or a list of values.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum HeaderValues {
    One(String),
    Many(Vec<String>),
}

impl HeaderValues {
    fn into_vec(self) -> Vec<String> {
        match self {
            HeaderValues::One(v) => vec![v],
            HeaderValues::Many(vs) => vs,
        }
    }
}

impl Fixture {
    /// Loads a fixture, parsing `.json` files as JSON and everything else as YAML.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read fixture {}", path.display()))?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            serde_json::from_str(&content)
                .with_context(|| format!("invalid JSON fixture {}", path.display()))
        } else {
            Self::from_yaml(&content)
                .with_context(|| format!("invalid YAML fixture {}", path.display()))
        }
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Body bytes as the server would have sent them.
    pub fn body_bytes(&self) -> Result<Vec<u8>> {
        match &self.body {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::String(s)) => Ok(s.clone().into_bytes()),
            Some(other) => serde_json::to_vec(other).context("failed to serialize fixture body"),
        }
    }

    /// Builds a fresh response; each call gets its own unread body.
    pub fn response(&self) -> Result<HttpResponse> {
        let mut resp = HttpResponse::new(self.status).body(self.body_bytes()?);
        if let Some(text) = &self.status_text {
            resp = resp.status_text(text);
        }
        for (name, values) in self.headers.clone() {
            for value in values.into_vec() {
                resp = resp.header(name.clone(), value);
            }
        }
        if let Some(length) = self.content_length {
            resp = resp.content_length(length);
        }
        Ok(resp
            .transfer_encoding(self.transfer_encoding.clone())
            .uncompressed(self.uncompressed))
    }

    /// The recorded error, if any.
    pub fn error(&self) -> Option<anyhow::Error> {
        self.error.as_ref().map(|message| anyhow!("{}", message))
    }

    pub fn object(&self) -> Option<ObjectView<'_>> {
        self.object.as_ref().map(ObjectView)
    }
}

/// A fixture object shown as a domain object.
pub struct ObjectView<'a>(pub &'a Map<String, Value>);

impl Describable for ObjectView<'_> {
    fn describe(&self, out: &mut dyn Write, profile: &Profile) -> io::Result<()> {
        let mut tw = TabWriter::new(out, 4, 4, 3, ' ');
        tw.row([profile.title("Field"), profile.title("Value")])?;
        for (key, value) in self.0 {
            tw.row([profile.sub_title(key), profile.text(plain(value))])?;
        }
        tw.flush()
    }
}

impl Listable for ObjectView<'_> {
    fn list(&self, out: &mut dyn Write, profile: &Profile) -> io::Result<()> {
        let fields: Vec<String> = self
            .0
            .iter()
            .map(|(key, value)| format!("{}={}", profile.highlight(key), profile.text(plain(value))))
            .collect();
        writeln!(out, "{}", fields.join(" "))
    }
}

fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
