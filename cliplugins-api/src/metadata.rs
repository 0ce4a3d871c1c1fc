//! Plugin metadata as reported over the metadata subcommand

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Metadata a plugin reports about itself.
///
/// Every field is optional on the wire and defaults to an empty string.
/// Unknown fields are ignored so newer plugins keep working with older hosts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Metadata {
    /// Plugin version
    pub version: String,
    /// Who publishes the plugin
    pub vendor: String,
    /// One-line description shown in the host's help output
    pub short_description: String,
    /// Version of the metadata schema the plugin speaks
    pub schema_version: String,
}

impl Metadata {
    /// Parse the bytes a plugin printed for the metadata subcommand.
    ///
    /// The output must be a JSON object; derived deserialization alone would
    /// also fill the fields positionally from an array.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        let object: Map<String, Value> = serde_json::from_slice(bytes)?;
        serde_json::from_value(Value::Object(object))
    }

    /// Encode metadata the way a plugin prints it: indented, newline terminated.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"     ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        buf.push(b'\n');
        // serde_json only ever writes valid UTF-8
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}
