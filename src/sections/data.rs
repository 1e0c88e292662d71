//! Attached data values: observation images and analysis data entries.

use super::write_opt_float;
use crate::form::{SectionForm, SectionIds, TextField, TextKind};
use crate::record::{Data, Extra};

/// Raw bytes are never edited here; they stay in `extra`.
const BYTES_FIELD: &str = "bytes_value";

/// Which member of the data value oneof the form edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataKind {
    Float,
    Integer,
    Text,
    Url,
}

impl DataKind {
    pub const ALL: [DataKind; 4] = [DataKind::Float, DataKind::Integer, DataKind::Text, DataKind::Url];

    pub fn label(self) -> &'static str {
        match self {
            DataKind::Float => "number",
            DataKind::Integer => "integer",
            DataKind::Text => "text",
            DataKind::Url => "url",
        }
    }

    fn text_kind(self) -> TextKind {
        match self {
            DataKind::Float => TextKind::Float,
            DataKind::Integer => TextKind::Integer,
            DataKind::Text | DataKind::Url => TextKind::Free,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DataForm {
    kind: Option<DataKind>,
    pub value: TextField,
    pub description: TextField,
    pub format: TextField,
    extra: Extra,
}

impl Default for DataForm {
    fn default() -> Self {
        Self {
            kind: None,
            value: TextField::free("data_value"),
            description: TextField::free("data_description"),
            format: TextField::free("data_format"),
            extra: Extra::new(),
        }
    }
}

impl DataForm {
    pub fn kind(&self) -> Option<DataKind> {
        self.kind
    }

    /// Radio change: numeric kinds get the matching format check.
    pub fn set_kind(&mut self, kind: DataKind) {
        self.kind = Some(kind);
        self.value.set_kind(kind.text_kind());
    }

    /// True when the loaded record holds raw bytes the form cannot show.
    pub fn has_bytes(&self) -> bool {
        self.extra.contains_key(BYTES_FIELD)
    }

    /// Copy an uploaded text file into the value, as text data.
    pub fn upload_text(&mut self, contents: String) {
        self.set_kind(DataKind::Text);
        self.value.set_text(contents);
    }
}

impl SectionForm for DataForm {
    type Record = Data;

    fn load(&mut self, data: &Data, _ids: &mut SectionIds) {
        if let Some(value) = data.float_value {
            self.set_kind(DataKind::Float);
            write_opt_float(&mut self.value, Some(value));
        } else if let Some(value) = data.integer_value {
            self.set_kind(DataKind::Integer);
            self.value.set_integer(value);
        } else if let Some(value) = &data.string_value {
            self.set_kind(DataKind::Text);
            self.value.set_text(value.as_str());
        } else if let Some(url) = &data.url {
            self.set_kind(DataKind::Url);
            self.value.set_text(url.as_str());
        }
        self.description.set_text(data.description.as_str());
        self.format.set_text(data.format.as_str());
        self.extra = data.extra.clone();
    }

    fn unload(&self) -> Data {
        let mut data = Data {
            description: self.description.text().to_string(),
            format: self.format.text().to_string(),
            extra: self.extra.clone(),
            ..Default::default()
        };
        let text = self.value.text();
        match self.kind {
            Some(DataKind::Float) => data.float_value = self.value.as_float(),
            Some(DataKind::Integer) => data.integer_value = self.value.as_integer(),
            Some(DataKind::Text) if !text.is_empty() => data.string_value = Some(text.to_string()),
            Some(DataKind::Url) if !text.is_empty() => data.url = Some(text.to_string()),
            _ => {}
        }
        let has_value = data.float_value.is_some()
            || data.integer_value.is_some()
            || data.string_value.is_some()
            || data.url.is_some();
        if has_value {
            // The oneof holds a single member.
            data.extra.remove(BYTES_FIELD);
        }
        data
    }

    fn collect_invalid(&self, out: &mut Vec<&'static str>) {
        self.value.collect_invalid(out);
    }
}
