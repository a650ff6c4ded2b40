//! Field kinds and type token resolution.

use crate::error::{FieldsetError, Result};

/// The fixed set of field kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Text,
    Password,
    Checkbox,
    SelectMenu,
    RadioSeries,
    Textarea,
    FileUpload,
}

impl FieldKind {
    /// Namespace of the qualified catalog names.
    pub const NAMESPACE: &'static str = "fields::";

    /// Every field kind.
    pub const ALL: [Self; 7] = [
        Self::Text,
        Self::Password,
        Self::Checkbox,
        Self::SelectMenu,
        Self::RadioSeries,
        Self::Textarea,
        Self::FileUpload,
    ];

    /// Short aliases accepted in place of catalog names.
    const ALIASES: [(&'static str, Self); 9] = [
        ("text", Self::Text),
        ("password", Self::Password),
        ("checkbox", Self::Checkbox),
        ("select", Self::SelectMenu),
        ("dropmenu", Self::SelectMenu),
        ("radio", Self::RadioSeries),
        ("textarea", Self::Textarea),
        ("upload", Self::FileUpload),
        ("file", Self::FileUpload),
    ];

    /// Returns the namespace-qualified catalog name.
    #[must_use]
    pub const fn catalog_name(self) -> &'static str {
        match self {
            Self::Text => "fields::text_field",
            Self::Password => "fields::password_field",
            Self::Checkbox => "fields::checkbox",
            Self::SelectMenu => "fields::select_menu",
            Self::RadioSeries => "fields::radio_series",
            Self::Textarea => "fields::textarea",
            Self::FileUpload => "fields::file_upload",
        }
    }

    /// Resolves a caller-supplied type token.
    ///
    /// The token is normalised (lowercased, `-` and spaces become `_`) and
    /// then matched against the qualified catalog names, against the catalog
    /// names after prefixing [`Self::NAMESPACE`], and finally against the
    /// alias table.
    ///
    /// # Errors
    ///
    /// Returns [`FieldsetError::UnresolvedFieldType`] if nothing matches.
    pub fn resolve(token: &str) -> Result<Self> {
        let normalized = token.trim().to_lowercase().replace(['-', ' '], "_");
        let qualified = format!("{}{normalized}", Self::NAMESPACE);

        Self::ALL
            .into_iter()
            .find(|kind| kind.catalog_name() == normalized)
            .or_else(|| {
                Self::ALL
                    .into_iter()
                    .find(|kind| kind.catalog_name() == qualified)
            })
            .or_else(|| {
                Self::ALIASES
                    .iter()
                    .find(|(alias, _)| *alias == normalized)
                    .map(|(_, kind)| *kind)
            })
            .ok_or_else(|| FieldsetError::UnresolvedFieldType(token.to_string()))
    }

    /// Returns whether the kind renders a list of options.
    #[must_use]
    pub const fn has_options(self) -> bool {
        matches!(self, Self::SelectMenu | Self::RadioSeries)
    }
}
