use serde::Serialize;

/// How a column renders its cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Url,
    Text,
    Currency,
    Button,
}

/// Row action button shown in a column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonSpec {
    pub label: String,
    pub name: String,
    pub title: String,
    pub disabled: bool,
    pub value: String,
    pub icon_position: String,
}

/// Display metadata for one table column
///
/// Passed through to the rendering layer as-is; the engine never reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_name: Option<String>,
    #[serde(rename = "type")]
    pub kind: ColumnKind,
    pub wrap_text: bool,
    pub sortable: bool,
    /// For url columns: the field holding the link text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button: Option<ButtonSpec>,
}

impl ColumnSpec {
    fn data(label: &str, field_name: &str, kind: ColumnKind) -> Self {
        Self {
            label: Some(label.to_string()),
            field_name: Some(field_name.to_string()),
            kind,
            wrap_text: true,
            sortable: true,
            label_field: None,
            button: None,
        }
    }

    pub fn url(label: &str, field_name: &str, label_field: &str) -> Self {
        Self {
            label_field: Some(label_field.to_string()),
            ..Self::data(label, field_name, ColumnKind::Url)
        }
    }

    pub fn text(label: &str, field_name: &str) -> Self {
        Self::data(label, field_name, ColumnKind::Text)
    }

    pub fn currency(label: &str, field_name: &str) -> Self {
        Self::data(label, field_name, ColumnKind::Currency)
    }

    pub fn button(button: ButtonSpec) -> Self {
        Self {
            label: None,
            field_name: None,
            kind: ColumnKind::Button,
            wrap_text: false,
            sortable: false,
            label_field: None,
            button: Some(button),
        }
    }

    /// Header text shown above the column
    pub fn header(&self) -> &str {
        match (&self.label, &self.button) {
            (Some(label), _) => label.as_str(),
            (None, Some(button)) => button.label.as_str(),
            (None, None) => "",
        }
    }

    /// Field whose value is displayed (the link text for url columns)
    pub fn display_field(&self) -> Option<&str> {
        self.label_field
            .as_deref()
            .or(self.field_name.as_deref())
    }
}

/// The opportunity table layout
pub fn default_columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::url("Opportunity name", "nameUrl", "name"),
        ColumnSpec::url("Account name", "accountUrl", "accountName"),
        ColumnSpec::text("Stage Name", "stageName"),
        ColumnSpec::text("Type", "type"),
        ColumnSpec::currency("Amount", "amount"),
        ColumnSpec::button(ButtonSpec {
            label: "API".to_string(),
            name: "View".to_string(),
            title: "View".to_string(),
            disabled: false,
            value: "view".to_string(),
            icon_position: "left".to_string(),
        }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let columns = default_columns();
        let headers: Vec<&str> = columns.iter().map(ColumnSpec::header).collect();
        assert_eq!(
            headers,
            vec!["Opportunity name", "Account name", "Stage Name", "Type", "Amount", "API"]
        );
        assert_eq!(columns[0].display_field(), Some("name"));
        assert_eq!(columns[2].display_field(), Some("stageName"));
        assert_eq!(columns[5].display_field(), None);
    }

    #[test]
    fn test_serializes_like_datatable_config() {
        let json = serde_json::to_value(ColumnSpec::currency("Amount", "amount")).unwrap();
        assert_eq!(json["type"], "currency");
        assert_eq!(json["fieldName"], "amount");
        assert_eq!(json["wrapText"], true);
        assert!(json.get("button").is_none());
    }
}
