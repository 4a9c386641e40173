// Request field parsing for --field / --url-field flags
//
// Parses name=value pairs into change-request fields. Repeating a name
// collects its values into a list, in the order given.
// Example: link=https://a link=https://b becomes { "link": ["https://a", "https://b"] }

use anyhow::{anyhow, Result};
use glennow_core::{FieldKind, FieldValue, RequestField};

/// Parses `name=value` strings into request fields.
///
/// Text fields come first in the order given, then URL fields. A name used
/// for both a text and a URL field is rejected.
pub fn parse_fields(text: Vec<String>, urls: Vec<String>) -> Result<Vec<RequestField>> {
    let mut fields: Vec<RequestField> = Vec::new();

    let tagged = text
        .into_iter()
        .map(|arg| (arg, FieldKind::Text))
        .chain(urls.into_iter().map(|arg| (arg, FieldKind::Url)));

    for (arg, kind) in tagged {
        let (name, value) = parse_name_value(&arg)?;
        insert_field(&mut fields, name, value, kind)?;
    }

    Ok(fields)
}

/// Parses a single "name=value" string.
fn parse_name_value(arg: &str) -> Result<(String, String)> {
    let (name, value) = arg
        .split_once('=')
        .ok_or_else(|| anyhow!("Invalid field format: '{}'. Expected 'name=value'", arg))?;

    let name = name.trim();
    if name.is_empty() {
        return Err(anyhow!("Empty field name: '{}'", arg));
    }

    Ok((name.to_string(), value.trim().to_string()))
}

fn insert_field(
    fields: &mut Vec<RequestField>,
    name: String,
    value: String,
    kind: FieldKind,
) -> Result<()> {
    let Some(index) = fields.iter().position(|f| f.name == name) else {
        let field = match kind {
            FieldKind::Text => RequestField::text(name, value),
            FieldKind::Url => RequestField::url(name, value),
        };
        fields.push(field);
        return Ok(());
    };

    let existing = &mut fields[index];

    if existing.kind != kind {
        return Err(anyhow!(
            "Field '{}' is given as both a text and a URL field",
            name
        ));
    }

    existing.value = match std::mem::replace(&mut existing.value, FieldValue::List(vec![])) {
        FieldValue::Text(first) => FieldValue::List(vec![first, value]),
        FieldValue::List(mut items) => {
            items.push(value);
            FieldValue::List(items)
        }
    };

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_simple_fields() {
        let fields = parse_fields(args(&["project=Verizon Store", "change=new hours"]), vec![])
            .unwrap();

        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].name, "project");
        assert_eq!(fields[0].value, FieldValue::Text("Verizon Store".to_string()));
        assert_eq!(fields[1].kind, FieldKind::Text);
    }

    #[test]
    fn test_url_fields_follow_text_fields() {
        let fields = parse_fields(
            args(&["project=Verizon Store"]),
            args(&["link=https://example.com"]),
        )
        .unwrap();

        assert_eq!(fields[0].kind, FieldKind::Text);
        assert_eq!(fields[1].name, "link");
        assert_eq!(fields[1].kind, FieldKind::Url);
    }

    #[test]
    fn test_repeated_name_collects_list() {
        let fields = parse_fields(
            vec![],
            args(&["link=https://a", "link=https://b", "link=https://c"]),
        )
        .unwrap();

        assert_eq!(fields.len(), 1);
        assert_eq!(
            fields[0].value,
            FieldValue::List(args(&["https://a", "https://b", "https://c"]))
        );
    }

    #[test]
    fn test_value_with_equals_sign() {
        let fields = parse_fields(args(&["note=a=b+c"]), vec![]).unwrap();
        assert_eq!(fields[0].value, FieldValue::Text("a=b+c".to_string()));
    }

    #[test]
    fn test_whitespace_trimming() {
        let fields = parse_fields(args(&["  name  =  value  "]), vec![]).unwrap();
        assert_eq!(fields[0].name, "name");
        assert_eq!(fields[0].value, FieldValue::Text("value".to_string()));
    }

    #[test]
    fn test_invalid_format_no_equals() {
        let result = parse_fields(args(&["no_equals_sign"]), vec![]);
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Expected 'name=value'"));
    }

    #[test]
    fn test_invalid_format_empty_name() {
        let result = parse_fields(args(&["=value"]), vec![]);
        assert!(result.unwrap_err().to_string().contains("Empty field name"));
    }

    #[test]
    fn test_conflicting_kinds() {
        let result = parse_fields(args(&["link=text"]), args(&["link=https://a"]));
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("both a text and a URL field"));
    }
}
