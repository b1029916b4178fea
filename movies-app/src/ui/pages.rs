//! HTML rendering. Views arrive as JSON values keyed by wire name.

use axum::http::StatusCode;
use movies_core::ValidationErrorResponse;
use serde_json::Value;

use crate::resource::{FieldKind, Resource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(i64),
}

/// Escape text for use in element content and quoted attributes.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Plain-text form of a JSON scalar; `null` renders empty.
pub fn display(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title} - Movies</title>
</head>
<body>
<nav><a href="/">Home</a> | <a href="/Actors">Actors</a> | <a href="/Movies">Movies</a></nav>
<main>
{body}
</main>
</body>
</html>
"#,
        title = escape(title),
    )
}

pub fn home() -> String {
    layout(
        "Home",
        r#"<h1>Movie catalog</h1>
<ul>
<li><a href="/Actors">Actors</a></li>
<li><a href="/Movies">Movies</a></li>
</ul>"#,
    )
}

pub fn index<E: Resource>(rows: &[Value]) -> String {
    let mut body = format!(
        "<h1>{pages}</h1>\n<p><a href=\"/{pages}/Create\">Create New</a></p>\n",
        pages = E::PAGES
    );

    if rows.is_empty() {
        body.push_str(&format!("<p>No {} yet.</p>", E::COLLECTION));
        return layout(E::PAGES, &body);
    }

    body.push_str("<table>\n<thead><tr>");
    for field in E::FIELDS {
        body.push_str(&format!("<th>{}</th>", escape(field.label)));
    }
    body.push_str("<th></th></tr></thead>\n<tbody>\n");

    for row in rows {
        let id = display(&row["id"]);
        body.push_str("<tr>");
        for field in E::FIELDS {
            body.push_str(&format!("<td>{}</td>", escape(&display(&row[field.name]))));
        }
        body.push_str(&format!(
            "<td><a href=\"/{p}/Edit/{id}\">Edit</a> | <a href=\"/{p}/Details/{id}\">Details</a> | <a href=\"/{p}/Delete/{id}\">Delete</a></td></tr>\n",
            p = E::PAGES,
        ));
    }
    body.push_str("</tbody>\n</table>");
    layout(E::PAGES, &body)
}

fn field_list<E: Resource>(view: &Value) -> String {
    let mut out = String::from("<dl>\n");
    for field in E::FIELDS {
        out.push_str(&format!(
            "<dt>{}</dt><dd>{}</dd>\n",
            escape(field.label),
            escape(&display(&view[field.name]))
        ));
    }
    out.push_str("</dl>");
    out
}

pub fn details<E: Resource>(view: &Value) -> String {
    let id = display(&view["id"]);
    let body = format!(
        "<h1>{name} details</h1>\n{fields}\n<p><a href=\"/{p}/Edit/{id}\">Edit</a> | <a href=\"/{p}\">Back to List</a></p>",
        name = E::NAME,
        fields = field_list::<E>(view),
        p = E::PAGES,
    );
    layout(&format!("{} details", E::NAME), &body)
}

/// Create or edit form. `values` prefills the inputs; `errors` are shown
/// next to the field they refer to.
pub fn form<E: Resource>(
    mode: FormMode,
    values: &Value,
    errors: Option<&ValidationErrorResponse>,
) -> String {
    let (title, action) = match mode {
        FormMode::Create => (
            format!("Create {}", E::NAME),
            format!("/{}/Create", E::PAGES),
        ),
        FormMode::Edit(id) => (
            format!("Edit {}", E::NAME),
            format!("/{}/Edit/{id}", E::PAGES),
        ),
    };

    let mut body = format!(
        "<h1>{}</h1>\n<form method=\"post\" action=\"{action}\">\n",
        escape(&title)
    );
    for field in E::FIELDS {
        let step = if field.kind == FieldKind::Number {
            " step=\"0.01\""
        } else {
            ""
        };
        body.push_str(&format!(
            "<div>\n<label for=\"{name}\">{label}</label>\n<input type=\"{kind}\" id=\"{name}\" name=\"{name}\" value=\"{value}\"{step}>\n",
            name = field.name,
            label = escape(field.label),
            kind = field.kind.input_type(),
            value = escape(&display(&values[field.name])),
        ));
        if let Some(message) = errors.and_then(|e| e.message_for(field.path)) {
            body.push_str(&format!(
                "<span class=\"field-error\">{}</span>\n",
                escape(message)
            ));
        }
        body.push_str("</div>\n");
    }
    body.push_str(&format!(
        "<button type=\"submit\">Save</button>\n</form>\n<p><a href=\"/{}\">Back to List</a></p>",
        E::PAGES
    ));
    layout(&title, &body)
}

pub fn delete_confirmation<E: Resource>(view: &Value) -> String {
    let id = display(&view["id"]);
    let body = format!(
        "<h1>Delete {name}</h1>\n<p>Are you sure you want to delete this?</p>\n{fields}\n<form method=\"post\" action=\"/{p}/Delete/{id}\">\n<button type=\"submit\">Delete</button> | <a href=\"/{p}\">Back to List</a>\n</form>",
        name = E::NAME,
        fields = field_list::<E>(view),
        p = E::PAGES,
    );
    layout(&format!("Delete {}", E::NAME), &body)
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    let reason = status.canonical_reason().unwrap_or("Error");
    let body = format!(
        "<h1>{} {}</h1>\n<p>{}</p>\n<p><a href=\"/\">Home</a></p>",
        status.as_u16(),
        escape(reason),
        escape(message)
    );
    layout(reason, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Actor;
    use movies_core::FieldError;
    use serde_json::json;

    #[test]
    fn escape_replaces_markup() {
        assert_eq!(
            escape(r#"<b>"Tom" & 'Meg'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Meg&#39;&lt;/b&gt;"
        );
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn display_renders_scalars() {
        assert_eq!(display(&json!("Heat")), "Heat");
        assert_eq!(display(&json!(9.5)), "9.5");
        assert_eq!(display(&Value::Null), "");
    }

    #[test]
    fn index_lists_rows_with_action_links() {
        let rows = vec![json!({"id": 4, "firstName": "Tom", "lastName": "Hanks", "birthDate": "1956-07-09"})];
        let html = index::<Actor>(&rows);
        assert!(html.contains("<td>Hanks</td>"));
        assert!(html.contains("/Actors/Edit/4"));
        assert!(html.contains("/Actors/Delete/4"));
    }

    #[test]
    fn empty_index_says_so() {
        assert!(index::<Actor>(&[]).contains("No actors yet."));
    }

    #[test]
    fn form_shows_values_and_field_errors() {
        let errors = ValidationErrorResponse {
            errors: vec![FieldError {
                field: "first_name".into(),
                message: "length is lower than 1".into(),
                code: "validation".into(),
            }],
        };
        let values = json!({"firstName": "", "lastName": "<Hanks>", "birthDate": "1956-07-09"});
        let html = form::<Actor>(FormMode::Edit(2), &values, Some(&errors));
        assert!(html.contains("action=\"/Actors/Edit/2\""));
        assert!(html.contains("value=\"&lt;Hanks&gt;\""));
        assert!(html.contains("<span class=\"field-error\">length is lower than 1</span>"));
    }
}
