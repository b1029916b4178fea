use garde::Validate;
use movies_data_sqlx::SqlxEntity;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// How a field is rendered in the HTML forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Date,
    Number,
}

impl FieldKind {
    pub fn input_type(self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Date => "date",
            FieldKind::Number => "number",
        }
    }
}

/// One editable field of a resource.
#[derive(Debug, Clone, Copy)]
pub struct Field {
    /// Wire name, shared by the JSON views and the HTML form inputs.
    pub name: &'static str,
    /// Struct field name, as reported by validation errors.
    pub path: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

impl Field {
    pub const fn new(name: &'static str, path: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            path,
            label,
            kind,
        }
    }
}

/// A catalog entity exposed through the JSON API and the HTML pages.
///
/// Each view type is produced from, or turned into, the entity through an
/// explicit `From` impl. Input and edit views never carry an id: the entity
/// they map to has id `0` until the store (create) or the route (update)
/// assigns one.
pub trait Resource: SqlxEntity {
    /// Singular display name, e.g. `"Actor"`.
    const NAME: &'static str;
    /// Path segment of the JSON API, e.g. `"actors"` for `/api/actors`.
    const COLLECTION: &'static str;
    /// Path segment of the HTML pages, e.g. `"Actors"` for `/Actors`.
    const PAGES: &'static str;
    /// Editable fields, in display order.
    const FIELDS: &'static [Field];

    /// List and detail projection.
    type View: Serialize + Send + Sync + 'static + for<'a> From<&'a Self>;
    type Input: DeserializeOwned
        + Serialize
        + Clone
        + Validate<Context = ()>
        + Send
        + Sync
        + 'static
        + Into<Self>;
    type Edit: DeserializeOwned
        + Serialize
        + Validate<Context = ()>
        + Send
        + Sync
        + 'static
        + Into<Self>
        + for<'a> From<&'a Self>;
    /// Projection returned after a delete.
    type Deleted: Serialize + Send + Sync + 'static + for<'a> From<&'a Self>;
}
