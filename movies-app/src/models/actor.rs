use chrono::NaiveDate;
use garde::Validate;
use movies_data::Entity;
use movies_data_sqlx::repository::SqliteQuery;
use movies_data_sqlx::SqlxEntity;
use serde::{Deserialize, Serialize};

use crate::resource::{Field, FieldKind, Resource};

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Actor {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
}

impl Entity for Actor {
    type Id = i64;

    fn table_name() -> &'static str {
        "actors"
    }

    fn id_column() -> &'static str {
        "id"
    }

    fn columns() -> &'static [&'static str] {
        &["id", "first_name", "last_name", "birth_date"]
    }

    fn id(&self) -> &i64 {
        &self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}

impl SqlxEntity for Actor {
    fn bind_values<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query
            .bind(&self.first_name)
            .bind(&self.last_name)
            .bind(self.birth_date)
    }
}

impl Resource for Actor {
    const NAME: &'static str = "Actor";
    const COLLECTION: &'static str = "actors";
    const PAGES: &'static str = "Actors";
    const FIELDS: &'static [Field] = &[
        Field::new("firstName", "first_name", "First name", FieldKind::Text),
        Field::new("lastName", "last_name", "Last name", FieldKind::Text),
        Field::new("birthDate", "birth_date", "Birth date", FieldKind::Date),
    ];

    type View = ActorView;
    type Input = InputActor;
    type Edit = EditActor;
    type Deleted = DeleteActor;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorView {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
}

/// Body of a create request. Any `id` the caller sends is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InputActor {
    #[garde(length(min = 1, max = 50))]
    pub first_name: String,
    #[garde(length(min = 1, max = 50))]
    pub last_name: String,
    #[garde(custom(super::not_in_future))]
    pub birth_date: NaiveDate,
}

/// Body of an update request; the id comes from the route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EditActor {
    #[garde(length(min = 1, max = 50))]
    pub first_name: String,
    #[garde(length(min = 1, max = 50))]
    pub last_name: String,
    #[garde(custom(super::not_in_future))]
    pub birth_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteActor {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
}

impl From<&Actor> for ActorView {
    fn from(actor: &Actor) -> Self {
        Self {
            id: actor.id,
            first_name: actor.first_name.clone(),
            last_name: actor.last_name.clone(),
            birth_date: actor.birth_date,
        }
    }
}

impl From<&Actor> for EditActor {
    fn from(actor: &Actor) -> Self {
        Self {
            first_name: actor.first_name.clone(),
            last_name: actor.last_name.clone(),
            birth_date: actor.birth_date,
        }
    }
}

impl From<&Actor> for DeleteActor {
    fn from(actor: &Actor) -> Self {
        Self {
            id: actor.id,
            first_name: actor.first_name.clone(),
            last_name: actor.last_name.clone(),
            birth_date: actor.birth_date,
        }
    }
}

impl From<InputActor> for Actor {
    fn from(input: InputActor) -> Self {
        Self {
            id: 0,
            first_name: input.first_name,
            last_name: input.last_name,
            birth_date: input.birth_date,
        }
    }
}

impl From<EditActor> for Actor {
    fn from(edit: EditActor) -> Self {
        Self {
            id: 0,
            first_name: edit.first_name,
            last_name: edit.last_name,
            birth_date: edit.birth_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use movies_core::validate;

    fn hanks() -> Actor {
        Actor {
            id: 7,
            first_name: "Tom".into(),
            last_name: "Hanks".into(),
            birth_date: NaiveDate::from_ymd_opt(1956, 7, 9).unwrap(),
        }
    }

    #[test]
    fn view_and_delete_projections_copy_every_field() {
        let actor = hanks();
        let view = ActorView::from(&actor);
        assert_eq!(view.id, 7);
        assert_eq!(view.first_name, "Tom");
        assert_eq!(view.last_name, "Hanks");
        assert_eq!(view.birth_date, actor.birth_date);

        let deleted = DeleteActor::from(&actor);
        assert_eq!(deleted.id, 7);
        assert_eq!(deleted.last_name, "Hanks");
    }

    #[test]
    fn input_and_edit_map_to_unsaved_entity() {
        let input = InputActor {
            first_name: "Meg".into(),
            last_name: "Ryan".into(),
            birth_date: NaiveDate::from_ymd_opt(1961, 11, 19).unwrap(),
        };
        let actor = Actor::from(input);
        assert_eq!(actor.id, 0);
        assert_eq!(actor.first_name, "Meg");

        let edit = EditActor::from(&hanks());
        let actor = Actor::from(edit);
        assert_eq!(actor.id, 0);
        assert_eq!(actor.last_name, "Hanks");
    }

    #[test]
    fn wire_names_are_camel_case() {
        let json = serde_json::to_value(ActorView::from(&hanks())).unwrap();
        assert_eq!(json["firstName"], "Tom");
        assert_eq!(json["birthDate"], "1956-07-09");
    }

    #[test]
    fn empty_names_and_future_birth_dates_are_rejected() {
        let input = InputActor {
            first_name: String::new(),
            last_name: "Hanks".into(),
            birth_date: NaiveDate::from_ymd_opt(2999, 1, 1).unwrap(),
        };
        let errors = validate(&input).unwrap_err();
        assert!(errors.message_for("first_name").is_some());
        assert!(errors.message_for("birth_date").is_some());
        assert!(errors.message_for("last_name").is_none());
    }
}
