use chrono::NaiveDate;
use garde::Validate;
use movies_data::Entity;
use movies_data_sqlx::repository::SqliteQuery;
use movies_data_sqlx::SqlxEntity;
use serde::{Deserialize, Serialize};

use crate::resource::{Field, FieldKind, Resource};

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub release_date: NaiveDate,
    pub genre: String,
    pub price: f64,
}

impl Entity for Movie {
    type Id = i64;

    fn table_name() -> &'static str {
        "movies"
    }

    fn id_column() -> &'static str {
        "id"
    }

    fn columns() -> &'static [&'static str] {
        &["id", "title", "release_date", "genre", "price"]
    }

    fn id(&self) -> &i64 {
        &self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}

impl SqlxEntity for Movie {
    fn bind_values<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query
            .bind(&self.title)
            .bind(self.release_date)
            .bind(&self.genre)
            .bind(self.price)
    }
}

impl Resource for Movie {
    const NAME: &'static str = "Movie";
    const COLLECTION: &'static str = "movies";
    const PAGES: &'static str = "Movies";
    const FIELDS: &'static [Field] = &[
        Field::new("title", "title", "Title", FieldKind::Text),
        Field::new("releaseDate", "release_date", "Release date", FieldKind::Date),
        Field::new("genre", "genre", "Genre", FieldKind::Text),
        Field::new("price", "price", "Price", FieldKind::Number),
    ];

    type View = MovieView;
    type Input = InputMovie;
    type Edit = EditMovie;
    type Deleted = DeleteMovie;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieView {
    pub id: i64,
    pub title: String,
    pub release_date: NaiveDate,
    pub genre: String,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InputMovie {
    #[garde(length(min = 1, max = 100))]
    pub title: String,
    #[garde(skip)]
    pub release_date: NaiveDate,
    #[garde(length(min = 1, max = 30))]
    pub genre: String,
    #[garde(custom(super::finite), range(min = 0.0, max = 1000.0))]
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EditMovie {
    #[garde(length(min = 1, max = 100))]
    pub title: String,
    #[garde(skip)]
    pub release_date: NaiveDate,
    #[garde(length(min = 1, max = 30))]
    pub genre: String,
    #[garde(custom(super::finite), range(min = 0.0, max = 1000.0))]
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteMovie {
    pub id: i64,
    pub title: String,
    pub release_date: NaiveDate,
    pub genre: String,
    pub price: f64,
}

impl From<&Movie> for MovieView {
    fn from(movie: &Movie) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            release_date: movie.release_date,
            genre: movie.genre.clone(),
            price: movie.price,
        }
    }
}

impl From<&Movie> for EditMovie {
    fn from(movie: &Movie) -> Self {
        Self {
            title: movie.title.clone(),
            release_date: movie.release_date,
            genre: movie.genre.clone(),
            price: movie.price,
        }
    }
}

impl From<&Movie> for DeleteMovie {
    fn from(movie: &Movie) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            release_date: movie.release_date,
            genre: movie.genre.clone(),
            price: movie.price,
        }
    }
}

impl From<InputMovie> for Movie {
    fn from(input: InputMovie) -> Self {
        Self {
            id: 0,
            title: input.title,
            release_date: input.release_date,
            genre: input.genre,
            price: input.price,
        }
    }
}

impl From<EditMovie> for Movie {
    fn from(edit: EditMovie) -> Self {
        Self {
            id: 0,
            title: edit.title,
            release_date: edit.release_date,
            genre: edit.genre,
            price: edit.price,
        }
    }
}
