/// Trait representing a database entity with a table name, id column, and column list.
///
/// The id is assigned by the store: it is the default value (`0` for integer
/// keys) until the entity has been added, and never changes afterwards.
///
/// # Example
///
/// ```ignore
/// impl Entity for Actor {
///     type Id = i64;
///     fn table_name() -> &'static str { "actors" }
///     fn id_column() -> &'static str { "id" }
///     fn columns() -> &'static [&'static str] { &["id", "first_name", "last_name", "birth_date"] }
///     fn id(&self) -> &i64 { &self.id }
///     fn set_id(&mut self, id: i64) { self.id = id; }
/// }
/// ```
pub trait Entity: Send + Sync + Unpin + 'static {
    type Id: Copy + Send + Sync + ToString + 'static;

    fn table_name() -> &'static str;
    fn id_column() -> &'static str;

    /// Every column, id included, in the order values are bound.
    fn columns() -> &'static [&'static str];

    fn id(&self) -> &Self::Id;
    fn set_id(&mut self, id: Self::Id);

    /// The columns written on insert and update: [`columns`](Entity::columns)
    /// without the id column.
    fn value_columns() -> Vec<&'static str> {
        Self::columns()
            .iter()
            .copied()
            .filter(|c| *c != Self::id_column())
            .collect()
    }
}
