//! Renders the relational SQL dump (`<databasename>.sql`) of the highway
//! model, routes, segments, travelers, and their clinches.

mod dump;
mod escape;

pub use dump::render_sql_dump;
pub use escape::sql_quote;
