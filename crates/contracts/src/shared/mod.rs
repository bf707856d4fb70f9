pub mod bulk_delete;
pub mod list_query;
pub mod paginated;
