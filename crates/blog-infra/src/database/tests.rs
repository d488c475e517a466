#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use blog_core::domain::BlogPost;
    use blog_core::ports::RecordStore;
    use sea_orm::{DatabaseBackend, MockDatabase, Value};

    use crate::database::entity::post;
    use crate::database::postgres_store::PostgresPostStore;

    fn model(id: &str) -> post::Model {
        post::Model {
            post_id: id.to_owned(),
            blog_name: "Scaling a blog platform".to_owned(),
            content: "Content".to_owned(),
            category: "Software architecture".to_owned(),
            category_id: None,
            author_id: Some(7),
            author_name: Some("Grace".to_owned()),
            author_email: None,
            comment_ids: serde_json::json!(["c1", "c2"]),
            tag_ids: serde_json::json!([]),
            like_ids: serde_json::Value::Null,
            created_at: Some(chrono::Local::now().naive_local()),
            updated_at: None,
            is_published: true,
            view_count: 3,
            like_count: 0,
            comment_count: 2,
        }
    }

    #[tokio::test]
    async fn test_fetch_all_maps_rows_to_posts() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model("p1"), model("p2")]])
            .into_connection();

        let store = PostgresPostStore::new(db);

        let posts: Vec<BlogPost> = store.fetch_all().await.unwrap();

        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].post_id, "p1");
        assert_eq!(posts[0].comment_ids, vec!["c1", "c2"]);
        // Legacy rows with a null id list read back as empty.
        assert!(posts[1].like_ids.is_empty());
    }

    #[tokio::test]
    async fn test_count_reads_aggregate() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[BTreeMap::from([(
                "num_items",
                Into::<Value>::into(12_345i64),
            )])]])
            .into_connection();

        let store = PostgresPostStore::new(db);

        assert_eq!(store.count().await.unwrap(), 12_345);
    }
}
