//! Offline tests for bgreviews-db pool configuration and query builders.
//! These tests do not require a live database connection.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use bgreviews_core::{AppConfig, Environment, SortColumn, SortOrder};
use bgreviews_db::{list_reviews_sql, DbError, PoolConfig, Resource};

#[test]
fn pool_config_from_app_config_uses_core_values() {
    let app_config = AppConfig {
        database_url: "postgres://example".to_string(),
        env: Environment::Test,
        bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 9090),
        log_level: "info".to_string(),
        db_max_connections: 42,
        db_min_connections: 7,
        db_acquire_timeout_secs: 9,
    };

    let pool_config = PoolConfig::from_app_config(&app_config);
    assert_eq!(pool_config.max_connections, 42);
    assert_eq!(pool_config.min_connections, 7);
    assert_eq!(pool_config.acquire_timeout_secs, 9);
}

#[test]
fn list_reviews_sql_orders_by_every_allowed_column() {
    let expected = [
        (SortColumn::ReviewId, "r.review_id"),
        (SortColumn::Title, r#"r.title COLLATE "C""#),
        (SortColumn::Owner, r#"r.owner COLLATE "C""#),
        (SortColumn::Category, r#"r.category COLLATE "C""#),
        (SortColumn::CreatedAt, "r.created_at"),
        (SortColumn::Votes, "r.votes"),
        (SortColumn::CommentCount, "COUNT(c.comment_id)"),
    ];

    for (column, token) in expected {
        let sql = list_reviews_sql(column, SortOrder::Asc);
        assert!(
            sql.contains(&format!("ORDER BY {token} ASC, r.review_id ASC")),
            "{column:?} should order by {token}: {sql}"
        );
    }
}

#[test]
fn not_found_errors_name_the_resource() {
    assert_eq!(
        DbError::NotFound(Resource::Comment).to_string(),
        "comment not found"
    );
    assert_eq!(
        DbError::CategoryNotFound.to_string(),
        "category does not exist"
    );
}
