use redis::aio::ConnectionManager;

/// Check Redis health with a PING
pub async fn check_health(conn: &ConnectionManager) -> bool {
    let mut conn = conn.clone();
    redis::cmd("PING")
        .query_async::<String>(&mut conn)
        .await
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::redis::connect;

    #[tokio::test]
    #[ignore] // Requires a running Redis
    async fn health_check_against_local_instance() {
        let conn = connect("redis://127.0.0.1:6379").await.unwrap();
        assert!(check_health(&conn).await);
    }
}
