use axum_test::TestServer;
use breed_service::core::AppState;
use sqlx::MySqlPool;
use std::sync::Arc;

/// Crea un AppState per i test
///
/// # Arguments
/// * `pool` - Connection pool MySQL fornito da `#[sqlx::test]`
///
/// # Returns
/// Arc<AppState> con il repository delle razze collegato al pool
pub fn create_test_state(pool: MySqlPool) -> Arc<AppState> {
    Arc::new(AppState::new(pool))
}

/// Crea un TestServer per i test
///
/// # Arguments
/// * `pool` - Connection pool MySQL da passare allo stato
///
/// # Returns
/// TestServer configurato con il router completo e pronto per eseguire richieste
pub fn create_test_server(pool: MySqlPool) -> TestServer {
    let app = breed_service::create_router(create_test_state(pool));
    TestServer::new(app).expect("Failed to create test server")
}

/// Estrae gli id da un array JSON di razze
///
/// # Arguments
/// * `body` - Corpo JSON della risposta, deve essere un array
///
/// # Returns
/// Gli id ordinati in modo crescente
pub fn breed_ids(body: &serde_json::Value) -> Vec<i64> {
    let mut ids: Vec<i64> = body
        .as_array()
        .expect("expected a JSON array")
        .iter()
        .map(|b| b["id"].as_i64().expect("breed without id"))
        .collect();
    ids.sort();
    ids
}
