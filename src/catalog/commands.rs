use tauri::State;

use crate::{
    db::models::{Cafe, Coffee, Review},
    AppState,
};

#[tauri::command]
pub async fn create_coffee(
    state: State<'_, AppState>,
    name: String,
    roast: String,
) -> Result<Coffee, String> {
    let db = &state.db;
    db.create_coffee(name, roast)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn list_coffees(state: State<'_, AppState>) -> Result<Vec<Coffee>, String> {
    let db = &state.db;
    db.list_coffees().await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn create_cafe(state: State<'_, AppState>, name: String) -> Result<Cafe, String> {
    let db = &state.db;
    db.create_cafe(name).await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn list_cafes(state: State<'_, AppState>) -> Result<Vec<Cafe>, String> {
    let db = &state.db;
    db.list_cafes().await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn list_reviews(state: State<'_, AppState>) -> Result<Vec<Review>, String> {
    let db = &state.db;
    db.list_reviews().await.map_err(|e| e.to_string())
}
