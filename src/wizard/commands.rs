use tauri::State;

use crate::{
    db::models::{Brew, Review},
    wizard::{
        assembler::ReviewLocation,
        controller::{WizardController, WizardSnapshot},
        store::{Section, SectionAnswer},
    },
    AppState,
};

fn controller_from_state(state: &State<'_, AppState>) -> WizardController {
    state.wizard.clone()
}

#[tauri::command]
pub async fn get_wizard_state(state: State<'_, AppState>) -> Result<WizardSnapshot, String> {
    let controller = controller_from_state(&state);
    Ok(controller.get_snapshot().await)
}

#[tauri::command]
pub async fn advance_step(state: State<'_, AppState>) -> Result<WizardSnapshot, String> {
    let controller = controller_from_state(&state);
    Ok(controller.advance().await)
}

#[tauri::command]
pub async fn retreat_step(state: State<'_, AppState>) -> Result<WizardSnapshot, String> {
    let controller = controller_from_state(&state);
    Ok(controller.retreat().await)
}

#[tauri::command]
pub async fn set_section_answer(
    state: State<'_, AppState>,
    section: String,
    quality: u8,
    intensity: u8,
    notes: Option<String>,
) -> Result<WizardSnapshot, String> {
    let controller = controller_from_state(&state);
    let section = Section::parse(&section).map_err(|e| e.to_string())?;
    let answer = SectionAnswer {
        quality,
        intensity,
        notes: notes.unwrap_or_default(),
    };
    Ok(controller.set_answer(section, answer).await)
}

#[tauri::command]
pub async fn set_brew(state: State<'_, AppState>, brew: Brew) -> Result<WizardSnapshot, String> {
    let controller = controller_from_state(&state);
    Ok(controller.set_brew(brew).await)
}

#[tauri::command]
pub async fn set_review_location(
    state: State<'_, AppState>,
    location_type: String,
    location_id: String,
) -> Result<WizardSnapshot, String> {
    let controller = controller_from_state(&state);
    let location =
        ReviewLocation::parse(&location_type, &location_id).map_err(|e| e.to_string())?;
    Ok(controller.set_location(location).await)
}

#[tauri::command]
pub async fn submit_review(state: State<'_, AppState>) -> Result<Review, String> {
    let controller = controller_from_state(&state);
    controller.submit().await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn reset_wizard(state: State<'_, AppState>) -> Result<WizardSnapshot, String> {
    let controller = controller_from_state(&state);
    Ok(controller.reset().await)
}
