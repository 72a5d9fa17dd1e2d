mod catalog;
mod db;
mod error;
mod settings;
mod wizard;

use std::sync::Arc;

use catalog::commands::{create_cafe, create_coffee, list_cafes, list_coffees, list_reviews};
use db::Database;
use settings::SettingsStore;
use tauri::Manager;
use wizard::{
    commands::{
        advance_step, get_wizard_state, reset_wizard, retreat_step, set_brew,
        set_review_location, set_section_answer, submit_review,
    },
    WizardController,
};

pub(crate) struct AppState {
    pub(crate) db: Database,
    pub(crate) wizard: WizardController,
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Brewlog starting up...");

    tauri::Builder::default()
        .setup(|app| {
            let result = (|| -> anyhow::Result<()> {
                let app_data_dir = app
                    .path()
                    .app_data_dir()
                    .map_err(|err| anyhow::anyhow!(err))?;
                std::fs::create_dir_all(&app_data_dir)?;

                let db_path = app_data_dir.join("brewlog.sqlite3");
                let database = Database::new(db_path)?;

                let settings_path = app_data_dir.join("settings.json");
                let settings = Arc::new(SettingsStore::new(settings_path)?);

                let wizard =
                    WizardController::new(app.handle().clone(), database.clone(), settings);

                app.manage(AppState {
                    db: database,
                    wizard,
                });

                Ok(())
            })();

            result.map_err(|err| err.into())
        })
        .invoke_handler(tauri::generate_handler![
            get_wizard_state,
            advance_step,
            retreat_step,
            set_section_answer,
            set_brew,
            set_review_location,
            submit_review,
            reset_wizard,
            create_coffee,
            list_coffees,
            create_cafe,
            list_cafes,
            list_reviews,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
