use crate::db::{with_connection, Database};
use crate::error::AppError;
use crate::models::WidgetInstance;
use crate::platform::WidgetHost;
use crate::refresher;
use crate::store::WidgetStore;
use crate::validation::validate_instance_id;
use crate::widget::WidgetBundle;
use std::sync::{Arc, Mutex};
use tauri::State;

use super::{RefreshResponse, WidgetInstanceResponse, WidgetKindResponse};

#[tauri::command]
pub fn get_widget_kinds(bundle: State<WidgetBundle>) -> Result<Vec<WidgetKindResponse>, String> {
    Ok(bundle
        .kinds()
        .iter()
        .copied()
        .map(WidgetKindResponse::from)
        .collect())
}

#[tauri::command]
pub fn get_widget_instances(
    db: State<Arc<Mutex<Database>>>,
) -> Result<Vec<WidgetInstanceResponse>, String> {
    let instances = with_connection(&db, "load widget instances", WidgetInstance::find_all)?;
    Ok(instances.into_iter().map(WidgetInstanceResponse::from).collect())
}

#[tauri::command]
pub fn register_widget_instance(
    db: State<Arc<Mutex<Database>>>,
    bundle: State<WidgetBundle>,
    id: i64,
    kind: String,
) -> Result<WidgetInstanceResponse, String> {
    validate_instance_id(id)?;
    if !bundle.contains(&kind) {
        return Err(AppError::InvalidInput {
            field: "kind",
            reason: format!("unknown widget kind '{kind}'"),
        }
        .to_string());
    }

    let instance = WidgetInstance::new(id, &kind);
    with_connection(&db, "register widget instance", |conn| {
        instance.register(conn)
    })?;

    Ok(WidgetInstanceResponse::from(instance))
}

#[tauri::command]
pub fn unregister_widget_instance(
    db: State<Arc<Mutex<Database>>>,
    id: i64,
) -> Result<bool, String> {
    with_connection(&db, "unregister widget instance", |conn| {
        WidgetInstance::remove(conn, id)
    })
}

#[tauri::command]
pub fn refresh_widgets(
    db: State<Arc<Mutex<Database>>>,
    store: State<WidgetStore>,
    host: State<Arc<dyn WidgetHost>>,
) -> Result<RefreshResponse, String> {
    let outcome = refresher::refresh_all(&db, &store, host.as_ref()).map_err(String::from)?;
    Ok(RefreshResponse::from(outcome))
}
