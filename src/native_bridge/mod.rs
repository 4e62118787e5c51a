//! Stdio bridge between the native widget shims and the Rust core.
//!
//! Widget extensions run in their own OS process. The shim launches this
//! bridge and speaks length-prefixed JSON over stdin/stdout: update events
//! and instance lifecycle notifications in, refresh results and the widget
//! kind declaration out.

use crate::db::Database;
use crate::error::AppError;
use crate::heatmap::FileDecoder;
use crate::models::WidgetInstance;
use crate::platform::WidgetHost;
use crate::store::WidgetStore;
use crate::validation::validate_instance_id;
use crate::widget::{RefreshHandler, UpdateEvent, WidgetBundle, WidgetKind};
use log::warn;
use serde::{Deserialize, Serialize};
use std::io::{self, Read, Write};
use std::sync::{Arc, Mutex};

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum IncomingMessage {
    /// The OS widget host requested a refresh of these instances.
    #[serde(rename = "update")]
    Update { widget_ids: Vec<i64> },
    #[serde(rename = "widget_added")]
    WidgetAdded { id: i64, kind: String },
    #[serde(rename = "widget_removed")]
    WidgetRemoved { id: i64 },
    #[serde(rename = "request_kinds")]
    RequestKinds,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum OutgoingMessage {
    #[serde(rename = "updated")]
    Updated { processed: usize, bound: usize },
    #[serde(rename = "kinds")]
    Kinds { kinds: Vec<WidgetKind> },
    #[serde(rename = "ack")]
    Ack { ok: bool },
}

/// Message frames are length-prefixed with a little-endian u32 and capped
/// at 1 MiB, matching what the embedding shims enforce on their side.
const MAX_MESSAGE_SIZE: usize = 1024 * 1024;

fn read_frame<R: Read>(reader: &mut R) -> io::Result<IncomingMessage> {
    let mut len_bytes = [0u8; 4];
    reader.read_exact(&mut len_bytes)?;
    let len = usize::try_from(u32::from_le_bytes(len_bytes))
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    if len > MAX_MESSAGE_SIZE {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Message too large: {len} bytes (max: {MAX_MESSAGE_SIZE} bytes)"),
        ));
    }

    let mut buffer = vec![0u8; len];
    reader.read_exact(&mut buffer)?;

    serde_json::from_slice(&buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

fn write_frame<W: Write>(writer: &mut W, message: &OutgoingMessage) -> io::Result<()> {
    let json = serde_json::to_vec(message)?;
    let len = u32::try_from(json.len())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    writer.write_all(&len.to_le_bytes())?;
    writer.write_all(&json)?;
    writer.flush()?;

    Ok(())
}

pub struct WidgetBridge {
    db: Arc<Mutex<Database>>,
    store: WidgetStore,
    host: Arc<dyn WidgetHost>,
    bundle: WidgetBundle,
}

impl WidgetBridge {
    pub fn new(db: Arc<Mutex<Database>>, store: WidgetStore, host: Arc<dyn WidgetHost>) -> Self {
        Self {
            db,
            store,
            host,
            bundle: WidgetBundle::focusquest(),
        }
    }

    pub fn run(&self) -> io::Result<()> {
        let mut stdin = io::stdin().lock();
        let mut stdout = io::stdout().lock();
        loop {
            let message = read_frame(&mut stdin)?;
            let response = self.handle_message(message);
            write_frame(&mut stdout, &response)?;
        }
    }

    fn handle_message(&self, message: IncomingMessage) -> OutgoingMessage {
        match message {
            IncomingMessage::Update { widget_ids } => {
                let handler = RefreshHandler::new(&self.store, &FileDecoder, self.host.as_ref());
                let outcome = handler.handle(&UpdateEvent::new(widget_ids));
                OutgoingMessage::Updated {
                    processed: outcome.processed,
                    bound: outcome.bound,
                }
            }
            IncomingMessage::WidgetAdded { id, kind } => {
                OutgoingMessage::Ack {
                    ok: self.register_instance(id, &kind),
                }
            }
            IncomingMessage::WidgetRemoved { id } => {
                OutgoingMessage::Ack {
                    ok: self.remove_instance(id),
                }
            }
            IncomingMessage::RequestKinds => OutgoingMessage::Kinds {
                kinds: self.bundle.kinds().to_vec(),
            },
        }
    }

    fn register_instance(&self, id: i64, kind: &str) -> bool {
        if validate_instance_id(id).is_err() {
            warn!("rejecting widget registration with invalid id {id}");
            return false;
        }
        if !self.bundle.contains(kind) {
            warn!("rejecting widget registration with unknown kind '{kind}'");
            return false;
        }

        match self.db.lock() {
            Ok(db) => match WidgetInstance::new(id, kind).register(db.connection()) {
                Ok(()) => true,
                Err(e) => {
                    warn!("failed to register widget {id}: {e}");
                    false
                }
            },
            Err(_) => {
                warn!("failed to register widget {id}: {}", AppError::LockPoisoned);
                false
            }
        }
    }

    fn remove_instance(&self, id: i64) -> bool {
        match self.db.lock() {
            Ok(db) => match WidgetInstance::remove(db.connection(), id) {
                Ok(removed) => removed,
                Err(e) => {
                    warn!("failed to remove widget {id}: {e}");
                    false
                }
            },
            Err(_) => false,
        }
    }
}
