//! Session view: what the panel shows, fed by session worker events.

use alloy::primitives::Address;
use alloy_chains::Chain;
use bevy::prelude::*;

use crate::data::{ObjectDescriptor, SessionChannel, SessionCommand, SessionEvent};
use crate::scene::SceneObjects;

const MAX_EVENTS_PER_FRAME: usize = 8;

/// Last message shown under the form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StatusLine {
    Idle,
    Info(String),
    Error(String),
}

/// UI-side mirror of the session. The worker owns the real state.
#[derive(Resource, Debug)]
pub struct SessionView {
    pub account: Option<Address>,
    pub chain: Chain,
    pub object_count: usize,
    pub status: StatusLine,
}

impl SessionView {
    pub fn new(chain: Chain) -> Self {
        Self {
            account: None,
            chain,
            object_count: 0,
            status: StatusLine::Idle,
        }
    }

    pub fn account_label(&self) -> String {
        match self.account {
            Some(account) => account.to_string(),
            None => "Not connected".to_string(),
        }
    }

    /// Queue a command; a dead worker is reported on the status line.
    pub fn dispatch(&mut self, channel: &SessionChannel, command: SessionCommand) {
        let pending = match &command {
            SessionCommand::Connect => "Connecting wallet...".to_string(),
            SessionCommand::FetchAll => "Loading objects...".to_string(),
            SessionCommand::Mint(request) => format!("Minting {:?}...", request.name),
        };
        self.status = if channel.send(command) {
            StatusLine::Info(pending)
        } else {
            error!("session worker is not running");
            StatusLine::Error("Session worker stopped; restart the viewer.".to_string())
        };
    }

    /// Fold one worker event into the view. Returns loaded objects, if any.
    pub fn apply(&mut self, event: SessionEvent) -> Option<Vec<ObjectDescriptor>> {
        match event {
            SessionEvent::Connected { account } => {
                self.account = Some(account);
                self.status = StatusLine::Info(format!("Connected as {account}"));
                None
            }
            SessionEvent::ObjectsLoaded(objects) => {
                self.object_count = objects.len();
                self.status = StatusLine::Info(format!("Loaded {} objects", objects.len()));
                Some(objects)
            }
            SessionEvent::Minted { tx_hash } => {
                self.status = StatusLine::Info(format!("Minted in {tx_hash}"));
                None
            }
            SessionEvent::Failed(err) => {
                self.status = StatusLine::Error(err.to_string());
                None
            }
        }
    }
}

pub fn session_plugin(app: &mut App) {
    app.add_systems(Startup, connect_on_startup)
        .add_systems(Update, ingest_session_events);
}

fn connect_on_startup(channel: Res<SessionChannel>, mut view: ResMut<SessionView>) {
    view.dispatch(&channel, SessionCommand::Connect);
}

/// Drain worker events and hand loaded objects to the scene.
pub fn ingest_session_events(
    channel: Res<SessionChannel>,
    mut view: ResMut<SessionView>,
    mut scene_objects: ResMut<SceneObjects>,
) {
    let mut received = 0usize;
    while received < MAX_EVENTS_PER_FRAME {
        match channel.events.try_recv() {
            Ok(event) => {
                if let Some(objects) = view.apply(event) {
                    scene_objects.replace(objects);
                }
                received += 1;
            }
            Err(_) => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::TxHash;

    use super::*;
    use crate::session::SessionError;

    fn view() -> SessionView {
        SessionView::new(Chain::from_id(31337))
    }

    #[test]
    fn disconnected_label_until_connected() {
        let mut view = view();
        assert_eq!(view.account_label(), "Not connected");

        view.apply(SessionEvent::Connected {
            account: Address::repeat_byte(0x42),
        });

        assert_eq!(view.account_label(), Address::repeat_byte(0x42).to_string());
    }

    #[test]
    fn failures_land_on_the_status_line() {
        let mut view = view();

        view.apply(SessionEvent::Failed(SessionError::ContractNotReady));

        assert_eq!(
            view.status,
            StatusLine::Error("contract not loaded yet".into())
        );
        assert_eq!(view.account, None);
    }

    #[test]
    fn mint_message_includes_hash() {
        let mut view = view();

        let loaded = view.apply(SessionEvent::Minted {
            tx_hash: TxHash::repeat_byte(1),
        });

        assert!(loaded.is_none());
        assert!(matches!(
            view.status,
            StatusLine::Info(ref msg) if msg.starts_with("Minted in 0x0101")
        ));
    }

    #[test]
    fn ingest_replaces_scene_objects() {
        let (command_tx, _command_rx) = crossbeam_channel::unbounded();
        let (event_tx, event_rx) = crossbeam_channel::unbounded();
        let mut app = App::new();
        app.insert_resource(SessionChannel {
            commands: command_tx,
            events: event_rx,
        })
        .insert_resource(view())
        .init_resource::<SceneObjects>()
        .add_systems(Update, ingest_session_events);

        event_tx
            .send(SessionEvent::ObjectsLoaded(vec![ObjectDescriptor::sized(
                "a", 1.0, 1.0, 1.0,
            )]))
            .unwrap();
        event_tx
            .send(SessionEvent::ObjectsLoaded(Vec::new()))
            .unwrap();
        app.update();

        let objects = app.world().resource::<SceneObjects>();
        assert!(objects.objects().is_empty());
        assert_eq!(objects.generation(), 2);
        assert_eq!(app.world().resource::<SessionView>().object_count, 0);
    }

    #[test]
    fn dispatch_to_dead_worker_reports_error() {
        let (command_tx, command_rx) = crossbeam_channel::unbounded();
        let (_event_tx, event_rx) = crossbeam_channel::unbounded();
        drop(command_rx);
        let channel = SessionChannel {
            commands: command_tx,
            events: event_rx,
        };
        let mut view = view();

        view.dispatch(&channel, SessionCommand::FetchAll);

        assert!(matches!(view.status, StatusLine::Error(_)));
    }
}
