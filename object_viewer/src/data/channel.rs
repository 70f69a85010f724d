use std::thread;

use alloy::primitives::{Address, TxHash};
use crossbeam_channel::{Receiver, Sender};
use tracing::{error, info};

use crate::data::model::{MintRequest, ObjectDescriptor};
use crate::data::{ObjectLedger, WalletProvider};
use crate::session::{Session, SessionError};

/// Requests from the UI to the session worker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionCommand {
    Connect,
    FetchAll,
    Mint(MintRequest),
}

/// Results coming back from the session worker.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    Connected { account: Address },
    ObjectsLoaded(Vec<ObjectDescriptor>),
    Minted { tx_hash: TxHash },
    Failed(SessionError),
}

/// Bevy resource holding both ends of the worker's channels.
/// Systems send commands and drain events once per frame.
#[derive(bevy::prelude::Resource)]
pub struct SessionChannel {
    pub commands: Sender<SessionCommand>,
    pub events: Receiver<SessionEvent>,
}

impl SessionChannel {
    /// Queue a command. Returns `false` if the worker is gone.
    pub fn send(&self, command: SessionCommand) -> bool {
        self.commands.send(command).is_ok()
    }
}

/// Owns a [`Session`] on a dedicated thread with its own tokio runtime.
pub struct SessionWorker;

impl SessionWorker {
    /// Spawn the worker. It runs until the command sender is dropped.
    pub fn spawn<W, L>(session: Session<W, L>) -> SessionChannel
    where
        W: WalletProvider,
        L: ObjectLedger<Signer = W::Signer>,
    {
        let (command_tx, command_rx) = crossbeam_channel::unbounded();
        let (event_tx, event_rx) = crossbeam_channel::bounded(64);

        thread::spawn(move || {
            let rt = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(rt) => rt,
                Err(err) => {
                    error!("failed to build tokio runtime: {err}");
                    return;
                }
            };
            rt.block_on(worker_loop(session, command_rx, event_tx));
        });

        SessionChannel {
            commands: command_tx,
            events: event_rx,
        }
    }
}

async fn worker_loop<W, L>(
    mut session: Session<W, L>,
    commands: Receiver<SessionCommand>,
    events: Sender<SessionEvent>,
) where
    W: WalletProvider,
    L: ObjectLedger<Signer = W::Signer>,
{
    // Commands run one at a time in arrival order.
    while let Ok(command) = commands.recv() {
        for event in handle_command(&mut session, command).await {
            if events.send(event).is_err() {
                info!("session event receiver dropped, stopping worker");
                return;
            }
        }
    }
    info!("session command sender dropped, stopping worker");
}

async fn handle_command<W, L>(
    session: &mut Session<W, L>,
    command: SessionCommand,
) -> Vec<SessionEvent>
where
    W: WalletProvider,
    L: ObjectLedger<Signer = W::Signer>,
{
    match command {
        SessionCommand::Connect => match session.connect().await {
            Ok(account) => vec![SessionEvent::Connected { account }],
            Err(err) => vec![SessionEvent::Failed(err)],
        },
        SessionCommand::FetchAll => match session.fetch_all().await {
            Ok(objects) => vec![SessionEvent::ObjectsLoaded(objects.to_vec())],
            Err(err) => vec![SessionEvent::Failed(err)],
        },
        SessionCommand::Mint(request) => match session.mint(&request).await {
            Ok(outcome) => {
                let refresh = match outcome.refresh {
                    Ok(_) => SessionEvent::ObjectsLoaded(session.objects().to_vec()),
                    Err(err) => SessionEvent::Failed(err),
                };
                vec![
                    SessionEvent::Minted {
                        tx_hash: outcome.tx_hash,
                    },
                    refresh,
                ]
            }
            Err(err) => vec![SessionEvent::Failed(err)],
        },
    }
}
