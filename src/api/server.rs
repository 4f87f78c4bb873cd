//! Network server meant to interact to service requests from clients.

use crate::{
    api::{framed, KeyValueService, Session},
    storage::Store,
};
use anyhow::Result;
use std::{future::Future, io, net::SocketAddr};
use tokio::{
    io::{AsyncRead, AsyncWrite},
    net::TcpListener,
    sync::watch,
    task::JoinSet,
};
use tracing::{error, info, info_span, warn};
use tracing_futures::Instrument;

pub struct Server<S> {
    listener: TcpListener,
    service: KeyValueService<S>,
}

impl<S> Server<S>
where
    S: Store + Clone + 'static,
{
    pub fn new(listener: TcpListener, store: S) -> Self {
        Self {
            listener,
            service: KeyValueService::new(store),
        }
    }

    /// Serves connections until `shutdown` completes or accepting fails.
    ///
    /// Either way, open sessions are told to stop after their current request
    /// and are awaited before returning.
    pub async fn run_until<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        let (stop_tx, stop_rx) = watch::channel(());
        let mut sessions = JoinSet::new();

        let outcome = loop {
            tokio::select! {
                accepted = self.listener.accept() => match accepted {
                    Ok((conn, peer_addr)) => {
                        self.handle(conn, peer_addr, stop_rx.clone(), &mut sessions)
                    }
                    Err(e) if is_transient(&e) => warn!(reason = %e, "dropped incoming connection"),
                    Err(e) => {
                        error!(reason = %e, "unable to accept connection");
                        break Err(anyhow::Error::new(e).context("unable to accept connection"));
                    }
                },
                Some(_) = sessions.join_next(), if !sessions.is_empty() => {}
                _ = &mut shutdown => {
                    info!("no longer accepting connections");
                    break Ok(());
                }
            }
        };

        drop(stop_tx);
        info!(open = sessions.len(), "waiting for open sessions");
        while sessions.join_next().await.is_some() {}

        outcome
    }

    fn handle<C>(
        &self,
        conn: C,
        peer_addr: SocketAddr,
        mut stop: watch::Receiver<()>,
        sessions: &mut JoinSet<()>,
    ) where
        C: AsyncRead + AsyncWrite + Send + Unpin + 'static,
    {
        let session = self.new_session(conn);

        sessions.spawn(
            async move {
                info!("serving new connection");

                let stopped = async move {
                    let _ = stop.changed().await;
                };

                match session.handle(stopped).await {
                    Ok(_) => info!("bye"),
                    Err(e) => error!(reason = %e, "oops"),
                }
            }
            .instrument(info_span!("connection", peer_addr = %peer_addr)),
        );
    }

    fn new_session<C>(&self, conn: C) -> Session<C, S>
    where
        C: AsyncRead + AsyncWrite + Unpin,
    {
        Session::new(framed(conn), self.service.clone())
    }
}

fn is_transient(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::ConnectionAborted
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionRefused
            | io::ErrorKind::Interrupted
    )
}
