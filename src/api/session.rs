//! Per-connection loop feeding decoded requests to the service.

use super::{
    service::KeyValueService,
    types::{Incoming, Reply},
};
use crate::storage::Store;
use anyhow::Result;
use futures::{Sink, SinkExt, Stream, StreamExt};
use std::future::Future;
use tracing::{info, warn};

#[derive(Debug)]
pub struct Session<F, S> {
    frames: F,
    service: KeyValueService<S>,
}

impl<F, S> Session<F, S>
where
    F: Stream<Item = anyhow::Result<Incoming>> + Sink<Reply, Error = anyhow::Error> + Unpin,
    S: Store,
{
    pub fn new(frames: F, service: KeyValueService<S>) -> Self {
        Self { frames, service }
    }

    /// Serves requests until the peer hangs up or `shutdown` completes.
    ///
    /// A request already read is always answered before stopping.
    pub async fn handle<D>(mut self, shutdown: D) -> Result<()>
    where
        D: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            let incoming = tokio::select! {
                incoming = self.frames.next() => incoming,
                _ = &mut shutdown => {
                    info!("closing on shutdown");
                    break;
                }
            };

            let reply = match incoming {
                Some(incoming) => match incoming? {
                    Ok(req) => self.service.process(req).await,
                    Err(e) => Err(e),
                },
                None => break,
            };

            if let Err(e) = &reply {
                warn!(code = e.code(), reason = %e, "request rejected");
            }
            self.frames.send(reply).await?;
        }
        Ok(())
    }
}
