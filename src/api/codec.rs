//! Codec for the wire protocol through which requests/replies are exchanged.
//!
//! The wire protocol is optimized for simplicity, where both request
//! and reply are line-delimited and further split by whitespaces into
//! components. Keys never contain whitespaces. The value of `SET` takes
//! the rest of the line, so it may contain whitespaces or be empty.
//!
//! # Request
//!
//! - GET
//!     - `GET $key\n`
//! - SET
//!     - `SET $key $value\n`
//! - DEL
//!     - `DEL $key\n`
//! - HEALTH
//!     - `HEALTH\n`
//!
//! A line longer than [`MAX_LINE_LENGTH`] bytes is a framing error.
//!
//! # Reply
//!
//! - GET
//!     - `OKAY FOUND $value\n`
//!     - `OKAY MISSING\n`
//! - SET / DEL
//!     - `OKAY\n`
//!     - `FAIL $error\n`
//! - HEALTH
//!     - `OKAY $status $timestamp\n`
//! - Any, when malformed or rejected by the service
//!     - `ERROR $code $message\n`

use super::{
    error::ServiceError,
    types::{GetResponse, HealthResponse, Incoming, Reply, Request, Response, WriteResponse},
};
use anyhow::{bail, ensure, Context, Result};
use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder, LinesCodec};

pub const MAX_LINE_LENGTH: usize = 64 * 1024;

#[derive(Debug)]
pub struct Codec {
    lines: LinesCodec,
}

impl Default for Codec {
    fn default() -> Self {
        Self {
            lines: LinesCodec::new_with_max_length(MAX_LINE_LENGTH),
        }
    }
}

impl Decoder for Codec {
    type Item = Incoming;

    type Error = anyhow::Error;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let incoming = self
            .lines
            .decode(src)
            .context("unable to decode request line")?
            .map(|line| {
                Request::from_wire(&line)
                    .map_err(|e| ServiceError::InvalidArgument(e.to_string()))
            });
        Ok(incoming)
    }
}

impl Encoder<Reply> for Codec {
    type Error = anyhow::Error;

    fn encode(&mut self, item: Reply, dst: &mut BytesMut) -> Result<(), Self::Error> {
        self.lines
            .encode(reply_into_wire(item), dst)
            .context("unable to encode reply line")
    }
}

impl Request {
    fn from_wire(line: &str) -> Result<Self> {
        let (command, args) = match line.split_once(' ') {
            Some((command, args)) => (command, Some(args)),
            None => (line, None),
        };

        match command {
            "GET" => {
                let key = single_key(args, command)?;

                Ok(Request::Get { key })
            }
            "SET" => {
                let (key, value) = args
                    .context("missing key from SET command")?
                    .split_once(' ')
                    .context("missing value from SET command")?;

                Ok(Request::Set {
                    key: key.into(),
                    value: value.into(),
                })
            }
            "DEL" => {
                let key = single_key(args, command)?;

                Ok(Request::Delete { key })
            }
            "HEALTH" => {
                ensure!(args.is_none(), "unexpected arguments to HEALTH command");

                Ok(Request::Health)
            }
            _ => bail!("unrecognized command: {}", command),
        }
    }
}

fn single_key(args: Option<&str>, command: &str) -> Result<String> {
    let key = args.with_context(|| format!("missing key from {} command", command))?;
    ensure!(
        !key.contains(' '),
        "unexpected arguments to {} command",
        command
    );
    Ok(key.into())
}

fn reply_into_wire(reply: Reply) -> String {
    match reply {
        Ok(response) => response.into_wire(),
        Err(e) => format!("ERROR {} {}", e.code(), single_line(e.message())),
    }
}

impl Response {
    fn into_wire(self) -> String {
        match self {
            Response::Get(GetResponse { value, found: true }) => format!("OKAY FOUND {}", value),
            Response::Get(GetResponse { found: false, .. }) => "OKAY MISSING".into(),
            Response::Set(write) | Response::Delete(write) => write.into_wire(),
            Response::Health(HealthResponse { status, timestamp }) => {
                format!("OKAY {} {}", status, timestamp)
            }
        }
    }
}

impl WriteResponse {
    fn into_wire(self) -> String {
        if self.success {
            "OKAY".into()
        } else {
            format!("FAIL {}", single_line(&self.error))
        }
    }
}

fn single_line(message: &str) -> String {
    message.replace(|c: char| c == '\r' || c == '\n', " ")
}
