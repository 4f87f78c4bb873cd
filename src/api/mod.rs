use self::codec::Codec;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::codec::Framed;

pub mod codec;
pub mod error;
pub mod server;
pub mod service;
pub mod session;
pub mod types;

pub use error::ServiceError;
pub use server::Server;
pub use service::KeyValueService;

pub type Session<C, S> = session::Session<Framed<C, Codec>, S>;

pub fn framed<C: AsyncRead + AsyncWrite>(conn: C) -> Framed<C, Codec> {
    Framed::new(conn, Codec::default())
}
