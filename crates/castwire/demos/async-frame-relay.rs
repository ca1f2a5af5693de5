//! Async frame relay — echoes every frame back over a tokio TCP connection
//! using `CastCodec`.
//!
//! Run with:
//!   cargo run --example async-frame-relay --features async

use bytes::Bytes;
use castwire::frame::{CastCodec, FrameError};
use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio_util::codec::Framed;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    let server = tokio::spawn(async move {
        let (socket, peer) = listener.accept().await?;
        eprintln!("[server] connection from {peer}");
        let mut framed = Framed::new(socket, CastCodec::new());
        while let Some(frame) = framed.next().await {
            let frame = frame?;
            framed.send(frame.payload).await?;
        }
        Ok::<_, FrameError>(())
    });

    let mut client = Framed::new(TcpStream::connect(addr).await?, CastCodec::new());
    for message in ["{\"type\":\"PING\"}", "{\"type\":\"CONNECT\"}"] {
        client.send(Bytes::from_static(message.as_bytes())).await?;
        if let Some(reply) = client.next().await {
            eprintln!(
                "[client] echoed: {}",
                String::from_utf8_lossy(&reply?.payload)
            );
        }
    }
    drop(client);

    server.await??;
    Ok(())
}
