//! Frame relay example — a reader thread feeds raw socket bytes into a shared
//! reassembly buffer while the main thread consumes whole messages.
//!
//! Run with:
//!   cargo run --example frame-relay

use std::io::Read;
use std::net::{TcpListener, TcpStream};
use std::thread;

use castwire::frame::{FrameWriter, SharedFrameBuffer};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;

    let sender = thread::spawn(
        move || -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
            let mut writer = FrameWriter::new(TcpStream::connect(addr)?);
            for request_id in 1..=5 {
                let message = format!("{{\"type\":\"GET_STATUS\",\"requestId\":{request_id}}}");
                writer.send(message.as_bytes())?;
            }
            Ok(())
        },
    );

    let (mut socket, peer) = listener.accept()?;
    eprintln!("[relay] connection from {peer}");

    let buffer = SharedFrameBuffer::new();
    let feeder = {
        let buffer = buffer.clone();
        thread::spawn(move || -> std::io::Result<()> {
            // Small reads so frames arrive split across appends.
            let mut chunk = [0u8; 7];
            loop {
                let n = socket.read(&mut chunk)?;
                if n == 0 {
                    return Ok(());
                }
                buffer.append(&chunk[..n]);
            }
        })
    };

    let mut received = 0;
    while received < 5 {
        match buffer.next_message()? {
            Some(frame) => {
                received += 1;
                eprintln!(
                    "[relay] message {received}: {}",
                    String::from_utf8_lossy(&frame.payload)
                );
            }
            None => thread::yield_now(),
        }
    }

    sender
        .join()
        .expect("sender thread should not panic")
        .expect("sender should complete without error");
    feeder.join().expect("feeder thread should not panic")?;
    Ok(())
}
