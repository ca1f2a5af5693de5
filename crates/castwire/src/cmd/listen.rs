use std::net::TcpListener;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use castwire_frame::{FrameConfig, FrameError, FrameReader};
use tracing::{info, warn};

use crate::cmd::{parse_duration, ListenArgs};
use crate::exit::{frame_error, io_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_frame, OutputFormat};

pub fn run(args: ListenArgs, format: OutputFormat) -> CliResult<i32> {
    if args.count == Some(0) {
        return Err(CliError::new(USAGE, "--count must be greater than zero"));
    }
    let read_timeout = args.idle_timeout.as_deref().map(parse_duration).transpose()?;
    let config = FrameConfig {
        max_payload_size: args.max_frame_size,
        read_timeout,
        ..FrameConfig::default()
    };

    let listener =
        TcpListener::bind(&args.addr).map_err(|err| io_error("bind failed", err))?;
    let local = listener
        .local_addr()
        .map_err(|err| io_error("bind failed", err))?;
    info!(addr = %local, "listening for framed connections");

    let running = Arc::new(AtomicBool::new(true));
    install_ctrlc_handler(running.clone())?;

    let mut printed = 0usize;

    while running.load(Ordering::SeqCst) {
        let (stream, peer_addr) = listener
            .accept()
            .map_err(|err| io_error("accept failed", err))?;
        info!(peer = %peer_addr, "connection accepted");
        let source = peer_addr.to_string();

        let mut reader = FrameReader::with_config_tcp(stream, config.clone())
            .map_err(|err| frame_error("socket setup failed", err))?;

        while running.load(Ordering::SeqCst) {
            let frame = match reader.read_frame() {
                Ok(frame) => frame,
                Err(FrameError::ConnectionClosed) => {
                    let trailing = reader.buffer().remaining();
                    if trailing > 0 {
                        warn!(peer = %peer_addr, trailing, "peer closed mid-frame");
                    } else {
                        info!(peer = %peer_addr, "peer disconnected");
                    }
                    break;
                }
                Err(err) => return Err(frame_error("receive failed", err)),
            };

            print_frame(&frame, printed, &source, format);
            printed = printed.saturating_add(1);

            if let Some(count) = args.count {
                if printed >= count {
                    return Ok(SUCCESS);
                }
            }
        }
    }

    Ok(SUCCESS)
}

fn install_ctrlc_handler(running: Arc<AtomicBool>) -> CliResult<()> {
    ctrlc::set_handler(move || {
        running.store(false, Ordering::SeqCst);
    })
    .map_err(|err| {
        CliError::new(
            crate::exit::INTERNAL,
            format!("signal handler setup failed: {err}"),
        )
    })
}
