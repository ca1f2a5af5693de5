use std::fs;
use std::net::TcpStream;

use castwire_frame::{FrameConfig, FrameReader, FrameWriter};
use tracing::debug;

use crate::cmd::{parse_duration, SendArgs};
use crate::exit::{frame_error, io_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_frame, OutputFormat};

pub fn run(args: SendArgs, format: OutputFormat) -> CliResult<i32> {
    let wait_timeout = parse_duration(&args.wait_timeout)?;
    let config = FrameConfig {
        max_payload_size: args.max_frame_size,
        read_timeout: Some(wait_timeout),
        write_timeout: Some(wait_timeout),
        ..FrameConfig::default()
    };
    let payload = resolve_payload(&args)?;

    let stream =
        TcpStream::connect(&args.addr).map_err(|err| io_error("connect failed", err))?;
    let read_half = stream
        .try_clone()
        .map_err(|err| io_error("connect failed", err))?;

    let mut writer = FrameWriter::with_config_tcp(stream, config.clone())
        .map_err(|err| frame_error("socket setup failed", err))?;
    writer
        .send(&payload)
        .map_err(|err| frame_error("send failed", err))?;
    debug!(addr = %args.addr, size = payload.len(), "frame sent");

    if args.wait {
        let mut reader = FrameReader::with_config_tcp(read_half, config)
            .map_err(|err| frame_error("socket setup failed", err))?;
        let frame = reader
            .read_frame()
            .map_err(|err| frame_error("receive failed", err))?;
        print_frame(&frame, 0, &args.addr, format);
    }

    Ok(SUCCESS)
}

fn resolve_payload(args: &SendArgs) -> CliResult<Vec<u8>> {
    if let Some(json) = &args.json {
        serde_json::from_str::<serde_json::Value>(json)
            .map_err(|err| CliError::new(USAGE, format!("--json is not valid JSON: {err}")))?;
        return Ok(json.as_bytes().to_vec());
    }
    if let Some(data) = &args.data {
        return Ok(data.as_bytes().to_vec());
    }
    if let Some(path) = &args.file {
        return fs::read(path)
            .map_err(|err| io_error(&format!("failed reading {}", path.display()), err));
    }
    Ok(Vec::new())
}
