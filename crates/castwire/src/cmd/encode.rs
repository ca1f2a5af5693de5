use std::fs;
use std::io::Write;

use castwire_frame::{FrameConfig, FrameWriter};

use crate::cmd::EncodeArgs;
use crate::exit::{frame_error, io_error, CliError, CliResult, SUCCESS, USAGE};

pub fn run(args: EncodeArgs) -> CliResult<i32> {
    let payloads = resolve_payloads(&args)?;
    let config = FrameConfig {
        max_payload_size: args.max_frame_size,
        ..FrameConfig::default()
    };

    let sink: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(fs::File::create(path).map_err(|err| {
            io_error(&format!("failed creating {}", path.display()), err)
        })?),
        None => Box::new(std::io::stdout().lock()),
    };

    let mut writer = FrameWriter::with_config(sink, config);
    for payload in &payloads {
        writer
            .send(payload)
            .map_err(|err| frame_error("encode failed", err))?;
    }
    tracing::debug!(frames = payloads.len(), "encoded frames");

    Ok(SUCCESS)
}

fn resolve_payloads(args: &EncodeArgs) -> CliResult<Vec<Vec<u8>>> {
    if let Some(path) = &args.file {
        let bytes = fs::read(path)
            .map_err(|err| io_error(&format!("failed reading {}", path.display()), err))?;
        return Ok(vec![bytes]);
    }
    if args.data.is_empty() {
        return Err(CliError::new(USAGE, "nothing to encode (use --data or --file)"));
    }
    Ok(args.data.iter().map(|d| d.as_bytes().to_vec()).collect())
}
